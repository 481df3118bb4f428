//! Clients for the external AI feedback and salary-prediction endpoints.
//!
//! Both endpoints are black boxes: one POST per submission, no retries. Failures are reduced
//! to a single human-readable message and never touch the locally derived comparison.

mod feedback;
mod prediction;

pub use feedback::{FeedbackClient, FeedbackRequest, FeedbackResponse};
pub use prediction::{
    parse_prediction, PredictionClient, PredictionComparison, PredictionRequest,
    PredictionVerdict, PREDICTION_UNAVAILABLE,
};

use crate::config::RemoteConfig;
use crate::pay::UserFormSubmission;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Display is the message shown to the user, taken from the response body when present.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("prediction envelope reported status {0}")]
    Envelope(u16),
}

impl RemoteError {
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! Status: {status}"));

        Self::Status { status, message }
    }
}

#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    async fn feedback(
        &self,
        submission: &UserFormSubmission,
    ) -> Result<FeedbackResponse, RemoteError>;
}

#[async_trait]
pub trait PredictionProvider: Send + Sync {
    /// Predicted annual salary for the submission's profile.
    async fn predict(&self, submission: &UserFormSubmission) -> Result<f64, RemoteError>;
}

/// Settled state of one remote fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RemoteOutcome<T> {
    Ready { value: T, fetched_at: DateTime<Utc> },
    Error { message: String },
}

impl<T> RemoteOutcome<T> {
    pub fn ready(value: T) -> Self {
        Self::Ready {
            value,
            fetched_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ready { value, .. } => Some(value),
            Self::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Ready { .. } => None,
            Self::Error { message } => Some(message),
        }
    }
}

/// Shared HTTP client for both endpoints.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, RemoteError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Both endpoint clients wired from configuration over one connection pool.
pub fn clients_from_config(
    config: &RemoteConfig,
) -> Result<(FeedbackClient, PredictionClient), RemoteError> {
    let http = build_http_client(config.request_timeout())?;
    Ok((
        FeedbackClient::new(http.clone(), config.feedback_url.clone()),
        PredictionClient::new(http, config.prediction_url.clone()),
    ))
}
