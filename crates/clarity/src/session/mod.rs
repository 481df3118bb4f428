//! Analysis of a submission end to end: local comparison plus both remote fetches, with
//! results of superseded submissions dropped instead of shown.

mod tracker;

pub use tracker::{SubmissionTicket, SubmissionTracker};

use crate::pay::{ComparisonEngine, ComparisonReport, SubmissionError, UserFormSubmission};
use crate::remote::{
    FeedbackProvider, FeedbackResponse, PredictionComparison, PredictionProvider, RemoteOutcome,
    PREDICTION_UNAVAILABLE,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Results of the two remote collaborators; each settles independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteInsights {
    pub feedback: RemoteOutcome<FeedbackResponse>,
    pub prediction: RemoteOutcome<PredictionComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<SubmissionTicket>,
    pub submission: UserFormSubmission,
    #[serde(flatten)]
    pub comparison: ComparisonReport,
    #[serde(flatten)]
    pub remote: RemoteInsights,
}

/// Composes the comparison engine with the remote providers.
#[derive(Clone)]
pub struct Analyzer {
    engine: ComparisonEngine,
    feedback: Arc<dyn FeedbackProvider>,
    prediction: Arc<dyn PredictionProvider>,
}

impl Analyzer {
    pub fn new(
        engine: ComparisonEngine,
        feedback: Arc<dyn FeedbackProvider>,
        prediction: Arc<dyn PredictionProvider>,
    ) -> Self {
        Self {
            engine,
            feedback,
            prediction,
        }
    }

    pub fn engine(&self) -> &ComparisonEngine {
        &self.engine
    }

    /// Pure local derivation; never fails for a validated submission.
    pub fn compare(&self, submission: &UserFormSubmission) -> ComparisonReport {
        let report = ComparisonReport::from_metrics(self.engine.compute_comparisons(submission));
        debug!(
            job_role = %submission.job_role,
            metrics = report.comparisons.len(),
            "computed pay comparison"
        );
        report
    }

    /// Runs both fetches concurrently; one failing never affects the other.
    pub async fn fetch_remote(&self, submission: &UserFormSubmission) -> RemoteInsights {
        let (feedback, prediction) = tokio::join!(
            self.feedback.feedback(submission),
            self.prediction.predict(submission)
        );

        let feedback = match feedback {
            Ok(response) => RemoteOutcome::ready(response),
            Err(err) => {
                warn!(error = %err, "AI feedback unavailable");
                RemoteOutcome::error(err.to_string())
            }
        };

        let prediction = match prediction {
            Ok(predicted) => {
                RemoteOutcome::ready(PredictionComparison::new(submission.salary, predicted))
            }
            Err(err) => {
                warn!(error = %err, "salary prediction unavailable");
                RemoteOutcome::error(PREDICTION_UNAVAILABLE)
            }
        };

        RemoteInsights {
            feedback,
            prediction,
        }
    }

    /// One-shot analysis with no session bookkeeping.
    pub async fn analyze(
        &self,
        submission: UserFormSubmission,
    ) -> Result<AnalysisReport, SubmissionError> {
        submission.validate()?;
        let comparison = self.compare(&submission);
        let remote = self.fetch_remote(&submission).await;

        Ok(AnalysisReport {
            ticket: None,
            submission,
            comparison,
            remote,
        })
    }
}

/// Result of a tracked submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Settled(AnalysisReport),
    /// A newer submission started before this one's fetches finished.
    Superseded {
        ticket: SubmissionTicket,
        latest_generation: u64,
    },
}

#[derive(Debug, Default)]
struct SessionState {
    current: Option<CurrentSubmission>,
    settled: Option<AnalysisReport>,
}

#[derive(Debug)]
struct CurrentSubmission {
    submission: UserFormSubmission,
    comparison: ComparisonReport,
}

/// Per-user analysis state: the latest submission, its memoized comparison, and the last
/// report whose fetches settled while it was still current.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    tracker: SubmissionTracker,
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn submit(
        &self,
        analyzer: &Analyzer,
        submission: UserFormSubmission,
    ) -> Result<SessionOutcome, SubmissionError> {
        submission.validate()?;

        // Ticket issue and settlement both happen under the state lock, so a stale analysis
        // can never overwrite a fresher settled report.
        let (ticket, comparison) = {
            let mut state = self.state();
            let comparison = match &state.current {
                Some(current) if current.submission == submission => current.comparison.clone(),
                _ => analyzer.compare(&submission),
            };
            state.current = Some(CurrentSubmission {
                submission: submission.clone(),
                comparison: comparison.clone(),
            });
            (self.tracker.begin(), comparison)
        };

        let remote = analyzer.fetch_remote(&submission).await;

        let mut state = self.state();
        let report = AnalysisReport {
            ticket: Some(ticket),
            submission,
            comparison,
            remote,
        };

        match self.tracker.settle(ticket, report) {
            Some(report) => {
                state.settled = Some(report.clone());
                Ok(SessionOutcome::Settled(report))
            }
            None => {
                let latest_generation = self.tracker.current_generation();
                warn!(
                    generation = ticket.generation(),
                    latest_generation, "discarding results of superseded submission"
                );
                Ok(SessionOutcome::Superseded {
                    ticket,
                    latest_generation,
                })
            }
        }
    }

    pub fn latest(&self) -> Option<AnalysisReport> {
        self.state().settled.clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.tracker.current_generation()
    }
}
