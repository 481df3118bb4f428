use super::{FeedbackProvider, RemoteError};
use crate::pay::report::format_percent;
use crate::pay::UserFormSubmission;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

/// Payload accepted by the feedback endpoint; education is not part of its contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest<'a> {
    pub job_role: &'a str,
    pub salary: f64,
    pub employment_type: &'a str,
    pub gender: &'a str,
    pub age: f64,
    pub experience: f64,
    pub children: u32,
    pub ethnicity: &'a str,
}

impl<'a> From<&'a UserFormSubmission> for FeedbackRequest<'a> {
    fn from(submission: &'a UserFormSubmission) -> Self {
        Self {
            job_role: &submission.job_role,
            salary: submission.salary,
            employment_type: &submission.employment_type,
            gender: &submission.gender,
            age: submission.age,
            experience: submission.experience,
            children: submission.children,
            ethnicity: &submission.ethnicity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_gap_percentage: Option<f64>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub factors: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub recommendations: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

impl FeedbackResponse {
    pub fn pay_gap_display(&self) -> Option<String> {
        self.pay_gap_percentage.map(format_percent)
    }
}

#[derive(Debug, Clone)]
pub struct FeedbackClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FeedbackClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FeedbackProvider for FeedbackClient {
    async fn feedback(
        &self,
        submission: &UserFormSubmission,
    ) -> Result<FeedbackResponse, RemoteError> {
        debug!(endpoint = %self.endpoint, "requesting AI feedback");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&FeedbackRequest::from(submission))
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "AI feedback request failed");
                RemoteError::from(err)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = RemoteError::from_status(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "AI feedback endpoint rejected request");
            return Err(err);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_endpoint_field_names() {
        let submission = UserFormSubmission {
            job_role: "Data Analyst".to_string(),
            salary: 48000.0,
            employment_type: "Part-time".to_string(),
            gender: "Female".to_string(),
            age: 41.0,
            experience: 12.0,
            children: 2,
            ethnicity: "Asian".to_string(),
            education: "PhD".to_string(),
        };

        let value = serde_json::to_value(FeedbackRequest::from(&submission)).expect("serializes");
        assert_eq!(value["jobRole"], "Data Analyst");
        assert_eq!(value["employmentType"], "Part-time");
        assert_eq!(value["children"], 2);
        assert!(value.get("education").is_none());
    }

    #[test]
    fn response_tolerates_missing_optional_fields() {
        let response: FeedbackResponse =
            serde_json::from_str(r#"{"analysis":"Paid fairly.","status":"success"}"#)
                .expect("decodes");
        assert_eq!(response.analysis, "Paid fairly.");
        assert!(response.factors.is_empty());
        assert!(response.pay_gap_display().is_none());
    }

    #[test]
    fn response_treats_null_lists_as_empty() {
        let response: FeedbackResponse = serde_json::from_str(
            r#"{"analysis":"ok","status":"success","payGapPercentage":null,"error":null,"factors":null,"recommendations":null}"#,
        )
        .expect("null optional fields decode");
        assert_eq!(response.analysis, "ok");
        assert!(response.factors.is_empty());
        assert!(response.recommendations.is_empty());
        assert!(response.error.is_none());
    }

    #[test]
    fn response_without_status_still_decodes() {
        let response: FeedbackResponse =
            serde_json::from_str(r#"{"analysis":"Paid fairly.","factors":["Role"]}"#)
                .expect("status is optional");
        assert!(response.status.is_empty());
        assert_eq!(response.factors, vec!["Role".to_string()]);
    }

    #[test]
    fn pay_gap_display_is_signed() {
        let response: FeedbackResponse = serde_json::from_str(
            r#"{"analysis":"a","status":"success","payGapPercentage":-7.25,"factors":["Role"]}"#,
        )
        .expect("decodes");
        assert_eq!(response.pay_gap_display().as_deref(), Some("-7.3%"));
        assert_eq!(response.factors, vec!["Role".to_string()]);
    }
}
