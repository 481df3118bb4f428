use super::{PredictionProvider, RemoteError};
use crate::pay::report::{format_currency, format_percent};
use crate::pay::{percent_difference, UserFormSubmission};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shown instead of the underlying failure whenever a prediction cannot be produced.
pub const PREDICTION_UNAVAILABLE: &str = "Unable to fetch salary prediction. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest<'a> {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Gender")]
    pub gender: &'a str,
    #[serde(rename = "Education Level")]
    pub education_level: &'a str,
    #[serde(rename = "Years of Experience")]
    pub years_of_experience: f64,
    #[serde(rename = "JobFamily")]
    pub job_family: &'a str,
}

impl<'a> From<&'a UserFormSubmission> for PredictionRequest<'a> {
    fn from(submission: &'a UserFormSubmission) -> Self {
        Self {
            age: submission.age,
            gender: &submission.gender,
            education_level: &submission.education,
            years_of_experience: submission.experience,
            job_family: &submission.job_role,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    predicted_salary: f64,
}

/// API Gateway proxies either pass the model output straight through or wrap it in a
/// Lambda-style envelope whose body is JSON encoded as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionPayload {
    Direct(PredictionBody),
    Envelope(LambdaEnvelope),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LambdaEnvelope {
    #[serde(default)]
    status_code: Option<u16>,
    body: EnvelopeBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnvelopeBody {
    Encoded(String),
    Inline(PredictionBody),
}

/// Extracts `predicted_salary` from either response shape.
pub fn parse_prediction(raw: &str) -> Result<f64, RemoteError> {
    let payload: PredictionPayload = serde_json::from_str(raw)?;

    let body = match payload {
        PredictionPayload::Direct(body) => body,
        PredictionPayload::Envelope(envelope) => {
            if let Some(code) = envelope.status_code {
                if !(200..300).contains(&code) {
                    return Err(RemoteError::Envelope(code));
                }
            }
            match envelope.body {
                EnvelopeBody::Encoded(encoded) => serde_json::from_str(&encoded)?,
                EnvelopeBody::Inline(body) => body,
            }
        }
    };

    Ok(body.predicted_salary)
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
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
impl PredictionProvider for PredictionClient {
    async fn predict(&self, submission: &UserFormSubmission) -> Result<f64, RemoteError> {
        debug!(endpoint = %self.endpoint, "requesting salary prediction");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&PredictionRequest::from(submission))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "salary prediction endpoint rejected request");
            return Err(RemoteError::from_status(status.as_u16(), &body));
        }

        parse_prediction(&body).map_err(|err| {
            warn!(error = %err, "salary prediction response could not be decoded");
            err
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionVerdict {
    Overpaid,
    Underpaid,
    Fair,
}

impl PredictionVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overpaid => "Above prediction",
            Self::Underpaid => "Below prediction",
            Self::Fair => "Matches prediction",
        }
    }
}

/// The user's salary set against the model's prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionComparison {
    pub salary: f64,
    pub predicted_salary: f64,
    pub difference: f64,
    pub percent_difference: f64,
    pub display_difference: String,
    pub display_percent: String,
    pub verdict: PredictionVerdict,
    pub message: String,
}

impl PredictionComparison {
    pub fn new(salary: f64, predicted_salary: f64) -> Self {
        let difference = salary - predicted_salary;
        let percent = percent_difference(salary, predicted_salary);

        let verdict = if difference > 0.0 {
            PredictionVerdict::Overpaid
        } else if difference < 0.0 {
            PredictionVerdict::Underpaid
        } else {
            PredictionVerdict::Fair
        };

        let gap = format_currency(difference.abs());
        let message = match verdict {
            PredictionVerdict::Overpaid => {
                format!("You are earning {gap} more than the AI model predicts for your profile.")
            }
            PredictionVerdict::Underpaid => {
                format!("You are earning {gap} less than the AI model predicts for your profile.")
            }
            PredictionVerdict::Fair => "Your salary matches the AI prediction.".to_string(),
        };

        let sign = if difference > 0.0 { "+" } else { "" };

        Self {
            salary,
            predicted_salary,
            difference,
            percent_difference: percent,
            display_difference: format!("{sign}{}", format_currency(difference)),
            display_percent: format_percent(percent),
            verdict,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direct_prediction() {
        assert_eq!(parse_prediction(r#"{"predicted_salary": 61234.5}"#).unwrap(), 61234.5);
    }

    #[test]
    fn parses_enveloped_prediction() {
        let raw = r#"{"statusCode":200,"body":"{\"predicted_salary\": 70500}"}"#;
        assert_eq!(parse_prediction(raw).unwrap(), 70500.0);
    }

    #[test]
    fn accepts_inline_envelope_body() {
        let raw = r#"{"statusCode":200,"body":{"predicted_salary": 52000}}"#;
        assert_eq!(parse_prediction(raw).unwrap(), 52000.0);
    }

    #[test]
    fn rejects_failed_envelope() {
        let raw = r#"{"statusCode":500,"body":"{\"error\":\"model offline\"}"}"#;
        let err = parse_prediction(raw).expect_err("envelope failure surfaces");
        assert!(matches!(err, RemoteError::Envelope(500)));
    }

    #[test]
    fn rejects_unrecognized_shapes() {
        assert!(parse_prediction(r#"{"salary": 1}"#).is_err());
        assert!(parse_prediction(r#"{"statusCode":200,"body":"not json"}"#).is_err());
        assert!(parse_prediction("").is_err());
    }

    #[test]
    fn request_uses_model_feature_names() {
        let submission = UserFormSubmission {
            job_role: "Manager".to_string(),
            salary: 60000.0,
            employment_type: "Full-time".to_string(),
            gender: "Non-binary".to_string(),
            age: 38.0,
            experience: 9.0,
            children: 1,
            ethnicity: "Mixed".to_string(),
            education: "Master's".to_string(),
        };

        let value = serde_json::to_value(PredictionRequest::from(&submission)).expect("serializes");
        assert_eq!(value["Age"], 38.0);
        assert_eq!(value["Education Level"], "Master's");
        assert_eq!(value["Years of Experience"], 9.0);
        assert_eq!(value["JobFamily"], "Manager");
    }

    #[test]
    fn comparison_describes_underpayment() {
        let comparison = PredictionComparison::new(50000.0, 62500.0);
        assert_eq!(comparison.verdict, PredictionVerdict::Underpaid);
        assert_eq!(comparison.difference, -12500.0);
        assert_eq!(comparison.display_difference, "-£12,500");
        assert_eq!(comparison.display_percent, "-20.0%");
        assert_eq!(
            comparison.message,
            "You are earning £12,500 less than the AI model predicts for your profile."
        );
    }

    #[test]
    fn comparison_describes_overpayment_and_parity() {
        let over = PredictionComparison::new(66000.0, 60000.0);
        assert_eq!(over.verdict, PredictionVerdict::Overpaid);
        assert_eq!(over.display_difference, "+£6,000");
        assert_eq!(over.display_percent, "+10.0%");

        let fair = PredictionComparison::new(60000.0, 60000.0);
        assert_eq!(fair.verdict, PredictionVerdict::Fair);
        assert_eq!(fair.message, "Your salary matches the AI prediction.");
        assert_eq!(fair.display_difference, "£0");
    }
}
