use serde::{Deserialize, Serialize};

pub const MINIMUM_AGE: f64 = 16.0;

/// Validated answers from a single form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormSubmission {
    pub job_role: String,
    pub salary: f64,
    pub employment_type: String,
    pub gender: String,
    pub age: f64,
    pub experience: f64,
    pub children: u32,
    pub ethnicity: String,
    pub education: String,
}

impl UserFormSubmission {
    /// Enforces the same rules as the form: every field present, numbers in range.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        let categorical = [
            ("jobRole", &self.job_role),
            ("employmentType", &self.employment_type),
            ("gender", &self.gender),
            ("ethnicity", &self.ethnicity),
            ("education", &self.education),
        ];
        for (field, value) in categorical {
            if value.trim().is_empty() {
                return Err(SubmissionError::MissingField(field));
            }
        }

        check_number("salary", self.salary, 0.0)?;
        check_number("age", self.age, MINIMUM_AGE)?;
        check_number("experience", self.experience, 0.0)?;

        Ok(())
    }
}

fn check_number(field: &'static str, value: f64, minimum: f64) -> Result<(), SubmissionError> {
    if !value.is_finite() {
        return Err(SubmissionError::NotANumber {
            field,
            value: value.to_string(),
        });
    }
    if value < minimum {
        return Err(SubmissionError::BelowMinimum {
            field,
            minimum,
            found: value,
        });
    }
    Ok(())
}

/// Raw form values exactly as typed, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub job_role: String,
    pub salary: String,
    pub employment_type: String,
    pub gender: String,
    pub age: String,
    pub experience: String,
    pub children: String,
    pub ethnicity: String,
    pub education: String,
}

impl FormState {
    pub fn into_submission(self) -> Result<UserFormSubmission, SubmissionError> {
        let submission = UserFormSubmission {
            job_role: required("jobRole", self.job_role)?,
            salary: parse_number("salary", &self.salary)?,
            employment_type: required("employmentType", self.employment_type)?,
            gender: required("gender", self.gender)?,
            age: parse_number("age", &self.age)?,
            experience: parse_number("experience", &self.experience)?,
            children: parse_count("children", &self.children)?,
            ethnicity: required("ethnicity", self.ethnicity)?,
            education: required("education", self.education)?,
        };

        submission.validate()?;
        Ok(submission)
    }
}

fn required(field: &'static str, value: String) -> Result<String, SubmissionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, SubmissionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::MissingField(field));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SubmissionError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32, SubmissionError> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(SubmissionError::BelowMinimum {
            field,
            minimum: 0.0,
            found: value,
        });
    }
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(SubmissionError::NotAWholeNumber {
            field,
            value: raw.trim().to_string(),
        });
    }
    Ok(value as u32)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be a number (found '{value}')")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be a whole number (found '{value}')")]
    NotAWholeNumber { field: &'static str, value: String },
    #[error("{field} must be at least {minimum} (found {found})")]
    BelowMinimum {
        field: &'static str,
        minimum: f64,
        found: f64,
    },
}

/// Choices the form offers; job role is a suggestion list over free text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub job_roles: Vec<&'static str>,
    pub employment_types: Vec<&'static str>,
    pub genders: Vec<&'static str>,
    pub ethnicities: Vec<&'static str>,
    pub education_levels: Vec<&'static str>,
}

impl FormOptions {
    pub fn standard() -> Self {
        Self {
            job_roles: vec!["Software Engineer", "Data Analyst", "Manager"],
            employment_types: vec!["Full-time", "Part-time"],
            genders: vec!["Male", "Female", "Non-binary"],
            ethnicities: vec!["White", "Black", "Mixed", "Arab", "Asian", "Other"],
            education_levels: vec!["Master's", "PhD", "Bachelor's", "High School"],
        }
    }
}
