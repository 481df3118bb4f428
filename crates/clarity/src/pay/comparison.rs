use super::banding::{AgeBand, ChildrenBand, ExperienceBand};
use super::benchmarks::{BenchmarkDimension, BenchmarkTables};
use super::submission::UserFormSubmission;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One axis of the pay comparison, in the order results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonDimension {
    JobRole,
    EmploymentType,
    Gender,
    Age,
    Experience,
    Children,
    Ethnicity,
}

impl ComparisonDimension {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::JobRole,
            Self::EmploymentType,
            Self::Gender,
            Self::Age,
            Self::Experience,
            Self::Children,
            Self::Ethnicity,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::JobRole => "jobRole",
            Self::EmploymentType => "employmentType",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Experience => "experience",
            Self::Children => "children",
            Self::Ethnicity => "ethnicity",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::JobRole => "Average salary for your selected role (mock data).",
            Self::EmploymentType => "Average salary by employment type (mock data).",
            Self::Gender => "Average salary by gender (mock data).",
            Self::Age => "Average salary by age band (mock data).",
            Self::Experience => "Average salary by experience (mock data).",
            Self::Children => "Average salary based on number of children (mock data).",
            Self::Ethnicity => "Average salary by ethnicity (mock data).",
        }
    }

    pub const fn benchmark(self) -> BenchmarkDimension {
        match self {
            Self::JobRole => BenchmarkDimension::JobRole,
            Self::EmploymentType => BenchmarkDimension::EmploymentType,
            Self::Gender => BenchmarkDimension::Gender,
            Self::Age => BenchmarkDimension::AgeBand,
            Self::Experience => BenchmarkDimension::ExperienceBand,
            Self::Children => BenchmarkDimension::ChildrenBand,
            Self::Ethnicity => BenchmarkDimension::Ethnicity,
        }
    }

    /// Benchmark key and display label for this dimension of `submission`.
    fn resolve(self, submission: &UserFormSubmission) -> (String, String) {
        match self {
            Self::JobRole => (
                submission.job_role.clone(),
                format!("Job role: {}", submission.job_role),
            ),
            Self::EmploymentType => (
                submission.employment_type.clone(),
                format!("Employment type: {}", submission.employment_type),
            ),
            Self::Gender => (
                submission.gender.clone(),
                format!("Gender: {}", submission.gender),
            ),
            Self::Age => {
                let band = AgeBand::from_age(submission.age).label();
                (band.to_string(), format!("Age band: {band}"))
            }
            Self::Experience => {
                let band = ExperienceBand::from_years(submission.experience).label();
                (band.to_string(), format!("Experience: {band} years"))
            }
            Self::Children => {
                let band = ChildrenBand::from_count(i64::from(submission.children)).label();
                (band.to_string(), format!("Children: {band}"))
            }
            Self::Ethnicity => (
                submission.ethnicity.clone(),
                format!("Ethnicity: {}", submission.ethnicity),
            ),
        }
    }
}

/// The user's salary set against the benchmark for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetric {
    pub id: ComparisonDimension,
    pub label: String,
    pub description: &'static str,
    pub average: f64,
    pub user: f64,
    pub percent_difference: f64,
}

/// Signed deviation of `user` from `average` in percent; zero when there is no average.
pub fn percent_difference(user: f64, average: f64) -> f64 {
    if average == 0.0 {
        return 0.0;
    }

    (user - average) / average * 100.0
}

/// Stateless engine that turns a submission into per-dimension comparison metrics.
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    benchmarks: Arc<BenchmarkTables>,
}

impl ComparisonEngine {
    pub fn new(benchmarks: Arc<BenchmarkTables>) -> Self {
        Self { benchmarks }
    }

    pub fn benchmarks(&self) -> &BenchmarkTables {
        &self.benchmarks
    }

    pub fn compute_comparisons(&self, submission: &UserFormSubmission) -> Vec<ComparisonMetric> {
        ComparisonDimension::ordered()
            .into_iter()
            .map(|dimension| {
                let (key, label) = dimension.resolve(submission);
                let average = self.benchmarks.lookup(dimension.benchmark(), &key);

                ComparisonMetric {
                    id: dimension,
                    label,
                    description: dimension.description(),
                    average,
                    user: submission.salary,
                    percent_difference: percent_difference(submission.salary, average),
                }
            })
            .collect()
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(Arc::new(BenchmarkTables::reference()))
    }
}
