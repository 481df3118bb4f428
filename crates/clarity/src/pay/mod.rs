pub mod banding;
pub mod benchmarks;
mod comparison;
pub mod report;
pub mod submission;

pub use banding::{AgeBand, ChildrenBand, ExperienceBand};
pub use benchmarks::{BenchmarkDimension, BenchmarkLoadError, BenchmarkTable, BenchmarkTables};
pub use comparison::{percent_difference, ComparisonDimension, ComparisonEngine, ComparisonMetric};
pub use report::{summarize, ComparisonReport};
pub use submission::{FormOptions, FormState, SubmissionError, UserFormSubmission};
