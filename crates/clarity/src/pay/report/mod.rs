mod format;
mod summary;
pub mod views;

pub use format::{format_currency, format_percent, round_to_tenth};
pub use summary::{readable_subject, summarize};
pub use views::{ChartBar, ChartRow, ChartTone, ComparisonReport};
