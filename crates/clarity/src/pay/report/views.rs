use crate::pay::comparison::{ComparisonDimension, ComparisonMetric};
use super::format::{format_currency, format_percent};
use super::summary::summarize;
use serde::Serialize;

const MIN_BAR_WIDTH_PCT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTone {
    Positive,
    Negative,
}

impl ChartTone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Above or at market",
            Self::Negative => "Below market",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
    pub display_value: String,
    pub width_pct: f64,
}

impl ChartBar {
    fn new(label: &'static str, value: f64, max_value: f64) -> Self {
        Self {
            label,
            value,
            display_value: format_currency(value),
            width_pct: (value / max_value * 100.0).max(MIN_BAR_WIDTH_PCT),
        }
    }
}

/// Render-ready row pairing the user's salary with the benchmark for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub id: ComparisonDimension,
    pub label: String,
    pub description: &'static str,
    pub difference: String,
    pub tone: ChartTone,
    pub user_bar: ChartBar,
    pub average_bar: ChartBar,
}

impl ChartRow {
    pub fn from_metric(metric: &ComparisonMetric) -> Self {
        let max_value = metric.user.max(metric.average).max(1.0);
        let tone = if metric.percent_difference < 0.0 {
            ChartTone::Negative
        } else {
            ChartTone::Positive
        };

        Self {
            id: metric.id,
            label: metric.label.clone(),
            description: metric.description,
            difference: format_percent(metric.percent_difference),
            tone,
            user_bar: ChartBar::new("Your salary", metric.user, max_value),
            average_bar: ChartBar::new("Average", metric.average, max_value),
        }
    }
}

/// Everything derived locally from one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub comparisons: Vec<ComparisonMetric>,
    pub chart: Vec<ChartRow>,
    pub summary: String,
}

impl ComparisonReport {
    pub fn from_metrics(comparisons: Vec<ComparisonMetric>) -> Self {
        let chart = comparisons.iter().map(ChartRow::from_metric).collect();
        let summary = summarize(&comparisons);

        Self {
            comparisons,
            chart,
            summary,
        }
    }
}
