mod parser;
mod reference;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

pub use reference::FALLBACK_AVERAGE;

/// Categorical dimension a benchmark table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkDimension {
    JobRole,
    EmploymentType,
    Gender,
    Ethnicity,
    AgeBand,
    ExperienceBand,
    ChildrenBand,
}

impl BenchmarkDimension {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::JobRole,
            Self::EmploymentType,
            Self::Gender,
            Self::Ethnicity,
            Self::AgeBand,
            Self::ExperienceBand,
            Self::ChildrenBand,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::JobRole => "job_role",
            Self::EmploymentType => "employment_type",
            Self::Gender => "gender",
            Self::Ethnicity => "ethnicity",
            Self::AgeBand => "age_band",
            Self::ExperienceBand => "experience_band",
            Self::ChildrenBand => "children_band",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.key() == normalized)
    }
}

/// Benchmark averages for a single dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkTable {
    entries: BTreeMap<String, f64>,
}

impl BenchmarkTable {
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, average)| (key.into(), average))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(key, average)| (key.as_str(), *average))
    }
}

/// Read-only set of benchmark tables shared by every comparison.
///
/// Built once at startup (reference data, optionally overridden from CSV) and then injected
/// into the comparison engine; there is no way to add or remove entries afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTables {
    tables: HashMap<BenchmarkDimension, BenchmarkTable>,
    fallback: f64,
}

impl BenchmarkTables {
    pub fn reference() -> Self {
        Self {
            tables: reference::tables(),
            fallback: FALLBACK_AVERAGE,
        }
    }

    /// Reference data with the dimensions present in the CSV replaced.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BenchmarkLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BenchmarkLoadError> {
        let overrides = parser::parse_overrides(reader)?;
        let mut tables = Self::reference();

        if let Some(fallback) = overrides.fallback {
            tables.fallback = fallback;
        }
        for (dimension, table) in overrides.tables {
            tables.tables.insert(dimension, table);
        }

        Ok(tables)
    }

    /// Average for `key`, or the shared fallback when the table has no such entry.
    pub fn lookup(&self, dimension: BenchmarkDimension, key: &str) -> f64 {
        self.table(dimension)
            .and_then(|table| table.get(key))
            .unwrap_or(self.fallback)
    }

    pub fn table(&self, dimension: BenchmarkDimension) -> Option<&BenchmarkTable> {
        self.tables.get(&dimension)
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }
}

impl Default for BenchmarkTables {
    fn default() -> Self {
        Self::reference()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BenchmarkLoadError {
    #[error("failed to read benchmark file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid benchmark CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown benchmark dimension '{0}'")]
    UnknownDimension(String),
    #[error("benchmark average for {dimension} '{key}' must be a non-negative number")]
    InvalidAverage { dimension: String, key: String },
    #[error("benchmark row for {0} is missing a key")]
    MissingKey(String),
}
