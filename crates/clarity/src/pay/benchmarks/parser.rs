use super::{BenchmarkDimension, BenchmarkLoadError, BenchmarkTable};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::io::Read;

const FALLBACK_ROW: &str = "fallback";

#[derive(Debug, Default)]
pub(super) struct BenchmarkOverrides {
    pub(super) tables: HashMap<BenchmarkDimension, BenchmarkTable>,
    pub(super) fallback: Option<f64>,
}

pub(super) fn parse_overrides<R: Read>(reader: R) -> Result<BenchmarkOverrides, BenchmarkLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut grouped: HashMap<BenchmarkDimension, BTreeMap<String, f64>> = HashMap::new();
    let mut fallback = None;

    for record in csv_reader.deserialize::<BenchmarkRow>() {
        let row = record?;

        if !row.average.is_finite() || row.average < 0.0 {
            return Err(BenchmarkLoadError::InvalidAverage {
                dimension: row.dimension,
                key: row.key.unwrap_or_default(),
            });
        }

        if row.dimension.eq_ignore_ascii_case(FALLBACK_ROW) {
            fallback = Some(row.average);
            continue;
        }

        let dimension = BenchmarkDimension::from_key(&row.dimension)
            .ok_or_else(|| BenchmarkLoadError::UnknownDimension(row.dimension.clone()))?;
        let key = row
            .key
            .ok_or_else(|| BenchmarkLoadError::MissingKey(row.dimension.clone()))?;

        grouped.entry(dimension).or_default().insert(key, row.average);
    }

    let tables = grouped
        .into_iter()
        .map(|(dimension, entries)| (dimension, BenchmarkTable::from_entries(entries)))
        .collect();

    Ok(BenchmarkOverrides { tables, fallback })
}

#[derive(Debug, Deserialize)]
struct BenchmarkRow {
    dimension: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    key: Option<String>,
    average: f64,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
