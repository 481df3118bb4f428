use super::{BenchmarkDimension, BenchmarkTable};
use std::collections::HashMap;

/// Average used whenever a table has no entry for the requested key.
pub const FALLBACK_AVERAGE: f64 = 57000.0;

// Mock market data; replace via CLARITY_BENCHMARKS_CSV for real figures.
pub(super) fn tables() -> HashMap<BenchmarkDimension, BenchmarkTable> {
    HashMap::from([
        (
            BenchmarkDimension::JobRole,
            BenchmarkTable::from_entries([
                ("Software Engineer", 68000.0),
                ("Data Analyst", 52000.0),
                ("Manager", 60000.0),
            ]),
        ),
        (
            BenchmarkDimension::EmploymentType,
            BenchmarkTable::from_entries([("Full-time", 62000.0), ("Part-time", 32000.0)]),
        ),
        (
            BenchmarkDimension::Gender,
            BenchmarkTable::from_entries([
                ("Male", 61000.0),
                ("Female", 54000.0),
                ("Non-binary", 56000.0),
            ]),
        ),
        (
            BenchmarkDimension::Ethnicity,
            BenchmarkTable::from_entries([
                ("White", 61000.0),
                ("Black", 52000.0),
                ("Mixed", 55000.0),
                ("Arab", 50000.0),
                ("Asian", 57000.0),
                ("Other", 54000.0),
            ]),
        ),
        (
            BenchmarkDimension::AgeBand,
            BenchmarkTable::from_entries([
                ("18-24", 32000.0),
                ("25-34", 45000.0),
                ("35-44", 56000.0),
                ("45-54", 60000.0),
                ("55-64", 58000.0),
                ("65+", 47000.0),
            ]),
        ),
        (
            BenchmarkDimension::ExperienceBand,
            BenchmarkTable::from_entries([
                ("0-2", 35000.0),
                ("3-5", 45000.0),
                ("6-10", 55000.0),
                ("11-15", 63000.0),
                ("16+", 68000.0),
            ]),
        ),
        (
            BenchmarkDimension::ChildrenBand,
            BenchmarkTable::from_entries([("0", 60000.0), ("1", 58000.0), ("2+", 55000.0)]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pay::banding::{AgeBand, ChildrenBand, ExperienceBand};

    #[test]
    fn every_band_has_a_reference_average() {
        let tables = tables();
        let age = &tables[&BenchmarkDimension::AgeBand];
        for band in AgeBand::ordered() {
            assert!(age.get(band.label()).is_some(), "{}", band.label());
        }

        let experience = &tables[&BenchmarkDimension::ExperienceBand];
        for band in ExperienceBand::ordered() {
            assert!(experience.get(band.label()).is_some(), "{}", band.label());
        }

        let children = &tables[&BenchmarkDimension::ChildrenBand];
        for band in ChildrenBand::ordered() {
            assert!(children.get(band.label()).is_some(), "{}", band.label());
        }
    }
}
