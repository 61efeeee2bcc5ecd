#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and KPI layer.
//!
//! Pure functions over filtered record slices. Nothing here allocates
//! beyond its return value, nothing caches, and nothing can fail: empty
//! inputs produce empty outputs or zeroed KPIs, and every percentage
//! helper treats a zero denominator as 0 %.

pub mod aggregate;
pub mod format;
pub mod kpi;

use opferdash_stats_models::{FilterSelection, VictimRecord};

/// Applies a filter selection, returning the surviving records.
///
/// Empty selection vectors place no restriction, so an empty selection
/// reproduces the full dataset.
#[must_use]
pub fn apply_filter<'a>(
    records: &'a [VictimRecord],
    selection: &FilterSelection,
) -> Vec<&'a VictimRecord> {
    records.iter().filter(|r| selection.matches(r)).collect()
}

/// Percentage of `part` in `whole`, one decimal of precision retained.
/// Zero denominators yield 0.0 rather than an error.
#[must_use]
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let raw = 100.0 * part as f64 / whole as f64;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use opferdash_stats_models::Bundesland;

    fn record(year: u16, state: Bundesland, label: &str, total: u64) -> VictimRecord {
        VictimRecord {
            year,
            municipality_key: state.code() * 1000,
            region: "Teststadt".to_string(),
            state: Some(state),
            offense_raw: label.to_string(),
            label: label.to_string(),
            total,
            male: 0,
            female: 0,
            age_bands: [0; 5],
        }
    }

    #[test]
    fn empty_selection_equals_full_dataset() {
        let records = vec![
            record(2019, Bundesland::Bayern, "Einfache KV", 5),
            record(2020, Bundesland::Sachsen, "Sexualdelikte", 7),
        ];
        let all = apply_filter(&records, &FilterSelection::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn explicit_all_years_equals_empty_year_filter() {
        let records = vec![
            record(2019, Bundesland::Bayern, "Einfache KV", 5),
            record(2020, Bundesland::Bayern, "Einfache KV", 7),
            record(2021, Bundesland::Bayern, "Einfache KV", 11),
        ];
        let implicit = apply_filter(&records, &FilterSelection::default());
        let explicit = apply_filter(
            &records,
            &FilterSelection {
                years: vec![2019, 2020, 2021],
                ..FilterSelection::default()
            },
        );

        let sum = |rows: &[&VictimRecord]| rows.iter().map(|r| r.total).sum::<u64>();
        assert_eq!(sum(&implicit), sum(&explicit));
    }

    #[test]
    fn percentage_handles_zero_denominator() {
        assert!((percentage(10, 0) - 0.0).abs() < f64::EPSILON);
        assert!((percentage(0, 0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert!((percentage(1, 3) - 33.3).abs() < f64::EPSILON);
        assert!((percentage(2, 3) - 66.7).abs() < f64::EPSILON);
        assert!((percentage(1, 2) - 50.0).abs() < f64::EPSILON);
    }
}
