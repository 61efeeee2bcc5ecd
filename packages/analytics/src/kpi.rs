//! Headline KPI computation for the overview page.

use std::collections::BTreeSet;

use opferdash_stats_models::{AgeBand, VictimRecord};
use serde::Serialize;

use crate::format::{format_count, format_pct};
use crate::percentage;

/// The five headline KPIs, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Total victims across the selection.
    pub total_victims: String,
    /// Average victims per selected year, rounded.
    pub victims_per_year: String,
    /// "male % / female %" split of the sexed counts.
    pub male_female: String,
    /// "under-18 % / adult %" split of the total.
    pub under18_adults: String,
    /// Number of distinct crime labels, sentinel excluded.
    pub crime_types: String,
}

impl KpiSummary {
    /// The all-zero summary returned for an empty selection.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_victims: "0".to_string(),
            victims_per_year: "0".to_string(),
            male_female: "0,0 % / 0,0 %".to_string(),
            under18_adults: "0,0 % / 0,0 %".to_string(),
            crime_types: "0".to_string(),
        }
    }
}

/// Computes the headline KPIs for a filtered selection.
///
/// Never fails: an empty selection yields [`KpiSummary::empty`], and all
/// ratio KPIs treat zero denominators as 0 %.
#[must_use]
pub fn build_kpis(records: &[&VictimRecord]) -> KpiSummary {
    if records.is_empty() {
        return KpiSummary::empty();
    }

    let total: u64 = records.iter().map(|r| r.total).sum();

    let years: BTreeSet<u16> = records.iter().map(|r| r.year).collect();
    let per_year = if years.is_empty() {
        0
    } else {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (total as f64 / years.len() as f64).round() as u64
        }
    };

    let male: u64 = records.iter().map(|r| r.male).sum();
    let female: u64 = records.iter().map(|r| r.female).sum();
    let sexed = male + female;
    let male_female = format!(
        "{} / {}",
        format_pct(percentage(male, sexed)),
        format_pct(percentage(female, sexed))
    );

    let under18: u64 = records
        .iter()
        .map(|r| r.age_band(AgeBand::Children) + r.age_band(AgeBand::Adolescents))
        .sum();
    // Adults are derived from the total; floored at zero because the age
    // columns are reported independently of the overall count.
    let adults = total.saturating_sub(under18);
    let under18_adults = format!(
        "{} / {}",
        format_pct(percentage(under18, total)),
        format_pct(percentage(adults, total))
    );

    let labels: BTreeSet<&str> = records
        .iter()
        .filter(|r| !r.is_total())
        .map(|r| r.label.as_str())
        .collect();

    KpiSummary {
        total_victims: format_count(total),
        victims_per_year: format_count(per_year),
        male_female,
        under18_adults,
        crime_types: labels.len().to_string(),
    }
}
