//! Groupby/sum aggregations feeding the chart builders.
//!
//! All functions take the already-filtered record slice. Grouping maps
//! use `BTreeMap` so chart inputs come out in stable, sorted order.
//! Functions that feed per-category charts exclude the
//! "Straftaten insgesamt" sentinel; state/region comparisons keep it,
//! mirroring which totals the source tables carry where.

use std::collections::BTreeMap;

use opferdash_stats_models::{AgeBand, Bundesland, VictimRecord};

/// Drops sentinel rows, keeping only per-offense-group rows.
#[must_use]
pub fn without_total<'a>(records: &[&'a VictimRecord]) -> Vec<&'a VictimRecord> {
    records.iter().copied().filter(|r| !r.is_total()).collect()
}

/// Victim totals per year, excluding sentinel rows.
#[must_use]
pub fn totals_by_year(records: &[&VictimRecord]) -> BTreeMap<u16, u64> {
    let mut out = BTreeMap::new();
    for r in without_total(records) {
        *out.entry(r.year).or_insert(0) += r.total;
    }
    out
}

/// Victim totals per short crime label, excluding the sentinel.
#[must_use]
pub fn totals_by_label(records: &[&VictimRecord]) -> BTreeMap<String, u64> {
    let mut out = BTreeMap::new();
    for r in without_total(records) {
        *out.entry(r.label.clone()).or_insert(0) += r.total;
    }
    out
}

/// Victim totals per federal state. Rows without a mapped state are
/// excluded (state-scoped view).
#[must_use]
pub fn totals_by_state(records: &[&VictimRecord]) -> BTreeMap<Bundesland, u64> {
    let mut out = BTreeMap::new();
    for r in records {
        if let Some(state) = r.state {
            *out.entry(state).or_insert(0) += r.total;
        }
    }
    out
}

/// Victim totals per (region, state) pair, state-scoped.
#[must_use]
pub fn totals_by_region(records: &[&VictimRecord]) -> BTreeMap<(String, Bundesland), u64> {
    let mut out = BTreeMap::new();
    for r in records {
        if let Some(state) = r.state {
            *out.entry((r.region.clone(), state)).or_insert(0) += r.total;
        }
    }
    out
}

/// Victim totals per (label, year), excluding the sentinel.
#[must_use]
pub fn totals_by_label_year(records: &[&VictimRecord]) -> BTreeMap<(String, u16), u64> {
    let mut out = BTreeMap::new();
    for r in without_total(records) {
        *out.entry((r.label.clone(), r.year)).or_insert(0) += r.total;
    }
    out
}

/// Victim totals per (state, year), state-scoped.
#[must_use]
pub fn totals_by_state_year(records: &[&VictimRecord]) -> BTreeMap<(Bundesland, u16), u64> {
    let mut out = BTreeMap::new();
    for r in records {
        if let Some(state) = r.state {
            *out.entry((state, r.year)).or_insert(0) += r.total;
        }
    }
    out
}

/// The `n` largest entries of a grouping, descending by value.
#[must_use]
pub fn top_n<K: Clone + Ord>(groups: &BTreeMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = groups.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Per-state change between the first and last selected year. States
/// missing either endpoint year are omitted. Positive = increase.
#[must_use]
pub fn state_delta(records: &[&VictimRecord]) -> Vec<(Bundesland, i64)> {
    let by_state_year = totals_by_state_year(records);
    let years: Vec<u16> = records.iter().map(|r| r.year).collect();
    let (Some(&first), Some(&last)) = (years.iter().min(), years.iter().max()) else {
        return Vec::new();
    };
    if first == last {
        return Vec::new();
    }

    let mut deltas: Vec<(Bundesland, i64)> = Bundesland::all()
        .iter()
        .filter_map(|state| {
            let start = by_state_year.get(&(*state, first))?;
            let end = by_state_year.get(&(*state, last))?;
            #[allow(clippy::cast_possible_wrap)]
            Some((*state, *end as i64 - *start as i64))
        })
        .collect();
    deltas.sort_by_key(|(_, delta)| *delta);
    deltas
}

/// Male/female victim sums per (region, state), state-scoped.
#[must_use]
pub fn gender_by_region(records: &[&VictimRecord]) -> BTreeMap<(String, Bundesland), (u64, u64)> {
    let mut out = BTreeMap::new();
    for r in records {
        if let Some(state) = r.state {
            let entry = out.entry((r.region.clone(), state)).or_insert((0, 0));
            entry.0 += r.male;
            entry.1 += r.female;
        }
    }
    out
}

/// Age-band victim sums for one crime label, in ascending age order.
#[must_use]
pub fn age_distribution(records: &[&VictimRecord], label: &str) -> [u64; 5] {
    let mut out = [0u64; 5];
    for r in records.iter().filter(|r| r.label == label) {
        for band in AgeBand::all() {
            out[*band as usize] += r.age_band(*band);
        }
    }
    out
}
