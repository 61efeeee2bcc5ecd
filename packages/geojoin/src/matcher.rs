//! Per-state matching of statistics regions onto boundary polygons.
//!
//! Matching is scoped by federal state: the lookup key space is
//! state name → normalized polygon name → canonical polygon name.
//! A statistics row can only ever match a polygon in its own declared
//! state, which rules out cross-state collisions by construction.

use std::collections::BTreeMap;

use opferdash_geometry::AdminPolygon;
use opferdash_stats_models::Bundesland;
use serde::Serialize;

use crate::normalize::normalize_region;

/// One aggregated statistics input row for the join: a metric value for
/// a free-text region in a declared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMetric {
    /// Declared federal state of the statistics row.
    pub state: Bundesland,
    /// Free-text region name as printed in the statistics.
    pub region: String,
    /// Metric value (victim count) to attach to the matched polygon.
    pub value: u64,
}

/// Per-state lookup from normalized polygon name to canonical polygon
/// name. Built once per geometry layer and reused across requests.
#[derive(Debug, Default)]
pub struct PolygonIndex {
    /// state name → (normalized name → canonical polygon name)
    by_state: BTreeMap<String, BTreeMap<String, String>>,
}

impl PolygonIndex {
    /// Builds the index from a polygon layer.
    ///
    /// State-level polygons (no parent) are scoped under their own name;
    /// district polygons under their parent state's name. Exploded parts
    /// of the same boundary collapse into a single entry.
    #[must_use]
    pub fn build(polygons: &[AdminPolygon]) -> Self {
        let mut by_state: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for polygon in polygons {
            let scope = polygon.state.as_deref().unwrap_or(&polygon.name);
            let normalized = normalize_region(&polygon.name);
            if normalized.is_empty() {
                continue;
            }
            by_state
                .entry(scope.to_string())
                .or_default()
                .entry(normalized)
                .or_insert_with(|| polygon.name.clone());
        }

        Self { by_state }
    }

    /// Resolves a statistics region name to a canonical polygon name
    /// within one state.
    ///
    /// Tries an exact normalized match first. Only when that fails does
    /// the substring fallback run: the normalized region may contain or
    /// be contained by a normalized polygon name. Among substring
    /// candidates the longest polygon name wins, which keeps "Neustadt"
    /// from being swallowed by a shorter partial candidate.
    #[must_use]
    pub fn resolve(&self, state_name: &str, region: &str) -> Option<&str> {
        let names = self.by_state.get(state_name)?;
        let normalized = normalize_region(region);
        if normalized.is_empty() {
            return None;
        }

        if let Some(canonical) = names.get(&normalized) {
            return Some(canonical);
        }

        names
            .iter()
            .filter(|(candidate, _)| {
                normalized.contains(candidate.as_str()) || candidate.contains(&normalized)
            })
            .max_by_key(|(candidate, _)| candidate.len())
            .map(|(_, canonical)| canonical.as_str())
    }

    /// State scopes present in the index.
    #[must_use]
    pub fn states(&self) -> Vec<&str> {
        self.by_state.keys().map(String::as_str).collect()
    }
}

/// Result of matching a batch of region metrics against an index.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// Aggregated values per (state name, canonical polygon name). A
    /// polygon can absorb several raw rows once their names normalize to
    /// the same form.
    pub matched: BTreeMap<(String, String), u64>,
    /// Rows that matched no polygon. Excluded from map output only; the
    /// tabular aggregates keep using the raw labels.
    pub unmatched: Vec<RegionMetric>,
}

/// Matches region metrics against the index, aggregating values per
/// matched polygon. Unmatched rows are logged for diagnosis.
#[must_use]
pub fn match_metrics(metrics: &[RegionMetric], index: &PolygonIndex) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for metric in metrics {
        let state_name = metric.state.to_string();
        match index.resolve(&state_name, &metric.region) {
            Some(polygon) => {
                *outcome
                    .matched
                    .entry((state_name, polygon.to_string()))
                    .or_insert(0) += metric.value;
            }
            None => {
                log::debug!(
                    "No polygon match for region '{}' in {state_name}",
                    metric.region
                );
                outcome.unmatched.push(metric.clone());
            }
        }
    }

    if !outcome.unmatched.is_empty() {
        log::warn!(
            "{} statistics region(s) excluded from map layer (no polygon match)",
            outcome.unmatched.len()
        );
    }

    outcome
}

/// One renderable choropleth row: a polygon name with its metric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethRow {
    /// Canonical polygon name.
    pub name: String,
    /// Owning state name (equals `name` for state-level polygons).
    pub state: String,
    /// Aggregated metric value; zero when no statistics row matched.
    pub value: u64,
}

/// Produces one row per distinct polygon in scope, attaching matched
/// values and zero-filling the rest so the rendered map always covers
/// every polygon.
#[must_use]
pub fn choropleth_rows(polygons: &[&AdminPolygon], outcome: &MatchOutcome) -> Vec<ChoroplethRow> {
    let mut rows: BTreeMap<(String, String), u64> = BTreeMap::new();

    for polygon in polygons {
        let state = polygon
            .state
            .clone()
            .unwrap_or_else(|| polygon.name.clone());
        rows.entry((state, polygon.name.clone())).or_insert(0);
    }

    for ((state, name), value) in &outcome.matched {
        if let Some(slot) = rows.get_mut(&(state.clone(), name.clone())) {
            *slot = *value;
        }
    }

    rows.into_iter()
        .map(|((state, name), value)| ChoroplethRow { name, state, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn polygon(name: &str, state: Option<&str>) -> AdminPolygon {
        AdminPolygon {
            name: name.to_string(),
            state: state.map(str::to_string),
            polygon: Polygon::new(
                LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]),
                vec![],
            ),
        }
    }

    fn metric(state: Bundesland, region: &str, value: u64) -> RegionMetric {
        RegionMetric {
            state,
            region: region.to_string(),
            value,
        }
    }

    #[test]
    fn exact_match_attaches_value() {
        let polygons = vec![polygon("München", Some("Bayern"))];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Bayern, "München", 100)], &index);

        assert_eq!(
            outcome.matched.get(&("Bayern".to_string(), "München".to_string())),
            Some(&100)
        );
        assert!(outcome.unmatched.is_empty());
    }

    #[test]
    fn qualifier_region_matches_bare_polygon_name() {
        let polygons = vec![polygon("Rosenheim", Some("Bayern"))];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(
            &[metric(Bundesland::Bayern, "Landkreis Rosenheim", 42)],
            &index,
        );

        assert_eq!(
            outcome.matched.get(&("Bayern".to_string(), "Rosenheim".to_string())),
            Some(&42)
        );
    }

    #[test]
    fn matching_never_crosses_state_borders() {
        // Same city name in two states; only the declared state's polygon
        // may match.
        let polygons = vec![
            polygon("Neustadt", Some("Bayern")),
            polygon("Neustadt", Some("Sachsen")),
        ];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Sachsen, "Neustadt", 9)], &index);

        assert_eq!(outcome.matched.len(), 1);
        let ((state, _), _) = outcome.matched.iter().next().unwrap();
        assert_eq!(state, "Sachsen");
    }

    #[test]
    fn rows_from_other_states_do_not_match_missing_scope() {
        let polygons = vec![polygon("Neustadt", Some("Bayern"))];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Sachsen, "Neustadt", 9)], &index);

        assert!(outcome.matched.is_empty());
        assert_eq!(outcome.unmatched.len(), 1);
    }

    #[test]
    fn exact_match_wins_over_substring_candidates() {
        // "Neustadt" must not fall into the substring trap against a
        // same-state polygon it is merely contained in.
        let polygons = vec![
            polygon("Neustadt", Some("Bayern")),
            polygon("Neustadt an der Aisch", Some("Bayern")),
        ];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Bayern, "Neustadt", 5)], &index);

        assert_eq!(
            outcome.matched.get(&("Bayern".to_string(), "Neustadt".to_string())),
            Some(&5)
        );
    }

    #[test]
    fn substring_fallback_prefers_longest_candidate() {
        let polygons = vec![
            polygon("Aisch", Some("Bayern")),
            polygon("Neustadt an der Aisch", Some("Bayern")),
        ];
        let index = PolygonIndex::build(&polygons);
        let resolved = index.resolve("Bayern", "Neustadt an der Aisch Umland");
        assert_eq!(resolved, Some("Neustadt an der Aisch"));
    }

    #[test]
    fn repeated_raw_rows_aggregate_onto_one_polygon() {
        let polygons = vec![polygon("Rosenheim", Some("Bayern"))];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(
            &[
                metric(Bundesland::Bayern, "Landkreis Rosenheim", 10),
                metric(Bundesland::Bayern, "Stadt Rosenheim", 4),
            ],
            &index,
        );

        assert_eq!(
            outcome.matched.get(&("Bayern".to_string(), "Rosenheim".to_string())),
            Some(&14)
        );
    }

    #[test]
    fn choropleth_rows_zero_fill_unmatched_polygons() {
        let muenchen = polygon("München", Some("Bayern"));
        let rosenheim = polygon("Rosenheim", Some("Bayern"));
        let polygons = vec![muenchen, rosenheim];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Bayern, "München", 100)], &index);

        let scope: Vec<&AdminPolygon> = polygons.iter().collect();
        let rows = choropleth_rows(&scope, &outcome);

        assert_eq!(rows.len(), 2);
        let by_name: BTreeMap<&str, u64> =
            rows.iter().map(|r| (r.name.as_str(), r.value)).collect();
        assert_eq!(by_name["München"], 100);
        assert_eq!(by_name["Rosenheim"], 0);
    }

    #[test]
    fn state_level_polygons_scope_under_their_own_name() {
        let polygons = vec![polygon("Bayern", None), polygon("Sachsen", None)];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Bayern, "Bayern", 7)], &index);

        assert_eq!(
            outcome.matched.get(&("Bayern".to_string(), "Bayern".to_string())),
            Some(&7)
        );
    }

    #[test]
    fn exploded_parts_collapse_to_one_index_entry() {
        let polygons = vec![
            polygon("Bayern", None),
            polygon("Bayern", None),
        ];
        let index = PolygonIndex::build(&polygons);
        let outcome = match_metrics(&[metric(Bundesland::Bayern, "Bayern", 3)], &index);
        assert_eq!(outcome.matched.len(), 1);
    }
}
