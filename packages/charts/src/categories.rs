//! Crime-category page figures: heatmap, stacked bars, age structure.

use std::collections::BTreeSet;

use opferdash_analytics::aggregate;
use opferdash_stats_models::{AgeBand, VictimRecord};
use serde_json::{Value, json};

use crate::ColorMode;
use crate::figure::{Axis, Figure, Layout, Marker, Trace, empty_figure, no_data};

/// Heatmap of victim counts per offense group and year.
#[must_use]
pub fn label_year_heatmap(records: &[&VictimRecord], colors: ColorMode) -> Figure {
    let by_label_year = aggregate::totals_by_label_year(records);
    if by_label_year.is_empty() {
        return no_data();
    }

    let labels: Vec<&String> = {
        let set: BTreeSet<&String> = by_label_year.keys().map(|(label, _)| label).collect();
        set.into_iter().collect()
    };
    let years: Vec<u16> = {
        let set: BTreeSet<u16> = by_label_year.keys().map(|(_, year)| *year).collect();
        set.into_iter().collect()
    };

    // Dense z matrix: one row per label, one column per year.
    let z: Vec<Vec<u64>> = labels
        .iter()
        .map(|label| {
            years
                .iter()
                .map(|year| {
                    by_label_year
                        .get(&((*label).clone(), *year))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    let mut trace = Trace::new("heatmap");
    trace.x = Some(years.iter().map(|y| json!(y)).collect());
    trace.y = Some(labels.iter().map(|l| json!(l)).collect());
    trace.z = Some(json!(z));
    trace.colorscale = Some(colors.sequential().to_string());

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some("Opferzahlen nach Deliktsgruppe und Jahr".to_string()),
            yaxis: Some(Axis {
                autorange: Some("reversed".to_string()),
                ..Axis::default()
            }),
            height: Some(750),
            ..Layout::default()
        },
    }
}

/// Stacked yearly bars for the top offense groups.
#[must_use]
pub fn stacked_label_years(records: &[&VictimRecord], top: usize) -> Figure {
    let leaders = aggregate::top_n(&aggregate::totals_by_label(records), top);
    if leaders.is_empty() {
        return no_data();
    }

    let by_label_year = aggregate::totals_by_label_year(records);
    let years: Vec<u16> = {
        let set: BTreeSet<u16> = by_label_year.keys().map(|(_, year)| *year).collect();
        set.into_iter().collect()
    };

    let data: Vec<Trace> = leaders
        .iter()
        .map(|(label, _)| {
            let mut trace = Trace::new("bar");
            trace.name = Some(label.clone());
            trace.x = Some(years.iter().map(|y| json!(y)).collect());
            trace.y = Some(
                years
                    .iter()
                    .map(|year| {
                        json!(
                            by_label_year
                                .get(&(label.clone(), *year))
                                .copied()
                                .unwrap_or(0)
                        )
                    })
                    .collect(),
            );
            trace
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some("Top-Deliktsgruppen im Zeitverlauf".to_string()),
            barmode: Some("stack".to_string()),
            yaxis: Some(Axis {
                title: Some("Opferzahl".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

/// Victim age structure for one selected offense group.
#[must_use]
pub fn age_distribution_bar(records: &[&VictimRecord], label: &str, colors: ColorMode) -> Figure {
    if records.is_empty() {
        return no_data();
    }
    if !records.iter().any(|r| r.label == label) {
        return empty_figure("Keine Daten für diese Deliktsgruppe");
    }

    let sums = aggregate::age_distribution(records, label);
    if sums.iter().all(|v| *v == 0) {
        return empty_figure("Keine Altersdaten verfügbar");
    }

    let values: Vec<Value> = sums.iter().map(|v| json!(v)).collect();
    let mut trace = Trace::new("bar");
    trace.x = Some(AgeBand::all().iter().map(|b| json!(b.label())).collect());
    trace.y = Some(values.clone());
    trace.marker = Some(Marker {
        color: Some(Value::Array(values)),
        colorscale: Some(colors.sequential_cool().to_string()),
        showscale: Some(false),
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(format!("Altersstruktur der Opfer – {label}")),
            xaxis: Some(Axis {
                title: Some("Altersgruppe".to_string()),
                ..Axis::default()
            }),
            yaxis: Some(Axis {
                title: Some("Opferzahl".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opferdash_stats_models::Bundesland;

    fn record(year: u16, label: &str, total: u64, age_bands: [u64; 5]) -> VictimRecord {
        VictimRecord {
            year,
            municipality_key: 9162,
            region: "München".to_string(),
            state: Some(Bundesland::Bayern),
            offense_raw: label.to_string(),
            label: label.to_string(),
            total,
            male: 0,
            female: 0,
            age_bands,
        }
    }

    #[test]
    fn empty_input_yields_placeholders() {
        assert!(label_year_heatmap(&[], ColorMode::Standard).data.is_empty());
        assert!(stacked_label_years(&[], 6).data.is_empty());
        assert!(age_distribution_bar(&[], "A", ColorMode::Standard).data.is_empty());
    }

    #[test]
    fn heatmap_builds_dense_matrix() {
        let records = vec![
            record(2019, "A", 10, [0; 5]),
            record(2020, "A", 20, [0; 5]),
            record(2020, "B", 5, [0; 5]),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = label_year_heatmap(&rows, ColorMode::Standard);
        // B has no 2019 value; the matrix zero-fills it.
        assert_eq!(fig.data[0].z.as_ref().unwrap(), &json!([[10, 20], [0, 5]]));
    }

    #[test]
    fn stacked_keeps_one_trace_per_top_label() {
        let records = vec![
            record(2019, "A", 10, [0; 5]),
            record(2019, "B", 20, [0; 5]),
            record(2019, "C", 5, [0; 5]),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = stacked_label_years(&rows, 2);
        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.layout.barmode.as_deref(), Some("stack"));
    }

    #[test]
    fn age_chart_distinguishes_missing_label_from_missing_ages() {
        let records = vec![record(2020, "A", 10, [0; 5])];
        let rows: Vec<&VictimRecord> = records.iter().collect();

        let missing_label = age_distribution_bar(&rows, "B", ColorMode::Standard);
        assert_eq!(
            missing_label.layout.annotations[0].text,
            "Keine Daten für diese Deliktsgruppe"
        );

        let missing_ages = age_distribution_bar(&rows, "A", ColorMode::Standard);
        assert_eq!(
            missing_ages.layout.annotations[0].text,
            "Keine Altersdaten verfügbar"
        );
    }

    #[test]
    fn age_chart_uses_band_labels() {
        let records = vec![record(2020, "A", 10, [1, 2, 3, 4, 5])];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = age_distribution_bar(&rows, "A", ColorMode::Standard);
        assert_eq!(fig.data[0].x.as_ref().unwrap()[0], json!("Kinder <14"));
        assert_eq!(fig.data[0].y.as_ref().unwrap(), &vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
    }
}
