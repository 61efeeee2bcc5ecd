//! Overview page figures: yearly trend, top offense groups, treemap.

use opferdash_analytics::aggregate;
use opferdash_stats_models::VictimRecord;
use serde_json::{Value, json};

use crate::figure::{Axis, Figure, Layout, Marker, Trace, no_data};
use crate::ColorMode;

/// Yearly victim totals as a marked line, sentinel rows excluded.
#[must_use]
pub fn trend_line(records: &[&VictimRecord]) -> Figure {
    let by_year = aggregate::totals_by_year(records);
    if by_year.is_empty() {
        return no_data();
    }

    let mut trace = Trace::new("scatter");
    trace.mode = Some("lines+markers".to_string());
    trace.x = Some(by_year.keys().map(|y| json!(y)).collect());
    trace.y = Some(by_year.values().map(|v| json!(v)).collect());
    trace.marker = Some(Marker {
        color: Some(json!("#1f77b4")),
        ..Marker::default()
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some("Zeitliche Entwicklung der Opferzahlen".to_string()),
            xaxis: Some(Axis {
                title: Some("Jahr".to_string()),
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

/// Horizontal Top-N bar of offense groups by victim count.
#[must_use]
pub fn top_categories_bar(records: &[&VictimRecord], n: usize, colors: ColorMode) -> Figure {
    let top = aggregate::top_n(&aggregate::totals_by_label(records), n);
    if top.is_empty() {
        return no_data();
    }

    // Ascending so the largest bar renders on top.
    let mut rows = top;
    rows.reverse();

    let values: Vec<Value> = rows.iter().map(|(_, v)| json!(v)).collect();
    let mut trace = Trace::new("bar");
    trace.orientation = Some("h".to_string());
    trace.x = Some(values.clone());
    trace.y = Some(rows.iter().map(|(label, _)| json!(label)).collect());
    trace.marker = Some(Marker {
        color: Some(Value::Array(values)),
        colorscale: Some(colors.sequential().to_string()),
        showscale: Some(false),
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(format!("Top {n} Deliktsgruppen nach Opferzahl")),
            xaxis: Some(Axis {
                title: Some("Opferzahl".to_string()),
                ..Axis::default()
            }),
            yaxis: Some(Axis {
                title: Some("Deliktsgruppe".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

/// Treemap of the offense-group structure.
#[must_use]
pub fn category_treemap(records: &[&VictimRecord]) -> Figure {
    let by_label = aggregate::totals_by_label(records);
    if by_label.is_empty() {
        return no_data();
    }

    let mut trace = Trace::new("treemap");
    trace.labels = Some(by_label.keys().map(|l| json!(l)).collect());
    trace.parents = Some(by_label.keys().map(|_| json!("")).collect());
    trace.values = Some(by_label.values().map(|v| json!(v)).collect());

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some("Struktur der Deliktsgruppen".to_string()),
            ..Layout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opferdash_stats_models::{Bundesland, TOTAL_LABEL};

    fn record(year: u16, label: &str, total: u64) -> VictimRecord {
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
            age_bands: [0; 5],
        }
    }

    #[test]
    fn empty_input_yields_placeholders() {
        assert!(trend_line(&[]).data.is_empty());
        assert!(top_categories_bar(&[], 5, ColorMode::Standard).data.is_empty());
        assert!(category_treemap(&[]).data.is_empty());
    }

    #[test]
    fn sentinel_only_input_yields_placeholders() {
        let records = vec![record(2020, TOTAL_LABEL, 100)];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        assert!(trend_line(&rows).data.is_empty());
        assert!(category_treemap(&rows).data.is_empty());
    }

    #[test]
    fn trend_line_orders_years_ascending() {
        let records = vec![
            record(2021, "A", 10),
            record(2019, "A", 30),
            record(2020, "A", 20),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = trend_line(&rows);
        assert_eq!(fig.data[0].x.as_ref().unwrap(), &vec![json!(2019), json!(2020), json!(2021)]);
        assert_eq!(fig.data[0].y.as_ref().unwrap(), &vec![json!(30), json!(20), json!(10)]);
    }

    #[test]
    fn top_bar_truncates_and_sorts_ascending_for_render() {
        let records = vec![
            record(2020, "A", 10),
            record(2020, "B", 30),
            record(2020, "C", 20),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = top_categories_bar(&rows, 2, ColorMode::Standard);
        // Smallest of the kept two first, largest last.
        assert_eq!(fig.data[0].y.as_ref().unwrap(), &vec![json!("C"), json!("B")]);
    }

    #[test]
    fn safe_color_mode_switches_colorscale() {
        let records = vec![record(2020, "A", 10)];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = top_categories_bar(&rows, 5, ColorMode::Safe);
        let marker = fig.data[0].marker.as_ref().unwrap();
        assert_eq!(marker.colorscale.as_deref(), Some("Viridis"));
    }
}
