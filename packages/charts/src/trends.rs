//! Trends page figures: indexed development, year-over-year change,
//! category share over time.

use std::collections::BTreeSet;

use opferdash_analytics::aggregate;
use opferdash_stats_models::VictimRecord;
use serde_json::{Value, json};

use crate::figure::{Axis, Figure, Layout, Marker, Trace, empty_figure, no_data};

/// Each state's yearly totals indexed to 100 at the first selected year,
/// making growth comparable across differently sized states. States with
/// no victims in the first year have no meaningful base and are omitted.
#[must_use]
pub fn indexed_trend_lines(records: &[&VictimRecord], top: usize) -> Figure {
    let leaders = aggregate::top_n(&aggregate::totals_by_state(records), top);
    if leaders.is_empty() {
        return no_data();
    }

    let by_state_year = aggregate::totals_by_state_year(records);
    let years: Vec<u16> = {
        let set: BTreeSet<u16> = by_state_year.keys().map(|(_, year)| *year).collect();
        set.into_iter().collect()
    };

    let mut data = Vec::new();
    for (state, _) in &leaders {
        let series: Vec<u64> = years
            .iter()
            .map(|year| by_state_year.get(&(*state, *year)).copied().unwrap_or(0))
            .collect();
        let Some(&base) = series.first() else {
            continue;
        };
        if base == 0 {
            continue;
        }

        #[allow(clippy::cast_precision_loss)]
        let indexed: Vec<Value> = series
            .iter()
            .map(|v| json!((100.0 * *v as f64 / base as f64 * 10.0).round() / 10.0))
            .collect();

        let mut trace = Trace::new("scatter");
        trace.mode = Some("lines+markers".to_string());
        trace.name = Some(state.to_string());
        trace.x = Some(years.iter().map(|y| json!(y)).collect());
        trace.y = Some(indexed);
        data.push(trace);
    }

    if data.is_empty() {
        return no_data();
    }

    Figure {
        data,
        layout: Layout {
            title: Some("Indexierte Entwicklung (erstes Jahr = 100)".to_string()),
            yaxis: Some(Axis {
                title: Some("Index".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

/// Year-over-year percent change of the national victim total.
#[must_use]
pub fn yoy_change_bar(records: &[&VictimRecord]) -> Figure {
    let by_year = aggregate::totals_by_year(records);
    if by_year.len() < 2 {
        return empty_figure("Mindestens zwei Jahre notwendig");
    }

    let entries: Vec<(u16, u64)> = by_year.into_iter().collect();
    let mut years = Vec::new();
    let mut changes = Vec::new();
    let mut colors = Vec::new();

    for pair in entries.windows(2) {
        let (_, previous) = pair[0];
        let (year, current) = pair[1];
        #[allow(clippy::cast_precision_loss)]
        let change = if previous == 0 {
            0.0
        } else {
            (100.0 * (current as f64 - previous as f64) / previous as f64 * 10.0).round() / 10.0
        };
        years.push(json!(year));
        changes.push(json!(change));
        colors.push(json!(if change < 0.0 { "#10b981" } else { "#ef4444" }));
    }

    let mut trace = Trace::new("bar");
    trace.x = Some(years);
    trace.y = Some(changes);
    trace.marker = Some(Marker {
        color: Some(Value::Array(colors)),
        ..Marker::default()
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some("Veränderung zum Vorjahr".to_string()),
            yaxis: Some(Axis {
                title: Some("Veränderung (%)".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

/// Stacked area of each top category's share of the yearly total.
#[must_use]
pub fn category_share_area(records: &[&VictimRecord], top: usize) -> Figure {
    let leaders = aggregate::top_n(&aggregate::totals_by_label(records), top);
    if leaders.is_empty() {
        return no_data();
    }

    let by_label_year = aggregate::totals_by_label_year(records);
    let by_year = aggregate::totals_by_year(records);
    let years: Vec<u16> = by_year.keys().copied().collect();

    let data: Vec<Trace> = leaders
        .iter()
        .map(|(label, _)| {
            #[allow(clippy::cast_precision_loss)]
            let shares: Vec<Value> = years
                .iter()
                .map(|year| {
                    let total = by_year.get(year).copied().unwrap_or(0);
                    let value = by_label_year
                        .get(&(label.clone(), *year))
                        .copied()
                        .unwrap_or(0);
                    let share = if total == 0 {
                        0.0
                    } else {
                        (100.0 * value as f64 / total as f64 * 10.0).round() / 10.0
                    };
                    json!(share)
                })
                .collect();

            let mut trace = Trace::new("scatter");
            trace.mode = Some("lines".to_string());
            trace.name = Some(label.clone());
            trace.x = Some(years.iter().map(|y| json!(y)).collect());
            trace.y = Some(shares);
            trace
                .extra
                .insert("stackgroup".to_string(), json!("share"));
            trace
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some("Anteil der Top-Deliktsgruppen am Jahresgesamt".to_string()),
            yaxis: Some(Axis {
                title: Some("Anteil (%)".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}
