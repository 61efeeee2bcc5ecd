//! Temporal page figures: state comparison over time, first-to-last
//! change, gender scatter.

use std::collections::BTreeSet;

use opferdash_analytics::aggregate;
use opferdash_stats_models::VictimRecord;
use serde_json::{Value, json};

use crate::figure::{Axis, Figure, Layout, Marker, Trace, empty_figure, no_data};

/// Line chart comparing the top states over the selected years.
#[must_use]
pub fn state_trend_lines(records: &[&VictimRecord], top: usize) -> Figure {
    let leaders = aggregate::top_n(&aggregate::totals_by_state(records), top);
    if leaders.is_empty() {
        return no_data();
    }

    let by_state_year = aggregate::totals_by_state_year(records);
    let years: Vec<u16> = {
        let set: BTreeSet<u16> = by_state_year.keys().map(|(_, year)| *year).collect();
        set.into_iter().collect()
    };

    let data: Vec<Trace> = leaders
        .iter()
        .map(|(state, _)| {
            let mut trace = Trace::new("scatter");
            trace.mode = Some("lines+markers".to_string());
            trace.name = Some(state.to_string());
            trace.x = Some(years.iter().map(|y| json!(y)).collect());
            trace.y = Some(
                years
                    .iter()
                    .map(|year| json!(by_state_year.get(&(*state, *year)).copied().unwrap_or(0)))
                    .collect(),
            );
            trace
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some("Ländervergleich im Zeitverlauf".to_string()),
            yaxis: Some(Axis {
                title: Some("Opferzahl".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

/// Horizontal diverging bar of per-state change between the first and
/// last selected year. Decreases render green, increases red.
#[must_use]
pub fn state_delta_bar(records: &[&VictimRecord]) -> Figure {
    let deltas = aggregate::state_delta(records);
    if deltas.is_empty() {
        return empty_figure("Mindestens zwei Jahre notwendig");
    }

    let years: BTreeSet<u16> = records.iter().map(|r| r.year).collect();
    let (first, last) = (
        years.iter().next().copied().unwrap_or(0),
        years.iter().next_back().copied().unwrap_or(0),
    );

    let colors: Vec<Value> = deltas
        .iter()
        .map(|(_, delta)| json!(if *delta < 0 { "#10b981" } else { "#ef4444" }))
        .collect();

    let mut trace = Trace::new("bar");
    trace.orientation = Some("h".to_string());
    trace.x = Some(deltas.iter().map(|(_, delta)| json!(delta)).collect());
    trace.y = Some(deltas.iter().map(|(state, _)| json!(state.to_string())).collect());
    trace.marker = Some(Marker {
        color: Some(Value::Array(colors)),
        ..Marker::default()
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(format!("Veränderung der Opferzahlen {first} → {last}")),
            ..Layout::default()
        },
    }
}

/// Scatter of male vs female victim counts per region, one trace per
/// state so the legend doubles as a state filter.
#[must_use]
pub fn gender_scatter(records: &[&VictimRecord]) -> Figure {
    let by_region = aggregate::gender_by_region(records);
    if by_region.is_empty() {
        return no_data();
    }

    let states: BTreeSet<_> = by_region.keys().map(|(_, state)| *state).collect();

    let data: Vec<Trace> = states
        .into_iter()
        .map(|state| {
            let points: Vec<(&String, u64, u64)> = by_region
                .iter()
                .filter(|((_, s), _)| *s == state)
                .map(|((region, _), (male, female))| (region, *male, *female))
                .collect();

            let mut trace = Trace::new("scatter");
            trace.mode = Some("markers".to_string());
            trace.name = Some(state.to_string());
            trace.x = Some(points.iter().map(|(_, male, _)| json!(male)).collect());
            trace.y = Some(points.iter().map(|(_, _, female)| json!(female)).collect());
            trace.text = Some(points.iter().map(|(region, ..)| json!(region)).collect());
            trace
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: Some("Geschlechtervergleich (m/w)".to_string()),
            xaxis: Some(Axis {
                title: Some("Opfer männlich".to_string()),
                ..Axis::default()
            }),
            yaxis: Some(Axis {
                title: Some("Opfer weiblich".to_string()),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}
