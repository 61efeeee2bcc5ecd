//! Geographic page figures: choropleth maps and regional bars.

use opferdash_analytics::aggregate;
use opferdash_geojoin::ChoroplethRow;
use opferdash_geometry::AdminPolygon;
use opferdash_stats_models::VictimRecord;
use serde_json::{Value, json};

use crate::ColorMode;
use crate::figure::{Axis, Figure, Layout, Marker, Trace, empty_figure, no_data};

/// Message shown when the boundary files failed to load at startup.
pub const GEO_UNAVAILABLE_MESSAGE: &str = "Geodaten konnten nicht geladen werden";

/// Placeholder for the whole geo subsystem when no geometry is loaded.
#[must_use]
pub fn geo_unavailable() -> Figure {
    empty_figure(GEO_UNAVAILABLE_MESSAGE)
}

/// Builds the `GeoJSON` feature collection a choropleth trace references.
/// One feature per exploded polygon part, keyed by boundary name.
#[must_use]
pub fn boundary_features(polygons: &[&AdminPolygon]) -> Value {
    let features: Vec<Value> = polygons
        .iter()
        .map(|polygon| {
            json!({
                "type": "Feature",
                "properties": {
                    "name": polygon.name,
                    "state": polygon.state,
                },
                "geometry": serde_json::to_value(polygon.geojson_geometry())
                    .unwrap_or(Value::Null),
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

/// A choropleth over the given polygons and pre-joined metric rows.
///
/// Every polygon in scope renders: rows are zero-filled by the join, so
/// coverage gaps show as zero-valued regions rather than holes.
#[must_use]
pub fn choropleth(
    rows: &[ChoroplethRow],
    polygons: &[&AdminPolygon],
    colors: ColorMode,
    title: &str,
) -> Figure {
    if rows.is_empty() || polygons.is_empty() {
        return no_data();
    }

    let mut trace = Trace::new("choropleth");
    trace.geojson = Some(boundary_features(polygons));
    trace.featureidkey = Some("properties.name".to_string());
    trace.locations = Some(rows.iter().map(|r| json!(r.name)).collect());
    trace.z = Some(Value::Array(rows.iter().map(|r| json!(r.value)).collect()));
    trace.colorscale = Some(colors.sequential().to_string());
    trace.text = Some(
        rows.iter()
            .map(|r| json!(format!("{} ({})", r.name, r.state)))
            .collect(),
    );
    trace
        .extra
        .insert("colorbar".to_string(), json!({ "title": "Opfer gesamt" }));

    let mut layout = Layout {
        title: Some(title.to_string()),
        ..Layout::default()
    };
    layout.extra.insert(
        "geo".to_string(),
        json!({ "fitbounds": "locations", "visible": false }),
    );

    Figure {
        data: vec![trace],
        layout,
    }
}

/// Country view: victims per federal state.
#[must_use]
pub fn country_choropleth(
    rows: &[ChoroplethRow],
    polygons: &[&AdminPolygon],
    colors: ColorMode,
) -> Figure {
    choropleth(rows, polygons, colors, "Opfer nach Bundesland")
}

/// Drill-down view: victims per city/district of one state.
#[must_use]
pub fn state_choropleth(
    state_name: &str,
    rows: &[ChoroplethRow],
    polygons: &[&AdminPolygon],
    colors: ColorMode,
) -> Figure {
    choropleth(
        rows,
        polygons,
        colors,
        &format!("Opfer nach Stadt/Landkreis – {state_name}"),
    )
}

/// Vertical bar of victim totals per federal state.
#[must_use]
pub fn state_totals_bar(records: &[&VictimRecord], colors: ColorMode) -> Figure {
    let by_state = aggregate::totals_by_state(records);
    if by_state.is_empty() {
        return no_data();
    }

    let values: Vec<Value> = by_state.values().map(|v| json!(v)).collect();
    let mut trace = Trace::new("bar");
    trace.x = Some(by_state.keys().map(|s| json!(s.to_string())).collect());
    trace.y = Some(values.clone());
    trace.marker = Some(Marker {
        color: Some(Value::Array(values)),
        colorscale: Some(colors.sequential_cool().to_string()),
        showscale: Some(false),
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some("Opfer nach Bundesland".to_string()),
            xaxis: Some(Axis {
                tickangle: Some(-45),
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

/// Horizontal Top-10 bar of regions, labeled `Region (Staat)`.
#[must_use]
pub fn top_regions_bar(records: &[&VictimRecord], n: usize, colors: ColorMode) -> Figure {
    let top = aggregate::top_n(&aggregate::totals_by_region(records), n);
    if top.is_empty() {
        return no_data();
    }

    let mut rows = top;
    rows.reverse();

    let values: Vec<Value> = rows.iter().map(|(_, v)| json!(v)).collect();
    let mut trace = Trace::new("bar");
    trace.orientation = Some("h".to_string());
    trace.x = Some(values.clone());
    trace.y = Some(
        rows.iter()
            .map(|((region, state), _)| json!(format!("{region} ({state})")))
            .collect(),
    );
    trace.marker = Some(Marker {
        color: Some(Value::Array(values)),
        colorscale: Some(colors.sequential().to_string()),
        showscale: Some(false),
    });

    Figure {
        data: vec![trace],
        layout: Layout {
            title: Some(format!("Top {n} Regionen nach Opferzahl")),
            xaxis: Some(Axis {
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
    use geo::{LineString, Polygon};
    use opferdash_stats_models::Bundesland;

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

    fn row(name: &str, state: &str, value: u64) -> ChoroplethRow {
        ChoroplethRow {
            name: name.to_string(),
            state: state.to_string(),
            value,
        }
    }

    #[test]
    fn empty_inputs_yield_placeholders() {
        assert!(choropleth(&[], &[], ColorMode::Standard, "x").data.is_empty());
        assert!(state_totals_bar(&[], ColorMode::Standard).data.is_empty());
        assert!(top_regions_bar(&[], 10, ColorMode::Standard).data.is_empty());
    }

    #[test]
    fn unavailable_geometry_has_its_own_message() {
        let fig = geo_unavailable();
        assert_eq!(fig.layout.annotations[0].text, GEO_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn choropleth_covers_every_row() {
        let bayern = polygon("Bayern", None);
        let sachsen = polygon("Sachsen", None);
        let polygons = vec![&bayern, &sachsen];
        let rows = vec![row("Bayern", "Bayern", 100), row("Sachsen", "Sachsen", 0)];
        let fig = choropleth(&rows, &polygons, ColorMode::Standard, "Karte");

        let locations = fig.data[0].locations.as_ref().unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(fig.data[0].featureidkey.as_deref(), Some("properties.name"));
    }

    #[test]
    fn boundary_features_embed_name_and_state() {
        let muenchen = polygon("München", Some("Bayern"));
        let features = boundary_features(&[&muenchen]);
        assert_eq!(features["features"][0]["properties"]["name"], "München");
        assert_eq!(features["features"][0]["properties"]["state"], "Bayern");
        assert_eq!(features["features"][0]["geometry"]["type"], "Polygon");
    }

    fn record(state: Bundesland, region: &str, total: u64) -> VictimRecord {
        VictimRecord {
            year: 2020,
            municipality_key: state.code() * 1000,
            region: region.to_string(),
            state: Some(state),
            offense_raw: "A".to_string(),
            label: "A".to_string(),
            total,
            male: 0,
            female: 0,
            age_bands: [0; 5],
        }
    }

    #[test]
    fn top_regions_combine_region_and_state_labels() {
        let records = vec![
            record(Bundesland::Bayern, "München", 100),
            record(Bundesland::Sachsen, "Leipzig", 50),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();
        let fig = top_regions_bar(&rows, 10, ColorMode::Standard);
        let labels = fig.data[0].y.as_ref().unwrap();
        assert!(labels.contains(&json!("München (Bayern)")));
        assert!(labels.contains(&json!("Leipzig (Sachsen)")));
    }
}
