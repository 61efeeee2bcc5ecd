//! HTTP handler functions for the dashboard API.
//!
//! Every page handler follows the same shape: parse the filter query,
//! apply it to the statistics, build the page's figures, respond with
//! JSON. Figure builders absorb empty selections, so handlers never
//! fail on "no data".

use actix_web::{HttpResponse, web};
use opferdash_analytics::{aggregate, apply_filter, kpi};
use opferdash_charts::{ColorMode, categories as category_charts, geo as geo_charts, overview as overview_charts, temporal as temporal_charts, trends as trend_charts};
use opferdash_geojoin::{MapView, RegionMetric, matcher};
use opferdash_geometry::AdminPolygon;
use opferdash_server_models::{
    ApiCategories, ApiFilters, ApiGeo, ApiHealth, ApiOverview, ApiTemporal, ApiTrends,
    FilterParams, ViewEvent, ViewRequest, ViewResponse,
};
use opferdash_stats_models::{TOTAL_LABEL, VictimRecord};

use crate::{AppState, GeoData};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/filters`
///
/// Returns the dropdown options for the sidebar.
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    let stats = &state.stats;
    HttpResponse::Ok().json(ApiFilters {
        years: stats.years(),
        labels: stats.labels(),
        states: stats.states().iter().map(ToString::to_string).collect(),
    })
}

/// `GET /api/overview`
///
/// KPI headline numbers plus trend, top-categories, and treemap figures.
pub async fn overview(state: web::Data<AppState>, params: web::Query<FilterParams>) -> HttpResponse {
    let selection = params.selection();
    let rows = apply_filter(state.stats.records(), &selection);
    let colors = ColorMode::from_param(params.colors.as_deref());
    let top_n = params.top_n.unwrap_or(5);

    HttpResponse::Ok().json(ApiOverview {
        kpis: kpi::build_kpis(&rows),
        trend: overview_charts::trend_line(&rows),
        top_categories: overview_charts::top_categories_bar(&rows, top_n, colors),
        treemap: overview_charts::category_treemap(&rows),
    })
}

/// `GET /api/geo`
///
/// Choropleth (country or drill-down per the `drill` parameter), state
/// bar, and top-regions figures. When boundary data failed to load the
/// map degrades to a placeholder while the bars stay functional.
pub async fn geo(state: web::Data<AppState>, params: web::Query<FilterParams>) -> HttpResponse {
    let selection = params.selection();
    let rows = apply_filter(state.stats.records(), &selection);
    let colors = ColorMode::from_param(params.colors.as_deref());
    let view = params.drill_view();

    let map = state.geo.as_ref().map_or_else(
        geo_charts::geo_unavailable,
        |geo| build_map(geo, &rows, view, colors),
    );

    HttpResponse::Ok().json(ApiGeo {
        view,
        map,
        state_bar: geo_charts::state_totals_bar(&rows, colors),
        top_regions: geo_charts::top_regions_bar(&rows, params.top_n.unwrap_or(10), colors),
    })
}

/// `POST /api/geo/view`
///
/// Applies one event to the map view state machine and returns the next
/// view. The view itself stays client-held; this endpoint is the single
/// place where transitions are decided.
pub async fn geo_view(body: web::Json<ViewRequest>) -> HttpResponse {
    let next = match &body.event {
        ViewEvent::Click(click) => body.view.on_click(click),
        ViewEvent::Back => body.view.on_back(),
        ViewEvent::FilterChange => body.view.on_filter_change(),
    };
    HttpResponse::Ok().json(ViewResponse { view: next })
}

/// `GET /api/categories`
///
/// Heatmap, stacked bars, age structure, and the reused top/treemap
/// figures for the crime categories page.
pub async fn categories(
    state: web::Data<AppState>,
    params: web::Query<FilterParams>,
) -> HttpResponse {
    let selection = params.selection();
    let rows = apply_filter(state.stats.records(), &selection);
    let colors = ColorMode::from_param(params.colors.as_deref());
    let age_label = params.age_label.as_deref().unwrap_or(TOTAL_LABEL);

    HttpResponse::Ok().json(ApiCategories {
        heatmap: category_charts::label_year_heatmap(&rows, colors),
        stacked: category_charts::stacked_label_years(&rows, 6),
        age: category_charts::age_distribution_bar(&rows, age_label, colors),
        top_categories: overview_charts::top_categories_bar(&rows, params.top_n.unwrap_or(5), colors),
        treemap: overview_charts::category_treemap(&rows),
    })
}

/// `GET /api/temporal`
pub async fn temporal(state: web::Data<AppState>, params: web::Query<FilterParams>) -> HttpResponse {
    let selection = params.selection();
    let rows = apply_filter(state.stats.records(), &selection);

    HttpResponse::Ok().json(ApiTemporal {
        state_trends: temporal_charts::state_trend_lines(&rows, 6),
        delta: temporal_charts::state_delta_bar(&rows),
        gender: temporal_charts::gender_scatter(&rows),
    })
}

/// `GET /api/trends`
pub async fn trends(state: web::Data<AppState>, params: web::Query<FilterParams>) -> HttpResponse {
    let selection = params.selection();
    let rows = apply_filter(state.stats.records(), &selection);

    HttpResponse::Ok().json(ApiTrends {
        indexed: trend_charts::indexed_trend_lines(&rows, params.top_n.unwrap_or(6)),
        yoy: trend_charts::yoy_change_bar(&rows),
        share: trend_charts::category_share_area(&rows, 5),
    })
}

/// Builds the choropleth for the active view: state polygons with
/// per-state totals in country view, one state's district polygons with
/// per-region totals when drilled in.
fn build_map(
    geo: &GeoData,
    rows: &[&VictimRecord],
    view: MapView,
    colors: ColorMode,
) -> opferdash_charts::Figure {
    // The map counts offense-group rows only; the sentinel would double
    // every region.
    let map_rows = aggregate::without_total(rows);

    match view.drilled_state() {
        None => {
            let metrics: Vec<RegionMetric> = aggregate::totals_by_state(&map_rows)
                .into_iter()
                .map(|(state, value)| RegionMetric {
                    state,
                    region: state.to_string(),
                    value,
                })
                .collect();

            let outcome = matcher::match_metrics(&metrics, &geo.state_index);
            let scope: Vec<&AdminPolygon> = geo.store.states().iter().collect();
            let table = matcher::choropleth_rows(&scope, &outcome);
            geo_charts::country_choropleth(&table, &scope, colors)
        }
        Some(drilled) => {
            let metrics: Vec<RegionMetric> = aggregate::totals_by_region(&map_rows)
                .into_iter()
                .filter(|((_, state), _)| *state == drilled)
                .map(|((region, state), value)| RegionMetric {
                    state,
                    region,
                    value,
                })
                .collect();

            let outcome = matcher::match_metrics(&metrics, &geo.district_index);
            let state_name = drilled.to_string();
            let scope = geo.store.districts_in_state(&state_name);
            let table = matcher::choropleth_rows(&scope, &outcome);
            geo_charts::state_choropleth(&state_name, &table, &scope, colors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};
    use opferdash_geometry::GeometryStore;
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

    fn record(state: Bundesland, region: &str, label: &str, total: u64) -> VictimRecord {
        VictimRecord {
            year: 2020,
            municipality_key: state.code() * 1000,
            region: region.to_string(),
            state: Some(state),
            offense_raw: label.to_string(),
            label: label.to_string(),
            total,
            male: 0,
            female: 0,
            age_bands: [0; 5],
        }
    }

    fn geo_data() -> GeoData {
        let states = vec![polygon("Bayern", None), polygon("Sachsen", None)];
        let districts = vec![
            polygon("München", Some("Bayern")),
            polygon("Leipzig", Some("Sachsen")),
            polygon("Dresden", Some("Sachsen")),
        ];
        GeoData::new(GeometryStore::new(states, districts))
    }

    #[test]
    fn country_map_covers_all_state_polygons() {
        let geo = geo_data();
        let records = vec![record(Bundesland::Bayern, "Bayern", "A", 100)];
        let rows: Vec<&VictimRecord> = records.iter().collect();

        let fig = build_map(&geo, &rows, MapView::Country, ColorMode::Standard);
        let locations = fig.data[0].locations.as_ref().unwrap();
        // Sachsen has no data but still renders (zero-filled).
        assert_eq!(locations.len(), 2);
    }

    #[test]
    fn drilldown_restricts_to_one_states_districts() {
        let geo = geo_data();
        let records = vec![
            record(Bundesland::Sachsen, "Leipzig", "A", 40),
            record(Bundesland::Bayern, "München", "A", 100),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();

        let fig = build_map(
            &geo,
            &rows,
            MapView::StateDrilldown(Bundesland::Sachsen),
            ColorMode::Standard,
        );
        let locations = fig.data[0].locations.as_ref().unwrap();
        // Leipzig + Dresden only; München is out of scope.
        assert_eq!(locations.len(), 2);
        assert!(!locations.contains(&serde_json::json!("München")));

        let features = fig.data[0].geojson.as_ref().unwrap();
        let states: Vec<&str> = features["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["properties"]["state"].as_str().unwrap())
            .collect();
        assert!(states.iter().all(|s| *s == "Sachsen"));
    }

    #[test]
    fn sentinel_rows_do_not_inflate_the_map() {
        let geo = geo_data();
        let records = vec![
            record(Bundesland::Bayern, "Bayern", TOTAL_LABEL, 1000),
            record(Bundesland::Bayern, "Bayern", "A", 100),
        ];
        let rows: Vec<&VictimRecord> = records.iter().collect();

        let fig = build_map(&geo, &rows, MapView::Country, ColorMode::Standard);
        let Some(serde_json::Value::Array(z)) = &fig.data[0].z else {
            panic!("expected z values");
        };
        let locations = fig.data[0].locations.as_ref().unwrap();
        let bayern_idx = locations
            .iter()
            .position(|l| l == &serde_json::json!("Bayern"))
            .unwrap();
        assert_eq!(z[bayern_idx], serde_json::json!(100));
    }
}
