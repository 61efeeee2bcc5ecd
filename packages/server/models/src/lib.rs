#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! These types are serialized to JSON for the REST API. The figure
//! payloads come straight from `opferdash_charts`; the filter query
//! parameters arrive as comma-separated strings and are parsed here.

use opferdash_analytics::kpi::KpiSummary;
use opferdash_charts::Figure;
use opferdash_geojoin::{MapClick, MapView};
use opferdash_stats_models::{Bundesland, FilterSelection};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server considers itself healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// The dropdown options the sidebar offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilters {
    /// Available years, ascending.
    pub years: Vec<u16>,
    /// Available short crime labels, sorted.
    pub labels: Vec<String>,
    /// Available federal states.
    pub states: Vec<String>,
}

/// Common query parameters shared by every page endpoint.
///
/// The multi-select parameters are comma-separated; a missing parameter
/// means "all". Unparseable fragments are dropped rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Comma-separated years.
    pub years: Option<String>,
    /// Comma-separated short crime labels.
    pub crimes: Option<String>,
    /// Comma-separated state names.
    pub states: Option<String>,
    /// Top-N count for ranking charts.
    #[serde(rename = "top_n")]
    pub top_n: Option<usize>,
    /// Colorscale selector; `safe` picks the colorblind-safe palette.
    pub colors: Option<String>,
    /// Drill-down state name for the geographic page.
    pub drill: Option<String>,
    /// Selected label for the age-structure chart.
    #[serde(rename = "age_label")]
    pub age_label: Option<String>,
}

impl FilterParams {
    /// Parses the multi-select parameters into a [`FilterSelection`].
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            years: split_list(self.years.as_deref())
                .filter_map(|y| y.parse().ok())
                .collect(),
            labels: split_list(self.crimes.as_deref())
                .map(str::to_string)
                .collect(),
            states: split_list(self.states.as_deref())
                .filter_map(|s| s.parse().ok())
                .collect(),
        }
    }

    /// The drill-down view requested by the `drill` parameter, if the
    /// value names a known state.
    #[must_use]
    pub fn drill_view(&self) -> MapView {
        self.drill
            .as_deref()
            .and_then(|name| name.trim().parse::<Bundesland>().ok())
            .map_or(MapView::Country, MapView::StateDrilldown)
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Overview page payload: KPI strings plus three figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOverview {
    pub kpis: KpiSummary,
    pub trend: Figure,
    pub top_categories: Figure,
    pub treemap: Figure,
}

/// Geographic page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGeo {
    /// The active map view the figures were rendered for.
    pub view: MapView,
    pub map: Figure,
    pub state_bar: Figure,
    pub top_regions: Figure,
}

/// Crime categories page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategories {
    pub heatmap: Figure,
    pub stacked: Figure,
    pub age: Figure,
    pub top_categories: Figure,
    pub treemap: Figure,
}

/// Temporal page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTemporal {
    pub state_trends: Figure,
    pub delta: Figure,
    pub gender: Figure,
}

/// Trends page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTrends {
    pub indexed: Figure,
    pub yoy: Figure,
    pub share: Figure,
}

/// An event applied to the map view state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewEvent {
    /// A map click with its heterogeneous payload.
    Click(MapClick),
    /// The explicit back action.
    Back,
    /// The active state filter changed.
    FilterChange,
}

/// Request body for `POST /api/geo/view`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRequest {
    /// The client's current view.
    pub view: MapView,
    /// The event to apply.
    pub event: ViewEvent,
}

/// Response body for `POST /api/geo/view`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    /// The view after applying the event.
    pub view: MapView,
}
