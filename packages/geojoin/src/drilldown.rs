//! The two-state drill-down machine for the map.
//!
//! The map is either showing the whole country (state polygons) or one
//! state's cities (district polygons). The view is plain data that the
//! client holds between requests, but the transitions are modeled
//! explicitly here instead of being inferred from heterogeneous click
//! payloads in the UI layer.

use opferdash_stats_models::Bundesland;
use serde::{Deserialize, Serialize};

/// A map click payload. Which field is populated depends on which map
/// element was clicked, so all three are optional and consulted in
/// priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapClick {
    /// Hover label of the clicked polygon, when present.
    pub hover_label: Option<String>,
    /// Location id of the clicked polygon, when present.
    pub location_id: Option<String>,
    /// Custom-data field attached to the clicked trace, when present.
    pub custom_data: Option<String>,
}

impl MapClick {
    /// The clicked region name, resolved by priority: hover label, then
    /// location id, then custom data. Absent and blank fields both fall
    /// through to the next candidate.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        [&self.hover_label, &self.location_id, &self.custom_data]
            .into_iter()
            .find_map(|field| field.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    }
}

/// The map's current granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "state", rename_all = "camelCase")]
pub enum MapView {
    /// Country view: one polygon per federal state.
    #[default]
    Country,
    /// Drilled into one state: city/district polygons of that state only.
    StateDrilldown(Bundesland),
}

impl MapView {
    /// Applies a map click.
    ///
    /// In country view, a click on a recognizable state name drills in;
    /// clicks resolving to no known state are ignored. In drill-down
    /// view, further map clicks are no-ops.
    #[must_use]
    pub fn on_click(self, click: &MapClick) -> Self {
        match self {
            Self::Country => click
                .region()
                .and_then(|name| name.parse::<Bundesland>().ok())
                .map_or(self, Self::StateDrilldown),
            Self::StateDrilldown(_) => self,
        }
    }

    /// Applies the explicit back action: always returns to country view.
    #[must_use]
    pub const fn on_back(self) -> Self {
        Self::Country
    }

    /// Applies a change of the active state filter: any drill-down is
    /// abandoned because the drilled state may no longer be selected.
    #[must_use]
    pub const fn on_filter_change(self) -> Self {
        Self::Country
    }

    /// The drilled-into state, if any.
    #[must_use]
    pub const fn drilled_state(self) -> Option<Bundesland> {
        match self {
            Self::Country => None,
            Self::StateDrilldown(state) => Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(label: Option<&str>, id: Option<&str>, custom: Option<&str>) -> MapClick {
        MapClick {
            hover_label: label.map(str::to_string),
            location_id: id.map(str::to_string),
            custom_data: custom.map(str::to_string),
        }
    }

    #[test]
    fn initial_view_is_country() {
        assert_eq!(MapView::default(), MapView::Country);
    }

    #[test]
    fn click_in_country_view_drills_into_state() {
        let next = MapView::Country.on_click(&click(Some("Sachsen"), None, None));
        assert_eq!(next, MapView::StateDrilldown(Bundesland::Sachsen));
    }

    #[test]
    fn click_payload_fields_resolve_in_priority_order() {
        // hover label beats location id beats custom data
        let c = click(Some("Bayern"), Some("Sachsen"), Some("Hessen"));
        assert_eq!(c.region(), Some("Bayern"));

        let c = click(None, Some("Sachsen"), Some("Hessen"));
        assert_eq!(c.region(), Some("Sachsen"));

        let c = click(None, None, Some("Hessen"));
        assert_eq!(c.region(), Some("Hessen"));

        assert_eq!(click(None, None, None).region(), None);
    }

    #[test]
    fn blank_payload_fields_fall_through() {
        // A populated-but-blank hover label must not short-circuit the
        // chain; the next candidate wins.
        let c = click(Some("  "), Some("Sachsen"), None);
        assert_eq!(c.region(), Some("Sachsen"));
        assert_eq!(
            MapView::Country.on_click(&c),
            MapView::StateDrilldown(Bundesland::Sachsen)
        );

        let c = click(Some("  "), Some(""), Some("Hessen"));
        assert_eq!(c.region(), Some("Hessen"));

        assert_eq!(click(Some(" "), Some(""), None).region(), None);
    }

    #[test]
    fn unknown_state_click_is_ignored() {
        let next = MapView::Country.on_click(&click(Some("Atlantis"), None, None));
        assert_eq!(next, MapView::Country);
    }

    #[test]
    fn clicks_in_drilldown_are_no_ops() {
        let view = MapView::StateDrilldown(Bundesland::Sachsen);
        let next = view.on_click(&click(Some("Bayern"), None, None));
        assert_eq!(next, view);
    }

    #[test]
    fn back_returns_to_country() {
        let view = MapView::StateDrilldown(Bundesland::Bayern);
        assert_eq!(view.on_back(), MapView::Country);
        assert_eq!(MapView::Country.on_back(), MapView::Country);
    }

    #[test]
    fn filter_change_clears_drilldown() {
        let view = MapView::StateDrilldown(Bundesland::Hessen);
        assert_eq!(view.on_filter_change(), MapView::Country);
    }
}
