#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Joins free-text statistics region names onto boundary polygons.
//!
//! Region names in the statistics ("Landkreis Rosenheim", "München") and
//! polygon names in the boundary layers ("Rosenheim", "München") never
//! agree byte-for-byte. Both sides are normalized into a comparable form
//! and matched per federal state, so a city name recurring in two states
//! ("Neustadt") can never match across a state border.
//!
//! Also home to the [`drilldown::MapView`] state machine that decides
//! whether the map renders state or city polygons.

pub mod drilldown;
pub mod matcher;
pub mod normalize;

pub use drilldown::{MapClick, MapView};
pub use matcher::{ChoroplethRow, MatchOutcome, PolygonIndex, RegionMetric};
