#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative boundary polygons for Germany.
//!
//! Loads the GADM level-1 (federal state) and level-2 (city/district)
//! boundary layers from `GeoJSON` feature collections into an immutable
//! in-memory [`GeometryStore`]. Multi-polygons are exploded into their
//! parts so every stored polygon is a single exterior ring with holes.
//!
//! The store is built once at startup and shared read-only; there is no
//! lazy first-use caching.

pub mod loader;

use geo::Polygon;
use thiserror::Error;

/// Errors that can occur while loading boundary files.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Boundary file is missing or unreadable.
    #[error("Failed to read boundary file {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The file parsed but is not a feature collection.
    #[error("Expected a FeatureCollection in {path}")]
    NotAFeatureCollection {
        /// Path of the offending file.
        path: String,
    },

    /// Coordinates are not geographic (WGS84 lon/lat degrees).
    #[error("Boundary '{name}' has non-geographic coordinates; expected WGS84 degrees")]
    NotGeographic {
        /// Name of the offending boundary.
        name: String,
    },
}

/// One named administrative boundary part, immutable after load.
///
/// District polygons reference their parent state by name only; the
/// statistics side carries state names too, so the weak link is enough.
#[derive(Debug, Clone)]
pub struct AdminPolygon {
    /// Boundary name (`NAME_1` for states, `NAME_2` for districts).
    pub name: String,
    /// Parent state name for district polygons, `None` for states.
    pub state: Option<String>,
    /// One exploded polygon part.
    pub polygon: Polygon<f64>,
}

impl AdminPolygon {
    /// The boundary geometry as a `GeoJSON` geometry for rendering.
    #[must_use]
    pub fn geojson_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::from(&self.polygon))
    }
}

/// The process-lifetime boundary dataset: state-level and district-level
/// polygon layers.
#[derive(Debug, Default)]
pub struct GeometryStore {
    states: Vec<AdminPolygon>,
    districts: Vec<AdminPolygon>,
}

impl GeometryStore {
    /// Wraps already-loaded polygon layers.
    #[must_use]
    pub const fn new(states: Vec<AdminPolygon>, districts: Vec<AdminPolygon>) -> Self {
        Self { states, districts }
    }

    /// State-level polygon parts.
    #[must_use]
    pub fn states(&self) -> &[AdminPolygon] {
        &self.states
    }

    /// District-level polygon parts.
    #[must_use]
    pub fn districts(&self) -> &[AdminPolygon] {
        &self.districts
    }

    /// District polygon parts whose parent state matches `state_name`.
    #[must_use]
    pub fn districts_in_state<'a>(&'a self, state_name: &str) -> Vec<&'a AdminPolygon> {
        self.districts
            .iter()
            .filter(|p| p.state.as_deref() == Some(state_name))
            .collect()
    }
}
