//! Parses GADM `GeoJSON` layers into [`AdminPolygon`] lists.

use std::path::Path;

use geo::{Geometry, MultiPolygon, Polygon};
use geojson::{FeatureCollection, GeoJson};

use crate::{AdminPolygon, GeometryError, GeometryStore};

/// GADM level-1 layer file (federal states), attribute `NAME_1`.
pub const STATE_LAYER_FILE: &str = "gadm41_DEU_1.json";
/// GADM level-2 layer file (cities/districts), attributes `NAME_1`/`NAME_2`.
pub const DISTRICT_LAYER_FILE: &str = "gadm41_DEU_2.json";

/// Loads both boundary layers from `dir` into a [`GeometryStore`].
///
/// # Errors
///
/// Returns [`GeometryError`] if either file is unreadable, is not a
/// feature collection, or carries non-geographic coordinates. Callers
/// are expected to degrade to placeholder map figures on error rather
/// than failing startup.
pub fn load_store(dir: &Path) -> Result<GeometryStore, GeometryError> {
    let states = load_layer(&dir.join(STATE_LAYER_FILE), "NAME_1", None)?;
    log::info!("Loaded {} state polygon parts", states.len());

    let districts = load_layer(&dir.join(DISTRICT_LAYER_FILE), "NAME_2", Some("NAME_1"))?;
    log::info!("Loaded {} district polygon parts", districts.len());

    Ok(GeometryStore::new(states, districts))
}

/// Loads one layer file.
///
/// # Errors
///
/// Returns [`GeometryError`] on read or parse failure.
pub fn load_layer(
    path: &Path,
    name_field: &str,
    parent_field: Option<&str>,
) -> Result<Vec<AdminPolygon>, GeometryError> {
    let text = std::fs::read_to_string(path).map_err(|source| GeometryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_layer(&text, name_field, parent_field, &path.display().to_string())
}

/// Parses a `GeoJSON` feature collection into exploded polygon parts.
///
/// Features without the name attribute or without polygonal geometry are
/// skipped with a debug log, matching the tolerance of the upstream GADM
/// files where a handful of features carry null attributes.
///
/// # Errors
///
/// Returns [`GeometryError`] when the text is not valid `GeoJSON`, not a
/// feature collection, or when coordinates fall outside lon/lat degree
/// ranges (i.e. the layer was exported in a projected CRS).
pub fn parse_layer(
    text: &str,
    name_field: &str,
    parent_field: Option<&str>,
    path: &str,
) -> Result<Vec<AdminPolygon>, GeometryError> {
    let geojson: GeoJson = text.parse()?;
    let collection = FeatureCollection::try_from(geojson).map_err(|_| {
        GeometryError::NotAFeatureCollection {
            path: path.to_string(),
        }
    })?;

    let mut polygons = Vec::new();

    for feature in collection.features {
        let Some(name) = string_property(&feature, name_field) else {
            log::debug!("Skipping feature without '{name_field}' in {path}");
            continue;
        };
        let state = parent_field.and_then(|field| string_property(&feature, field));

        let Some(geometry) = feature.geometry else {
            log::debug!("Skipping feature '{name}' without geometry in {path}");
            continue;
        };
        let geometry = Geometry::<f64>::try_from(geometry.value)?;

        for polygon in explode(geometry) {
            if !is_geographic(&polygon) {
                return Err(GeometryError::NotGeographic { name });
            }
            polygons.push(AdminPolygon {
                name: name.clone(),
                state: state.clone(),
                polygon,
            });
        }
    }

    Ok(polygons)
}

/// Extracts a trimmed, non-empty string property from a feature.
fn string_property(feature: &geojson::Feature, field: &str) -> Option<String> {
    feature
        .property(field)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Explodes a geometry into its polygon parts. Non-areal geometries
/// yield nothing.
fn explode(geometry: Geometry<f64>) -> Vec<Polygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => vec![polygon],
        Geometry::MultiPolygon(MultiPolygon(parts)) => parts,
        Geometry::GeometryCollection(collection) => {
            collection.into_iter().flat_map(explode).collect()
        }
        _ => Vec::new(),
    }
}

/// Whether every exterior-ring coordinate looks like lon/lat degrees.
fn is_geographic(polygon: &Polygon<f64>) -> bool {
    polygon
        .exterior()
        .coords()
        .all(|c| (-180.0..=180.0).contains(&c.x) && (-90.0..=90.0).contains(&c.y))
}
