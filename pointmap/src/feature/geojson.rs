//! GeoJSON decoding for point feature collections.
//!
//! Decoding is strict: the document must be a `FeatureCollection` of `Point`
//! features whose properties are all strings, and every feature must carry a
//! non-empty `name` and a palette `color`. The first bad feature aborts the
//! load.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::error::LoadError;
use super::types::{FeatureCollection, PointColor, PointFeature};
use crate::coord::GeoCoord;

/// Property holding the feature's display name.
pub const NAME_PROPERTY: &str = "name";

/// Property holding the feature's palette color.
pub const COLOR_PROPERTY: &str = "color";

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(rename = "type")]
    kind: String,
    properties: HashMap<String, String>,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

/// Decodes a feature collection from raw GeoJSON bytes.
///
/// Features are returned in file order with coordinates converted from
/// GeoJSON `[longitude, latitude]` order to latitude-first [`GeoCoord`]s.
pub fn load(raw: &[u8]) -> Result<FeatureCollection, LoadError> {
    let doc: RawCollection = serde_json::from_slice(raw)?;

    if doc.kind != "FeatureCollection" {
        return Err(LoadError::Decode(format!(
            "expected type 'FeatureCollection', found '{}'",
            doc.kind
        )));
    }

    let features = doc
        .features
        .into_iter()
        .enumerate()
        .map(|(index, raw)| to_point_feature(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = features.len(), "Decoded feature collection");
    Ok(FeatureCollection::new(features))
}

/// Reads and decodes a feature collection from a file.
pub fn load_from_path(path: &Path) -> Result<FeatureCollection, LoadError> {
    let raw = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let collection = load(&raw)?;
    info!(
        path = %path.display(),
        features = collection.len(),
        "Loaded feature file"
    );
    Ok(collection)
}

fn to_point_feature(index: usize, raw: RawFeature) -> Result<PointFeature, LoadError> {
    if raw.kind != "Feature" {
        return Err(LoadError::Decode(format!(
            "feature {}: expected type 'Feature', found '{}'",
            index, raw.kind
        )));
    }

    let name = required_property(index, &raw.properties, NAME_PROPERTY)?;
    let color_value = required_property(index, &raw.properties, COLOR_PROPERTY)?;
    let color: PointColor = color_value
        .parse()
        .map_err(|_| LoadError::UnknownColor {
            index,
            color: color_value.to_string(),
        })?;

    let geometry = raw.geometry;
    if geometry.kind != "Point" {
        return Err(LoadError::Decode(format!(
            "feature {}: expected 'Point' geometry, found '{}'",
            index, geometry.kind
        )));
    }

    // GeoJSON positions are [lon, lat, (alt)]
    let (lon, lat) = match geometry.coordinates.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => {
            return Err(LoadError::Decode(format!(
                "feature {}: point needs 2 coordinates, found {}",
                index,
                geometry.coordinates.len()
            )));
        }
    };

    let coordinate = GeoCoord::new(lat, lon)
        .map_err(|source| LoadError::InvalidCoordinate { index, source })?;

    Ok(PointFeature::new(name.to_string(), color, coordinate))
}

fn required_property<'a>(
    index: usize,
    properties: &'a HashMap<String, String>,
    property: &'static str,
) -> Result<&'a str, LoadError> {
    match properties.get(property).map(String::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::MissingProperty { index, property }),
    }
}
