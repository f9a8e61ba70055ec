use std::path::Path;

use palpite_shared::{GeoPoint, MunicipalityFeature};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FeatureLoadError {
    #[error("failed to read feature file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse feature file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Value,
}

/// Load municipality features from a GeoJSON file, taking the display
/// name from `name_property` and deriving each feature's position as
/// the center of its coordinate bounding box (what the original map
/// widget reported for a polygon layer). Features with a missing name
/// or unusable geometry are skipped with a warning.
pub fn load_features(
    path: &Path,
    name_property: &str,
) -> Result<Vec<MunicipalityFeature>, FeatureLoadError> {
    let raw = std::fs::read_to_string(path)?;
    let collection: FeatureCollection = serde_json::from_str(&raw)?;

    let mut features = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let name = feature
            .properties
            .get(name_property)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let Some(name) = name else {
            warn!(index, name_property, "feature without a usable name, skipping");
            continue;
        };

        let position = feature
            .geometry
            .as_ref()
            .and_then(|geometry| bounds_center(&geometry.coordinates));
        let Some(position) = position else {
            warn!(index, name, "feature without usable geometry, skipping");
            continue;
        };

        features.push(MunicipalityFeature {
            display_name: name.to_string(),
            position,
        });
    }

    Ok(features)
}

/// Center of the lat/lon bounding box over every position in a GeoJSON
/// coordinates value. Works for Point, Polygon and MultiPolygon alike
/// by walking the nesting until `[lon, lat]` leaves.
fn bounds_center(coordinates: &Value) -> Option<GeoPoint> {
    let mut bounds = Bounds::default();
    collect_positions(coordinates, &mut bounds);
    bounds.center()
}

#[derive(Debug, Default)]
struct Bounds {
    min_lat: Option<f64>,
    max_lat: Option<f64>,
    min_lon: Option<f64>,
    max_lon: Option<f64>,
}

impl Bounds {
    fn extend(&mut self, lat: f64, lon: f64) {
        if !lat.is_finite() || !lon.is_finite() {
            return;
        }
        self.min_lat = Some(self.min_lat.map_or(lat, |v| v.min(lat)));
        self.max_lat = Some(self.max_lat.map_or(lat, |v| v.max(lat)));
        self.min_lon = Some(self.min_lon.map_or(lon, |v| v.min(lon)));
        self.max_lon = Some(self.max_lon.map_or(lon, |v| v.max(lon)));
    }

    fn center(&self) -> Option<GeoPoint> {
        match (self.min_lat, self.max_lat, self.min_lon, self.max_lon) {
            (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) => Some(GeoPoint::new(
                (min_lat + max_lat) / 2.0,
                (min_lon + max_lon) / 2.0,
            )),
            _ => None,
        }
    }
}

fn collect_positions(value: &Value, bounds: &mut Bounds) {
    let Some(items) = value.as_array() else {
        return;
    };
    // GeoJSON positions are `[lon, lat, ...]`; anything deeper is a
    // ring/polygon nesting level.
    if let [Value::Number(lon), Value::Number(lat), ..] = items.as_slice() {
        if let (Some(lon), Some(lat)) = (lon.as_f64(), lat.as_f64()) {
            bounds.extend(lat, lon);
        }
        return;
    }
    for item in items {
        collect_positions(item, bounds);
    }
}
