//! # Value Objects
//!
//! Coordinates, identifiers and the typed geospatial predicate.
//!
//! Serialized coordinate pairs are always `[longitude, latitude]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::errors::DirectoryError;
use super::invariants::{invariant_valid_coordinates, EARTH_RADIUS_KM, POINT_KIND};
use crate::algorithms::{haversine_km, km_to_radians};

/// A validated point on the globe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Degrees north, within [-90, 90].
    pub latitude: f64,
    /// Degrees east, within [-180, 180].
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DirectoryError> {
        invariant_valid_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a point from raw query text.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, DirectoryError> {
        let lat = parse_degrees("latitude", latitude)?;
        let lon = parse_degrees("longitude", longitude)?;
        Self::new(lat, lon)
    }

    /// Read a `[longitude, latitude]` pair. `None` unless there are exactly
    /// two finite, in-range numbers.
    pub fn from_coordinates(coordinates: &[f64]) -> Option<Self> {
        match coordinates {
            [lon, lat] => Self::new(*lat, *lon).ok(),
            _ => None,
        }
    }

    /// The `[longitude, latitude]` pair for storage and the wire.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Great-circle distance to another point in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, DirectoryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::Validation(format!("{field} is required")));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| DirectoryError::Validation(format!("{field} is not a number: {raw:?}")))
}

/// GeoJSON-style location attached to a network record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Geometry marker. Always `"Point"` once registered.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `[longitude, latitude]`. Kept raw so legacy documents still decode.
    #[serde(default)]
    pub coordinates: Vec<f64>,
    /// Free-text street address. Empty when not supplied.
    #[serde(default)]
    pub address: String,
}

impl Location {
    /// Build a point location.
    pub fn point(point: GeoPoint, address: impl Into<String>) -> Self {
        Self {
            kind: POINT_KIND.to_string(),
            coordinates: point.coordinates().to_vec(),
            address: address.into(),
        }
    }

    /// The stored point, if the coordinates are usable.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_coordinates(&self.coordinates)
    }
}

/// Store-assigned record identifier (UUID v4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(Uuid);

impl NetworkId {
    /// Assign a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, DirectoryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryError::Validation("wifi_id is required".into()));
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| DirectoryError::Validation(format!("invalid wifi_id: {raw:?}")))
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Point-radius predicate with `$centerSphere` semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoQuery {
    center: GeoPoint,
    radius_radians: f64,
}

impl GeoQuery {
    /// Everything within `radius_km` of `center`.
    pub fn within_km(center: GeoPoint, radius_km: f64) -> Self {
        Self {
            center,
            radius_radians: km_to_radians(radius_km),
        }
    }

    /// Query center.
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// Angular radius on the unit sphere.
    pub fn radius_radians(&self) -> f64 {
        self.radius_radians
    }

    /// Radius converted back to kilometres.
    pub fn radius_km(&self) -> f64 {
        self.radius_radians * EARTH_RADIUS_KM
    }

    /// `([longitude, latitude], radians)`, the shape a geospatial store expects.
    pub fn center_sphere(&self) -> ([f64; 2], f64) {
        (self.center.coordinates(), self.radius_radians)
    }

    /// Whether `point` falls inside the sphere cap.
    pub fn matches(&self, point: &GeoPoint) -> bool {
        self.center.distance_km(point) / EARTH_RADIUS_KM <= self.radius_radians
    }
}
