//! # Domain Entities
//!
//! Waypoints as produced by the suggester, route requests and the combined
//! stop/network results.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use wf_01_network_directory::{GeoPoint, NearbyNetwork};

use super::errors::FanoutError;

/// A suggested stop. Untrusted: coordinates may be missing or malformed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_degrees")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Waypoint {
    /// Waypoint at a known point.
    pub fn at(point: GeoPoint, name: Option<String>) -> Self {
        Self {
            latitude: Some(point.latitude),
            longitude: Some(point.longitude),
            name,
        }
    }

    /// Read one entry of a suggester `stops` array. Never fails: anything
    /// that is not an object yields a waypoint without coordinates.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            latitude: obj.get("latitude").and_then(degrees_from_value),
            longitude: obj.get("longitude").and_then(degrees_from_value),
            name: obj.get("name").and_then(Value::as_str).map(str::to_string),
        }
    }

    /// Usable point, if both coordinates are present, finite and in range.
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude?, self.longitude?).ok()
    }
}

/// Numbers, or numeric strings such as `"37.8"`.
fn degrees_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_degrees<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(degrees_from_value(&value))
}

/// Parameters for one suggester call.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Category of stop, e.g. `"restaurants"`. Empty means any.
    pub stop_type: String,
    pub max_stops: usize,
}

/// Route endpoints and options as raw query text.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub start_lat: String,
    #[serde(default)]
    pub start_lng: String,
    #[serde(default)]
    pub end_lat: String,
    #[serde(default)]
    pub end_lng: String,
    #[serde(default)]
    pub stop_type: Option<String>,
    #[serde(default)]
    pub max_stops: Option<String>,
}

impl RouteQuery {
    /// Parse and validate both endpoints.
    pub fn endpoints(&self) -> Result<(GeoPoint, GeoPoint), FanoutError> {
        let start = GeoPoint::parse(&self.start_lat, &self.start_lng)
            .map_err(|e| FanoutError::Validation(format!("start: {e}")))?;
        let end = GeoPoint::parse(&self.end_lat, &self.end_lng)
            .map_err(|e| FanoutError::Validation(format!("end: {e}")))?;
        Ok((start, end))
    }

    /// Build a suggester request, filling gaps from the defaults.
    pub fn into_request(
        self,
        default_stop_type: &str,
        default_stops: usize,
    ) -> Result<WaypointRequest, FanoutError> {
        let (start, end) = self.endpoints()?;
        let max_stops = match self.max_stops.as_deref().map(str::trim) {
            None | Some("") => default_stops,
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                FanoutError::Validation(format!("max_stops is not a count: {raw:?}"))
            })?,
        };
        Ok(WaypointRequest {
            start,
            end,
            stop_type: self
                .stop_type
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| default_stop_type.to_string()),
            max_stops,
        })
    }
}

/// Suggester output after payload extraction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRoute {
    pub stops: Vec<Waypoint>,
    #[serde(default)]
    pub route_description: String,
}

/// One waypoint joined with the networks around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopNetworks {
    #[serde(rename = "stop")]
    pub waypoint: Waypoint,
    #[serde(rename = "wifis")]
    pub networks: Vec<NearbyNetwork>,
}

/// Suggested route with per-stop networks, in suggester order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteNetworks {
    #[serde(rename = "stops_with_wifi")]
    pub stops: Vec<StopNetworks>,
    pub route_description: String,
}

/// Body of a caller-supplied stop list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StopsRequest {
    #[serde(default)]
    pub stops: Vec<Waypoint>,
}
