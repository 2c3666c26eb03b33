//! # Domain Entities
//!
//! Network records as stored, and the request/response shapes of the
//! directory operations.

use serde::{Deserialize, Serialize};

use super::value_objects::{GeoPoint, Location, NetworkId};

/// A validated registration, ready for insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct NewNetwork {
    pub ssid: String,
    pub credential: String,
    pub location: Location,
    pub description: String,
}

impl NewNetwork {
    /// Key of the (ssid, address) unique index.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.ssid, &self.location.address)
    }

    /// Attach a store-assigned identifier.
    pub fn into_document(self, id: NetworkId) -> NetworkDocument {
        NetworkDocument {
            id: id.to_string(),
            ssid: self.ssid,
            credential: self.credential,
            location: self.location,
            description: self.description,
        }
    }
}

/// Uniqueness key: (ssid, address). A missing address is the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    pub ssid: String,
    pub address: String,
}

impl DedupKey {
    pub fn new(ssid: &str, address: &str) -> Self {
        Self {
            ssid: ssid.to_string(),
            address: address.to_string(),
        }
    }

    /// Unambiguous byte encoding for key-value backends.
    pub fn to_storage_key(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.ssid.len() + self.address.len() + 8);
        key.extend_from_slice(&(self.ssid.len() as u64).to_be_bytes());
        key.extend_from_slice(self.ssid.as_bytes());
        key.extend_from_slice(self.address.as_bytes());
        key
    }
}

/// A record as persisted. Decoded leniently: a document with a missing or
/// malformed location still decodes, and callers decide whether to skip it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub id: String,
    #[serde(default)]
    pub ssid: String,
    #[serde(rename = "password", default)]
    pub credential: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub description: String,
}

impl NetworkDocument {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.ssid, &self.location.address)
    }

    /// Stored point, if usable.
    pub fn point(&self) -> Option<GeoPoint> {
        self.location.geo_point()
    }

    /// Public listing view. `None` for malformed documents.
    pub fn summary(&self) -> Option<NetworkSummary> {
        let id = NetworkId::parse(&self.id).ok()?;
        self.point()?;
        Some(NetworkSummary {
            id,
            ssid: self.ssid.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
        })
    }

    /// Search result view with the distance from `from`.
    pub fn nearby(&self, from: &GeoPoint) -> Option<NearbyNetwork> {
        let point = self.point()?;
        let summary = self.summary()?;
        Some(NearbyNetwork {
            id: summary.id,
            ssid: summary.ssid,
            location: summary.location,
            description: summary.description,
            distance_km: from.distance_km(&point),
        })
    }
}

/// Listing entry. Never carries the credential.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub id: NetworkId,
    pub ssid: String,
    pub location: Location,
    pub description: String,
}

/// Nearby-search entry. Never carries the credential.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyNetwork {
    pub id: NetworkId,
    pub ssid: String,
    pub location: Location,
    pub description: String,
    /// Exact haversine distance from the query point.
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

/// Successful connect: the one shape that reveals the credential.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectedNetwork {
    pub ssid: String,
    #[serde(rename = "password")]
    pub credential: String,
    pub location: Location,
    pub description: String,
}

/// Registration input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub ssid: String,
    #[serde(rename = "password", default)]
    pub credential: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub description: String,
}

/// Nearby-search input, as raw query text.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NearbyRequest {
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub radius: Option<String>,
}

/// Connect input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectRequest {
    #[serde(rename = "wifi_id", default)]
    pub network_id: String,
    pub latitude: f64,
    pub longitude: f64,
}
