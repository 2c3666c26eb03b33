//! # Inbound Ports
//!
//! API trait defining what the Network Directory can do.

use async_trait::async_trait;

use crate::domain::{
    ConnectRequest, ConnectedNetwork, DirectoryError, GeoPoint, NearbyNetwork, NearbyRequest,
    NetworkId, NetworkSummary, RegisterRequest,
};

/// Network Directory API - inbound port.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Store a new network unless (ssid, address) is already taken.
    async fn register(&self, request: RegisterRequest) -> Result<NetworkId, DirectoryError>;

    /// Every well-formed record, without credentials.
    async fn list_all(&self) -> Result<Vec<NetworkSummary>, DirectoryError>;

    /// Records near a point given as raw query text, closest first.
    async fn nearby_search(
        &self,
        request: NearbyRequest,
    ) -> Result<Vec<NearbyNetwork>, DirectoryError>;

    /// Records near a validated point. `None` uses the default radius.
    async fn nearby_at(
        &self,
        center: GeoPoint,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyNetwork>, DirectoryError>;

    /// Reveal a credential to a requester standing close enough.
    async fn connect(&self, request: ConnectRequest) -> Result<ConnectedNetwork, DirectoryError>;

    /// Check the record store is reachable.
    async fn health(&self) -> Result<(), DirectoryError>;
}
