//! # Inbound Ports
//!
//! API trait defining what the Waypoint Fan-out can do.

use async_trait::async_trait;
use wf_01_network_directory::GeoPoint;

use crate::domain::{
    FanoutError, RouteNetworks, StopNetworks, SuggestedRoute, Waypoint, WaypointRequest,
};

/// Waypoint Fan-out API - inbound port.
#[async_trait]
pub trait FanoutApi: Send + Sync {
    /// Suggested stops between two points. No retry on upstream failure.
    async fn find_waypoints(
        &self,
        request: WaypointRequest,
    ) -> Result<SuggestedRoute, FanoutError>;

    /// Suggested stops, each joined with the networks around it.
    async fn recommend_stops_with_networks(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Result<RouteNetworks, FanoutError>;

    /// Networks around caller-supplied stops. A stop whose lookup fails
    /// gets an empty list; this never fails as a whole.
    async fn networks_for_stops(&self, stops: Vec<Waypoint>) -> Vec<StopNetworks>;

    /// Stop count used when a request gives none.
    fn default_stops(&self) -> usize;

    /// Longest stop list accepted, from a caller or from the suggester.
    fn max_stops(&self) -> usize;
}
