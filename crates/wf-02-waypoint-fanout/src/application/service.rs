//! # Waypoint Fan-out Service
//!
//! Joins suggester output with the Network Directory. Per-waypoint lookups
//! run concurrently and are joined before returning; a failing waypoint gets
//! an empty network list instead of failing the route.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

use wf_01_network_directory::{DirectoryApi, GeoPoint};
use wf_telemetry::metric_inc;
use wf_telemetry::metrics::{SUGGESTER_CALLS, WAYPOINT_LOOKUP_FAILURES};

use crate::algorithms::parse_suggestion;
use crate::config::FanoutConfig;
use crate::domain::{
    FanoutError, RouteNetworks, StopNetworks, SuggestedRoute, Waypoint, WaypointRequest,
};
use crate::ports::{FanoutApi, WaypointSuggester};

/// Waypoint Fan-out Service.
pub struct WaypointFanoutService<D: DirectoryApi, W: WaypointSuggester> {
    config: FanoutConfig,
    directory: Arc<D>,
    suggester: Arc<W>,
}

impl<D: DirectoryApi, W: WaypointSuggester> WaypointFanoutService<D, W> {
    pub fn new(config: FanoutConfig, directory: Arc<D>, suggester: Arc<W>) -> Self {
        Self {
            config,
            directory,
            suggester,
        }
    }

    pub fn config(&self) -> &FanoutConfig {
        &self.config
    }

    fn validate(&self, mut request: WaypointRequest) -> Result<WaypointRequest, FanoutError> {
        if request.max_stops == 0 || request.max_stops > self.config.max_stops {
            return Err(FanoutError::Validation(format!(
                "max_stops must be in 1..={}, got {}",
                self.config.max_stops, request.max_stops
            )));
        }
        let stop_type = request.stop_type.trim();
        request.stop_type = if stop_type.is_empty() {
            self.config.default_stop_type.clone()
        } else {
            stop_type.to_string()
        };
        Ok(request)
    }

    /// Nearby networks for one waypoint; any failure yields an empty list.
    async fn lookup(&self, index: usize, waypoint: Waypoint) -> StopNetworks {
        let networks = match waypoint.point() {
            None => {
                tracing::warn!(
                    "[wf-02] Waypoint #{} ({:?}) has unusable coordinates ({:?}, {:?})",
                    index,
                    waypoint.name,
                    waypoint.latitude,
                    waypoint.longitude
                );
                metric_inc!(WAYPOINT_LOOKUP_FAILURES);
                Vec::new()
            }
            Some(point) => match self
                .directory
                .nearby_at(point, Some(self.config.search_radius_km))
                .await
            {
                Ok(networks) => networks,
                Err(e) => {
                    tracing::warn!("[wf-02] Nearby lookup for waypoint #{} failed: {}", index, e);
                    metric_inc!(WAYPOINT_LOOKUP_FAILURES);
                    Vec::new()
                }
            },
        };
        StopNetworks { waypoint, networks }
    }

    async fn try_find_waypoints(
        &self,
        request: WaypointRequest,
    ) -> Result<SuggestedRoute, FanoutError> {
        let request = self.validate(request)?;

        let text = self.suggester.suggest(&request).await.map_err(|e| {
            metric_inc!(SUGGESTER_CALLS, &["upstream_error"]);
            FanoutError::Upstream(e)
        })?;

        let mut route = parse_suggestion(&text)
            .inspect_err(|_| metric_inc!(SUGGESTER_CALLS, &["format_error"]))?;
        metric_inc!(SUGGESTER_CALLS, &["ok"]);

        if route.stops.len() > request.max_stops {
            tracing::debug!(
                "[wf-02] Truncating {} suggested stops to {}",
                route.stops.len(),
                request.max_stops
            );
            route.stops.truncate(request.max_stops);
        }
        Ok(route)
    }
}

#[async_trait]
impl<D: DirectoryApi, W: WaypointSuggester> FanoutApi for WaypointFanoutService<D, W> {
    async fn find_waypoints(
        &self,
        request: WaypointRequest,
    ) -> Result<SuggestedRoute, FanoutError> {
        let result = self.try_find_waypoints(request).await;
        if let Err(e) = &result {
            if e.is_client_fault() {
                tracing::debug!("[wf-02] Waypoint request refused: {}", e);
            } else {
                tracing::error!("[wf-02] Suggester {} failed: {}", self.suggester.name(), e);
            }
        }
        result
    }

    async fn recommend_stops_with_networks(
        &self,
        start: GeoPoint,
        end: GeoPoint,
    ) -> Result<RouteNetworks, FanoutError> {
        let route = self
            .find_waypoints(WaypointRequest {
                start,
                end,
                stop_type: self.config.default_stop_type.clone(),
                max_stops: self.config.default_stops,
            })
            .await?;

        let stops = self.networks_for_stops(route.stops).await;
        Ok(RouteNetworks {
            stops,
            route_description: route.route_description,
        })
    }

    async fn networks_for_stops(&self, stops: Vec<Waypoint>) -> Vec<StopNetworks> {
        let lookups = stops
            .into_iter()
            .enumerate()
            .map(|(index, waypoint)| self.lookup(index, waypoint));
        join_all(lookups).await
    }

    fn default_stops(&self) -> usize {
        self.config.default_stops
    }

    fn max_stops(&self) -> usize {
        self.config.max_stops
    }
}
