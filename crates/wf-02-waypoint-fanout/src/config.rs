//! # Fan-out Configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wf_01_network_directory::DEFAULT_SEARCH_RADIUS_KM;

/// Default number of stops requested by `recommend_stops_with_networks`.
pub const DEFAULT_STOPS: usize = 5;

/// Largest number of stops a caller may request.
pub const MAX_STOPS: usize = 10;

/// Stop category used when the caller gives none.
pub const DEFAULT_STOP_TYPE: &str = "any";

/// Invalid fan-out configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("default_stops must be in 1..={max}, got {got}")]
    DefaultStops { got: usize, max: usize },

    #[error("search_radius_km must be a positive finite number, got {0}")]
    SearchRadius(f64),
}

/// Waypoint fan-out configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FanoutConfig {
    /// Stops requested when joining a route with networks.
    pub default_stops: usize,

    /// Upper bound on `max_stops` in a request.
    pub max_stops: usize,

    /// Nearby-search radius around each stop.
    pub search_radius_km: f64,

    /// Stop category used when the caller gives none.
    pub default_stop_type: String,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            default_stops: DEFAULT_STOPS,
            max_stops: MAX_STOPS,
            search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            default_stop_type: DEFAULT_STOP_TYPE.to_string(),
        }
    }
}

impl FanoutConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_stops == 0 || self.default_stops > self.max_stops {
            return Err(ConfigError::DefaultStops {
                got: self.default_stops,
                max: self.max_stops,
            });
        }
        if !self.search_radius_km.is_finite() || self.search_radius_km <= 0.0 {
            return Err(ConfigError::SearchRadius(self.search_radius_km));
        }
        Ok(())
    }
}
