//! # Directory Configuration
//!
//! Proximity and search policy for the Network Directory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DEFAULT_CONNECT_RADIUS_KM, DEFAULT_SEARCH_RADIUS_KM, MAX_SEARCH_RADIUS_KM};

/// Invalid directory configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("default search radius {default} km exceeds the maximum {max} km")]
    DefaultAboveMax { default: f64, max: f64 },
}

/// Network Directory configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Maximum requester distance for a connect to reveal a credential.
    pub connect_radius_km: f64,

    /// Nearby-search radius when the caller gives none.
    pub default_search_radius_km: f64,

    /// Largest radius a caller may request.
    pub max_search_radius_km: f64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            connect_radius_km: DEFAULT_CONNECT_RADIUS_KM,
            default_search_radius_km: DEFAULT_SEARCH_RADIUS_KM,
            max_search_radius_km: MAX_SEARCH_RADIUS_KM,
        }
    }
}

impl DirectoryConfig {
    /// Create a config for testing.
    pub fn for_testing() -> Self {
        Self::default()
    }

    /// Check all radii are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("connect_radius_km", self.connect_radius_km),
            ("default_search_radius_km", self.default_search_radius_km),
            ("max_search_radius_km", self.max_search_radius_km),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.default_search_radius_km > self.max_search_radius_km {
            return Err(ConfigError::DefaultAboveMax {
                default: self.default_search_radius_km,
                max: self.max_search_radius_km,
            });
        }
        Ok(())
    }
}
