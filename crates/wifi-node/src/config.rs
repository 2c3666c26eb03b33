//! # Node Configuration
//!
//! Unified configuration for every subsystem, read from `WF_*` environment
//! variables on top of the subsystem defaults.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `WF_BIND_ADDR` | `0.0.0.0:8080` | gateway listen address |
//! | `WF_REQUEST_TIMEOUT_SECS` | `45` | per-request deadline |
//! | `WF_STORE` | `memory` | `memory` or `rocksdb` |
//! | `WF_DATA_DIR` | `./data/networks` | RocksDB directory |
//! | `GEMINI_API_KEY` | unset | suggester key; fan-out routes answer 502 without it |
//! | `WF_GEMINI_MODEL` | `gemini-1.5-flash` | model name |
//! | `WF_GEMINI_BASE_URL` | Google endpoint | service root |
//! | `WF_GEMINI_TIMEOUT_SECS` | `30` | suggester call timeout |
//! | `WF_CONNECT_RADIUS_KM` | `0.1` | credential reveal distance |
//! | `WF_SEARCH_RADIUS_KM` | `1.0` | default nearby radius |
//! | `WF_MAX_SEARCH_RADIUS_KM` | `50.0` | largest accepted radius |
//! | `WF_DEFAULT_STOPS` | `5` | stops per joined route |
//! | `WF_MAX_STOPS` | `10` | largest `max_stops` accepted |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use wf_01_network_directory::DirectoryConfig;
use wf_02_waypoint_fanout::{FanoutConfig, GeminiConfig};
use wf_03_api_gateway::GatewayConfig;

/// Record store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local maps; contents are lost on restart.
    Memory,
    /// RocksDB under `StorageConfig::data_dir`.
    RocksDb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "rocksdb" | "rocks" => Ok(Self::RocksDb),
            other => Err(ConfigError::Invalid {
                var: "WF_STORE",
                value: other.to_string(),
                reason: "expected memory or rocksdb".to_string(),
            }),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data/networks"),
        }
    }
}

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// HTTP gateway configuration.
    pub gateway: GatewayConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Directory policy.
    pub directory: DirectoryConfig,
    /// Fan-out policy.
    pub fanout: FanoutConfig,
    /// Suggester client.
    pub gemini: GeminiConfig,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Directory configuration: {0}")]
    Directory(#[from] wf_01_network_directory::ConfigError),

    #[error("Fan-out configuration: {0}")]
    Fanout(#[from] wf_02_waypoint_fanout::ConfigError),

    #[error("Gateway configuration: {0}")]
    Gateway(#[from] wf_03_api_gateway::ConfigError),

    #[error("WF_STORE=rocksdb needs a build with the `rocksdb` feature")]
    RocksDbUnavailable,
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unset or blank keys keep
    /// their defaults; set keys that do not parse are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = parse::<SocketAddr>(&get, "WF_BIND_ADDR")? {
            config.gateway.host = addr.ip();
            config.gateway.port = addr.port();
        }
        if let Some(secs) = parse::<u64>(&get, "WF_REQUEST_TIMEOUT_SECS")? {
            config.gateway.request_timeout = Duration::from_secs(secs);
        }

        if let Some(backend) = get("WF_STORE") {
            config.storage.backend = backend.parse()?;
        }
        if let Some(dir) = get("WF_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = get("GEMINI_API_KEY") {
            config.gemini.api_key = key;
        }
        if let Some(model) = get("WF_GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Some(url) = get("WF_GEMINI_BASE_URL") {
            config.gemini.base_url = url;
        }
        if let Some(secs) = parse::<u64>(&get, "WF_GEMINI_TIMEOUT_SECS")? {
            config.gemini.timeout_secs = secs;
        }

        if let Some(km) = parse::<f64>(&get, "WF_CONNECT_RADIUS_KM")? {
            config.directory.connect_radius_km = km;
        }
        if let Some(km) = parse::<f64>(&get, "WF_SEARCH_RADIUS_KM")? {
            config.directory.default_search_radius_km = km;
            config.fanout.search_radius_km = km;
        }
        if let Some(km) = parse::<f64>(&get, "WF_MAX_SEARCH_RADIUS_KM")? {
            config.directory.max_search_radius_km = km;
        }
        if let Some(n) = parse::<usize>(&get, "WF_DEFAULT_STOPS")? {
            config.fanout.default_stops = n;
        }
        if let Some(n) = parse::<usize>(&get, "WF_MAX_STOPS")? {
            config.fanout.max_stops = n;
        }

        Ok(config)
    }

    /// Check every subsystem configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.directory.validate()?;
        self.fanout.validate()?;
        self.gateway.validate()?;

        if self.storage.backend == StoreBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::RocksDbUnavailable);
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "WF_GEMINI_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                var,
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
