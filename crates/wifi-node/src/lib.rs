//! # Wayfi Node
//!
//! The main entry point for the Wayfi server.
//!
//! ## Modular Structure
//!
//! - `config` - `NodeConfig` from `WF_*` environment variables
//! - `container` - store construction and subsystem wiring
//! - `suggester` - Gemini suggester, or a disabled stand-in without a key
//!
//! ## Wiring
//!
//! ```text
//! RecordStore (memory | rocksdb)
//!        │ Arc<S>
//!        ▼
//! DirectoryService (wf-01) ◄──── WaypointFanoutService (wf-02) ◄── NodeSuggester
//!        │                                 │
//!        └──────────► ApiGatewayService (wf-03) ◄──────┘
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry
//! 2. Load and validate configuration
//! 3. Build the record store (failure aborts startup)
//! 4. Wire services and bind the HTTP listener
//! 5. Serve until Ctrl+C, draining in-flight requests

pub mod config;
pub mod container;
pub mod suggester;

use anyhow::{Context, Result};
use std::future::Future;
use wf_telemetry::log_event;

pub use config::{ConfigError, NodeConfig, StorageConfig, StoreBackend};
pub use container::SubsystemContainer;
pub use suggester::NodeSuggester;

/// The node runtime.
pub struct WifiNode {
    container: SubsystemContainer,
}

impl WifiNode {
    /// Build every subsystem from `config`.
    pub fn new(config: NodeConfig) -> Result<Self> {
        log_event!(info, "node", "Creating Wayfi node runtime", store = ?config.storage.backend);
        let container = SubsystemContainer::new(config)?;
        Ok(Self { container })
    }

    /// Serve until `signal` resolves.
    pub async fn run(&self, signal: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let gateway = &self.container.gateway;
        let listener = gateway.bind().await.context("Failed to bind HTTP listener")?;

        log_event!(
            info,
            "node",
            "Wayfi node ready",
            addr = %gateway.config().http_addr(),
            version = wf_03_api_gateway::VERSION
        );

        gateway
            .serve(listener, signal)
            .await
            .context("HTTP server failed")?;

        log_event!(info, "node", "Wayfi node stopped");
        Ok(())
    }

    /// Get a reference to the subsystem container.
    pub fn container(&self) -> &SubsystemContainer {
        &self.container
    }
}
