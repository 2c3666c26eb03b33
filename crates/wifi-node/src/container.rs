//! # Subsystem Container
//!
//! Builds the record store once and wires it through the directory and the
//! fan-out into the gateway. Construction failures abort startup.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use wf_01_network_directory::{
    DirectoryApi, DirectoryConfig, DirectoryService, InMemoryRecordStore, RecordStore,
};
use wf_02_waypoint_fanout::{FanoutApi, FanoutConfig, WaypointFanoutService};
use wf_03_api_gateway::ApiGatewayService;

use crate::config::{NodeConfig, StoreBackend};
use crate::suggester::NodeSuggester;

/// Initialized subsystems.
pub struct SubsystemContainer {
    pub directory: Arc<dyn DirectoryApi>,
    pub fanout: Arc<dyn FanoutApi>,
    pub gateway: ApiGatewayService,
}

impl SubsystemContainer {
    /// Initialize every subsystem from `config`.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid node configuration")?;

        let suggester = Arc::new(NodeSuggester::from_config(config.gemini.clone()));

        let (directory, fanout) = match config.storage.backend {
            StoreBackend::Memory => {
                info!("[wf-01] Using in-memory record store");
                wire(
                    InMemoryRecordStore::new(),
                    config.directory.clone(),
                    config.fanout.clone(),
                    suggester,
                )
            }
            StoreBackend::RocksDb => open_rocksdb(&config, suggester)?,
        };

        let gateway = ApiGatewayService::new(
            config.gateway.clone(),
            Arc::clone(&directory),
            Arc::clone(&fanout),
        )
        .context("Failed to create API gateway")?;

        Ok(Self {
            directory,
            fanout,
            gateway,
        })
    }
}

type Services = (Arc<dyn DirectoryApi>, Arc<dyn FanoutApi>);

fn wire<S: RecordStore + 'static>(
    store: S,
    directory_config: DirectoryConfig,
    fanout_config: FanoutConfig,
    suggester: Arc<NodeSuggester>,
) -> Services {
    let directory = Arc::new(DirectoryService::new(directory_config, Arc::new(store)));
    let fanout = Arc::new(WaypointFanoutService::new(
        fanout_config,
        Arc::clone(&directory),
        suggester,
    ));
    (
        directory as Arc<dyn DirectoryApi>,
        fanout as Arc<dyn FanoutApi>,
    )
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &NodeConfig, suggester: Arc<NodeSuggester>) -> Result<Services> {
    use wf_01_network_directory::{RocksDbRecordStore, RocksDbStoreConfig};

    let path = config.storage.data_dir.to_string_lossy().into_owned();
    info!("[wf-01] Opening RocksDB record store at {}", path);
    let store = RocksDbRecordStore::open(RocksDbStoreConfig {
        path: path.clone(),
        ..Default::default()
    })
    .with_context(|| format!("Failed to open record store at {path}"))?;

    Ok(wire(
        store,
        config.directory.clone(),
        config.fanout.clone(),
        suggester,
    ))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &NodeConfig, _suggester: Arc<NodeSuggester>) -> Result<Services> {
    Err(crate::config::ConfigError::RocksDbUnavailable.into())
}
