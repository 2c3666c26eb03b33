//! `wifi-node` binary.

use anyhow::{Context, Result};
use tracing::{info, warn};

use wf_telemetry::{init_telemetry, TelemetryConfig};
use wifi_node::{NodeConfig, WifiNode};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Wayfi Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let node = WifiNode::new(config)?;

    node.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Node is shutting down");
    })
    .await
}
