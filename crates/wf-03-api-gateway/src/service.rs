//! API Gateway service - main entry point.
//!
//! Owns the router and the HTTP server lifecycle.

use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use wf_01_network_directory::DirectoryApi;
use wf_02_waypoint_fanout::FanoutApi;

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::{build_router, AppState};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        directory: Arc<dyn DirectoryApi>,
        fanout: Arc<dyn FanoutApi>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let state = AppState::new(directory, fanout, config.request_timeout);

        Ok(Self { config, state })
    }

    /// Router with all routes and middleware, for serving or in-process tests.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })
    }

    /// Serve on `listener` until `signal` resolves. In-flight requests are
    /// drained before returning.
    pub async fn serve(
        &self,
        listener: TcpListener,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!("[wf-03] Starting HTTP server on {:?}", addr);

        let router = self.router();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                signal.await;
                info!("[wf-03] Received shutdown signal");
            })
            .await?;

        info!("[wf-03] API Gateway stopped");
        Ok(())
    }

    /// Bind and serve until `signal` resolves.
    pub async fn start(
        &self,
        signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let listener = self.bind().await?;
        self.serve(listener, signal).await
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
