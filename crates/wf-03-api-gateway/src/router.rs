//! Route table and shared handler state.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use wf_01_network_directory::DirectoryApi;
use wf_02_waypoint_fanout::FanoutApi;

use crate::domain::config::GatewayConfig;
use crate::domain::error::ApiError;
use crate::handlers::{gemini, system, wifi};
use crate::middleware::{create_cors_layer, track_requests};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn DirectoryApi>,
    pub fanout: Arc<dyn FanoutApi>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn DirectoryApi>,
        fanout: Arc<dyn FanoutApi>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            fanout,
            request_timeout,
        }
    }

    /// Run one service call under the request deadline. Dropping the future
    /// on expiry cancels the outstanding store or suggester work.
    pub async fn bounded<T, E>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, ApiError>
    where
        E: Into<ApiError>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                tracing::warn!(
                    "[wf-03] {} timed out after {:?}",
                    operation,
                    self.request_timeout
                );
                Err(ApiError::timeout(operation, self.request_timeout))
            }
        }
    }
}

/// Build the HTTP router.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors))
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    Router::new()
        // Directory
        .route("/api/wifi", get(wifi::list_all))
        .route("/api/wifi/scan", post(wifi::register))
        .route("/api/wifi/connect", post(wifi::connect))
        .route("/api/wifi/nearby", get(wifi::nearby))
        .route("/api/wifi/nearby/stops", post(wifi::nearby_stops))
        // Waypoint fan-out
        .route("/api/gemini/recommendstops", get(gemini::recommend_stops))
        .route(
            "/api/gemini/recommendstopswifi",
            get(gemini::recommend_stops_wifi),
        )
        // Operations
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route_layer(axum::middleware::from_fn(track_requests))
        .layer(middleware)
        .with_state(state)
}
