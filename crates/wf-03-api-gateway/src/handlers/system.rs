//! Health and metrics endpoints.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::error::ApiError;
use crate::router::AppState;

/// `GET /health` - 200 while the record store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.bounded("health", state.directory.health()).await {
        Ok(()) => Json(json!({
            "status": "healthy",
            "service": "wayfi",
            "version": env!("CARGO_PKG_VERSION")
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("[wf-03] Health check failed: {}", e.message);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "wayfi",
                    "message": e.message
                })),
            )
                .into_response()
        }
    }
}

/// `GET /metrics` - Prometheus text exposition.
pub async fn metrics() -> Response {
    match wf_telemetry::encode_metrics() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "metrics",
            e.to_string(),
        )
        .into_response(),
    }
}
