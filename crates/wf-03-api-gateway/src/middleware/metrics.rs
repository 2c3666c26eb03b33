//! Request duration metrics.
//!
//! Observes `wf_gateway_request_duration_seconds{route, status}` for every matched
//! route. Installed with `Router::route_layer` so `MatchedPath` is present.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use wf_telemetry::metric_observe;
use wf_telemetry::metrics::REQUEST_DURATION;

/// Record latency and status per route template.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    metric_observe!(REQUEST_DURATION, &[route.as_str(), status.as_str()], elapsed);
    tracing::debug!("[wf-03] {} -> {} in {:.3}s", route, status, elapsed);

    response
}
