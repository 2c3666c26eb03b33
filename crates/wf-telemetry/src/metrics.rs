//! Prometheus metrics for the Wayfi services.
//!
//! All metrics follow the naming convention: `wf_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, HistogramOpts, HistogramVec, IntCounter,
    IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // DIRECTORY METRICS (wf-01)
    // =========================================================================

    /// Registration attempts by outcome (created/conflict/rejected/failed)
    pub static ref REGISTRATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("wf_directory_registrations_total", "Network registration attempts"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Connect attempts by outcome (granted/denied/not_found/rejected/failed)
    pub static ref CONNECT_ATTEMPTS: IntCounterVec = IntCounterVec::new(
        Opts::new("wf_directory_connect_attempts_total", "Proximity-gated connect attempts"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Nearby searches served
    pub static ref NEARBY_SEARCHES: IntCounter = IntCounter::new(
        "wf_directory_nearby_searches_total",
        "Nearby network searches served"
    ).expect("metric creation failed");

    /// Stored documents skipped during bulk reads
    pub static ref SKIPPED_DOCUMENTS: IntCounter = IntCounter::new(
        "wf_directory_skipped_documents_total",
        "Malformed documents skipped by list and range queries"
    ).expect("metric creation failed");

    // =========================================================================
    // FAN-OUT METRICS (wf-02)
    // =========================================================================

    /// Suggester calls by result (ok/upstream_error/format_error)
    pub static ref SUGGESTER_CALLS: IntCounterVec = IntCounterVec::new(
        Opts::new("wf_fanout_suggester_calls_total", "Waypoint suggester calls"),
        &["result"]
    ).expect("metric creation failed");

    /// Per-waypoint lookups that degraded to an empty network list
    pub static ref WAYPOINT_LOOKUP_FAILURES: IntCounter = IntCounter::new(
        "wf_fanout_waypoint_lookup_failures_total",
        "Waypoint lookups that failed and returned no networks"
    ).expect("metric creation failed");

    // =========================================================================
    // GATEWAY METRICS (wf-03)
    // =========================================================================

    /// Request latency per route
    pub static ref REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "wf_gateway_request_duration_seconds",
            "Time spent serving HTTP requests"
        ).buckets(exponential_buckets(0.0005, 2.0, 14).expect("valid buckets")),
        &["route", "status"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this twice returns `MetricsInit` for the duplicate collectors.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(REGISTRATIONS.clone()),
        Box::new(CONNECT_ATTEMPTS.clone()),
        Box::new(NEARBY_SEARCHES.clone()),
        Box::new(SKIPPED_DOCUMENTS.clone()),
        Box::new(SUGGESTER_CALLS.clone()),
        Box::new(WAYPOINT_LOOKUP_FAILURES.clone()),
        Box::new(REQUEST_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
