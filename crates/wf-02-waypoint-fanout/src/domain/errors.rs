//! # Domain Errors
//!
//! Error types for the Waypoint Fan-out.

use thiserror::Error;

/// Failures of the external waypoint suggester.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuggesterError {
    /// No credentials configured for the upstream service.
    #[error("Suggester not configured: {0}")]
    NotConfigured(String),

    /// Connection, TLS or timeout failure.
    #[error("Suggester request failed: {0}")]
    Transport(String),

    /// Upstream answered with a non-success status.
    #[error("Suggester returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Upstream response envelope could not be decoded.
    #[error("Suggester response undecodable: {0}")]
    Decode(String),

    /// Upstream produced no candidate text.
    #[error("Suggester generated no response")]
    EmptyResponse,
}

/// Waypoint fan-out errors.
#[derive(Debug, Error)]
pub enum FanoutError {
    /// Malformed caller input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The suggester call itself failed.
    #[error("Waypoint suggester failed: {0}")]
    Upstream(#[from] SuggesterError),

    /// The suggester answered but no usable payload was found.
    #[error("Waypoint suggester returned unusable content: {0}")]
    UpstreamFormat(String),
}

impl FanoutError {
    /// Whether the caller caused this failure.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
