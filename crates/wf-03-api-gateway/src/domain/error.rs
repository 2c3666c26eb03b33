//! API Gateway error types and their HTTP mapping.
//!
//! | Failure | Status |
//! |---------|--------|
//! | validation | 400 |
//! | forbidden | 403 |
//! | not_found | 404 |
//! | conflict | 409 |
//! | data | 500 |
//! | upstream, upstream_format | 502 |
//! | store | 503 |
//! | timeout | 504 |
//!
//! Bodies are `{"error": kind, "message": text}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use wf_01_network_directory::{DirectoryError, ErrorKind};
use wf_02_waypoint_fanout::FanoutError;

/// Error body returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Request failure with its HTTP status
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    /// Malformed request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation", message)
    }

    /// Request exceeded the gateway deadline
    pub fn timeout(operation: &str, after: Duration) -> Self {
        Self::new(
            StatusCode::GATEWAY_TIMEOUT,
            "timeout",
            format!("{operation} did not finish within {after:?}"),
        )
    }

    /// Body could not be decoded into the expected shape
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }

    /// Query string could not be decoded into the expected shape
    pub fn from_query_rejection(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid query: {}", rejection.body_text()))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Data => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Store => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, kind.as_str(), err.to_string())
    }
}

impl From<FanoutError> for ApiError {
    fn from(err: FanoutError) -> Self {
        match err {
            FanoutError::Validation(msg) => Self::bad_request(msg),
            FanoutError::Upstream(e) => {
                Self::new(StatusCode::BAD_GATEWAY, "upstream", e.to_string())
            }
            e @ FanoutError::UpstreamFormat(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "upstream_format", e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!("[wf-03] {} {}: {}", self.status.as_u16(), self.kind, self.message);
        } else {
            tracing::debug!("[wf-03] {} {}: {}", self.status.as_u16(), self.kind, self.message);
        }
        let body = ErrorBody {
            error: self.kind.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway lifecycle errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
