//! # Domain Errors
//!
//! Error types for the Network Directory.

use thiserror::Error;

/// Record store failures, as reported by a `RecordStore` adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Backend unreachable or not yet open.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// The (ssid, address) unique index rejected an insert.
    #[error("Duplicate network: ssid {ssid:?} at address {address:?}")]
    DuplicateKey {
        /// Network name
        ssid: String,
        /// Address part of the key
        address: String,
    },

    /// Backend I/O failure.
    #[error("Record store I/O error: {0}")]
    Io(String),

    /// A document could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A single looked-up document could not be decoded.
    #[error("Corrupt document {id}: {reason}")]
    Corrupt {
        /// Record identifier
        id: String,
        /// Decoder message
        reason: String,
    },
}

/// Directory service errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Malformed caller input. Never reaches the store.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A record with the same (ssid, address) already exists.
    #[error("WiFi with SSID {ssid:?} already exists at address {address:?}")]
    Conflict {
        /// Network name
        ssid: String,
        /// Address part of the key
        address: String,
    },

    /// No record has this identifier.
    #[error("WiFi not found: {0}")]
    NotFound(String),

    /// Requester is outside the connect radius. Credential withheld.
    #[error("Too far from this WiFi to connect: {distance_km:.3} km > {limit_km} km")]
    Forbidden {
        /// Requester distance from the network
        distance_km: f64,
        /// Configured connect radius
        limit_km: f64,
    },

    /// Stored record is internally inconsistent.
    #[error("Stored WiFi record is invalid: {0}")]
    Data(String),

    /// Persistence layer failed.
    #[error("Record store failure: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { ssid, address } => Self::Conflict { ssid, address },
            StoreError::Corrupt { id, reason } => Self::Data(format!("{id}: {reason}")),
            other => Self::Store(other),
        }
    }
}

/// Coarse classification used by outer adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Forbidden,
    Data,
    Store,
}

impl ErrorKind {
    /// Stable snake_case label for response bodies and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Data => "data",
            Self::Store => "store",
        }
    }
}

impl DirectoryError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Data(_) => ErrorKind::Data,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// Whether the caller caused this failure.
    pub fn is_client_fault(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Data | ErrorKind::Store)
    }
}
