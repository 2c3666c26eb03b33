//! # Outbound Ports
//!
//! Persistence dependency of the Network Directory.

use async_trait::async_trait;

use crate::domain::{GeoQuery, NetworkDocument, NetworkId, NewNetwork, StoreError};

/// Record store - outbound port.
///
/// Bulk queries skip documents that cannot be decoded or carry unusable
/// coordinates instead of failing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// True iff a record with exactly this (ssid, address) exists.
    async fn exists(&self, ssid: &str, address: &str) -> Result<bool, StoreError>;

    /// Insert and assign an identifier.
    ///
    /// Enforces the (ssid, address) unique index atomically and returns
    /// [`StoreError::DuplicateKey`] on violation.
    async fn insert(&self, network: NewNetwork) -> Result<NetworkId, StoreError>;

    /// Point lookup.
    async fn find_by_id(&self, id: &NetworkId) -> Result<Option<NetworkDocument>, StoreError>;

    /// Records inside a point-radius cap. Order is unspecified.
    async fn find_within(&self, query: &GeoQuery) -> Result<Vec<NetworkDocument>, StoreError>;

    /// Every decodable record.
    async fn find_all(&self) -> Result<Vec<NetworkDocument>, StoreError>;

    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Store that fails every call, for exercising error paths.
#[derive(Clone, Debug)]
pub struct UnavailableRecordStore {
    /// Message carried by every error.
    pub reason: String,
}

impl Default for UnavailableRecordStore {
    fn default() -> Self {
        Self {
            reason: "connection refused".to_string(),
        }
    }
}

impl UnavailableRecordStore {
    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl RecordStore for UnavailableRecordStore {
    async fn exists(&self, _ssid: &str, _address: &str) -> Result<bool, StoreError> {
        Err(self.error())
    }

    async fn insert(&self, _network: NewNetwork) -> Result<NetworkId, StoreError> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: &NetworkId) -> Result<Option<NetworkDocument>, StoreError> {
        Err(self.error())
    }

    async fn find_within(&self, _query: &GeoQuery) -> Result<Vec<NetworkDocument>, StoreError> {
        Err(self.error())
    }

    async fn find_all(&self) -> Result<Vec<NetworkDocument>, StoreError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_store_fails_everything() {
        let store = UnavailableRecordStore::default();
        assert!(matches!(
            store.exists("a", "b").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.find_all().await.is_err());
        assert!(store.ping().await.is_err());
    }
}
