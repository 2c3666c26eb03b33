//! # In-Memory Record Store
//!
//! `RecordStore` backed by process memory. Used by tests and the `memory`
//! backend of the node.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::{DedupKey, GeoQuery, NetworkDocument, NetworkId, NewNetwork, StoreError};
use crate::ports::RecordStore;

#[derive(Default)]
struct Inner {
    /// Documents in insertion order.
    documents: Vec<NetworkDocument>,
    /// id -> index into `documents`.
    by_id: HashMap<String, usize>,
    /// Unique index on (ssid, address).
    keys: HashMap<DedupKey, String>,
}

/// In-memory record store with an atomic (ssid, address) unique index.
#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.inner.read().documents.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a raw document as-is, bypassing validation.
    ///
    /// Lets tests seed legacy or corrupt records.
    pub fn insert_document(&self, document: NetworkDocument) {
        let mut inner = self.inner.write();
        let index = inner.documents.len();
        inner.by_id.insert(document.id.clone(), index);
        inner
            .keys
            .entry(document.dedup_key())
            .or_insert_with(|| document.id.clone());
        inner.documents.push(document);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn exists(&self, ssid: &str, address: &str) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .read()
            .keys
            .contains_key(&DedupKey::new(ssid, address)))
    }

    async fn insert(&self, network: NewNetwork) -> Result<NetworkId, StoreError> {
        let key = network.dedup_key();
        let mut inner = self.inner.write();
        if inner.keys.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                ssid: key.ssid,
                address: key.address,
            });
        }

        let id = NetworkId::generate();
        let document = network.into_document(id);
        let index = inner.documents.len();
        inner.by_id.insert(document.id.clone(), index);
        inner.keys.insert(key, document.id.clone());
        inner.documents.push(document);
        Ok(id)
    }

    async fn find_by_id(&self, id: &NetworkId) -> Result<Option<NetworkDocument>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .by_id
            .get(&id.to_string())
            .and_then(|&index| inner.documents.get(index))
            .cloned())
    }

    async fn find_within(&self, query: &GeoQuery) -> Result<Vec<NetworkDocument>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .documents
            .iter()
            .filter(|doc| doc.point().is_some_and(|point| query.matches(&point)))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<NetworkDocument>, StoreError> {
        Ok(self.inner.read().documents.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
