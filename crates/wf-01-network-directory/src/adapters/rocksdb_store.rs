//! # RocksDB Record Store
//!
//! Persistent `RecordStore` implementation.
//!
//! ## Column Families
//!
//! - `networks` - record id -> JSON document
//! - `network_keys` - (ssid, address) storage key -> record id
//!
//! The unique check and both puts run under the database write lock in one
//! `WriteBatch`, so concurrent registrations for one key on this node cannot
//! both succeed. Range queries scan `networks` and filter by exact distance.
//! RocksDB calls are synchronous and run via `spawn_blocking`.

use async_trait::async_trait;
use parking_lot::RwLock;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, DB};
use std::sync::Arc;

use crate::domain::{DedupKey, GeoQuery, NetworkDocument, NetworkId, NewNetwork, StoreError};
use crate::ports::RecordStore;

/// Record documents.
pub const CF_NETWORKS: &str = "networks";
/// Unique index on (ssid, address).
pub const CF_NETWORK_KEYS: &str = "network_keys";

/// All column families used by the record store
pub const COLUMN_FAMILIES: &[&str] = &[CF_NETWORKS, CF_NETWORK_KEYS];

/// RocksDB configuration for the record store
#[derive(Debug, Clone)]
pub struct RocksDbStoreConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbStoreConfig {
    fn default() -> Self {
        Self {
            path: "./data/networks".to_string(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbStoreConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 4 * 1024 * 1024,
            write_buffer_size: 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// Database handle shared with blocking tasks.
struct StoreInner {
    db: RwLock<DB>,
    sync_writes: bool,
}

impl StoreInner {
    fn cf<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily, StoreError> {
        db.cf_handle(name)
            .ok_or_else(|| StoreError::Unavailable(format!("missing column family {name}")))
    }

    fn write_options(&self) -> rocksdb::WriteOptions {
        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.sync_writes);
        write_opts
    }

    fn exists(&self, storage_key: &[u8]) -> Result<bool, StoreError> {
        let db = self.db.read();
        let keys = Self::cf(&db, CF_NETWORK_KEYS)?;
        let found = db
            .get_pinned_cf(keys, storage_key)
            .map_err(|e| StoreError::Io(format!("RocksDB exists check failed: {}", e)))?
            .is_some();
        Ok(found)
    }

    fn insert(&self, network: NewNetwork) -> Result<NetworkId, StoreError> {
        let key = network.dedup_key();
        let storage_key = key.to_storage_key();

        let db = self.db.write();
        let networks = Self::cf(&db, CF_NETWORKS)?;
        let keys = Self::cf(&db, CF_NETWORK_KEYS)?;

        let taken = db
            .get_pinned_cf(keys, &storage_key)
            .map_err(|e| StoreError::Io(format!("RocksDB unique check failed: {}", e)))?
            .is_some();
        if taken {
            return Err(StoreError::DuplicateKey {
                ssid: key.ssid,
                address: key.address,
            });
        }

        let id = NetworkId::generate();
        let id_text = id.to_string();
        let document = network.into_document(id);
        let value =
            serde_json::to_vec(&document).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut batch = WriteBatch::default();
        batch.put_cf(networks, id_text.as_bytes(), &value);
        batch.put_cf(keys, &storage_key, id_text.as_bytes());

        db.write_opt(batch, &self.write_options())
            .map_err(|e| StoreError::Io(format!("RocksDB batch write failed: {}", e)))?;

        Ok(id)
    }

    fn find_by_id(&self, id: NetworkId) -> Result<Option<NetworkDocument>, StoreError> {
        let id_text = id.to_string();
        let db = self.db.read();
        let networks = Self::cf(&db, CF_NETWORKS)?;
        let Some(value) = db
            .get_pinned_cf(networks, id_text.as_bytes())
            .map_err(|e| StoreError::Io(format!("RocksDB get failed: {}", e)))?
        else {
            return Ok(None);
        };

        serde_json::from_slice(&value)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                id: id_text,
                reason: e.to_string(),
            })
    }

    fn put_raw(&self, id: &str, value: &[u8]) -> Result<(), StoreError> {
        let db = self.db.write();
        let networks = Self::cf(&db, CF_NETWORKS)?;
        db.put_cf_opt(networks, id.as_bytes(), value, &self.write_options())
            .map_err(|e| StoreError::Io(format!("RocksDB put failed: {}", e)))
    }

    fn scan(
        &self,
        mut keep: impl FnMut(&NetworkDocument) -> bool,
    ) -> Result<Vec<NetworkDocument>, StoreError> {
        let db = self.db.read();
        let networks = Self::cf(&db, CF_NETWORKS)?;
        let mut results = Vec::new();

        for item in db.iterator_cf(networks, IteratorMode::Start) {
            let (key, value) =
                item.map_err(|e| StoreError::Io(format!("RocksDB scan failed: {}", e)))?;
            match serde_json::from_slice::<NetworkDocument>(&value) {
                Ok(doc) => {
                    if keep(&doc) {
                        results.push(doc);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "[wf-01] Skipping undecodable document {}: {}",
                        String::from_utf8_lossy(&key),
                        e
                    );
                    wf_telemetry::metric_inc!(wf_telemetry::metrics::SKIPPED_DOCUMENTS);
                }
            }
        }

        Ok(results)
    }
}

/// RocksDB-backed record store.
///
/// Every call runs on the blocking pool, so a caller's deadline can drop the
/// pending future while RocksDB is still scanning or syncing.
pub struct RocksDbRecordStore {
    inner: Arc<StoreInner>,
}

impl RocksDbRecordStore {
    /// Open or create the database
    pub fn open(config: RocksDbStoreConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors)
            .map_err(|e| StoreError::Unavailable(format!("Failed to open RocksDB: {}", e)))?;

        tracing::info!("[wf-01] RocksDB record store opened at {}", config.path);

        Ok(Self {
            inner: Arc::new(StoreInner {
                db: RwLock::new(db),
                sync_writes: config.sync_writes,
            }),
        })
    }

    /// Store a raw document as-is, bypassing validation and the unique index.
    pub fn put_raw(&self, id: &str, value: &[u8]) -> Result<(), StoreError> {
        self.inner.put_raw(id, value)
    }

    /// Run `op` against the database on the blocking pool.
    async fn blocking<T, F>(&self, name: &'static str, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&StoreInner) -> Result<T, StoreError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&inner))
            .await
            .map_err(|e| StoreError::Io(format!("RocksDB {name} task failed: {e}")))?
    }
}

#[async_trait]
impl RecordStore for RocksDbRecordStore {
    async fn exists(&self, ssid: &str, address: &str) -> Result<bool, StoreError> {
        let storage_key = DedupKey::new(ssid, address).to_storage_key();
        self.blocking("exists", move |inner| inner.exists(&storage_key))
            .await
    }

    async fn insert(&self, network: NewNetwork) -> Result<NetworkId, StoreError> {
        self.blocking("insert", move |inner| inner.insert(network))
            .await
    }

    async fn find_by_id(&self, id: &NetworkId) -> Result<Option<NetworkDocument>, StoreError> {
        let id = *id;
        self.blocking("get", move |inner| inner.find_by_id(id))
            .await
    }

    async fn find_within(&self, query: &GeoQuery) -> Result<Vec<NetworkDocument>, StoreError> {
        let query = *query;
        self.blocking("scan", move |inner| {
            inner.scan(|doc| doc.point().is_some_and(|point| query.matches(&point)))
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<NetworkDocument>, StoreError> {
        self.blocking("scan", |inner| inner.scan(|_| true)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.blocking("ping", |inner| {
            let db = inner.db.read();
            StoreInner::cf(&db, CF_NETWORKS).map(|_| ())
        })
        .await
    }
}
