//! # Adapters
//!
//! `RecordStore` implementations.

pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;

pub use memory::InMemoryRecordStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbRecordStore, RocksDbStoreConfig};
