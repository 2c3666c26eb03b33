//! # WF-01 Network Directory
//!
//! Geospatial directory of shared WiFi networks with a proximity-gated
//! credential reveal.
//!
//! **Subsystem ID:** 1  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Operations
//!
//! | Operation | Behaviour |
//! |-----------|-----------|
//! | register | Store a network unless (ssid, address) is already taken |
//! | list_all | Every well-formed record, credential hidden |
//! | nearby_search | Records within a radius, closest first, with exact distance |
//! | connect | Reveal the credential if the requester is within 100 m |
//!
//! ## Module Structure
//!
//! ```text
//! wf-01-network-directory/
//! ├── domain/          # NetworkDocument, GeoPoint, GeoQuery, errors, invariants
//! ├── algorithms/      # Haversine distance
//! ├── ports/           # DirectoryApi (inbound) + RecordStore (outbound)
//! ├── adapters/        # In-memory and RocksDB record stores
//! ├── application/     # DirectoryService
//! └── config.rs        # DirectoryConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::InMemoryRecordStore;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbRecordStore, RocksDbStoreConfig};
pub use algorithms::{haversine_km, km_to_radians};
pub use application::DirectoryService;
pub use config::{ConfigError, DirectoryConfig};
pub use domain::{
    ConnectRequest, ConnectedNetwork, DedupKey, DirectoryError, ErrorKind, GeoPoint, GeoQuery,
    Location, NearbyNetwork, NearbyRequest, NetworkDocument, NetworkId, NetworkSummary,
    NewNetwork, RegisterRequest, StoreError, DEFAULT_CONNECT_RADIUS_KM, DEFAULT_SEARCH_RADIUS_KM,
    EARTH_RADIUS_KM, MAX_SEARCH_RADIUS_KM,
};
pub use ports::{DirectoryApi, RecordStore, UnavailableRecordStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
