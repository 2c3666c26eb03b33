//! # Application Layer
//!
//! Service orchestrating domain logic and the record store.

pub mod service;

pub use service::DirectoryService;
