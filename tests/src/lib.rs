//! # Wayfi Test Suite
//!
//! Cross-crate flows that no single subsystem crate can test alone.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── directory_flows.rs   # register / nearby / connect scenarios
//! │   ├── fanout_flows.rs      # suggester + directory isolation
//! │   └── http_flows.rs        # real HTTP against a served gateway
//! └── benches/
//!     └── directory_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wf-tests
//! cargo test -p wf-tests integration::http_flows::
//! cargo bench -p wf-tests
//! ```

#![allow(dead_code)]

pub mod integration;
