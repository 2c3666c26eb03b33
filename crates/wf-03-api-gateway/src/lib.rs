//! WF-03 API Gateway - REST interface over the Network Directory and the
//! Waypoint Fan-out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   API GATEWAY (wf-03)                     │
//! ├──────────────────────────────────────────────────────────┤
//! │   Trace → CORS → BodyLimit → Metrics → Handler           │
//! │                                  │                        │
//! │             per-request deadline (tokio timeout)          │
//! └──────────────────────┬───────────────────┬───────────────┘
//!                        ▼                   ▼
//!              wf-01 DirectoryApi     wf-02 FanoutApi
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wf_03_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::new(GatewayConfig::default(), directory, fanout)?;
//! service.start(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, CorsConfig, GatewayConfig};
pub use domain::error::{ApiError, ApiResult, ErrorBody, GatewayError};
pub use handlers::wifi::RegisterResponse;
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
