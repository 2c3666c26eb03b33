//! # WF-02 Waypoint Fan-out
//!
//! Asks an external suggester for stops between two points, then joins each
//! stop with the networks the Network Directory knows around it.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Flow
//!
//! ```text
//! (start, end) ──► WaypointSuggester ──► free text
//!                                          │ parse_suggestion
//!                                          ▼
//!                                    [Waypoint; n]
//!                                          │ join_all(nearby_at)
//!                                          ▼
//!                                  [StopNetworks; n]
//! ```
//!
//! A stop whose coordinates are unusable, or whose lookup fails, is kept with
//! an empty network list.

#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{build_prompt, GeminiConfig, GeminiSuggester};
pub use algorithms::{locate_json_object, parse_suggestion};
pub use application::WaypointFanoutService;
pub use config::{ConfigError, FanoutConfig, DEFAULT_STOPS, DEFAULT_STOP_TYPE, MAX_STOPS};
pub use domain::{
    FanoutError, RouteNetworks, RouteQuery, StopNetworks, StopsRequest, SuggestedRoute,
    SuggesterError, Waypoint, WaypointRequest,
};
pub use ports::{FanoutApi, MockSuggester, WaypointSuggester};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
