//! # Adapters
//!
//! `WaypointSuggester` implementations.

pub mod gemini;

pub use gemini::{build_prompt, GeminiConfig, GeminiSuggester};
