//! # Algorithms

pub mod extract;

pub use extract::{locate_json_object, parse_suggestion};
