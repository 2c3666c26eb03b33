//! # Algorithms
//!
//! Pure geodesy helpers.

pub mod distance;

pub use distance::{haversine_km, km_to_radians};
