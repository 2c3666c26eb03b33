//! # Domain Invariants
//!
//! Business rules that must always hold true.

use super::errors::DirectoryError;

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geometry marker stored on every location.
pub const POINT_KIND: &str = "Point";

/// Default connect radius (100 m).
pub const DEFAULT_CONNECT_RADIUS_KM: f64 = 0.1;

/// Default nearby-search radius.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 1.0;

/// Largest nearby-search radius a caller may request.
pub const MAX_SEARCH_RADIUS_KM: f64 = 50.0;

/// Invariant: coordinates are finite and on the globe.
pub fn invariant_valid_coordinates(latitude: f64, longitude: f64) -> Result<(), DirectoryError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(DirectoryError::Validation(format!(
            "latitude out of range: {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(DirectoryError::Validation(format!(
            "longitude out of range: {longitude}"
        )));
    }
    Ok(())
}

/// Invariant: a required text field is present.
pub fn invariant_non_empty(field: &str, value: &str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        return Err(DirectoryError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Invariant: requested search radius is positive and bounded.
pub fn invariant_search_radius(radius_km: f64, max_km: f64) -> Result<(), DirectoryError> {
    if !radius_km.is_finite() || radius_km <= 0.0 || radius_km > max_km {
        return Err(DirectoryError::Validation(format!(
            "radius must be in (0, {max_km}] km, got {radius_km}"
        )));
    }
    Ok(())
}

/// Invariant: the requester is physically close enough to see a credential.
///
/// Inclusive: a requester exactly `limit_km` away is allowed.
pub fn invariant_within_reach(distance_km: f64, limit_km: f64) -> Result<(), DirectoryError> {
    if distance_km > limit_km {
        return Err(DirectoryError::Forbidden {
            distance_km,
            limit_km,
        });
    }
    Ok(())
}
