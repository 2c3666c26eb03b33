//! # Great-Circle Distance
//!
//! Haversine distance on a sphere of radius [`EARTH_RADIUS_KM`].

use crate::domain::EARTH_RADIUS_KM;

/// Distance in kilometres between two points given in degrees.
///
/// Inputs must be finite; callers validate coordinates first.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Angular radius (radians on the unit sphere) for a distance in kilometres.
pub fn km_to_radians(radius_km: f64) -> f64 {
    radius_km / EARTH_RADIUS_KM
}
