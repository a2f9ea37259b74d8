//! Planar distance between coordinates
//!
//! Degrees are treated as flat Cartesian units. This is only sound while all
//! samples sit within a few degrees of each other, which holds for the
//! regional datasets served here.

use crate::point::GeoPoint;

/// Euclidean distance over (latitude, longitude), in degrees
#[inline]
pub fn euclidean(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    (dlat * dlat + dlon * dlon).sqrt()
}
