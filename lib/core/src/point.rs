use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A (latitude, longitude) pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

/// The point a caller asks an estimate for. Transient, request-scoped.
pub type QueryPoint = GeoPoint;

impl GeoPoint {
    #[inline]
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check both coordinates are finite and inside the valid degree ranges
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidQuery {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// True when both coordinate differences are strictly below `tolerance` degrees
    #[inline]
    pub fn within(&self, other: &GeoPoint, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() < tolerance
            && (self.longitude - other.longitude).abs() < tolerance
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self { latitude, longitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_in_range() {
        assert!(GeoPoint::new(0.068, 34.434).validate().is_ok());
        assert!(GeoPoint::new(-90.0, 180.0).validate().is_ok());
        assert!(GeoPoint::new(90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        assert!(matches!(
            GeoPoint::new(90.5, 0.0).validate(),
            Err(Error::InvalidQuery { .. })
        ));
        assert!(GeoPoint::new(0.0, -180.01).validate().is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_within_is_strict() {
        let a = GeoPoint::new(0.0, 0.0);
        assert!(a.within(&GeoPoint::new(0.05, -0.05), 0.1));
        assert!(!a.within(&GeoPoint::new(0.2, 0.0), 0.1));
        assert!(!a.within(&GeoPoint::new(0.0, 0.0), 0.0));
    }

    #[test]
    fn test_deserialize_short_names() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 0.18, "lon": 34.41}"#).unwrap();
        assert_eq!(p, GeoPoint::new(0.18, 34.41));
    }
}
