use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{FieldValue, SoilField};
use crate::point::GeoPoint;

/// A geo-tagged soil measurement
///
/// Read-only once loaded; queries never mutate samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
    pub ph: f64,
    /// Nitrogen, kg/ha
    #[serde(alias = "n")]
    pub nitrogen: f64,
    /// Phosphorus, kg/ha
    #[serde(alias = "p")]
    pub phosphorus: f64,
    /// Potassium, kg/ha
    #[serde(alias = "k")]
    pub potassium: f64,
    #[serde(alias = "county")]
    pub region: String,
}

impl SoilSample {
    #[must_use]
    pub fn new(
        location: GeoPoint,
        ph: f64,
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        region: impl Into<String>,
    ) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            ph,
            nitrogen,
            phosphorus,
            potassium,
            region: region.into(),
        }
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Coordinates in range, nutrients finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.location().is_valid() {
            return Err(Error::InvalidSample(format!(
                "coordinates out of range: ({}, {})",
                self.latitude, self.longitude
            )));
        }
        for field in [SoilField::Ph, SoilField::Nitrogen, SoilField::Phosphorus, SoilField::Potassium] {
            let value = self.number(field);
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSample(format!("{} must be >= 0, got {}", field, value)));
            }
        }
        Ok(())
    }

    /// Read a field as a typed value
    pub fn value(&self, field: SoilField) -> FieldValue {
        match field {
            SoilField::Region => FieldValue::Category(self.region.clone()),
            numeric => FieldValue::Number(self.number(numeric)),
        }
    }

    fn number(&self, field: SoilField) -> f64 {
        match field {
            SoilField::Ph => self.ph,
            SoilField::Nitrogen => self.nitrogen,
            SoilField::Phosphorus => self.phosphorus,
            SoilField::Potassium => self.potassium,
            SoilField::Region => f64::NAN,
        }
    }

    /// Numeric field value, `None` for `region`
    pub fn numeric(&self, field: SoilField) -> Option<f64> {
        field.is_numeric().then(|| self.number(field))
    }
}
