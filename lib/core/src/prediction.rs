use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::{FieldValues, SoilField};
use crate::sample::SoilSample;

/// Estimated soil properties at a query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub region: String,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl Prediction {
    /// Build from a complete aggregation; any missing field is an error
    pub fn from_values(values: &FieldValues) -> Result<Self> {
        Ok(Self {
            region: values.category(SoilField::Region)?.to_string(),
            ph: values.number(SoilField::Ph)?,
            nitrogen: values.number(SoilField::Nitrogen)?,
            phosphorus: values.number(SoilField::Phosphorus)?,
            potassium: values.number(SoilField::Potassium)?,
        })
    }

    pub fn number(&self, field: SoilField) -> Option<f64> {
        match field {
            SoilField::Region => None,
            SoilField::Ph => Some(self.ph),
            SoilField::Nitrogen => Some(self.nitrogen),
            SoilField::Phosphorus => Some(self.phosphorus),
            SoilField::Potassium => Some(self.potassium),
        }
    }
}

impl From<&SoilSample> for Prediction {
    fn from(sample: &SoilSample) -> Self {
        Self {
            region: sample.region.clone(),
            ph: sample.ph,
            nitrogen: sample.nitrogen,
            phosphorus: sample.phosphorus,
            potassium: sample.potassium,
        }
    }
}
