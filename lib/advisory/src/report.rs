use serde::{Deserialize, Serialize};
use soilx_core::Prediction;

/// Soil values as shown to the client, one decimal place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilReport {
    pub ph: String,
    pub n: String,
    pub p: String,
    pub k: String,
}

impl From<&Prediction> for SoilReport {
    fn from(prediction: &Prediction) -> Self {
        Self {
            ph: format!("{:.1}", prediction.ph),
            n: format!("{:.1}", prediction.nitrogen),
            p: format!("{:.1}", prediction.phosphorus),
            k: format!("{:.1}", prediction.potassium),
        }
    }
}
