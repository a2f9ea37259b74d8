//! Import of rows shaped like the relational soil table

use serde::{Deserialize, Serialize};
use soilx_core::{GeoPoint, SoilSample};

/// One row of the `GeoSoilData` table; coordinates may be null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    #[serde(rename = "Region", alias = "county", alias = "region")]
    pub region: String,
    #[serde(rename = "Latitude_dd", alias = "latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude_dd", alias = "longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "pH", alias = "ph")]
    pub ph: f64,
    #[serde(rename = "N_kg_ha", alias = "n")]
    pub nitrogen: f64,
    #[serde(rename = "P_kg_ha", alias = "p")]
    pub phosphorus: f64,
    #[serde(rename = "K_kg_ha", alias = "k")]
    pub potassium: f64,
}

impl SampleRow {
    /// `None` when either coordinate is missing
    pub fn into_sample(self) -> Option<SoilSample> {
        let location = GeoPoint::new(self.latitude?, self.longitude?);
        Some(SoilSample::new(
            location,
            self.ph,
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.region,
        ))
    }
}

/// Samples from rows with both coordinates present, in row order
pub fn rows_to_samples(rows: Vec<SampleRow>) -> Vec<SoilSample> {
    rows.into_iter().filter_map(SampleRow::into_sample).collect()
}
