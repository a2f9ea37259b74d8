//! # SoilX
//!
//! Soil nutrient estimation and crop advisory service.
//!
//! SoilX estimates soil pH, nitrogen, phosphorus and potassium at any point
//! from a sparse set of geo-tagged samples, then turns the estimate into
//! fertilizer and planting advice.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install soilx
//! OPENWEATHER_API_KEY=... soilx --http-port 3000 --data-dir ./data
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use soilx::prelude::*;
//!
//! let dataset = SoilDataset::new(vec![
//!     SoilSample::new(GeoPoint::new(0.068, 34.434), 6.0, 5.0, 9.0, 18.0, "Siaya"),
//!     SoilSample::new(GeoPoint::new(0.294, 34.395), 6.0, 29.0, 40.0, 82.0, "Kakamega"),
//! ]).unwrap();
//!
//! let estimator = SoilEstimator::new(EstimatorConfig::default()).unwrap();
//! let prediction = estimator.estimate(&GeoPoint::new(0.068, 34.434), &dataset).unwrap();
//! assert_eq!(prediction.region, "Siaya");
//! ```
//!
//! ## Crate Structure
//!
//! - `soilx-core` - nearest-neighbor estimation engine
//! - `soilx-storage` - sample store, persistence and search history
//! - `soilx-advisory` - recommendations and weather
//! - `soilx-api` - REST API

// Re-export core types
pub use soilx_core::{
    estimate, select_neighbors, aggregate,
    SoilEstimator, EstimatorConfig, Estimate, EstimateMethod,
    SoilDataset, SoilSample, GeoPoint, QueryPoint, Prediction,
    FieldSchema, FieldKind, SoilField,
    DatasetProvider, Error, Result,
};

// Re-export storage
pub use soilx_storage::{StorageManager, SampleStore, SearchHistory};

// Re-export advisory
pub use soilx_advisory::{recommend, GeocoderClient, Recommendations, WeatherClient};

// Re-export API
pub use soilx_api::{RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        SoilEstimator, EstimatorConfig, Estimate, EstimateMethod,
        SoilDataset, SoilSample, GeoPoint, Prediction,
        DatasetProvider, Error, Result,
        StorageManager,
    };
}
