//! # SoilX Core
//!
//! Nearest-neighbor soil property estimation for the SoilX service.
//!
//! Given a sparse set of geo-tagged soil samples, this crate estimates pH,
//! nitrogen, phosphorus, potassium and region at an arbitrary point:
//!
//! - [`distance::euclidean`] - planar distance over (latitude, longitude)
//! - [`select_neighbors`] - the k closest samples, stable on ties
//! - [`aggregate`] - mean for numeric fields, majority vote for categorical ones
//! - [`SoilEstimator`] - exact-match short-circuit, otherwise interpolation
//!
//! Everything here is pure and synchronous. Datasets are passed in as
//! immutable snapshots ([`SoilDataset`]); the crate performs no I/O.
//!
//! ## Example
//!
//! ```rust
//! use soilx_core::{estimate, GeoPoint, SoilSample};
//!
//! let dataset = vec![
//!     SoilSample::new(GeoPoint::new(0.068, 34.434), 6.0, 5.0, 9.0, 18.0, "Siaya"),
//!     SoilSample::new(GeoPoint::new(0.294, 34.395), 6.0, 29.0, 40.0, 82.0, "Kakamega"),
//! ];
//!
//! // No sample within 0.1 degrees, so both are averaged
//! let prediction = estimate(&GeoPoint::new(0.18, 34.41), &dataset, None, Some(2)).unwrap();
//! assert_eq!(prediction.nitrogen, 17.0);
//! ```

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod estimator;
pub mod field;
pub mod neighbors;
pub mod point;
pub mod prediction;
pub mod sample;

pub use aggregate::aggregate;
pub use config::{EstimatorConfig, DEFAULT_K, DEFAULT_TOLERANCE};
pub use dataset::{DatasetProvider, SoilDataset};
pub use error::{Error, Result};
pub use estimator::{estimate, Estimate, EstimateMethod, NeighborSummary, SoilEstimator, PREDICTED_FIELDS};
pub use field::{FieldKind, FieldSchema, FieldValue, FieldValues, SoilField};
pub use neighbors::{clamp_k, rank_candidates, select_neighbors, NeighborCandidate};
pub use point::{GeoPoint, QueryPoint};
pub use prediction::Prediction;
pub use sample::SoilSample;
