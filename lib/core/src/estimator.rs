//! Soil estimation service
//!
//! An estimate runs in two phases. The exact-lookup phase returns the first
//! stored sample that lies within `tolerance` degrees of the query on both
//! axes, untouched. Only when no such sample exists does the interpolation
//! phase run: the k nearest samples are aggregated field by field.
//!
//! The estimator holds no dataset of its own. Callers hand it an immutable
//! snapshot per call, so concurrent reloads never interfere with a running
//! estimate.

use serde::Serialize;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::config::{EstimatorConfig, DEFAULT_K, DEFAULT_TOLERANCE};
use crate::distance::euclidean;
use crate::error::{Error, Result};
use crate::field::SoilField;
use crate::neighbors::{select_neighbors, NeighborCandidate};
use crate::point::QueryPoint;
use crate::prediction::Prediction;
use crate::sample::SoilSample;

/// Fields produced by every estimate
pub const PREDICTED_FIELDS: [SoilField; 5] = SoilField::ALL;

/// How a prediction was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimateMethod {
    /// A stored sample was close enough to return directly
    ExactMatch { index: usize },
    /// Aggregated over `k` nearest samples
    Interpolated { k: usize },
}

/// One sample that contributed to an estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborSummary {
    pub index: usize,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

impl From<&NeighborCandidate<'_>> for NeighborSummary {
    fn from(c: &NeighborCandidate<'_>) -> Self {
        Self {
            index: c.index,
            region: c.sample.region.clone(),
            latitude: c.sample.latitude,
            longitude: c.sample.longitude,
            distance: c.distance,
        }
    }
}

/// A prediction together with the evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub prediction: Prediction,
    pub method: EstimateMethod,
    pub neighbors: Vec<NeighborSummary>,
}

/// Stateless estimator; cheap to clone and share
#[derive(Debug, Clone, Default)]
pub struct SoilEstimator {
    config: EstimatorConfig,
}

impl SoilEstimator {
    /// Create an estimator, rejecting an invalid configuration
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate soil properties at `query` from `dataset`
    pub fn estimate(&self, query: &QueryPoint, dataset: &[SoilSample]) -> Result<Prediction> {
        self.explain(query, dataset).map(|e| e.prediction)
    }

    /// Like [`estimate`](Self::estimate), also reporting the method and the samples used
    pub fn explain(&self, query: &QueryPoint, dataset: &[SoilSample]) -> Result<Estimate> {
        query.validate()?;
        if dataset.is_empty() {
            return Err(Error::NoDataAvailable);
        }

        if let Some(estimate) = self.exact_lookup(query, dataset) {
            return Ok(estimate);
        }
        self.interpolate(query, dataset)
    }

    fn exact_lookup(&self, query: &QueryPoint, dataset: &[SoilSample]) -> Option<Estimate> {
        let tolerance = self.config.tolerance();
        let (index, sample) = dataset
            .iter()
            .enumerate()
            .find(|(_, s)| s.location().within(query, tolerance))?;

        debug!(index, region = %sample.region, tolerance, "exact match");
        let candidate = NeighborCandidate {
            sample,
            index,
            distance: euclidean(query, &sample.location()),
        };
        Some(Estimate {
            prediction: Prediction::from(sample),
            method: EstimateMethod::ExactMatch { index },
            neighbors: vec![NeighborSummary::from(&candidate)],
        })
    }

    fn interpolate(&self, query: &QueryPoint, dataset: &[SoilSample]) -> Result<Estimate> {
        let neighbors = select_neighbors(dataset, query, self.config.k()).map_err(|e| match e {
            Error::EmptyDataset => Error::NoDataAvailable,
            other => other,
        })?;

        let samples: Vec<&SoilSample> = neighbors.iter().map(|c| c.sample).collect();
        let values = aggregate(&samples, &PREDICTED_FIELDS, self.config.schema())?;
        let prediction = Prediction::from_values(&values)?;

        debug!(k = neighbors.len(), region = %prediction.region, "interpolated");
        Ok(Estimate {
            prediction,
            method: EstimateMethod::Interpolated { k: neighbors.len() },
            neighbors: neighbors.iter().map(NeighborSummary::from).collect(),
        })
    }
}

/// One-shot estimate with optional tolerance and k overrides
pub fn estimate(
    query: &QueryPoint,
    dataset: &[SoilSample],
    tolerance: Option<f64>,
    k: Option<usize>,
) -> Result<Prediction> {
    let config = EstimatorConfig::default()
        .with_tolerance(tolerance.unwrap_or(DEFAULT_TOLERANCE))
        .with_k(k.unwrap_or(DEFAULT_K));
    SoilEstimator::new(config)?.estimate(query, dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::GeoPoint;

    fn two_counties() -> Vec<SoilSample> {
        vec![
            SoilSample::new(GeoPoint::new(0.068, 34.434), 6.0, 5.0, 9.0, 18.0, "Siaya"),
            SoilSample::new(GeoPoint::new(0.294, 34.395), 6.0, 29.0, 40.0, 82.0, "Kakamega"),
        ]
    }

    #[test]
    fn test_exact_match_returns_sample() {
        let prediction = estimate(&GeoPoint::new(0.068, 34.434), &two_counties(), Some(0.1), None).unwrap();
        assert_eq!(prediction, Prediction::from(&two_counties()[0]));
    }

    #[test]
    fn test_interpolates_without_match() {
        let prediction = estimate(&GeoPoint::new(0.18, 34.41), &two_counties(), Some(0.1), Some(2)).unwrap();
        assert_eq!(prediction.ph, 6.0);
        assert_eq!(prediction.nitrogen, 17.0);
        assert_eq!(prediction.phosphorus, 24.5);
        assert_eq!(prediction.potassium, 50.0);
    }

    #[test]
    fn test_explain_exact() {
        let estimator = SoilEstimator::default();
        let est = estimator.explain(&GeoPoint::new(0.3, 34.4), &two_counties()).unwrap();
        assert_eq!(est.method, EstimateMethod::ExactMatch { index: 1 });
        assert_eq!(est.neighbors.len(), 1);
        assert_eq!(est.prediction.region, "Kakamega");
    }

    #[test]
    fn test_explain_interpolated_orders_neighbors() {
        let estimator = SoilEstimator::new(EstimatorConfig::default().with_k(2)).unwrap();
        // closer to Kakamega than Siaya, outside both windows
        let est = estimator.explain(&GeoPoint::new(0.2, 34.2), &two_counties()).unwrap();
        assert_eq!(est.method, EstimateMethod::Interpolated { k: 2 });
        assert_eq!(est.neighbors[0].region, "Kakamega");
        assert!(est.neighbors[0].distance <= est.neighbors[1].distance);
        assert_eq!(est.prediction.region, "Kakamega");
    }

    #[test]
    fn test_empty_dataset() {
        let result = estimate(&GeoPoint::new(0.0, 34.0), &[], None, None);
        assert!(matches!(result, Err(Error::NoDataAvailable)));
    }

    #[test]
    fn test_invalid_query() {
        let result = estimate(&GeoPoint::new(120.0, 34.0), &two_counties(), None, None);
        assert!(matches!(result, Err(Error::InvalidQuery { .. })));
    }

    #[test]
    fn test_invalid_tolerance() {
        let result = estimate(&GeoPoint::new(0.0, 34.0), &two_counties(), Some(-1.0), None);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_tolerance_never_short_circuits() {
        let estimator = SoilEstimator::new(EstimatorConfig::default().with_tolerance(0.0)).unwrap();
        let est = estimator.explain(&GeoPoint::new(0.068, 34.434), &two_counties()).unwrap();
        assert!(matches!(est.method, EstimateMethod::Interpolated { .. }));
    }
}
