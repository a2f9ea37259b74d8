//! Tunables for the soil estimator.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::FieldSchema;

/// Default exact-match window, in degrees (about 11 km)
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Default neighbor count for interpolation
pub const DEFAULT_K: usize = 3;

/// Configuration for [`SoilEstimator`](crate::SoilEstimator)
///
/// # Example
///
/// ```
/// use soilx_core::EstimatorConfig;
///
/// let config = EstimatorConfig::default().with_tolerance(0.05).with_k(5);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.k(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Coordinate window for the exact-match short-circuit
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    /// Neighbors used when interpolating
    #[serde(default = "default_k")]
    k: usize,
    #[serde(default)]
    schema: FieldSchema,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_k() -> usize {
    DEFAULT_K
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            k: DEFAULT_K,
            schema: FieldSchema::default(),
        }
    }
}

impl EstimatorConfig {
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets k. Zero is treated as 1 at selection time.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Tolerance must be finite and non-negative; the schema must be consistent
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        self.schema.validate()
    }
}
