use thiserror::Error;

use crate::field::{FieldKind, SoilField};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The neighbor selector was handed no samples.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// No samples exist to estimate from.
    #[error("No soil data available for prediction")]
    NoDataAvailable,

    /// Aggregation was asked to reduce zero neighbors.
    #[error("Neighbor set is empty")]
    EmptyNeighborSet,

    #[error("Invalid query point: latitude {latitude}, longitude {longitude}")]
    InvalidQuery { latitude: f64, longitude: f64 },

    #[error("Invalid soil sample: {0}")]
    InvalidSample(String),

    #[error("Field '{field}' cannot be aggregated as {expected:?}")]
    FieldTypeMismatch { field: SoilField, expected: FieldKind },

    #[error("Field '{0}' missing from aggregated values")]
    MissingField(SoilField),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for the "nothing to estimate from" family of errors.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Error::EmptyDataset | Error::NoDataAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_message() {
        let e = Error::InvalidQuery { latitude: 91.0, longitude: 0.0 };
        assert_eq!(e.to_string(), "Invalid query point: latitude 91, longitude 0");
    }

    #[test]
    fn test_field_type_mismatch_message() {
        let e = Error::FieldTypeMismatch {
            field: SoilField::Region,
            expected: FieldKind::Numeric,
        };
        assert_eq!(e.to_string(), "Field 'region' cannot be aggregated as Numeric");
    }

    #[test]
    fn test_is_no_data() {
        assert!(Error::EmptyDataset.is_no_data());
        assert!(Error::NoDataAvailable.is_no_data());
        assert!(!Error::EmptyNeighborSet.is_no_data());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<Error>();
    }
}
