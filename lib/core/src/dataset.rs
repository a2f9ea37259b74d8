use std::ops::Deref;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::field::SoilField;
use crate::sample::SoilSample;

/// Immutable, shareable snapshot of soil samples
///
/// Cloning shares the same allocation. A reload produces a new snapshot;
/// estimates already holding the old one keep reading it unchanged.
#[derive(Debug, Clone)]
pub struct SoilDataset {
    samples: Arc<[SoilSample]>,
}

impl Default for SoilDataset {
    fn default() -> Self {
        Self { samples: Arc::from(Vec::new()) }
    }
}

impl SoilDataset {
    /// Build a snapshot, validating every sample first
    pub fn new(samples: Vec<SoilSample>) -> Result<Self> {
        for (i, sample) in samples.iter().enumerate() {
            sample
                .validate()
                .map_err(|e| Error::InvalidSample(format!("sample {}: {}", i, e)))?;
        }
        Ok(Self { samples: samples.into() })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[SoilSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SoilSample> {
        self.samples.iter()
    }

    /// New snapshot with `extra` appended after the current samples
    pub fn extended(&self, extra: Vec<SoilSample>) -> Result<Self> {
        let added = Self::new(extra)?;
        let mut all = Vec::with_capacity(self.len() + added.len());
        all.extend_from_slice(&self.samples);
        all.extend_from_slice(&added.samples);
        Ok(Self { samples: all.into() })
    }

    /// (min, max) of a numeric field, `None` for `region` or an empty dataset
    pub fn numeric_bounds(&self, field: SoilField) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(|s| s.numeric(field))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Whether two handles point at the same snapshot
    pub fn ptr_eq(&self, other: &SoilDataset) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

impl Deref for SoilDataset {
    type Target = [SoilSample];

    fn deref(&self) -> &[SoilSample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a SoilDataset {
    type Item = &'a SoilSample;
    type IntoIter = std::slice::Iter<'a, SoilSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Supplies the active dataset snapshot to estimators
pub trait DatasetProvider: Send + Sync {
    fn snapshot(&self) -> Result<SoilDataset>;
}

impl DatasetProvider for SoilDataset {
    fn snapshot(&self) -> Result<SoilDataset> {
        Ok(self.clone())
    }
}
