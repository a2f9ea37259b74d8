use parking_lot::RwLock;
use soilx_core::{DatasetProvider, Error, Result, SoilDataset, SoilSample};
use std::path::Path;
use tracing::info;

use crate::persistence::JsonPersistence;
use crate::seed::reference_dataset;

/// Holder of the active sample snapshot
///
/// Readers clone the current [`SoilDataset`] handle and release the lock
/// immediately. Writers build a complete replacement and swap it in, so an
/// estimate never observes a half-applied update.
#[derive(Debug)]
pub struct SampleStore {
    dataset: RwLock<SoilDataset>,
    persistence: Option<JsonPersistence>,
}

impl SampleStore {
    /// Store without a backing file
    pub fn in_memory(dataset: SoilDataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            persistence: None,
        }
    }

    /// Store backed by `data_dir/samples.json`, seeded with the reference samples
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let persistence = JsonPersistence::new(data_dir.as_ref()).map_err(|e| Error::Storage(e.to_string()))?;
        Self::persistent(persistence, reference_dataset)
    }

    /// Store backed by `samples.json`, seeded with `seed` when the file is absent
    pub fn persistent(persistence: JsonPersistence, seed: impl FnOnce() -> Result<SoilDataset>) -> Result<Self> {
        let loaded = persistence
            .load_samples()
            .map_err(|e| Error::Storage(e.to_string()))?;

        let dataset = match loaded {
            Some(doc) => {
                let dataset = SoilDataset::new(doc.samples)?;
                info!(samples = dataset.len(), saved_at = %doc.saved_at, "loaded soil samples");
                dataset
            }
            None => {
                let dataset = seed()?;
                persistence
                    .save_samples(dataset.as_slice())
                    .map_err(|e| Error::Storage(e.to_string()))?;
                info!(samples = dataset.len(), path = ?persistence.samples_path(), "seeded soil samples");
                dataset
            }
        };

        Ok(Self {
            dataset: RwLock::new(dataset),
            persistence: Some(persistence),
        })
    }

    /// The current snapshot
    #[inline]
    pub fn snapshot(&self) -> SoilDataset {
        self.dataset.read().clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dataset.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dataset.read().is_empty()
    }

    /// Append samples; every sample is validated before anything changes
    pub fn insert(&self, samples: Vec<SoilSample>) -> Result<usize> {
        let added = samples.len();
        let mut guard = self.dataset.write();
        let next = guard.extended(samples)?;
        self.persist(&next)?;
        *guard = next;
        info!(added, total = guard.len(), "inserted soil samples");
        Ok(guard.len())
    }

    /// Swap in a whole new dataset
    pub fn replace(&self, dataset: SoilDataset) -> Result<()> {
        let mut guard = self.dataset.write();
        self.persist(&dataset)?;
        *guard = dataset;
        info!(total = guard.len(), "replaced soil samples");
        Ok(())
    }

    /// Write the current snapshot; a no-op for in-memory stores
    pub fn save(&self) -> Result<()> {
        let snapshot = self.snapshot();
        self.persist(&snapshot)
    }

    fn persist(&self, dataset: &SoilDataset) -> Result<()> {
        if let Some(persistence) = &self.persistence {
            persistence
                .save_samples(dataset.as_slice())
                .map_err(|e| Error::Storage(e.to_string()))?;
        }
        Ok(())
    }
}

impl DatasetProvider for SampleStore {
    fn snapshot(&self) -> Result<SoilDataset> {
        Ok(SampleStore::snapshot(self))
    }
}
