use soilx_core::{Error, Result, SoilDataset};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::history::SearchHistory;
use crate::persistence::JsonPersistence;
use crate::seed::reference_dataset;
use crate::store::SampleStore;

/// Owns the sample store and search history for one data directory
pub struct StorageManager {
    samples: Arc<SampleStore>,
    history: Arc<SearchHistory>,
    persistence: Option<JsonPersistence>,
}

impl StorageManager {
    /// Open `data_dir`, seeding the reference samples on first use
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let persistence = JsonPersistence::new(data_dir.as_ref()).map_err(|e| Error::Storage(e.to_string()))?;

        let samples = SampleStore::persistent(persistence.clone(), reference_dataset)?;

        let history = SearchHistory::persistent(persistence.clone())?;
        info!(samples = samples.len(), history = history.len(), dir = ?persistence.data_dir(), "storage opened");

        Ok(Self {
            samples: Arc::new(samples),
            history: Arc::new(history),
            persistence: Some(persistence),
        })
    }

    /// Storage with no files; nothing survives the process
    pub fn in_memory(dataset: SoilDataset) -> Self {
        Self {
            samples: Arc::new(SampleStore::in_memory(dataset)),
            history: Arc::new(SearchHistory::new()),
            persistence: None,
        }
    }

    #[inline]
    pub fn samples(&self) -> &Arc<SampleStore> {
        &self.samples
    }

    #[inline]
    pub fn history(&self) -> &Arc<SearchHistory> {
        &self.history
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        self.persistence.as_ref().map(|p| p.data_dir().to_path_buf())
    }

    /// Force save of samples and history
    pub fn save(&self) -> Result<()> {
        self.samples.save()?;
        if let Some(persistence) = &self.persistence {
            persistence
                .save_history(self.history.all_entries())
                .map_err(|e| Error::Storage(e.to_string()))?;
        }
        Ok(())
    }
}
