use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use soilx_core::SoilSample;

use crate::history::HistoryEntry;

const SAMPLES_FILE: &str = "samples.json";
const HISTORY_FILE: &str = "history.json";

/// On-disk form of the sample table
#[derive(Debug, Serialize, Deserialize)]
pub struct SamplesDocument {
    pub saved_at: DateTime<Utc>,
    pub samples: Vec<SoilSample>,
}

/// On-disk form of the search history
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryDocument {
    pub saved_at: DateTime<Utc>,
    pub entries: Vec<HistoryEntry>,
}

/// JSON documents under a data directory, replaced atomically on save
#[derive(Debug, Clone)]
pub struct JsonPersistence {
    data_dir: PathBuf,
}

impl JsonPersistence {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data directory {:?}", data_dir))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn samples_path(&self) -> PathBuf {
        self.data_dir.join(SAMPLES_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    pub fn load_samples(&self) -> Result<Option<SamplesDocument>> {
        read_json(&self.samples_path())
    }

    pub fn save_samples(&self, samples: &[SoilSample]) -> Result<()> {
        let doc = SamplesDocument {
            saved_at: Utc::now(),
            samples: samples.to_vec(),
        };
        write_json(&self.samples_path(), &doc)
    }

    pub fn load_history(&self) -> Result<Option<HistoryDocument>> {
        read_json(&self.history_path())
    }

    pub fn save_history(&self, entries: Vec<HistoryEntry>) -> Result<()> {
        let doc = HistoryDocument {
            saved_at: Utc::now(),
            entries,
        };
        write_json(&self.history_path(), &doc)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read(path).with_context(|| format!("reading {:?}", path))?;
    let value = serde_json::from_slice(&data).with_context(|| format!("parsing {:?}", path))?;
    Ok(Some(value))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(&data))
        .with_context(|| format!("writing {:?}", path))?;
    Ok(())
}
