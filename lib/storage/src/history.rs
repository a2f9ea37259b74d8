//! Per-user record of past advice requests

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use soilx_advisory::{Recommendations, SoilReport};
use soilx_core::{Error, Result};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::persistence::JsonPersistence;

/// One advice request as returned by the profile endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub county: String,
    pub soil_data: SoilReport,
    pub recommendations: Recommendations,
    /// `None` when weather was unavailable at request time
    pub total_rain: Option<f64>,
    pub crop: String,
    pub created_at: DateTime<Utc>,
}

/// Fields of a new history record; id and timestamp are assigned on insert
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub user_id: String,
    pub county: String,
    pub soil_data: SoilReport,
    pub recommendations: Recommendations,
    pub total_rain: Option<f64>,
    pub crop: String,
}

/// Search history keyed by user
///
/// When backed by a [`JsonPersistence`], every [`record`](Self::record)
/// rewrites `history.json` before returning.
#[derive(Debug, Default)]
pub struct SearchHistory {
    // per user, oldest first
    entries: RwLock<HashMap<String, Vec<HistoryEntry>>>,
    persistence: Option<JsonPersistence>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries, preserving their order
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut map: HashMap<String, Vec<HistoryEntry>> = HashMap::new();
        for entry in entries {
            map.entry(entry.user_id.clone()).or_default().push(entry);
        }
        Self {
            entries: RwLock::new(map),
            persistence: None,
        }
    }

    /// History backed by `history.json`, loading whatever is already there
    pub fn persistent(persistence: JsonPersistence) -> Result<Self> {
        let loaded = persistence
            .load_history()
            .map_err(|e| Error::Storage(e.to_string()))?;

        let mut history = match loaded {
            Some(doc) => {
                info!(entries = doc.entries.len(), "loaded search history");
                Self::from_entries(doc.entries)
            }
            None => Self::new(),
        };
        history.persistence = Some(persistence);
        Ok(history)
    }

    /// Append an entry; on a write failure the entry is dropped again
    pub fn record(&self, new: NewHistoryEntry) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            county: new.county,
            soil_data: new.soil_data,
            recommendations: new.recommendations,
            total_rain: new.total_rain,
            crop: new.crop,
            created_at: Utc::now(),
        };

        let mut entries = self.entries.write();
        entries
            .entry(entry.user_id.clone())
            .or_default()
            .push(entry.clone());

        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save_history(flatten(&entries)) {
                if let Some(list) = entries.get_mut(&entry.user_id) {
                    list.pop();
                }
                return Err(Error::Storage(e.to_string()));
            }
        }
        Ok(entry)
    }

    /// A user's entries, newest first
    pub fn for_user(&self, user_id: &str) -> Vec<HistoryEntry> {
        self.entries
            .read()
            .get(user_id)
            .map(|list| list.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entry, oldest first within each user
    pub fn all_entries(&self) -> Vec<HistoryEntry> {
        flatten(&self.entries.read())
    }
}

fn flatten(entries: &HashMap<String, Vec<HistoryEntry>>) -> Vec<HistoryEntry> {
    let mut users: Vec<&String> = entries.keys().collect();
    users.sort();
    users
        .into_iter()
        .flat_map(|u| entries[u].iter().cloned())
        .collect()
}
