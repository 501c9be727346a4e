//! Vault Store: ordered CRUD over saved analysis results.

use super::model::VaultEntry;
use crate::analysis::AnalysisResult;
use crate::error::{ArchGoError, Result};
use crate::storage::KeyValueStore;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Namespace key holding the JSON array of entries.
pub const VAULT_KEY: &str = "architect_go_vault_v1";

/// Durable, newest-first collection of [`VaultEntry`] values.
///
/// Every mutation rewrites the whole array under [`VAULT_KEY`]. A missing or
/// unparsable value reads as an empty vault.
#[derive(Clone)]
pub struct VaultStore {
    store: Arc<dyn KeyValueStore>,
}

impl VaultStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Lists all entries, most recent first.
    ///
    /// Never fails: read and parse errors are logged and recovered as empty.
    pub fn list(&self) -> Vec<VaultEntry> {
        match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("[Vault] Failed to load vault, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Finds an entry by id.
    pub fn get(&self, id: &str) -> Option<VaultEntry> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Saves a result as a new entry at the front of the vault.
    ///
    /// Saving the same result twice creates two entries.
    pub fn save(&self, result: AnalysisResult, title: Option<&str>) -> Result<VaultEntry> {
        let now = Utc::now();
        let title = match title {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => format!("Architecture Scan {}", now.format("%Y-%m-%d")),
        };

        let entry = VaultEntry {
            id: Uuid::new_v4().to_string(),
            title,
            created_at: now.timestamp_millis(),
            result,
        };

        let mut entries = self.list();
        entries.insert(0, entry.clone());
        self.write(&entries)?;

        tracing::info!("[Vault] Saved entry {} ({} total)", entry.id, entries.len());
        Ok(entry)
    }

    /// Removes the entry with `id` and returns the remaining entries.
    ///
    /// Deleting an absent id is a no-op.
    pub fn delete(&self, id: &str) -> Result<Vec<VaultEntry>> {
        let mut entries = self.list();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            tracing::debug!("[Vault] Delete of unknown entry {} ignored", id);
            return Ok(entries);
        }

        self.write(&entries)?;
        tracing::info!("[Vault] Deleted entry {}", id);
        Ok(entries)
    }

    fn read(&self) -> Result<Vec<VaultEntry>> {
        let Some(raw) = self.store.get(VAULT_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| ArchGoError::StorageCorrupt(e.to_string()))
    }

    fn write(&self, entries: &[VaultEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(VAULT_KEY, &json)
    }
}
