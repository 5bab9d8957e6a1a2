//! Sync status persisted between runs.
//!
//! Each CLI invocation is a fresh process, so the in-memory [`StatusCache`] would
//! start empty every time and fetch every project. The store keeps the fresh
//! entries in `sync_status.json` under the cache directory; the aggregator's
//! cache is seeded from it on startup and written back after a status run.
//!
//! Loading is best effort: an unreadable file reads as "nothing cached".
//!
//! [`StatusCache`]: crate::core::cache::StatusCache

use crate::core::dirs::get_cache_directory;
use crate::core::error::{ProjectTrackerError, Result};
use crate::core::snapshot::{ProjectKey, SyncStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SYNC_STATUS_FILE: &str = "sync_status.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredSync {
    project: String,
    behind_count: u32,
    computed_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct SyncStore {
    file: PathBuf,
}

impl SyncStore {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// `<cache dir>/sync_status.json`
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(get_cache_directory()?.join(SYNC_STATUS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn load(&self) -> Vec<(ProjectKey, SyncStatus)> {
        let content = match std::fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Ignoring unreadable sync status {}: {e}", self.file.display());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StoredSync>>(&content) {
            Ok(stored) => stored
                .into_iter()
                .map(|entry| {
                    (
                        ProjectKey::new(Path::new(&entry.project)),
                        SyncStatus::new(entry.behind_count, entry.computed_at),
                    )
                })
                .collect(),
            Err(e) => {
                log::warn!("Ignoring malformed sync status {}: {e}", self.file.display());
                Vec::new()
            }
        }
    }

    pub fn save(&self, entries: &[(ProjectKey, SyncStatus)]) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ProjectTrackerError::write_failed(parent, e))?;
        }

        let stored: Vec<StoredSync> = entries
            .iter()
            .map(|(key, status)| StoredSync {
                project: key.as_str().to_string(),
                behind_count: status.behind_count,
                computed_at: status.computed_at,
            })
            .collect();
        let json = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&self.file, json)
            .map_err(|e| ProjectTrackerError::write_failed(&self.file, e))?;

        log::debug!("Saved {} sync entries to {}", stored.len(), self.file.display());
        Ok(())
    }

    /// Forgets every persisted entry
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ProjectTrackerError::write_failed(&self.file, e)),
        }
    }
}
