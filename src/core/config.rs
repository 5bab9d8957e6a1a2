//! User configuration.
//!
//! [`TrackerConfig`] is read from `config.json` in the config directory. Every
//! field has a default, so a missing file or a partial file is fine; only a
//! malformed file is an error.

use crate::core::aggregator::AggregatorSettings;
use crate::core::dirs::get_config_directory;
use crate::core::error::{ProjectTrackerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    pub git_binary: String,
    pub cache_ttl_ms: u64,
    pub fetch_timeout_ms: u64,
    pub status_timeout_ms: u64,
    pub log_timeout_ms: u64,
    pub shortlog_timeout_ms: u64,
    pub pull_timeout_ms: u64,
    pub clone_timeout_ms: u64,
    pub max_tracked_projects: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            cache_ttl_ms: 600_000,
            fetch_timeout_ms: 15_000,
            status_timeout_ms: 3_000,
            log_timeout_ms: 3_000,
            shortlog_timeout_ms: 3_000,
            pull_timeout_ms: 30_000,
            clone_timeout_ms: 60_000,
            max_tracked_projects: 50,
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    /// Loads from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ProjectTrackerError::read_failed(path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| ProjectTrackerError::config_parse_failed(path, e))
    }

    pub fn aggregator_settings(&self) -> AggregatorSettings {
        AggregatorSettings {
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            status_timeout: Duration::from_millis(self.status_timeout_ms),
            log_timeout: Duration::from_millis(self.log_timeout_ms),
            shortlog_timeout: Duration::from_millis(self.shortlog_timeout_ms),
            cache_ttl: Duration::from_millis(self.cache_ttl_ms),
        }
    }

    pub fn pull_timeout(&self) -> Duration {
        Duration::from_millis(self.pull_timeout_ms)
    }

    pub fn clone_timeout(&self) -> Duration {
        Duration::from_millis(self.clone_timeout_ms)
    }
}
