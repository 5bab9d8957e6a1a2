//! Shared setup for every command: configuration, the git runner, one aggregator
//! and the sync status carried over from earlier runs.

use crate::core::{
    aggregator::StatusAggregator,
    clock::SystemClock,
    config::TrackerConfig,
    error::Result,
    registry::ProjectRegistry,
    runner::ProcessRunner,
    snapshot::normalize_path,
    sync_store::SyncStore,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct TrackerContext {
    pub config: TrackerConfig,
    pub runner: Arc<ProcessRunner>,
    pub aggregator: StatusAggregator,
    pub sync_store: SyncStore,
}

impl TrackerContext {
    pub fn init() -> Result<Self> {
        let config = TrackerConfig::load()?;
        Ok(Self::with_config(config, SyncStore::open_default()?))
    }

    /// Builds the context and seeds the status cache from `sync_store`
    pub fn with_config(config: TrackerConfig, sync_store: SyncStore) -> Self {
        let runner = Arc::new(ProcessRunner::new(config.git_binary.clone()));
        let aggregator = StatusAggregator::new(
            runner.clone(),
            Arc::new(SystemClock),
            config.aggregator_settings(),
        );
        aggregator.cache().restore(sync_store.load());

        Self {
            config,
            runner,
            aggregator,
            sync_store,
        }
    }

    pub fn registry(&self) -> Result<ProjectRegistry> {
        ProjectRegistry::load(self.config.max_tracked_projects)
    }

    /// Writes the fresh cache entries for the next run. Failure only costs a fetch.
    pub fn persist_sync_status(&self) {
        let entries = self.aggregator.cache().fresh_entries();
        if let Err(e) = self.sync_store.save(&entries) {
            log::warn!("Could not save sync status: {e}");
        }
    }

    /// Drops cached sync status in memory and on disk
    pub fn forget_sync_status(&self) -> Result<()> {
        self.aggregator.invalidate_all();
        self.sync_store.clear()
    }
}

/// Absolute, lexically normalised form of `path`
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_path(&absolute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::{ProjectKey, SyncStatus};
    use tempfile::TempDir;

    #[test]
    fn test_absolute_path_normalises_spellings() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(Path::new("app")).unwrap(), cwd.join("app"));
        assert_eq!(absolute_path(Path::new("app/")).unwrap(), cwd.join("app"));
        assert_eq!(absolute_path(Path::new("./app")).unwrap(), cwd.join("app"));
        assert_eq!(absolute_path(Path::new(".")).unwrap(), normalize_path(&cwd));
    }

    #[test]
    fn test_context_restores_and_forgets_sync_status() {
        let temp_dir = TempDir::new().unwrap();
        let store = SyncStore::new(temp_dir.path().join("sync_status.json"));
        let key = ProjectKey::new(Path::new("/work/app"));
        store
            .save(&[(key.clone(), SyncStatus::new(2, chrono::Local::now()))])
            .unwrap();

        let ctx = TrackerContext::with_config(TrackerConfig::default(), store);
        assert_eq!(ctx.aggregator.cache().get(&key).map(|s| s.behind_count), Some(2));

        ctx.forget_sync_status().unwrap();
        assert!(ctx.aggregator.cache().is_empty());
        assert!(!ctx.sync_store.path().exists());
    }
}
