//! Repository status aggregation.
//!
//! [`StatusAggregator::compute_snapshot`] turns a project path into a [`Snapshot`] by
//! combining a direct HEAD read with four git invocations:
//!
//! | step         | command                      | timeout |
//! |--------------|------------------------------|---------|
//! | fetch        | `git fetch` (cache-gated)    | 15s     |
//! | status       | `git status --porcelain -b`  | 3s      |
//! | activity     | `git log --since=7 days ago` | 3s      |
//! | contributors | `git shortlog -sn --all`     | 3s      |
//!
//! Fetch and status run in sequence because status reads the tracking refs the
//! fetch updates; activity and contributors run alongside them. Every step is
//! isolated: a failure is logged and degrades only its own field. The only way
//! to get no snapshot at all is a path that does not exist.
//!
//! # Fetch de-duplication
//! While a fetch for a project is outstanding, further requests for the same project
//! await that same fetch instead of starting another one.

use crate::core::cache::{StatusCache, DEFAULT_STATUS_TTL};
use crate::core::clock::Clock;
use crate::core::error::Result;
use crate::core::head;
use crate::core::parsing::{self, StatusSummary};
use crate::core::runner::{CommandOutput, CommandRunner, VcsCommand};
use crate::core::snapshot::{
    ActivityHistogram, ContributorList, LocalStatus, ProjectKey, Snapshot, SyncStatus, ACTIVITY_DAYS,
};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(3);
pub const LOG_TIMEOUT: Duration = Duration::from_secs(3);
pub const SHORTLOG_TIMEOUT: Duration = Duration::from_secs(3);

/// Per-command timeouts and cache lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    pub fetch_timeout: Duration,
    pub status_timeout: Duration,
    pub log_timeout: Duration,
    pub shortlog_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: FETCH_TIMEOUT,
            status_timeout: STATUS_TIMEOUT,
            log_timeout: LOG_TIMEOUT,
            shortlog_timeout: SHORTLOG_TIMEOUT,
            cache_ttl: DEFAULT_STATUS_TTL,
        }
    }
}

/// Sub-steps of a snapshot, used to label recovered failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Branch,
    Status,
    Activity,
    Contributors,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Branch => "branch",
            Step::Status => "status",
            Step::Activity => "activity",
            Step::Contributors => "contributors",
        };
        f.write_str(name)
    }
}

/// Resolves to whether the fetch succeeded
type PendingFetch = Shared<BoxFuture<'static, bool>>;

pub struct StatusAggregator {
    runner: Arc<dyn CommandRunner>,
    clock: Arc<dyn Clock>,
    cache: StatusCache,
    in_flight: Mutex<HashMap<ProjectKey, PendingFetch>>,
    settings: AggregatorSettings,
}

impl StatusAggregator {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        clock: Arc<dyn Clock>,
        settings: AggregatorSettings,
    ) -> Self {
        let cache = StatusCache::new(Arc::clone(&clock), settings.cache_ttl);
        Self {
            runner,
            clock,
            cache,
            in_flight: Mutex::new(HashMap::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    /// Drops all cached sync status; call after pull, clone or a manual refresh
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    /// Snapshot of `path`, or `None` if the path does not exist
    pub async fn compute_snapshot(&self, path: &Path) -> Option<Snapshot> {
        if tokio::fs::metadata(path).await.is_err() {
            log::debug!("Project path {} does not exist", path.display());
            return None;
        }

        let Some(git_dir) = head::find_git_dir(path).await else {
            log::debug!("{} has no git metadata", path.display());
            return Some(Snapshot::not_a_repository(self.clock.now()));
        };

        let key = ProjectKey::new(path);
        let (branch, status, activity, contributors) = tokio::join!(
            head::read_branch(&git_dir),
            self.sync_and_status(path, &key),
            self.activity(path),
            self.contributors(path),
        );

        let branch = recover(Step::Branch, path, branch);
        let (sync, local) = recover(Step::Status, path, status)
            .unwrap_or_else(|| (SyncStatus::up_to_date(self.clock.now()), LocalStatus::default()));

        Some(Snapshot {
            branch_name: branch.as_ref().map(|b| b.name.clone()),
            is_detached: branch.as_ref().is_some_and(|b| b.detached),
            local,
            sync,
            activity: recover(Step::Activity, path, activity).unwrap_or_default(),
            contributors: recover(Step::Contributors, path, contributors).unwrap_or_default(),
        })
    }

    /// Snapshots for many paths, computed concurrently, in input order
    pub async fn compute_snapshots(&self, paths: &[PathBuf]) -> Vec<Option<Snapshot>> {
        futures::future::join_all(paths.iter().map(|path| self.compute_snapshot(path))).await
    }

    /// Fetch if the cached sync status is missing or stale, then read status.
    ///
    /// The cache is restamped with the status result even when no fetch ran, so the
    /// behind count stays current while the TTL only decides when to fetch again.
    async fn sync_and_status(
        &self,
        path: &Path,
        key: &ProjectKey,
    ) -> Result<(SyncStatus, LocalStatus)> {
        self.fetch_if_stale(path, key).await;

        let summary: StatusSummary = {
            let output = self
                .run_checked(VcsCommand::status(), path, self.settings.status_timeout)
                .await?;
            parsing::parse_status_output(&output.stdout)?
        };

        let sync = self.cache.set(
            key.clone(),
            SyncStatus::new(summary.behind_count, self.clock.now()),
        );
        Ok((sync, summary.local))
    }

    async fn activity(&self, path: &Path) -> Result<ActivityHistogram> {
        let output = self
            .run_checked(
                VcsCommand::log_since_days(ACTIVITY_DAYS),
                path,
                self.settings.log_timeout,
            )
            .await?;
        parsing::bucket_activity(&output.stdout, self.clock.now().date_naive())
    }

    async fn contributors(&self, path: &Path) -> Result<ContributorList> {
        let output = self
            .run_checked(VcsCommand::shortlog(), path, self.settings.shortlog_timeout)
            .await?;
        parsing::parse_shortlog(&output.stdout)
    }

    async fn run_checked(
        &self,
        command: VcsCommand,
        path: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        self.runner
            .run(&command, path, timeout)
            .await?
            .into_success(&command)
    }

    async fn fetch_if_stale(&self, path: &Path, key: &ProjectKey) {
        if self.cache.get(key).is_some() {
            log::debug!("Sync status for {} is fresh, skipping fetch", path.display());
            return;
        }

        let (pending, started_here) = self.join_or_start_fetch(path, key);
        let fetched = pending.clone().await;
        log::debug!("Fetch for {} finished (success: {fetched})", path.display());

        if started_here {
            let mut in_flight = self.lock_in_flight();
            if in_flight.get(key).is_some_and(|current| current.ptr_eq(&pending)) {
                in_flight.remove(key);
            }
        }
    }

    /// Returns the outstanding fetch for `key`, or registers a new one.
    /// The flag is true when this call created the fetch.
    fn join_or_start_fetch(&self, path: &Path, key: &ProjectKey) -> (PendingFetch, bool) {
        let mut in_flight = self.lock_in_flight();

        // A completed entry whose owner was dropped before cleanup is not "in flight"
        if let Some(pending) = in_flight.get(key) {
            if pending.peek().is_none() {
                log::debug!("Joining in-flight fetch for {}", path.display());
                return (pending.clone(), false);
            }
        }

        let runner = Arc::clone(&self.runner);
        let dir = path.to_path_buf();
        let timeout = self.settings.fetch_timeout;
        let pending = async move {
            let command = VcsCommand::fetch();
            match runner.run(&command, &dir, timeout).await {
                Ok(output) if output.is_success() => true,
                Ok(output) => {
                    log::warn!(
                        "Fetch failed for {} (exit {:?}): {}",
                        dir.display(),
                        output.exit_code,
                        output.stderr.trim()
                    );
                    false
                }
                Err(e) => {
                    log::warn!("Fetch failed for {}: {e}", dir.display());
                    false
                }
            }
        }
        .boxed()
        .shared();

        in_flight.insert(key.clone(), pending.clone());
        (pending, true)
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<ProjectKey, PendingFetch>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Logs a failed step and turns it into "no value"
fn recover<T>(step: Step, path: &Path, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{step} check failed for {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ProjectTrackerError;

    #[test]
    fn test_default_settings() {
        let settings = AggregatorSettings::default();
        assert_eq!(settings.fetch_timeout, Duration::from_secs(15));
        assert_eq!(settings.status_timeout, Duration::from_secs(3));
        assert_eq!(settings.log_timeout, Duration::from_secs(3));
        assert_eq!(settings.shortlog_timeout, Duration::from_secs(3));
        assert_eq!(settings.cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_recover_maps_error_to_none() {
        let failed: Result<u32> = Err(ProjectTrackerError::parse_failure("log", "bad"));
        assert_eq!(recover(Step::Activity, Path::new("/p"), failed), None);
        assert_eq!(recover(Step::Activity, Path::new("/p"), Ok(3)), Some(3));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Contributors.to_string(), "contributors");
    }
}
