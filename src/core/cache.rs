//! Time-to-live cache of remote sync status.
//!
//! [`StatusCache`] throttles the expensive network fetch: an entry younger than the
//! TTL means the fetch can be skipped. Staleness is checked lazily on read; nothing
//! sweeps the map in the background.
//!
//! # Concurrency
//! One mutex guards the map. Every operation is a single-key read or write and the
//! lock is never held across an await point. Concurrent writers to the same key
//! race and the last one wins.

use crate::core::clock::Clock;
use crate::core::snapshot::{ProjectKey, SyncStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Default entry lifetime: ten minutes
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(600_000);

pub struct StatusCache {
    entries: Mutex<HashMap<ProjectKey, SyncStatus>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl StatusCache {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the entry if present and younger than the TTL
    pub fn get(&self, key: &ProjectKey) -> Option<SyncStatus> {
        let entry = *self.lock().get(key)?;
        if self.is_fresh(&entry) {
            Some(entry)
        } else {
            log::debug!("Status cache entry for {key} is stale");
            None
        }
    }

    /// Returns the entry regardless of age
    pub fn peek(&self, key: &ProjectKey) -> Option<SyncStatus> {
        self.lock().get(key).copied()
    }

    /// Overwrites the entry, stamping it with the current time
    pub fn set(&self, key: ProjectKey, status: SyncStatus) -> SyncStatus {
        let stamped = status.stamped(self.clock.now());
        self.lock().insert(key, stamped);
        stamped
    }

    /// Inserts entries as they are, keeping their original timestamps
    pub fn restore(&self, entries: impl IntoIterator<Item = (ProjectKey, SyncStatus)>) {
        let mut map = self.lock();
        for (key, status) in entries {
            map.insert(key, status);
        }
        log::debug!("Status cache holds {} entries after restore", map.len());
    }

    /// Entries still younger than the TTL, ordered by key
    pub fn fresh_entries(&self) -> Vec<(ProjectKey, SyncStatus)> {
        let mut fresh: Vec<_> = self
            .lock()
            .iter()
            .filter(|(_, status)| self.is_fresh(status))
            .map(|(key, status)| (key.clone(), *status))
            .collect();
        fresh.sort_by(|a, b| a.0.cmp(&b.0));
        fresh
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        log::debug!("Clearing {} status cache entries", entries.len());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn is_fresh(&self, entry: &SyncStatus) -> bool {
        // An entry stamped in the future (clock moved backwards) counts as brand new
        let age = (self.clock.now() - entry.computed_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age < self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ProjectKey, SyncStatus>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
