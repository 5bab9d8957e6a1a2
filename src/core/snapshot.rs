//! Snapshot data model.
//!
//! A [`Snapshot`] is the merged, point-in-time view of one project's version control
//! state. It is built per request by the aggregator and never persisted; only the
//! [`SyncStatus`] part is kept around, inside the status cache.
//!
//! # Public API
//! - [`ProjectKey`]: Normalised identity of a project path
//! - [`SyncStatus`]: Remote behind-count, stamped with when it was computed
//! - [`LocalStatus`]: Working tree dirtiness
//! - [`ActivityHistogram`]: Seven daily commit counts plus sparkline rendering
//! - [`ContributorList`]: Up to three `"<count>\t<name>"` entries
//! - [`Snapshot`]: The merged record

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Number of calendar days covered by the activity histogram
pub const ACTIVITY_DAYS: usize = 7;

/// Maximum number of entries in a contributor list
pub const MAX_CONTRIBUTORS: usize = 3;

/// Glyph ramp indexed by `min(count, 8)`
const SPARK_RAMP: [char; 9] = [' ', ' ', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Lexically cleans a path: `.` segments and trailing separators are dropped and
/// `..` removes the preceding normal segment. Symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(Component::CurDir);
    }
    normalized
}

/// Identity key for a project path.
///
/// Built from the normalised path, so `app`, `app/` and `./app` agree.
/// Case-insensitive filesystems (Windows, macOS) also fold case so that two
/// spellings of the same folder share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey(String);

impl ProjectKey {
    pub fn new(path: &Path) -> Self {
        let normalized = normalize_path(path);
        let raw = normalized.to_string_lossy();
        if cfg!(any(windows, target_os = "macos")) {
            Self(raw.to_lowercase())
        } else {
            Self(raw.into_owned())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Path> for ProjectKey {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a remote-sync check.
///
/// `is_behind` is derived from `behind_count` so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub is_behind: bool,
    pub behind_count: u32,
    pub computed_at: DateTime<Local>,
}

impl SyncStatus {
    pub fn new(behind_count: u32, computed_at: DateTime<Local>) -> Self {
        Self {
            is_behind: behind_count > 0,
            behind_count,
            computed_at,
        }
    }

    pub fn up_to_date(computed_at: DateTime<Local>) -> Self {
        Self::new(0, computed_at)
    }

    /// Same counts, restamped
    pub fn stamped(self, computed_at: DateTime<Local>) -> Self {
        Self::new(self.behind_count, computed_at)
    }
}

/// Working tree state; always computed fresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStatus {
    pub is_dirty: bool,
    pub changed_file_count: u32,
}

impl LocalStatus {
    pub fn from_changed_files(changed_file_count: u32) -> Self {
        Self {
            is_dirty: changed_file_count > 0,
            changed_file_count,
        }
    }
}

/// Commits per calendar day, oldest day first, ending today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityHistogram {
    days: [u32; ACTIVITY_DAYS],
}

impl ActivityHistogram {
    pub fn from_days(days: [u32; ACTIVITY_DAYS]) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[u32; ACTIVITY_DAYS] {
        &self.days
    }

    pub fn total(&self) -> u32 {
        self.days.iter().sum()
    }

    /// True when no commits fall inside the window
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|&count| count == 0)
    }

    /// Glyph for a single day's count
    pub fn glyph(count: u32) -> char {
        SPARK_RAMP[count.min(8) as usize]
    }

    /// Fixed-width sparkline, one glyph per day
    pub fn sparkline(&self) -> String {
        self.days.iter().map(|&count| Self::glyph(count)).collect()
    }
}

/// Top authors by commit count, each entry `"<count>\t<name>"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorList(Vec<String>);

impl ContributorList {
    /// Keeps at most [`MAX_CONTRIBUTORS`] entries, in the given order
    pub fn new(entries: Vec<String>) -> Self {
        let mut entries = entries;
        entries.truncate(MAX_CONTRIBUTORS);
        Self(entries)
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Splits an entry into its commit count and author name
    pub fn split_entry(entry: &str) -> Option<(u32, &str)> {
        let (count, name) = entry.split_once('\t')?;
        let count = count.trim().parse().ok()?;
        Some((count, name.trim()))
    }
}

/// Branch identity read from the head reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub detached: bool,
}

/// Merged status of one project at one moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub branch_name: Option<String>,
    pub is_detached: bool,
    pub local: LocalStatus,
    pub sync: SyncStatus,
    pub activity: ActivityHistogram,
    pub contributors: ContributorList,
}

impl Snapshot {
    /// Snapshot of an existing directory with no version control metadata
    pub fn not_a_repository(now: DateTime<Local>) -> Self {
        Self {
            branch_name: None,
            is_detached: false,
            local: LocalStatus::default(),
            sync: SyncStatus::up_to_date(now),
            activity: ActivityHistogram::default(),
            contributors: ContributorList::default(),
        }
    }

    pub fn is_repository(&self) -> bool {
        self.branch_name.is_some()
    }
}
