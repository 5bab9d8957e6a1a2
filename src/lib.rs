//! Project Tracker - keeps an eye on local project folders and their git state.
//!
//! The heart of the crate is the repository status aggregation engine: given a
//! path, [`StatusAggregator`] produces a [`Snapshot`] with branch, dirtiness,
//! behind count, a seven-day commit histogram and top contributors. Network
//! fetches are throttled by a time-to-live [`StatusCache`], and every git
//! invocation is bounded by a timeout and isolated from the others.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - Command execution ([`CommandRunner`], [`ProcessRunner`])
//! - Status cache and aggregator
//! - Snapshot data model and pure output parsers
//! - Configuration, project registry and terminal rendering

pub mod commands;
pub mod core;

pub use core::{
    bucket_activity,
    parse_head_reference,
    parse_shortlog,
    parse_status_output,

    ActivityHistogram,
    AggregatorSettings,
    BranchInfo,
    Clock,
    CommandKind,
    CommandOutput,
    // Command execution
    CommandRunner,
    ContributorList,
    LocalStatus,
    ManualClock,
    ProcessRunner,
    ProjectDescriptor,
    ProjectKey,
    ProjectRegistry,
    // Error handling
    ProjectTrackerError,
    Result,
    Snapshot,
    // Aggregation engine
    StatusAggregator,
    StatusCache,
    SyncStatus,
    SystemClock,
    TrackerConfig,
    VcsCommand,
};
