//! Core functionality for the project-tracker tool.
//!
//! This module provides the repository status aggregation engine and the small
//! amount of persistence and presentation glue around it.

pub mod actions;
pub mod aggregator;
pub mod cache;
pub mod clock;
pub mod config;
pub mod dirs;
pub mod error;
pub mod head;
pub mod output;
pub mod parsing;
pub mod registry;
pub mod render;
pub mod runner;
pub mod snapshot;
pub mod sync_store;
pub mod tech;

// === Error handling ===
pub use error::{ProjectTrackerError, Result};

// === Aggregation engine ===
// Runner -> cache -> aggregator, leaf to root
pub use aggregator::{AggregatorSettings, StatusAggregator};
pub use cache::{StatusCache, DEFAULT_STATUS_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use runner::{CommandKind, CommandOutput, CommandRunner, ProcessRunner, VcsCommand};

// === Snapshot model ===
pub use snapshot::{
    normalize_path,
    ActivityHistogram, BranchInfo, ContributorList, LocalStatus, ProjectKey, Snapshot, SyncStatus,
};

// === Parsing ===
// Pure functions over raw git output
pub use head::parse_head_reference;
pub use parsing::{bucket_activity, parse_shortlog, parse_status_output, StatusSummary};

// === Configuration and registry ===
pub use config::TrackerConfig;
pub use registry::{ProjectDescriptor, ProjectRegistry};
pub use sync_store::SyncStore;
pub use tech::{ProjectMetadata, TechStack};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success};
pub use render::{format_row, RowParts};
