//! Shared test utilities for project-tracker
//!
//! Real git repositories for end-to-end checks, plus a scripted command runner
//! for exercising the aggregator without spawning processes.

pub mod assertions;
pub mod fixtures;
pub mod mock_runner;
pub mod repository;
