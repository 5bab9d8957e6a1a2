//! Mutating git actions.
//!
//! Pulling or cloning changes what "behind" means for every project, so both
//! invalidate the whole status cache on success.

use crate::core::aggregator::StatusAggregator;
use crate::core::error::{ProjectTrackerError, Result};
use crate::core::head;
use crate::core::runner::{CommandRunner, VcsCommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub async fn pull(
    runner: &dyn CommandRunner,
    aggregator: &StatusAggregator,
    project: &Path,
    timeout: Duration,
) -> Result<()> {
    if !project.exists() {
        return Err(ProjectTrackerError::not_found(project));
    }
    if head::find_git_dir(project).await.is_none() {
        return Err(ProjectTrackerError::not_in_git_repo(project));
    }

    let command = VcsCommand::pull();
    runner
        .run(&command, project, timeout)
        .await?
        .into_success(&command)?;

    log::info!("Pulled {}", project.display());
    aggregator.invalidate_all();
    Ok(())
}

/// Clones `url` into `parent`, returning the new project path
pub async fn clone(
    runner: &dyn CommandRunner,
    aggregator: &StatusAggregator,
    url: &str,
    parent: &Path,
    timeout: Duration,
) -> Result<PathBuf> {
    if !parent.is_dir() {
        return Err(ProjectTrackerError::not_found(parent));
    }
    let name = repository_name(url).ok_or_else(|| ProjectTrackerError::InvalidCloneUrl {
        url: url.to_string(),
    })?;

    let command = VcsCommand::clone_repository(url);
    runner
        .run(&command, parent, timeout)
        .await?
        .into_success(&command)?;

    let project = parent.join(name);
    log::info!("Cloned {url} into {}", project.display());
    aggregator.invalidate_all();
    Ok(project)
}

/// Directory name git picks for a clone of `url`
pub fn repository_name(url: &str) -> Option<&str> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
