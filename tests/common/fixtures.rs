//! Predefined repository scenarios

#![allow(dead_code)]

use super::repository::*;
use project_tracker::core::error::{ProjectTrackerError, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A bare "origin" with two clones: `tracked` is the project under test,
/// `upstream` is used to push commits the tracked clone has not seen.
pub struct RemotePair {
    pub temp_dir: TempDir,
    pub origin: PathBuf,
    pub tracked: PathBuf,
    pub upstream: PathBuf,
}

pub fn create_remote_pair() -> Result<RemotePair> {
    let temp_dir = TempDir::new().map_err(ProjectTrackerError::Io)?;
    let root = temp_dir.path().to_path_buf();

    let origin = root.join("origin.git");
    fs::create_dir(&origin).map_err(ProjectTrackerError::Io)?;
    git(&origin, &["init", "--bare"])?;
    git(&origin, &["symbolic-ref", "HEAD", "refs/heads/main"])?;

    // Seed origin with one commit on main
    let seed = root.join("seed");
    fs::create_dir(&seed).map_err(ProjectTrackerError::Io)?;
    git(&seed, &["init"])?;
    git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    configure_repo(&seed)?;
    commit_file(&seed, "README.md", "# demo\n")?;
    git(&seed, &["remote", "add", "origin", &origin.to_string_lossy()])?;
    git(&seed, &["push", "-u", "origin", "main"])?;

    git(&root, &["clone", &origin.to_string_lossy(), "tracked"])?;
    git(&root, &["clone", &origin.to_string_lossy(), "upstream"])?;
    let tracked = root.join("tracked");
    let upstream = root.join("upstream");
    configure_repo(&tracked)?;
    configure_repo(&upstream)?;

    Ok(RemotePair {
        temp_dir,
        origin,
        tracked,
        upstream,
    })
}

/// Pushes `count` new commits to origin from the upstream clone
pub fn push_upstream_commits(pair: &RemotePair, count: usize) -> Result<()> {
    for i in 0..count {
        let name = format!("upstream-{}.txt", uuid_like(i));
        commit_file(&pair.upstream, &name, "from upstream\n")?;
    }
    git(&pair.upstream, &["push", "origin", "main"])?;
    Ok(())
}

fn uuid_like(i: usize) -> String {
    format!(
        "{}-{i}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
    )
}
