//! Git repository management and setup utilities
//!
//! Every repository lives in a `TempDir` that must outlive the test. Branches are
//! pinned to `main` regardless of the installed git's default.

#![allow(dead_code)]

use project_tracker::core::error::{ProjectTrackerError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository setup result. The TempDir must be kept alive for the
/// duration of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs git in `dir`, failing the helper if git exits nonzero
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(ProjectTrackerError::Io)?;

    if !output.status.success() {
        return Err(ProjectTrackerError::command_failed(
            format!("git {}", args.join(" ")),
            output.status.code().unwrap_or(-1),
            &String::from_utf8_lossy(&output.stderr),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Identity and branch settings so commits work on any machine
pub fn configure_repo(dir: &Path) -> Result<()> {
    git(dir, &["config", "user.name", "Test User"])?;
    git(dir, &["config", "user.email", "test@example.com"])?;
    git(dir, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Sets up a fresh git repository on branch `main`
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(ProjectTrackerError::Io)?;
    let repo_path = temp_dir.path().join("project");
    fs::create_dir(&repo_path).map_err(ProjectTrackerError::Io)?;

    git(&repo_path, &["init"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    configure_repo(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a repository with one commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;
    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;
    Ok(repo)
}

/// An empty directory that is not a repository
pub fn setup_plain_dir() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(ProjectTrackerError::Io)?;
    let path = temp_dir.path().join("plain");
    fs::create_dir(&path).map_err(ProjectTrackerError::Io)?;
    Ok(TestRepo { temp_dir, path })
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content).map_err(ProjectTrackerError::Io)?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

/// Writes, stages and commits one file
pub fn commit_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    create_file(repo_path, filename, content)?;
    git_add(repo_path, filename)?;
    git_commit(repo_path, &format!("Update {filename}"))
}
