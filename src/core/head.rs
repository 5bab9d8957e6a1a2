//! Branch identity from the repository's HEAD file.
//!
//! Reading `.git/HEAD` directly avoids spawning git once per snapshot. Linked
//! worktrees and submodules have a `.git` *file* containing `gitdir: <path>`;
//! that indirection is followed before reading HEAD.

use crate::core::error::{ProjectTrackerError, Result};
use crate::core::snapshot::BranchInfo;
use std::path::{Path, PathBuf};

const SYMBOLIC_PREFIX: &str = "ref:";
const BRANCH_PREFIX: &str = "refs/heads/";
const SHORT_HASH_LEN: usize = 7;

/// Parses HEAD content into a branch name or a detached short hash
pub fn parse_head_reference(content: &str) -> Option<BranchInfo> {
    let content = content.trim();

    if let Some(target) = content.strip_prefix(SYMBOLIC_PREFIX) {
        let name = target.trim().strip_prefix(BRANCH_PREFIX)?;
        if name.is_empty() {
            return None;
        }
        return Some(BranchInfo {
            name: name.to_string(),
            detached: false,
        });
    }

    // SHA-1 or SHA-256 object names
    let is_object_id = matches!(content.len(), 40 | 64)
        && content.chars().all(|c| c.is_ascii_hexdigit());
    if is_object_id {
        return Some(BranchInfo {
            name: content[..SHORT_HASH_LEN].to_string(),
            detached: true,
        });
    }

    None
}

/// Locates the metadata directory for a project, if it has one
pub async fn find_git_dir(project: &Path) -> Option<PathBuf> {
    let dot_git = project.join(".git");
    let metadata = tokio::fs::metadata(&dot_git).await.ok()?;

    if metadata.is_dir() {
        return Some(dot_git);
    }

    let pointer = tokio::fs::read_to_string(&dot_git).await.ok()?;
    let target = pointer.trim().strip_prefix("gitdir:")?.trim();
    let target = Path::new(target);
    Some(if target.is_absolute() {
        target.to_path_buf()
    } else {
        project.join(target)
    })
}

/// Reads and parses `<git_dir>/HEAD`
pub async fn read_branch(git_dir: &Path) -> Result<BranchInfo> {
    let head_path = git_dir.join("HEAD");
    let content = tokio::fs::read_to_string(&head_path)
        .await
        .map_err(|e| ProjectTrackerError::read_failed(&head_path, e))?;

    parse_head_reference(&content).ok_or_else(|| {
        ProjectTrackerError::parse_failure("HEAD", content.trim().to_string())
    })
}
