//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ProjectTrackerError`] which covers every failure mode of the
//! status aggregation engine and the surrounding CLI. It uses `thiserror` for ergonomic
//! error definitions and includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`ProjectTrackerError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ProjectTrackerError>`
//!
//! # Error Categories
//! - **Project lookup**: Path does not exist, not a git repository
//! - **Subprocesses**: Timeout, spawn failure, nonzero exit judged fatal by the caller
//! - **Parsing**: Unexpected shape of git output
//! - **Persistence**: Config and registry read/parse/write failures

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Domain-specific error types for project-tracker
#[derive(Error, Debug)]
pub enum ProjectTrackerError {
    // Project lookup errors
    #[error("Path does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a git repository: {path}")]
    NotInGitRepo { path: PathBuf },

    // Subprocess errors
    #[error("Command '{command}' timed out after {}ms", timeout.as_millis())]
    SubprocessTimeout { command: String, timeout: Duration },

    #[error("Failed to start '{command}': {source}")]
    SubprocessSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Command '{command}' exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Timeout must be positive (command '{command}')")]
    InvalidTimeout { command: String },

    // Output parsing errors
    #[error("Unexpected {what} output: {detail}")]
    ParseFailure { what: &'static str, detail: String },

    // Persistence errors
    #[error("Could not determine configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Could not determine cache directory")]
    CacheDirectoryNotFound,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot derive a project name from '{url}'")]
    InvalidCloneUrl { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ProjectTrackerError
pub type Result<T> = std::result::Result<T, ProjectTrackerError>;

impl ProjectTrackerError {
    /// Create a path not found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a not-a-repository error
    pub fn not_in_git_repo(path: impl Into<PathBuf>) -> Self {
        Self::NotInGitRepo { path: path.into() }
    }

    /// Create a subprocess timeout error
    pub fn subprocess_timeout(command: impl Into<String>, timeout: Duration) -> Self {
        Self::SubprocessTimeout {
            command: command.into(),
            timeout,
        }
    }

    /// Create a subprocess spawn error
    pub fn subprocess_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::SubprocessSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create a command failed error from a nonzero exit
    pub fn command_failed(command: impl Into<String>, code: i32, stderr: &str) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.trim().to_string(),
        }
    }

    /// Create a parse failure error
    pub fn parse_failure(what: &'static str, detail: impl Into<String>) -> Self {
        Self::ParseFailure {
            what,
            detail: detail.into(),
        }
    }

    /// Create a config parse error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a read failed error
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a write failed error
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from the subprocess layer (timeout or spawn)
    pub fn is_subprocess_error(&self) -> bool {
        matches!(
            self,
            Self::SubprocessTimeout { .. } | Self::SubprocessSpawn { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ProjectTrackerError::not_found("/tmp/missing");
        assert_eq!(err.to_string(), "Path does not exist: /tmp/missing");
    }

    #[test]
    fn test_timeout_error_reports_millis() {
        let err = ProjectTrackerError::subprocess_timeout("git fetch", Duration::from_secs(15));
        assert_eq!(err.to_string(), "Command 'git fetch' timed out after 15000ms");
        assert!(err.is_subprocess_error());
    }

    #[test]
    fn test_spawn_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ProjectTrackerError::subprocess_spawn("git status", io_err);
        assert!(err.to_string().contains("git status"));
        assert!(err.to_string().contains("no such file"));
        assert!(err.is_subprocess_error());
    }

    #[test]
    fn test_command_failed_trims_stderr() {
        let err = ProjectTrackerError::command_failed("git pull", 128, "fatal: not a repo\n");
        assert_eq!(
            err.to_string(),
            "Command 'git pull' exited with code 128: fatal: not a repo"
        );
        assert!(!err.is_subprocess_error());
    }

    #[test]
    fn test_parse_failure() {
        let err = ProjectTrackerError::parse_failure("status", "missing branch header");
        assert_eq!(
            err.to_string(),
            "Unexpected status output: missing branch header"
        );
    }

    #[test]
    fn test_config_parse_failed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
        let err = ProjectTrackerError::config_parse_failed("/test/config.json", json_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_write_failed() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ProjectTrackerError::write_failed("/test/projects.json", io_err);
        assert!(err.to_string().contains("/test/projects.json"));
        assert!(err.to_string().contains("access denied"));
    }
}
