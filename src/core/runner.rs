//! External git command execution.
//!
//! [`CommandRunner`] is the seam between the aggregator and the git binary. The
//! production implementation, [`ProcessRunner`], spawns the process with tokio,
//! bounds it with a timeout and captures its output.
//!
//! # Contract
//! - A nonzero exit is **not** an error here; callers inspect [`CommandOutput`].
//! - Timeout kills the child and yields [`ProjectTrackerError::SubprocessTimeout`].
//! - Spawn failure yields [`ProjectTrackerError::SubprocessSpawn`].
//! - No retries.

use crate::core::error::{ProjectTrackerError, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

/// Which git operation a command performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Fetch,
    Status,
    Log,
    Shortlog,
    Pull,
    Clone,
}

/// A fully formed git invocation (arguments only, the binary is the runner's concern)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsCommand {
    kind: CommandKind,
    args: Vec<String>,
}

impl VcsCommand {
    fn new(kind: CommandKind, args: &[&str]) -> Self {
        Self {
            kind,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Update remote tracking branches
    pub fn fetch() -> Self {
        Self::new(CommandKind::Fetch, &["fetch"])
    }

    /// Short-form status with the branch tracking header line
    pub fn status() -> Self {
        Self::new(CommandKind::Status, &["status", "--porcelain", "--branch"])
    }

    /// One local-date line per commit made in the last `days` days
    pub fn log_since_days(days: usize) -> Self {
        let since = format!("--since={days} days ago");
        Self::new(
            CommandKind::Log,
            &["log", since.as_str(), "--format=%ad", "--date=short-local"],
        )
    }

    /// Commit count per author across all refs, merges excluded, most commits first
    pub fn shortlog() -> Self {
        Self::new(
            CommandKind::Shortlog,
            &["shortlog", "--summary", "--numbered", "--all", "--no-merges"],
        )
    }

    pub fn pull() -> Self {
        Self::new(CommandKind::Pull, &["pull"])
    }

    pub fn clone_repository(url: &str) -> Self {
        Self::new(CommandKind::Clone, &["clone", "--", url])
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for VcsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

/// Captured result of a completed process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Converts a nonzero exit into [`ProjectTrackerError::CommandFailed`]
    pub fn into_success(self, command: &VcsCommand) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ProjectTrackerError::command_failed(
                command.to_string(),
                self.exit_code.unwrap_or(-1),
                &self.stderr,
            ))
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        command: &VcsCommand,
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput>;
}

/// Runs commands as child processes of a configurable git binary
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("git")
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &VcsCommand,
        working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        if timeout.is_zero() {
            return Err(ProjectTrackerError::InvalidTimeout {
                command: command.to_string(),
            });
        }

        log::debug!("Running '{command}' in {}", working_dir.display());

        let child = tokio::process::Command::new(&self.program)
            .args(command.args())
            .current_dir(working_dir)
            // Never block on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProjectTrackerError::subprocess_spawn(command.to_string(), e))?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(waited) => {
                waited.map_err(|e| ProjectTrackerError::subprocess_spawn(command.to_string(), e))?
            }
            Err(_) => {
                log::debug!("'{command}' exceeded {}ms", timeout.as_millis());
                return Err(ProjectTrackerError::subprocess_timeout(
                    command.to_string(),
                    timeout,
                ));
            }
        };

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
