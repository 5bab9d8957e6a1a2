//! Scripted [`CommandRunner`] for driving the aggregator without git
//!
//! Each command kind has a canned response. Calls are counted per kind, and a
//! response may be delayed to hold a command "in flight".

#![allow(dead_code)]

use async_trait::async_trait;
use project_tracker::core::error::{ProjectTrackerError, Result};
use project_tracker::core::runner::{CommandKind, CommandOutput, CommandRunner, VcsCommand};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Scripted {
    Output(CommandOutput),
    Timeout,
    SpawnFailure,
}

#[derive(Debug, Clone)]
struct Response {
    scripted: Scripted,
    delay: Option<Duration>,
}

pub struct ScriptedRunner {
    responses: Mutex<HashMap<CommandKind, Response>>,
    calls: Mutex<HashMap<CommandKind, usize>>,
}

impl ScriptedRunner {
    /// Clean repository on `main`, in sync with its upstream, no history
    pub fn new() -> Self {
        let runner = Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
        };
        runner.respond(CommandKind::Fetch, CommandOutput::success(""));
        runner.respond(
            CommandKind::Status,
            CommandOutput::success("## main...origin/main\n"),
        );
        runner.respond(CommandKind::Log, CommandOutput::success(""));
        runner.respond(CommandKind::Shortlog, CommandOutput::success(""));
        runner.respond(CommandKind::Pull, CommandOutput::success(""));
        runner.respond(CommandKind::Clone, CommandOutput::success(""));
        runner
    }

    pub fn respond(&self, kind: CommandKind, output: CommandOutput) {
        self.script(kind, Scripted::Output(output));
    }

    pub fn script(&self, kind: CommandKind, scripted: Scripted) {
        self.responses.lock().unwrap().insert(
            kind,
            Response {
                scripted,
                delay: None,
            },
        );
    }

    /// Holds every `kind` command for `delay` before answering
    pub fn delay(&self, kind: CommandKind, delay: Duration) {
        if let Some(response) = self.responses.lock().unwrap().get_mut(&kind) {
            response.delay = Some(delay);
        }
    }

    pub fn calls(&self, kind: CommandKind) -> usize {
        self.calls.lock().unwrap().get(&kind).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        command: &VcsCommand,
        _working_dir: &Path,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        *self.calls.lock().unwrap().entry(command.kind()).or_insert(0) += 1;

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&command.kind())
            .cloned()
            .expect("every command kind has a scripted response");

        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        match response.scripted {
            Scripted::Output(output) => Ok(output),
            Scripted::Timeout => Err(ProjectTrackerError::subprocess_timeout(
                command.to_string(),
                timeout,
            )),
            Scripted::SpawnFailure => Err(ProjectTrackerError::subprocess_spawn(
                command.to_string(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "git not found"),
            )),
        }
    }
}
