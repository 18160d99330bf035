// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Deployment executors.
//!
//! The runner never spawns processes itself; it hands each assembled
//! command to a [`DeploymentExecutor`].

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::command::{DeployCommand, DEPLOY_PROGRAM, DEPLOY_VERBS};
use crate::error::{DeployError, DeployResult};

/// Exit code reported when the child was terminated by a signal.
pub const SIGNALED_EXIT_CODE: i32 = -1;

/// Runs one deployment and reports the tool's exit code.
pub trait DeploymentExecutor {
    /// Returns the exit code; `0` means success. `Err` only when the tool
    /// could not be run at all.
    fn deploy(&mut self, command: &DeployCommand) -> DeployResult<i32>;
}

/// Invokes `gcloud functions deploy` with inherited stdio.
#[derive(Debug, Clone)]
pub struct GcloudExecutor {
    program: String,
    workdir: PathBuf,
}

impl GcloudExecutor {
    /// Run `gcloud` from `workdir`, where the build root lives.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: DEPLOY_PROGRAM.to_string(),
            workdir: workdir.into(),
        }
    }

    /// Use a different binary (e.g. a wrapper script) in place of `gcloud`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl DeploymentExecutor for GcloudExecutor {
    fn deploy(&mut self, command: &DeployCommand) -> DeployResult<i32> {
        tracing::debug!(
            program = %self.program,
            args = ?command.args(),
            "Spawning deploy command"
        );

        let status = Command::new(&self.program)
            .args(DEPLOY_VERBS)
            .args(command.args())
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DeployError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        Ok(status.code().unwrap_or(SIGNALED_EXIT_CODE))
    }
}

/// Records commands instead of running them.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    commands: Vec<DeployCommand>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands seen so far, in invocation order.
    pub fn commands(&self) -> &[DeployCommand] {
        &self.commands
    }
}

impl DeploymentExecutor for DryRunExecutor {
    fn deploy(&mut self, command: &DeployCommand) -> DeployResult<i32> {
        tracing::info!(function = %command.function(), command = %command, "Dry run");
        self.commands.push(command.clone());
        Ok(0)
    }
}
