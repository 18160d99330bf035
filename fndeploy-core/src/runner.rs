// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Sequential deploy pipeline.
//!
//! resolve -> prepare build root -> for each selected function in
//! declaration order: merge, stage, assemble, deploy. The first failure
//! aborts the remaining queue.

use crate::command::DeployCommand;
use crate::config::DeployConfig;
use crate::error::{DeployError, DeployResult};
use crate::executor::DeploymentExecutor;
use crate::merge::FunctionConfig;
use crate::resolver::{self, DeploySelection};
use crate::stage::BuildStager;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// No deploy set was requested, or it was empty.
    NothingToDeploy,
    /// Names of the deployed functions, in deployment order.
    Deployed(Vec<String>),
}

/// Drives one deploy run.
pub struct DeployRunner<E> {
    stager: BuildStager,
    executor: E,
}

impl<E: DeploymentExecutor> DeployRunner<E> {
    pub fn new(stager: BuildStager, executor: E) -> Self {
        Self { stager, executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Run the whole pipeline for `config`.
    pub fn run(&mut self, config: &DeployConfig) -> DeployResult<DeployOutcome> {
        let selection = resolver::resolve(config)?;

        if selection.is_noop() {
            match selection {
                DeploySelection::NotRequested => {
                    tracing::info!("functions_to_deploy not set, nothing to deploy")
                }
                _ => tracing::info!("functions_to_deploy is empty, nothing to deploy"),
            }
            return Ok(DeployOutcome::NothingToDeploy);
        }

        self.stager.prepare()?;

        let mut deployed = Vec::new();

        for spec in selection.functions(config) {
            tracing::info!(function = %spec.name, "Preparing function");

            let function_config = FunctionConfig::resolve(spec, &config.defaults);
            self.stager.stage(spec, &config.defaults)?;
            let command = DeployCommand::new(
                &function_config,
                self.stager.build_dir(),
                config.project.as_ref(),
            );

            tracing::info!(function = %spec.name, "Deploying function");

            let code = self.executor.deploy(&command)?;
            if code != 0 {
                tracing::error!(function = %spec.name, code, "Deploy command failed");
                return Err(DeployError::DeployFailed {
                    function: spec.name.to_string(),
                    code,
                });
            }

            tracing::info!(function = %spec.name, "Deployed function");
            deployed.push(spec.name.to_string());
        }

        Ok(DeployOutcome::Deployed(deployed))
    }
}
