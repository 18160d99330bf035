// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `fndeploy deploy` command - Stage and deploy functions.
//!
//! The pipeline is blocking and strictly sequential, so it runs on the
//! blocking pool rather than the async workers.

use fndeploy_core::{
    BuildStager, ConfigLoader, DeployConfig, DeployOutcome, DeployRunner, DeploymentExecutor,
    DryRunExecutor, GcloudExecutor,
};

use super::CommandResult;

pub async fn execute(
    config_path: &str,
    build_dir: &str,
    dry_run: bool,
    only: Option<Vec<String>>,
) -> CommandResult {
    tracing::info!(config = %config_path, dry_run, "Loading deploy configuration");

    let mut config = ConfigLoader::load_file(config_path)?;
    if let Some(names) = only {
        config = config.with_functions_to_deploy(names);
    }

    let stager = BuildStager::new(".", build_dir);

    if dry_run {
        let (outcome, executor) = run(stager, DryRunExecutor::new(), config).await?;
        for command in executor.commands() {
            println!("{}", command);
        }
        report(&outcome);
    } else {
        let (outcome, _) = run(stager, GcloudExecutor::new("."), config).await?;
        report(&outcome);
    }

    Ok(())
}

async fn run<E>(
    stager: BuildStager,
    executor: E,
    config: DeployConfig,
) -> Result<(DeployOutcome, E), super::CommandError>
where
    E: DeploymentExecutor + Send + 'static,
{
    let (outcome, executor) = tokio::task::spawn_blocking(move || {
        let mut runner = DeployRunner::new(stager, executor);
        let outcome = runner.run(&config);
        (outcome, runner.into_executor())
    })
    .await?;

    Ok((outcome?, executor))
}

fn report(outcome: &DeployOutcome) {
    match outcome {
        DeployOutcome::NothingToDeploy => {
            println!("✓ No functions to deploy");
        }
        DeployOutcome::Deployed(names) => {
            println!(
                "✓ Deployed {} function(s): {}",
                names.len(),
                names.join(", ")
            );
        }
    }
}
