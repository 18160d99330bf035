// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `fndeploy validate` command - Validate configuration file.

use fndeploy_core::{resolver, ConfigLoader, DeploySelection, FunctionConfig};

use super::CommandResult;

pub async fn execute(config_path: &str) -> CommandResult {
    tracing::info!(config = %config_path, "Validating configuration");

    let config = ConfigLoader::load_file(config_path)?;
    let selection = resolver::resolve(&config)?;

    println!("✓ Configuration is valid");
    println!();

    match &selection {
        DeploySelection::NotRequested => println!("Functions to deploy: (not set)"),
        DeploySelection::Empty => println!("Functions to deploy: (none)"),
        DeploySelection::Selected(names) => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            println!("Functions to deploy: {}", names.join(", "));
        }
    }
    if let Some(project) = &config.project {
        println!("Project: {}", project);
    }
    println!();

    println!("Functions ({}):", config.functions.len());
    for spec in &config.functions {
        let resolved = FunctionConfig::resolve(spec, &config.defaults);
        println!("  - {} ({})", resolved.name, resolved.source.display());
        println!(
            "      runtime: {}, region: {}, entry point: {}",
            resolved.runtime, resolved.region, resolved.entry_point
        );
        println!(
            "      memory: {}, timeout: {}, max instances: {}",
            resolved.memory, resolved.timeout, resolved.max_instances
        );
        println!(
            "      gen2: {}, trigger http: {}, allow unauthenticated: {}",
            resolved.is_gen_two, resolved.is_trigger_http, resolved.allow_unauthenticated
        );
    }

    Ok(())
}
