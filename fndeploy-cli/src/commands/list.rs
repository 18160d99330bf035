// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `fndeploy list` command - List functions from configuration.

use fndeploy_core::ConfigLoader;

use super::CommandResult;

pub async fn execute(config_path: &str) -> CommandResult {
    let config = ConfigLoader::load_file(config_path)?;

    if config.functions.is_empty() {
        println!("No functions defined in configuration.");
        return Ok(());
    }

    let requested = config.functions_to_deploy.as_deref().unwrap_or(&[]);

    println!("╔═══════════════════════════╦══════════════════════════════════════════╦══════════╗");
    println!("║ Name                      ║ Source                                   ║ Deploy   ║");
    println!("╠═══════════════════════════╬══════════════════════════════════════════╬══════════╣");

    for spec in &config.functions {
        let selected = requested.iter().any(|n| n == spec.name.as_str());
        println!(
            "║ {:<25} ║ {:<40} ║ {:<8} ║",
            spec.name.as_str(),
            spec.source.display().to_string(),
            if selected { "yes" } else { "-" }
        );
    }

    println!("╚═══════════════════════════╩══════════════════════════════════════════╩══════════╝");
    println!();
    println!("Total: {} function(s)", config.functions.len());

    Ok(())
}
