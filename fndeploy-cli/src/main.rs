// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! fndeploy CLI
//!
//! Command-line interface for deploying HTTP cloud functions.

use clap::{Parser, Subcommand};

use fndeploy_core::config::DEFAULT_CONFIG_FILE;
use fndeploy_core::stage::DEFAULT_BUILD_DIR;

mod commands;

/// fndeploy - Stage and deploy cloud functions from a YAML file
#[derive(Parser)]
#[command(name = "fndeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Build directory, recreated on every deploy
    #[arg(long, default_value = DEFAULT_BUILD_DIR)]
    pub build_dir: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stage and deploy the requested functions
    Deploy {
        /// Print the gcloud commands instead of running them
        #[arg(long)]
        dry_run: bool,

        /// Deploy these functions instead of `functions_to_deploy`
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        only: Option<Vec<String>>,
    },

    /// Validate the configuration and show resolved settings
    Validate,

    /// List declared functions
    List,

    /// Serve the sample handlers locally
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    let result = match cli.command {
        Commands::Deploy { dry_run, only } => {
            commands::deploy::execute(&cli.config, &cli.build_dir, dry_run, only).await
        }
        Commands::Validate => commands::validate::execute(&cli.config).await,
        Commands::List => commands::list::execute(&cli.config).await,
        Commands::Serve { port } => commands::serve::execute(port).await,
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}
