// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use thiserror::Error;

use fndeploy_core::DeployError;

pub mod deploy;
pub mod list;
pub mod serve;
pub mod validate;

/// Any failure that ends a command with exit code 1.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("Deploy task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Server error: {message}")]
    Serve { message: String },
}

pub type CommandResult = Result<(), CommandError>;
