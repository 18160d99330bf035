// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for fndeploy.
//!
//! Explicit enum error types only. No `Box<dyn Error>`, no `anyhow::Result`.
//! Every variant is fatal to a deploy run; there is no local recovery.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for a deploy run.
#[derive(Debug, Error)]
pub enum DeployError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid functions to deploy: {}", names.join(", "))]
    InvalidFunctions { names: Vec<String> },

    // =========================================================================
    // Build Staging Errors - No Rollback
    // =========================================================================
    #[error("Staging error: {0}")]
    Staging(#[from] StagingError),

    // =========================================================================
    // External Tool Errors - Abort Remaining Queue
    // =========================================================================
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Deployment of {function} failed with exit code {code}")]
    DeployFailed { function: String, code: i32 },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Structurally invalid configuration. Detected before anything touches disk.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value:?} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Duplicate function name: {name}")]
    DuplicateFunctionName { name: String },
}

/// Build directory staging failures.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Source path does not exist: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Expected a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Expected a file: {path}")]
    NotAFile { path: PathBuf },

    #[error("Source path has no directory name: {path}")]
    NoBasename { path: PathBuf },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StagingError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using DeployError.
pub type DeployResult<T> = Result<T, DeployError>;
