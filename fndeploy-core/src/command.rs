// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Deploy command assembly.
//!
//! Renders a resolved [`FunctionConfig`] into the argument list that follows
//! `gcloud functions deploy`.

use std::fmt;
use std::path::Path;

use crate::merge::FunctionConfig;
use crate::types::ArgValue;

/// Deployment CLI binary.
pub const DEPLOY_PROGRAM: &str = "gcloud";

/// Fixed verbs placed before the per-function arguments.
pub const DEPLOY_VERBS: [&str; 2] = ["functions", "deploy"];

/// Arguments for one `gcloud functions deploy` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployCommand {
    function: String,
    args: Vec<String>,
}

impl DeployCommand {
    /// Assemble the arguments for a resolved function.
    ///
    /// Fixed flags come first, then `--gen2`, `--trigger-http` and
    /// `--allow-unauthenticated` when enabled, then `--project` if given.
    pub fn new(config: &FunctionConfig, build_dir: &Path, project: Option<&ArgValue>) -> Self {
        let dir_name = config
            .source
            .file_name()
            .unwrap_or(config.source.as_os_str());
        let staged = build_dir.join(dir_name);

        let mut args = vec![
            config.name.to_string(),
            format!("--region={}", config.region),
            format!("--runtime={}", config.runtime),
            format!("--source={}", staged.display()),
            format!("--entry-point={}", config.entry_point),
            format!("--memory={}", config.memory),
            format!("--timeout={}", config.timeout),
            format!("--max-instances={}", config.max_instances),
        ];

        if config.is_gen_two {
            args.push("--gen2".to_string());
        }
        if config.is_trigger_http {
            args.push("--trigger-http".to_string());
        }
        if config.allow_unauthenticated {
            args.push("--allow-unauthenticated".to_string());
        }
        if let Some(project) = project {
            args.push(format!("--project={}", project));
        }

        Self {
            function: config.name.to_string(),
            args,
        }
    }

    /// Function this command deploys.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Arguments following the fixed verbs.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for DeployCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", DEPLOY_PROGRAM, DEPLOY_VERBS.join(" "))?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
