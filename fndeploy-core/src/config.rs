// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML deploy configuration parser with strict schema validation.
//!
//! The whole file is validated before anything is staged or deployed.
//! Any invalid field results in a HardValidationError that aborts the run.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{DeployError, DeployResult, HardValidationError};
use crate::types::{ArgValue, FunctionName};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploy_config.yaml";

/// Numeric settings may be written bare (`300`) or as text (`"540s"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(u64),
    Text(String),
}

/// Raw `default_function_configs` block as parsed from YAML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefaults {
    entry_point: Option<String>,
    runtime: Option<String>,
    memory: Option<String>,
    timeout: Option<RawScalar>,
    max_instances: Option<RawScalar>,
    is_trigger_http: Option<bool>,
    allow_unauthenticated: Option<bool>,
    region: Option<String>,
    is_gen_two: Option<bool>,
    #[serde(default)]
    include_files: Vec<String>,
}

/// Raw entry of the `functions` list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFunction {
    name: Option<String>,
    source: Option<String>,
    entry_point: Option<String>,
    runtime: Option<String>,
    memory: Option<String>,
    timeout: Option<RawScalar>,
    max_instances: Option<RawScalar>,
    is_trigger_http: Option<bool>,
    allow_unauthenticated: Option<bool>,
    region: Option<String>,
    is_gen_two: Option<bool>,
    #[serde(default)]
    include_dirs: Vec<String>,
    #[serde(default)]
    include_files: Vec<String>,
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeployConfig {
    project: Option<String>,
    #[serde(default)]
    default_function_configs: Option<RawDefaults>,
    #[serde(default)]
    functions: Option<Vec<RawFunction>>,
    functions_to_deploy: Option<Vec<String>>,
}

/// Optional deployment settings. Used both for function-level overrides
/// and for the `default_function_configs` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSettings {
    pub entry_point: Option<ArgValue>,
    pub runtime: Option<ArgValue>,
    pub memory: Option<ArgValue>,
    pub timeout: Option<ArgValue>,
    pub max_instances: Option<ArgValue>,
    pub is_trigger_http: Option<bool>,
    pub allow_unauthenticated: Option<bool>,
    pub region: Option<ArgValue>,
    pub is_gen_two: Option<bool>,
}

/// Validated `default_function_configs` block.
#[derive(Debug, Clone, Default)]
pub struct FunctionDefaults {
    pub settings: FunctionSettings,
    /// Copied into every staged function, parent directories preserved.
    pub include_files: Vec<PathBuf>,
}

/// A declared function.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub name: FunctionName,
    pub source: PathBuf,
    pub overrides: FunctionSettings,
    pub include_dirs: Vec<PathBuf>,
    pub include_files: Vec<PathBuf>,
}

/// Complete validated deploy configuration. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub project: Option<ArgValue>,
    pub defaults: FunctionDefaults,
    /// Declaration order is deployment order.
    pub functions: Vec<FunctionSpec>,
    /// `None` when the key is absent, which means "nothing to deploy".
    pub functions_to_deploy: Option<Vec<String>>,
}

impl DeployConfig {
    /// Replace the requested deploy set, e.g. from `--only` on the command line.
    pub fn with_functions_to_deploy(mut self, names: Vec<String>) -> Self {
        self.functions_to_deploy = Some(names);
        self
    }

    /// Look up a declared function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.name.as_str() == name)
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> DeployResult<DeployConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DeployError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DeployError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> DeployResult<DeployConfig> {
        let raw: RawDeployConfig =
            serde_yaml::from_str(content).map_err(|e| DeployError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    fn validate(raw: RawDeployConfig) -> DeployResult<DeployConfig> {
        let project = raw
            .project
            .map(|p| ArgValue::new("project", p))
            .transpose()?;

        let defaults =
            Self::validate_defaults(raw.default_function_configs.unwrap_or_default())?;

        let raw_functions = raw.functions.unwrap_or_default();
        let mut functions = Vec::with_capacity(raw_functions.len());
        let mut seen_names = HashSet::new();

        for (index, raw_func) in raw_functions.into_iter().enumerate() {
            let func = Self::validate_function(raw_func, index)?;

            if !seen_names.insert(func.name.clone()) {
                return Err(HardValidationError::DuplicateFunctionName {
                    name: func.name.to_string(),
                }
                .into());
            }

            functions.push(func);
        }

        Ok(DeployConfig {
            project,
            defaults,
            functions,
            functions_to_deploy: raw.functions_to_deploy,
        })
    }

    fn validate_defaults(raw: RawDefaults) -> DeployResult<FunctionDefaults> {
        if raw.max_instances.is_some() {
            tracing::warn!(
                "default_function_configs.max_instances is ignored; set max_instances per function"
            );
        }

        let settings = FunctionSettings {
            entry_point: optional_arg("entry_point", raw.entry_point)?,
            runtime: optional_arg("runtime", raw.runtime)?,
            memory: optional_arg("memory", raw.memory)?,
            timeout: optional_scalar("timeout", raw.timeout)?,
            max_instances: optional_scalar("max_instances", raw.max_instances)?,
            is_trigger_http: raw.is_trigger_http,
            allow_unauthenticated: raw.allow_unauthenticated,
            region: optional_arg("region", raw.region)?,
            is_gen_two: raw.is_gen_two,
        };

        Ok(FunctionDefaults {
            settings,
            include_files: include_paths("include_files", raw.include_files)?,
        })
    }

    fn validate_function(raw: RawFunction, index: usize) -> DeployResult<FunctionSpec> {
        let name = raw
            .name
            .ok_or_else(|| HardValidationError::MissingRequiredField {
                field: "name",
                context: format!("function at index {}", index),
            })?;
        let name = FunctionName::new(name)?;

        let source = match raw.source {
            Some(source) if !source.trim().is_empty() => PathBuf::from(source),
            _ => {
                return Err(HardValidationError::MissingRequiredField {
                    field: "source",
                    context: format!("function '{}'", name),
                }
                .into())
            }
        };

        let Some(dir_name) = source.file_name() else {
            return Err(HardValidationError::InvalidFieldValue {
                field: "source",
                value: source.display().to_string(),
                reason: "Source must end in a directory name".to_string(),
            }
            .into());
        };
        // The basename is rendered into `--source=`.
        ArgValue::new("source", dir_name.to_string_lossy().into_owned())?;

        let overrides = FunctionSettings {
            entry_point: optional_arg("entry_point", raw.entry_point)?,
            runtime: optional_arg("runtime", raw.runtime)?,
            memory: optional_arg("memory", raw.memory)?,
            timeout: optional_scalar("timeout", raw.timeout)?,
            max_instances: optional_scalar("max_instances", raw.max_instances)?,
            is_trigger_http: raw.is_trigger_http,
            allow_unauthenticated: raw.allow_unauthenticated,
            region: optional_arg("region", raw.region)?,
            is_gen_two: raw.is_gen_two,
        };

        Ok(FunctionSpec {
            name,
            source,
            overrides,
            include_dirs: include_paths("include_dirs", raw.include_dirs)?,
            include_files: include_paths("include_files", raw.include_files)?,
        })
    }
}

fn optional_arg(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<ArgValue>, HardValidationError> {
    value.map(|v| ArgValue::new(field, v)).transpose()
}

fn optional_scalar(
    field: &'static str,
    value: Option<RawScalar>,
) -> Result<Option<ArgValue>, HardValidationError> {
    value
        .map(|v| match v {
            RawScalar::Number(n) => ArgValue::new(field, n.to_string()),
            RawScalar::Text(s) => ArgValue::new(field, s),
        })
        .transpose()
}

/// Include paths are copied with their parents preserved, so they must
/// stay below the function's build directory.
fn include_paths(
    field: &'static str,
    values: Vec<String>,
) -> Result<Vec<PathBuf>, HardValidationError> {
    values
        .into_iter()
        .map(|value| {
            let path = PathBuf::from(&value);
            if value.trim().is_empty() {
                return Err(HardValidationError::InvalidFieldValue {
                    field,
                    value,
                    reason: "Include path cannot be empty".to_string(),
                });
            }
            if path.components().any(|c| matches!(c, Component::ParentDir)) {
                return Err(HardValidationError::InvalidFieldValue {
                    field,
                    value,
                    reason: "Include path must not contain '..'".to_string(),
                });
            }
            Ok(path)
        })
        .collect()
}
