//! fndeploy Core Library
//!
//! Deploys HTTP cloud functions described by a YAML file: resolves which
//! functions to deploy, merges per-function settings over defaults, stages
//! each source tree into a build directory and runs `gcloud functions deploy`.

pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod merge;
pub mod resolver;
pub mod runner;
pub mod stage;
pub mod types;

// Re-export commonly used types
pub use command::DeployCommand;
pub use config::{ConfigLoader, DeployConfig, FunctionDefaults, FunctionSettings, FunctionSpec};
pub use error::{DeployError, DeployResult, HardValidationError, StagingError};
pub use executor::{DeploymentExecutor, DryRunExecutor, GcloudExecutor};
pub use merge::FunctionConfig;
pub use resolver::DeploySelection;
pub use runner::{DeployOutcome, DeployRunner};
pub use stage::BuildStager;
pub use types::{ArgValue, FunctionName};
