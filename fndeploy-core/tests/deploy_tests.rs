// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end tests for the deploy pipeline.
//!
//! These tests run the full flow from YAML to executor calls against a
//! temporary project tree, with a fake executor in place of `gcloud`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use fndeploy_core::{
    BuildStager, ConfigLoader, DeployCommand, DeployError, DeployOutcome, DeployResult,
    DeployRunner, DeploymentExecutor,
};
use tempfile::TempDir;

/// Records every command and answers with a scripted exit code.
#[derive(Default)]
struct FakeExecutor {
    calls: Vec<Vec<String>>,
    exit_codes: HashMap<String, i32>,
}

impl FakeExecutor {
    fn failing(function: &str, code: i32) -> Self {
        let mut executor = Self::default();
        executor.exit_codes.insert(function.to_string(), code);
        executor
    }

    fn deployed_functions(&self) -> Vec<&str> {
        self.calls.iter().map(|args| args[0].as_str()).collect()
    }
}

impl DeploymentExecutor for FakeExecutor {
    fn deploy(&mut self, command: &DeployCommand) -> DeployResult<i32> {
        self.calls.push(command.args().to_vec());
        Ok(*self.exit_codes.get(command.function()).unwrap_or(&0))
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    write(tmp.path(), "run_functions/greeting_fn/main.py", "def main(request): ...");
    write(
        tmp.path(),
        "run_functions/calculation/get_temperature_fn/main.py",
        "def main(request): ...",
    );
    write(tmp.path(), "shared/common.py", "class Greeter: ...");
    write(
        tmp.path(),
        "shared/calculation/calculator.py",
        "class Calculator: ...",
    );
    tmp
}

fn runner(tmp: &TempDir, executor: FakeExecutor) -> DeployRunner<FakeExecutor> {
    DeployRunner::new(BuildStager::new(tmp.path(), ".build"), executor)
}

const CONFIG: &str = r#"
default_function_configs:
  region: us-east1
  is_trigger_http: true
  include_files:
    - shared/common.py

functions:
  - name: greeting_fn
    source: run_functions/greeting_fn
  - name: get_temperature_fn
    source: run_functions/calculation/get_temperature_fn
    memory: 512MB
    allow_unauthenticated: true
    include_dirs:
      - shared/calculation
"#;

fn config_requesting(names: &str) -> String {
    format!("{}\nfunctions_to_deploy: {}\n", CONFIG, names)
}

#[test]
fn test_deploys_in_declaration_order() {
    let tmp = project();
    let config =
        ConfigLoader::load_string(&config_requesting("[get_temperature_fn, greeting_fn]")).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::default());
    let outcome = runner.run(&config).unwrap();

    assert_eq!(
        outcome,
        DeployOutcome::Deployed(vec![
            "greeting_fn".to_string(),
            "get_temperature_fn".to_string()
        ])
    );
    assert_eq!(
        runner.executor().deployed_functions(),
        vec!["greeting_fn", "get_temperature_fn"]
    );
}

#[test]
fn test_assembled_arguments() {
    let tmp = project();
    let config = ConfigLoader::load_string(&config_requesting("[get_temperature_fn]")).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::default());
    runner.run(&config).unwrap();

    let calls = &runner.executor().calls;
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        vec![
            "get_temperature_fn",
            "--region=us-east1",
            "--runtime=python311",
            "--source=.build/get_temperature_fn",
            "--entry-point=main",
            "--memory=512MB",
            "--timeout=300",
            "--max-instances=5",
            "--gen2",
            "--trigger-http",
            "--allow-unauthenticated",
        ]
    );
}

#[test]
fn test_first_failure_aborts_queue() {
    let tmp = project();
    let config =
        ConfigLoader::load_string(&config_requesting("[get_temperature_fn, greeting_fn]")).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::failing("greeting_fn", 2));
    let err = runner.run(&config).unwrap_err();

    match err {
        DeployError::DeployFailed { function, code } => {
            assert_eq!(function, "greeting_fn");
            assert_eq!(code, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runner.executor().deployed_functions(), vec!["greeting_fn"]);
}

#[test]
fn test_staging_layout() {
    let tmp = project();
    let config = ConfigLoader::load_string(&config_requesting("[greeting_fn, get_temperature_fn]"))
        .unwrap();

    runner(&tmp, FakeExecutor::default()).run(&config).unwrap();

    let build = tmp.path().join(".build");
    assert!(build.join("greeting_fn/main.py").is_file());
    assert!(build.join("greeting_fn/shared/common.py").is_file());
    assert!(!build.join("greeting_fn/shared/calculation").exists());

    assert!(build.join("get_temperature_fn/main.py").is_file());
    assert!(build.join("get_temperature_fn/shared/common.py").is_file());
    assert!(build
        .join("get_temperature_fn/shared/calculation/calculator.py")
        .is_file());
}

#[test]
fn test_build_root_recreated_each_run() {
    let tmp = project();
    write(tmp.path(), ".build/leftover/stale.py", "");
    let config = ConfigLoader::load_string(&config_requesting("[greeting_fn]")).unwrap();

    runner(&tmp, FakeExecutor::default()).run(&config).unwrap();

    assert!(!tmp.path().join(".build/leftover").exists());
    assert!(tmp.path().join(".build/greeting_fn").is_dir());
}

#[test]
fn test_functions_to_deploy_absent_is_noop() {
    let tmp = project();
    let config = ConfigLoader::load_string(CONFIG).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::default());
    assert_eq!(runner.run(&config).unwrap(), DeployOutcome::NothingToDeploy);
    assert!(runner.executor().calls.is_empty());
    assert!(!tmp.path().join(".build").exists());
}

#[test]
fn test_empty_functions_to_deploy_is_noop() {
    let tmp = project();
    let config = ConfigLoader::load_string(&config_requesting("[]")).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::default());
    assert_eq!(runner.run(&config).unwrap(), DeployOutcome::NothingToDeploy);
    assert!(runner.executor().calls.is_empty());
}

#[test]
fn test_unknown_names_deploy_nothing() {
    let tmp = project();
    let config =
        ConfigLoader::load_string(&config_requesting("[greeting_fn, nope, also_nope]")).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::default());
    match runner.run(&config).unwrap_err() {
        DeployError::InvalidFunctions { names } => {
            assert_eq!(names, vec!["also_nope", "nope"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(runner.executor().calls.is_empty());
}

#[test]
fn test_missing_include_aborts_before_deploy() {
    let tmp = project();
    fs::remove_file(tmp.path().join("shared/common.py")).unwrap();
    let config = ConfigLoader::load_string(&config_requesting("[greeting_fn]")).unwrap();

    let mut runner = runner(&tmp, FakeExecutor::default());
    assert!(matches!(
        runner.run(&config),
        Err(DeployError::Staging(_))
    ));
    assert!(runner.executor().calls.is_empty());
}

#[test]
fn test_load_file_from_disk() {
    let tmp = project();
    let path = tmp.path().join("deploy_config.yaml");
    fs::write(&path, config_requesting("[greeting_fn]")).unwrap();

    let config = ConfigLoader::load_file(&path).unwrap();
    assert_eq!(config.functions.len(), 2);
}
