// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Deploy-set resolution.
//!
//! Intersects `functions_to_deploy` with the declared functions. Unknown
//! names fail the whole run before anything is staged.

use std::collections::BTreeSet;

use crate::config::{DeployConfig, FunctionSpec};
use crate::error::{DeployError, DeployResult};

/// The set of functions targeted by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploySelection {
    /// `functions_to_deploy` is absent from the configuration.
    NotRequested,
    /// `functions_to_deploy` is present but lists nothing.
    Empty,
    /// Validated names to deploy.
    Selected(BTreeSet<String>),
}

impl DeploySelection {
    /// Whether this selection deploys anything at all.
    pub fn is_noop(&self) -> bool {
        !matches!(self, DeploySelection::Selected(_))
    }

    /// Selected functions in declaration order.
    pub fn functions<'a>(&self, config: &'a DeployConfig) -> Vec<&'a FunctionSpec> {
        match self {
            DeploySelection::Selected(names) => config
                .functions
                .iter()
                .filter(|f| names.contains(f.name.as_str()))
                .collect(),
            DeploySelection::NotRequested | DeploySelection::Empty => Vec::new(),
        }
    }
}

/// Resolve the deploy set for a configuration.
///
/// Every unknown name is reported at once, sorted.
pub fn resolve(config: &DeployConfig) -> DeployResult<DeploySelection> {
    let Some(requested) = &config.functions_to_deploy else {
        return Ok(DeploySelection::NotRequested);
    };

    let requested: BTreeSet<String> = requested.iter().cloned().collect();

    let invalid: Vec<String> = requested
        .iter()
        .filter(|name| config.function(name).is_none())
        .cloned()
        .collect();

    if !invalid.is_empty() {
        return Err(DeployError::InvalidFunctions { names: invalid });
    }

    if requested.is_empty() {
        return Ok(DeploySelection::Empty);
    }

    tracing::debug!(count = requested.len(), "Resolved functions to deploy");

    Ok(DeploySelection::Selected(requested))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    const CONFIG: &str = r#"
functions:
  - name: alpha
    source: src/alpha
  - name: beta
    source: src/beta
  - name: gamma
    source: src/gamma
"#;

    fn config_with(requested: &[&str]) -> DeployConfig {
        ConfigLoader::load_string(CONFIG)
            .unwrap()
            .with_functions_to_deploy(requested.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_absent_is_not_requested() {
        let config = ConfigLoader::load_string(CONFIG).unwrap();
        let selection = resolve(&config).unwrap();
        assert_eq!(selection, DeploySelection::NotRequested);
        assert!(selection.is_noop());
    }

    #[test]
    fn test_empty_list() {
        let selection = resolve(&config_with(&[])).unwrap();
        assert_eq!(selection, DeploySelection::Empty);
        assert!(selection.functions(&config_with(&[])).is_empty());
    }

    #[test]
    fn test_unknown_names_all_reported() {
        let err = resolve(&config_with(&["zeta", "alpha", "omega"])).unwrap_err();
        match err {
            DeployError::InvalidFunctions { names } => {
                assert_eq!(names, vec!["omega".to_string(), "zeta".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_names_with_no_declared_functions() {
        let config = ConfigLoader::load_string("functions_to_deploy: [x, y]\n").unwrap();
        match resolve(&config).unwrap_err() {
            DeployError::InvalidFunctions { names } => assert_eq!(names, vec!["x", "y"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_declaration_order_preserved() {
        let config = config_with(&["gamma", "alpha"]);
        let selection = resolve(&config).unwrap();
        let names: Vec<&str> = selection
            .functions(&config)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "gamma"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let config = config_with(&["beta", "beta"]);
        match resolve(&config).unwrap() {
            DeploySelection::Selected(names) => assert_eq!(names.len(), 1),
            other => panic!("unexpected selection: {other:?}"),
        }
    }
}
