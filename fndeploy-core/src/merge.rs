// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Per-function configuration merging.
//!
//! Each field resolves as: function override, then default, then fallback.

use std::path::PathBuf;

use crate::config::{FunctionDefaults, FunctionSpec};
use crate::types::{ArgValue, FunctionName};

pub const FALLBACK_ENTRY_POINT: &str = "main";
pub const FALLBACK_RUNTIME: &str = "python311";
pub const FALLBACK_MEMORY: &str = "256MB";
pub const FALLBACK_TIMEOUT: &str = "300";
pub const FALLBACK_REGION: &str = "us-central1";
pub const FALLBACK_IS_TRIGGER_HTTP: bool = false;
pub const FALLBACK_ALLOW_UNAUTHENTICATED: bool = false;
pub const FALLBACK_IS_GEN_TWO: bool = true;

/// Instance cap used when a function sets none.
/// The defaults block is never consulted for this field.
pub const FIXED_MAX_INSTANCES: &str = "5";

/// Fully resolved settings for one deployment. Every field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    pub name: FunctionName,
    pub entry_point: ArgValue,
    pub runtime: ArgValue,
    pub memory: ArgValue,
    pub timeout: ArgValue,
    pub max_instances: ArgValue,
    pub is_trigger_http: bool,
    pub allow_unauthenticated: bool,
    pub region: ArgValue,
    pub is_gen_two: bool,
    pub source: PathBuf,
}

impl FunctionConfig {
    /// Merge a function's overrides over the defaults block.
    pub fn resolve(spec: &FunctionSpec, defaults: &FunctionDefaults) -> Self {
        let own = &spec.overrides;
        let def = &defaults.settings;

        let pick = |first: &Option<ArgValue>, second: &Option<ArgValue>, fallback: &'static str| {
            first
                .clone()
                .or_else(|| second.clone())
                .unwrap_or_else(|| ArgValue::from_static(fallback))
        };

        let config = Self {
            name: spec.name.clone(),
            entry_point: pick(&own.entry_point, &def.entry_point, FALLBACK_ENTRY_POINT),
            runtime: pick(&own.runtime, &def.runtime, FALLBACK_RUNTIME),
            memory: pick(&own.memory, &def.memory, FALLBACK_MEMORY),
            timeout: pick(&own.timeout, &def.timeout, FALLBACK_TIMEOUT),
            max_instances: pick(&own.max_instances, &None, FIXED_MAX_INSTANCES),
            is_trigger_http: own
                .is_trigger_http
                .or(def.is_trigger_http)
                .unwrap_or(FALLBACK_IS_TRIGGER_HTTP),
            allow_unauthenticated: own
                .allow_unauthenticated
                .or(def.allow_unauthenticated)
                .unwrap_or(FALLBACK_ALLOW_UNAUTHENTICATED),
            region: pick(&own.region, &def.region, FALLBACK_REGION),
            is_gen_two: own
                .is_gen_two
                .or(def.is_gen_two)
                .unwrap_or(FALLBACK_IS_GEN_TWO),
            source: spec.source.clone(),
        };

        tracing::debug!(function = %config.name, config = ?config, "Resolved function config");

        config
    }
}
