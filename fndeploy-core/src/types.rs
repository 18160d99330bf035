// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Values end up as `--flag=value` tokens on the deployment command line,
//! so every type validates its invariants at creation time.

use std::fmt;

use crate::error::HardValidationError;

/// Maximum length of a cloud function name.
const MAX_FUNCTION_NAME_LEN: usize = 63;

/// Validated function name.
/// Must be non-empty, alphanumeric with hyphens/underscores, max 63 chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionName(String);

impl FunctionName {
    /// Create a new FunctionName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Function name cannot be empty".to_string(),
            });
        }

        if name.len() > MAX_FUNCTION_NAME_LEN {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name.clone(),
                reason: format!(
                    "Function name too long: {} chars (max {})",
                    name.len(),
                    MAX_FUNCTION_NAME_LEN
                ),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Function name must contain only alphanumeric characters, hyphens, and underscores".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single command-line value: non-empty, no whitespace.
///
/// The assembled command is tokenized on whitespace, so a value with
/// embedded spaces would split into separate arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgValue(String);

impl ArgValue {
    /// Create a new ArgValue, naming `field` in the error.
    pub fn new(
        field: &'static str,
        value: impl Into<String>,
    ) -> Result<Self, HardValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field,
                value,
                reason: "Value cannot be empty".to_string(),
            });
        }

        if value.chars().any(char::is_whitespace) {
            return Err(HardValidationError::InvalidFieldValue {
                field,
                value,
                reason: "Value must not contain whitespace".to_string(),
            });
        }

        Ok(Self(value))
    }

    /// Build from a value known to be a single token.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
