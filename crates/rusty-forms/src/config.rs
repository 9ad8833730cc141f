// File: src/config.rs
// Purpose: Validator options and form configuration files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rules::RuleSet;
use crate::validator::Validator;

/// Marker class carried by every rendered error node
pub const DEFAULT_ERROR_CLASS: &str = "form-error";

/// Validator options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Class used both to tag new error nodes and to clear old ones
    #[serde(default = "default_error_class", alias = "error_class")]
    pub error_class: String,

    /// Quote the `min_length` threshold in max length messages
    #[serde(default, alias = "legacy_max_length_message")]
    pub legacy_max_length_message: bool,
}

fn default_error_class() -> String {
    DEFAULT_ERROR_CLASS.to_string()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            error_class: default_error_class(),
            legacy_max_length_message: false,
        }
    }
}

/// A complete form description: validator options plus the rule set
///
/// ```toml
/// [validator]
/// error_class = "form-error"
///
/// [rules.email]
/// required = true
/// type = "email"
///
/// [rules.phone]
/// pattern = "^[0-9]{10}$"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub validator: ValidatorConfig,

    #[serde(default)]
    pub rules: RuleSet,
}

impl FormConfig {
    /// Load a form description from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "form config not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse form config: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse form config JSON")
    }

    /// Build the validator this configuration describes
    pub fn into_validator(self) -> Validator {
        Validator::with_config(self.rules, self.validator)
    }
}
