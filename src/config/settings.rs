//! Linter settings.
//!
//! [`LinterSettings`] is built once per invocation, either from a YAML
//! settings file or from CLI flags, and is read-only for the duration of
//! a lint run.

use crate::error::{PrintcheckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings consumed by the lint engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinterSettings {
    /// Rule names whose diagnostics are suppressed entirely.
    ///
    /// Naming a rule that does not exist has no effect.
    pub ignore_rules: HashSet<String>,

    /// Report every `warning` diagnostic as an `error`.
    pub warnings_as_errors: bool,

    /// Directory of declarative rule descriptors. When unset, the
    /// built-in rule set shipped with the binary is used.
    pub rules_directory: Option<PathBuf>,

    /// Per-option `(min, max)` bounds overriding the ranges declared by
    /// `numeric_range` conditions.
    pub range_overrides: HashMap<String, (f64, f64)>,

    /// Verbose output.
    pub verbose: bool,
}

impl LinterSettings {
    /// Load settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PrintcheckError::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| PrintcheckError::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Whether a rule should be skipped.
    pub fn should_ignore(&self, rule_name: &str) -> bool {
        self.ignore_rules.contains(rule_name)
    }
}
