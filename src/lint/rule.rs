//! Lint rule definitions.
//!
//! This module provides the core traits and types for defining lint rules:
//!
//! - [`LintRule`] - The trait that all lint rules must implement
//! - [`RuleCategory`] - The closed set of rule categories
//! - [`Severity`] - Severity level for diagnostics (Info, Warning, Error)
//! - [`LintContext`] - Read-only per-run inputs shared with every rule

use crate::config::ConfigDocument;
use crate::lint::diagnostic::LintDiagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Severity level for lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, does not affect validity.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that makes the configuration unsafe or invalid.
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Category a lint rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Syntax,
    Safety,
    Consistency,
    Style,
    Dependency,
}

impl FromStr for RuleCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "syntax" => Ok(RuleCategory::Syntax),
            "safety" => Ok(RuleCategory::Safety),
            "consistency" => Ok(RuleCategory::Consistency),
            "style" => Ok(RuleCategory::Style),
            "dependency" => Ok(RuleCategory::Dependency),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleCategory::Syntax => write!(f, "syntax"),
            RuleCategory::Safety => write!(f, "safety"),
            RuleCategory::Consistency => write!(f, "consistency"),
            RuleCategory::Style => write!(f, "style"),
            RuleCategory::Dependency => write!(f, "dependency"),
        }
    }
}

/// Human-facing documentation attached to a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDocumentation {
    /// What the rule checks.
    pub description: String,
    /// Config snippets illustrating valid and invalid usage.
    pub examples: Vec<String>,
    /// How to address violations.
    pub fix_suggestions: Vec<String>,
}

impl RuleDocumentation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            examples: Vec::new(),
            fix_suggestions: Vec::new(),
        }
    }
}

/// Read-only inputs shared with every rule for one lint run.
#[derive(Debug, Clone, Default)]
pub struct LintContext {
    /// Per-option `(min, max)` bounds overriding declared numeric ranges.
    pub range_overrides: HashMap<String, (f64, f64)>,
}

/// A lint rule that validates a parsed configuration.
///
/// Rules are the primary mechanism for configuration validation. Each rule
/// checks for a specific class of issue and produces diagnostics when
/// problems are found. Rules are stateless: `check` reads only the document
/// and the context, and nothing is retained between documents.
pub trait LintRule: Send + Sync {
    /// Unique, stable name (used in ignore lists).
    fn name(&self) -> &str;

    /// The category this rule belongs to.
    fn category(&self) -> RuleCategory;

    /// Documentation for this rule.
    fn docs(&self) -> &RuleDocumentation;

    /// Check the document and return any diagnostics.
    fn check(&self, document: &ConfigDocument, ctx: &LintContext) -> Vec<LintDiagnostic>;
}

impl std::fmt::Debug for dyn LintRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintRule")
            .field("name", &self.name())
            .field("category", &self.category())
            .finish()
    }
}
