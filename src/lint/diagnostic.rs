//! Lint diagnostic messages.
//!
//! This module provides the [`LintDiagnostic`] type for representing issues
//! found during configuration validation. Diagnostics are value types:
//! built once by a rule, optionally compared in tests, never mutated.

use crate::lint::rule::Severity;
use serde::Serialize;

/// A suggested replacement for an offending option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFix {
    /// Section the fix applies to.
    pub section: String,
    /// Option within the section, if the fix targets one.
    pub option: Option<String>,
    /// The value currently in the config.
    pub old_value: String,
    /// The value to replace it with.
    pub new_value: String,
}

/// A diagnostic produced by a lint rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LintDiagnostic {
    /// Human-readable message.
    pub message: String,
    /// Section the issue was found in.
    pub section: String,
    /// Option within the section, when the issue is option-specific.
    pub option: Option<String>,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Source line, when known.
    pub line: Option<usize>,
    /// Source column, when known.
    pub column: Option<usize>,
    /// Optional suggested fix.
    pub fix: Option<LintFix>,
}

impl LintDiagnostic {
    /// Create a diagnostic attributed to a section.
    pub fn new(message: impl Into<String>, section: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            section: section.into(),
            option: None,
            severity,
            line: None,
            column: None,
            fix: None,
        }
    }

    /// Attribute this diagnostic to a specific option.
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option = Some(option.into());
        self
    }

    /// Attach a source location.
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Attach a suggested fix.
    pub fn with_fix(mut self, fix: LintFix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Copy of this diagnostic with a different severity.
    pub fn with_severity(&self, severity: Severity) -> Self {
        Self {
            severity,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for LintDiagnostic {
    /// Renders `"<SEVERITY>: <message> (at line <n>, column <m>)"`, with
    /// the location clause omitted when the position is unknown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.severity.to_string().to_uppercase(),
            self.message
        )?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " (at line {}, column {})", line, column)?;
        }
        Ok(())
    }
}
