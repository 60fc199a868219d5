//! The lint engine.
//!
//! [`Linter`] holds the registered rules in order and runs them all
//! against a parsed document, applying the ignore list and the
//! warnings-as-errors policy from [`LinterSettings`].
//!
//! Diagnostic order is stable: all diagnostics from one rule precede all
//! diagnostics from the next, in rule registration order, and diagnostics
//! within a rule keep the rule's emission order. The engine performs no
//! deduplication.

use crate::config::{ConfigDocument, LinterSettings};
use crate::lint::diagnostic::LintDiagnostic;
use crate::lint::loader;
use crate::lint::rule::{LintContext, LintRule, Severity};
use crate::lint::rules::HeaterSafetyRule;
use crate::error::Result;

/// Runs an ordered set of lint rules against parsed configurations.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
}

impl Linter {
    /// Create an empty linter.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build the standard linter for the given settings: declarative rules
    /// from the configured directory (or the built-in set when none is
    /// configured), followed by the native safety rule.
    pub fn configured(settings: &LinterSettings) -> Result<Self> {
        let mut linter = Self::new();
        let declared = match &settings.rules_directory {
            Some(dir) => loader::load_rules_from_dir(dir)?,
            None => loader::builtin_rules()?,
        };
        for rule in declared {
            linter.add_rule(rule);
        }
        linter.add_rule(Box::new(HeaterSafetyRule::new()));
        Ok(linter)
    }

    /// Register a rule. Rules run in registration order.
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Iterate over the registered rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every non-ignored rule against the document.
    pub fn lint(&self, document: &ConfigDocument, settings: &LinterSettings) -> Vec<LintDiagnostic> {
        tracing::info!(rules = self.rules.len(), "starting lint analysis");
        let ctx = LintContext {
            range_overrides: settings.range_overrides.clone(),
        };

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            if settings.should_ignore(rule.name()) {
                tracing::debug!(rule = rule.name(), "rule ignored");
                continue;
            }
            tracing::debug!(rule = rule.name(), category = %rule.category(), "checking rule");
            let found = rule.check(document, &ctx);
            tracing::debug!(rule = rule.name(), count = found.len(), "rule finished");

            if settings.warnings_as_errors {
                diagnostics.extend(found.into_iter().map(|diag| {
                    if diag.severity == Severity::Warning {
                        diag.with_severity(Severity::Error)
                    } else {
                        diag
                    }
                }));
            } else {
                diagnostics.extend(found);
            }
        }

        tracing::info!(total = diagnostics.len(), "completed lint analysis");
        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
