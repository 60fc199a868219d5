//! Configuration validation and linting.
//!
//! This module provides rule-based validation of parsed configuration
//! documents.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Rules** - Individual validation checks ([`LintRule`] trait)
//! - **Conditions** - Declarative check primitives ([`Condition`])
//! - **Loader** - Compiles YAML rule descriptors into rules
//! - **Engine** - Runs the rule set and aggregates results ([`Linter`])
//! - **Diagnostics** - Issue reports with severity and suggested fixes
//!   ([`LintDiagnostic`])
//!
//! # Example
//!
//! ```
//! use printcheck::config::{parse_str, LinterSettings, MemorySource};
//! use printcheck::lint::Linter;
//! use std::path::Path;
//!
//! let source = MemorySource::new();
//! let document = parse_str("[stepper_x]\nstep_pin: PF0\n", Path::new("printer.cfg"), &source)
//!     .unwrap();
//!
//! let settings = LinterSettings::default();
//! let linter = Linter::configured(&settings).unwrap();
//! let diagnostics = linter.lint(&document, &settings);
//!
//! // The required [printer] section is missing.
//! assert!(diagnostics
//!     .iter()
//!     .any(|d| d.message == "Missing required section: printer"));
//! ```

pub mod condition;
pub mod diagnostic;
pub mod engine;
pub mod loader;
mod message;
pub mod output;
pub mod rule;
pub mod rules;

pub use condition::Condition;
pub use diagnostic::{LintDiagnostic, LintFix};
pub use engine::Linter;
pub use loader::{builtin_rules, load_rules_from_dir, DeclaredRule};
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat};
pub use rule::{LintContext, LintRule, RuleCategory, RuleDocumentation, Severity};
pub use rules::HeaterSafetyRule;
