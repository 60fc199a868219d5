//! Human-readable output formatter.
//!
//! Formats lint diagnostics for terminal display with optional color
//! support.

use super::LintFormatter;
use crate::lint::{LintDiagnostic, Severity};
use console::style;
use std::io::Write;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_label(&self, severity: Severity) -> String {
        let label = severity.to_string().to_uppercase();
        if !self.use_color {
            return label;
        }
        match severity {
            Severity::Info => style(label).cyan().to_string(),
            Severity::Warning => style(label).yellow().to_string(),
            Severity::Error => style(label).red().to_string(),
        }
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for diag in diagnostics {
            // Header line: SEVERITY: message (at line n, column m)
            write!(writer, "{}: {}", self.severity_label(diag.severity), diag.message)?;
            if let (Some(line), Some(column)) = (diag.line, diag.column) {
                write!(writer, " (at line {}, column {})", line, column)?;
            }
            writeln!(writer)?;

            // Attribution line
            match &diag.option {
                Some(option) => writeln!(writer, "  --> {}.{}", diag.section, option)?,
                None => writeln!(writer, "  --> {}", diag.section)?,
            }

            // Suggested fix
            if let Some(ref fix) = diag.fix {
                writeln!(
                    writer,
                    "   = help: replace '{}' with '{}'",
                    fix.old_value, fix.new_value
                )?;
            }

            writeln!(writer)?;
        }

        // Summary
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();

        if error_count > 0 || warning_count > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                error_count, warning_count
            )?;
        }

        Ok(())
    }
}
