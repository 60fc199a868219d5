//! JSON output formatter.
//!
//! Formats lint diagnostics as machine-readable JSON for tooling
//! integration.

use super::LintFormatter;
use crate::lint::diagnostic::LintFix;
use crate::lint::{LintDiagnostic, Severity};
use serde::Serialize;
use std::io::Write;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    severity: String,
    message: String,
    section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<LintFix>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let json_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|d| JsonDiagnostic {
                severity: d.severity.to_string(),
                message: d.message.clone(),
                section: d.section.clone(),
                option: d.option.clone(),
                line: d.line,
                column: d.column,
                fix: d.fix.clone(),
            })
            .collect();

        let summary = JsonSummary {
            total: diagnostics.len(),
            errors: diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .count(),
            warnings: diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
            infos: diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Info)
                .count(),
        };

        let output = JsonOutput {
            diagnostics: json_diagnostics,
            summary,
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}
