//! Error types for printcheck operations.
//!
//! This module defines [`PrintcheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Parse-time and rule-load-time failures are fatal and propagate unchanged
//! - Issues found *in* a configuration are never errors; they are reported as
//!   [`LintDiagnostic`](crate::lint::LintDiagnostic) values
//! - Use `anyhow::Error` (via `PrintcheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for printcheck operations.
#[derive(Debug, Error)]
pub enum PrintcheckError {
    /// A referenced config file could not be read.
    #[error("Unable to open config file {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    /// An include chain loops back onto a file already being parsed.
    #[error("Recursive include of config file '{path}'")]
    RecursiveInclude { path: PathBuf },

    /// A wildcard-free include pattern matched no files.
    #[error("Include file '{pattern}' does not exist")]
    MissingInclude { pattern: PathBuf },

    /// A rule descriptor is missing one of its required fields.
    #[error("Missing required field: {field} (in rule file {file})")]
    MissingRuleField { field: &'static str, file: String },

    /// A rule descriptor names a category outside the known set.
    #[error("Invalid category: {category} (in rule file {file})")]
    InvalidCategory { category: String, file: String },

    /// A condition descriptor carries an unrecognized type tag.
    #[error("Unknown condition type: {kind} (in rule file {file})")]
    UnknownConditionType { kind: String, file: String },

    /// A rule descriptor could not be deserialized or compiled.
    #[error("Failed to parse rule file {file}: {message}")]
    RuleParse { file: String, message: String },

    /// The configured rules directory does not exist.
    #[error("Rules directory does not exist: {path}")]
    RulesDirNotFound { path: PathBuf },

    /// The linter settings file could not be loaded.
    #[error("Failed to load configuration file {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for printcheck operations.
pub type Result<T> = std::result::Result<T, PrintcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursive_include_names_offending_file() {
        let err = PrintcheckError::RecursiveInclude {
            path: PathBuf::from("printer.cfg"),
        };
        assert_eq!(
            err.to_string(),
            "Recursive include of config file 'printer.cfg'"
        );
    }

    #[test]
    fn missing_include_names_pattern() {
        let err = PrintcheckError::MissingInclude {
            pattern: PathBuf::from("macros/extras.cfg"),
        };
        let msg = err.to_string();
        assert!(msg.contains("macros/extras.cfg"));
        assert!(msg.contains("does not exist"));
    }

    #[test]
    fn missing_rule_field_names_field() {
        let err = PrintcheckError::MissingRuleField {
            field: "conditions",
            file: "broken.yaml".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Missing required field: conditions"));
        assert!(msg.contains("broken.yaml"));
    }

    #[test]
    fn invalid_category_names_category() {
        let err = PrintcheckError::InvalidCategory {
            category: "not_a_category".into(),
            file: "rule.yaml".into(),
        };
        assert!(err.to_string().contains("Invalid category: not_a_category"));
    }

    #[test]
    fn unknown_condition_type_names_tag() {
        let err = PrintcheckError::UnknownConditionType {
            kind: "quantum_check".into(),
            file: "rule.yaml".into(),
        };
        assert!(err
            .to_string()
            .contains("Unknown condition type: quantum_check"));
    }

    #[test]
    fn config_read_displays_path_and_message() {
        let err = PrintcheckError::ConfigRead {
            path: PathBuf::from("/etc/printer.cfg"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/printer.cfg"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PrintcheckError = io_err.into();
        assert!(matches!(err, PrintcheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PrintcheckError::RulesDirNotFound {
                path: PathBuf::from("missing"),
            })
        }
        assert!(returns_error().is_err());
    }
}
