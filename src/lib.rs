//! printcheck - Lint engine for 3D-printer firmware configuration files.
//!
//! printcheck parses INI-style printer configuration (with recursive
//! `[include]` resolution) into an immutable document and runs an
//! extensible set of validation rules over it, producing actionable
//! diagnostics.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration parsing and the parsed-document model
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Rule loading, condition evaluation, and the lint engine
//!
//! # Example
//!
//! ```
//! use printcheck::config::{parse_str, LinterSettings, MemorySource};
//! use printcheck::lint::Linter;
//! use std::path::Path;
//!
//! let source = MemorySource::new();
//! let document = parse_str(
//!     "[printer]\nkinematics: cartesian\nmax_velocity: 300\n",
//!     Path::new("printer.cfg"),
//!     &source,
//! )
//! .unwrap();
//!
//! let settings = LinterSettings::default();
//! let linter = Linter::configured(&settings).unwrap();
//! let diagnostics = linter.lint(&document, &settings);
//! assert!(diagnostics.is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lint;

pub use error::{PrintcheckError, Result};
