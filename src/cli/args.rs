//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// printcheck - Lint engine for 3D-printer firmware configuration.
#[derive(Debug, Parser)]
#[command(name = "printcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a linter settings file (overrides default printcheck.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint a configuration file
    Check(CheckArgs),

    /// List the loaded lint rules
    Rules(RulesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Configuration file to lint
    pub file: PathBuf,

    /// Output format: human, json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Load rules from this directory instead of the built-in set
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Rule names to ignore (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Load rules from this directory instead of the built-in set
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
