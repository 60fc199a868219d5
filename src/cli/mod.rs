//! Command-line interface.
//!
//! Argument definitions live in [`args`]; each subcommand has its own
//! module under [`commands`].

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, RulesArgs};
pub use commands::CommandResult;
