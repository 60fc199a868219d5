//! Completions command implementation.
//!
//! Generates shell completion scripts on stdout.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::cli::commands::CommandResult;
use crate::error::Result;
use clap::CommandFactory;

/// Execute the completions command.
pub fn run(args: &CompletionsArgs) -> Result<CommandResult> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
    Ok(CommandResult::success())
}
