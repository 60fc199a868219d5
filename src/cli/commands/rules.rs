//! Rules command implementation.
//!
//! The `printcheck rules` command lists the rules that would run, with
//! category and description.

use crate::cli::args::RulesArgs;
use crate::cli::commands::CommandResult;
use crate::config::LinterSettings;
use crate::error::Result;
use crate::lint::Linter;
use serde::Serialize;

#[derive(Serialize)]
struct RuleListing<'a> {
    name: &'a str,
    category: String,
    description: &'a str,
}

/// Execute the rules command.
pub fn run(args: &RulesArgs, mut settings: LinterSettings) -> Result<CommandResult> {
    if let Some(dir) = &args.rules {
        settings.rules_directory = Some(dir.clone());
    }

    let linter = Linter::configured(&settings)?;

    if args.json {
        let listings: Vec<_> = linter
            .rules()
            .map(|rule| RuleListing {
                name: rule.name(),
                category: rule.category().to_string(),
                description: &rule.docs().description,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listings).map_err(anyhow::Error::from)?);
    } else {
        for rule in linter.rules() {
            println!(
                "{:<24} {:<12} {}",
                rule.name(),
                rule.category().to_string(),
                rule.docs().description
            );
        }
    }

    Ok(CommandResult::success())
}
