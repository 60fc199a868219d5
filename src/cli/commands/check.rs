//! Check command implementation.
//!
//! The `printcheck check` command parses a configuration file and runs
//! the configured rule set against it.

use crate::cli::args::CheckArgs;
use crate::cli::commands::CommandResult;
use crate::config::{parse_file, FsSource, LinterSettings};
use crate::error::Result;
use crate::lint::{HumanFormatter, JsonFormatter, LintFormatter, Linter, Severity};

/// Execute the check command.
pub fn run(args: &CheckArgs, mut settings: LinterSettings, use_color: bool) -> Result<CommandResult> {
    if !args.file.is_file() {
        eprintln!("Configuration not found: {}", args.file.display());
        return Ok(CommandResult::failure(2));
    }

    // CLI flags override the settings file.
    if args.strict {
        settings.warnings_as_errors = true;
    }
    if let Some(dir) = &args.rules {
        settings.rules_directory = Some(dir.clone());
    }
    settings.ignore_rules.extend(args.ignore.iter().cloned());

    let source = FsSource::new();
    let document = parse_file(&args.file, &source)?;

    let linter = Linter::configured(&settings)?;
    let diagnostics = linter.lint(&document, &settings);

    let mut output = Vec::new();
    match args.format.as_str() {
        "json" => JsonFormatter::new().format(&diagnostics, &mut output)?,
        _ => HumanFormatter::new(use_color).format(&diagnostics, &mut output)?,
    }
    let rendered = String::from_utf8(output).unwrap_or_default();

    if diagnostics.is_empty() {
        if args.format == "human" {
            println!("Configuration is valid");
        } else {
            println!("{rendered}");
        }
        return Ok(CommandResult::success());
    }

    print!("{rendered}");
    if args.format != "human" {
        println!();
    }

    let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
    if has_errors {
        Ok(CommandResult::failure(1))
    } else {
        Ok(CommandResult::success())
    }
}
