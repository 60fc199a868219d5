//! printcheck CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use printcheck::cli::{commands, Cli, Commands};
use printcheck::config::LinterSettings;
use printcheck::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default settings file looked up in the working directory.
const SETTINGS_FILE: &str = "printcheck.yml";

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("printcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("printcheck=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_settings(cli: &Cli) -> Result<LinterSettings> {
    if let Some(path) = &cli.config {
        return LinterSettings::from_file(path);
    }
    let default_path = Path::new(SETTINGS_FILE);
    if default_path.is_file() {
        return LinterSettings::from_file(default_path);
    }
    Ok(LinterSettings::default())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("printcheck starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
    }
    let use_color = !cli.no_color && console::colors_enabled();

    let result = load_settings(&cli).and_then(|settings| match &cli.command {
        Commands::Check(args) => commands::check::run(args, settings, use_color),
        Commands::Rules(args) => commands::rules::run(args, settings),
        Commands::Completions(args) => commands::completions::run(args),
    });

    match result {
        Ok(outcome) => ExitCode::from(outcome.exit_code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
