//! Gleaner CLI - extract event records into YAML datasets.

use clap::Parser;
use gleaner_cli::commands;
use gleaner_cli::{Cli, Command, Config, Formatter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> gleaner_cli::Result<ExitCode> {
    match cli.command {
        Command::Ci(args) => commands::execute_ci(args, &cli.global).await,
        Command::Extract(args) => {
            let config = Config::resolve(&cli.global)?;
            let color_enabled = !cli.global.no_color && config.settings.color;
            let formatter = Formatter::new(color_enabled);

            match commands::execute_extract(args, &config, &formatter).await {
                Ok(code) => Ok(code),
                Err(e) => {
                    eprintln!("{}", formatter.error(&e.to_string()));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Logs go to stderr so the ci command's stdout stays one JSON object.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
