mod cli;
mod commands;
mod config;
mod infrastructure;
mod report;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::build_config;
use crate::infrastructure::ServiceProvider;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli.config) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {e}", "Failed to build config".red());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::initialize_telemetry(&config.telemetry) {
        eprintln!("{}: {e}", "Failed to initialize logger".red());
        return ExitCode::FAILURE;
    }

    let sp = match ServiceProvider::build(&config) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}: {e}", "Cannot build Service Provider".red());
            return ExitCode::FAILURE;
        }
    };

    match commands::run(cli.command, &sp).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").red());
            ExitCode::FAILURE
        }
    }
}
