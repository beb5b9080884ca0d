use clap::Parser;
use owo_colors::{OwoColorize, Style};
use recurdo_core::error::CoreError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let config = match config::Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(cli::Commands::Run) {
        cli::Commands::Run => commands::run::run(&config).await,
        cli::Commands::Check => commands::check::check(&config).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "recurdo=debug,recurdo_core=debug"
    } else {
        "recurdo=info,recurdo_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::Validation(validation) => {
                eprintln!("{} {}", "Error:".style(error_style), validation);
                eprintln!(
                    "  Fix task {} and run again.",
                    validation.task().to_string().yellow()
                );
            }
            CoreError::InvalidRecurrenceLabel { label, reason } => {
                eprintln!(
                    "{} Bad label name {}: {}",
                    "Error:".style(error_style),
                    label.yellow(),
                    reason
                );
            }
            CoreError::Api { status, body } => {
                eprintln!(
                    "{} Task service returned HTTP {}: {}",
                    "Error:".style(error_style),
                    status.yellow(),
                    body
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), core_error),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
