use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keeps recurring task trees rolled forward in your to-do list
///
/// Tasks labeled `recur_<ISO-8601 period>` (e.g. `recur_P1M`) are copied,
/// subtasks included, one period ahead until no labeled task is due before
/// the cutoff.
#[derive(Parser, Debug)]
#[command(name = "recurdo", author, version, about)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API token for the task service (defaults to $API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// ISO-8601 period defining how far in the future labeled tasks must be to not be processed
    #[arg(long, global = true, value_name = "PERIOD")]
    pub cutoff_period: Option<String>,

    /// Base URL of the task service REST API
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log every remote call
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Copy every labeled task due before the cutoff (the default)
    Run,
    /// Validate labeled tasks and list them without changing anything
    Check,
}
