//! CLI module for sqldojo
//!
//! Provides the command-line interface:
//! - serve: seed the dataset and run the sandbox API server
//! - seed: one-shot startup seed runner with bounded retry
//! - query: one-shot query execution
//! - explain: one-shot explain execution

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{explain, query, run_command, seed, serve};
pub use errors::{CliError, CliResult};

use tracing_subscriber::EnvFilter;

/// Parse arguments, initialize logging, and dispatch
pub async fn run() -> CliResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sqldojo=info")),
        )
        .init();

    let cli = Cli::parse_args();
    run_command(cli.command).await
}
