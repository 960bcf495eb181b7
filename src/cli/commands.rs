//! CLI command implementations
//!
//! `serve` is the production path: seed the dataset with the startup
//! retry protocol, then run the HTTP server. `seed` is the standalone
//! startup seed runner for orchestrated deployments (init containers,
//! health-gated boots): exit 0 on success, 1 after retry exhaustion or a
//! non-transient failure. `query`/`explain` are one-shot developer
//! conveniences over the same sandbox pipeline.

use crate::config::SandboxConfig;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::sandbox::{QuerySandbox, SandboxPools};

use super::args::Command;
use super::errors::CliResult;

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve => serve().await,
        Command::Seed => seed().await,
        Command::Query { sql } => query(&sql).await,
        Command::Explain { sql } => explain(&sql).await,
    }
}

fn build_sandbox() -> CliResult<(QuerySandbox, SandboxConfig)> {
    let config = SandboxConfig::from_env()?;
    let pools = SandboxPools::from_config(&config.database)?;
    let sandbox = QuerySandbox::new(pools, config.row_cap);
    Ok((sandbox, config))
}

/// Seed (with retry) and serve the sandbox API
pub async fn serve() -> CliResult<()> {
    let (sandbox, config) = build_sandbox()?;

    let report = sandbox.seed_with_retry(&config.retry_policy()).await?;
    tracing::info!(attempts = report.attempts, "dataset seeded");

    let server = HttpServer::with_config(HttpServerConfig::from_env(), sandbox);
    server.start().await?;
    Ok(())
}

/// Standalone startup seed runner
pub async fn seed() -> CliResult<()> {
    let (sandbox, config) = build_sandbox()?;
    let report = sandbox.seed_with_retry(&config.retry_policy()).await?;
    println!("dataset seeded after {} attempt(s)", report.attempts);
    Ok(())
}

/// One-shot query execution
pub async fn query(sql: &str) -> CliResult<()> {
    let (sandbox, _) = build_sandbox()?;
    let result = sandbox.run_query(sql).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// One-shot explain
pub async fn explain(sql: &str) -> CliResult<()> {
    let (sandbox, _) = build_sandbox()?;
    let plan = sandbox.explain_query(sql).await?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
