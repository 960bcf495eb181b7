//! CLI error types

use thiserror::Error;

use crate::sandbox::SandboxError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors; every variant exits the process with a non-zero status
#[derive(Debug, Error)]
pub enum CliError {
    /// Sandbox failure (validation, execution, connectivity, config)
    #[error("{0}")]
    Sandbox(#[from] SandboxError),

    /// Server I/O failure (bind, accept)
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    /// Result serialization failure
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
