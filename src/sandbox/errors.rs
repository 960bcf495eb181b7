//! Sandbox error taxonomy
//!
//! Four categories with distinct recovery semantics:
//! - `Rejected`: the query failed lexical validation and never reached a
//!   connection pool. Always recoverable, reported as a structured failure.
//! - `Execution`: the store rejected or failed the statement (syntax,
//!   privilege, timeout, constraint). Recoverable at the request level;
//!   carries the store's own message verbatim.
//! - `Unavailable`: the store is unreachable or not yet accepting
//!   connections. Recoverable only through the startup seed retry path.
//! - `Config`: unrecoverable configuration failure, surfaces as process
//!   termination rather than a structured response.

use thiserror::Error;

/// Result type for sandbox operations
pub type SandboxResult<T> = Result<T, SandboxError>;

/// Sandbox errors
#[derive(Debug, Clone, Error)]
pub enum SandboxError {
    /// Query failed validation and never reached a pool
    #[error("{0}")]
    Rejected(String),

    /// Store rejected or failed the statement; message is the store's own
    #[error("{0}")]
    Execution(String),

    /// Store unreachable or not yet accepting connections
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl SandboxError {
    /// Create a validation rejection
    pub fn rejected(reason: impl Into<String>) -> Self {
        SandboxError::Rejected(reason.into())
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        SandboxError::Config(reason.into())
    }

    /// Returns true for the transient "store not ready" signature that the
    /// startup seed runner is allowed to retry on
    pub fn is_transient(&self) -> bool {
        matches!(self, SandboxError::Unavailable(_))
    }
}

/// Classifies a store error as the transient "not yet accepting
/// connections" signature: a connect-level I/O failure, a pool acquire
/// timeout, or PostgreSQL's `cannot_connect_now` (SQLSTATE 57P03, raised
/// while the server is starting up).
fn is_transient_startup(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) => true,
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db.code().as_deref() == Some("57P03"),
        _ => false,
    }
}

impl From<sqlx::Error> for SandboxError {
    fn from(err: sqlx::Error) -> Self {
        if is_transient_startup(&err) {
            return SandboxError::Unavailable(err.to_string());
        }
        match err {
            // The store's message verbatim, never a debug dump
            sqlx::Error::Database(db) => SandboxError::Execution(db.message().to_string()),
            other => SandboxError::Execution(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_rejected_is_not_transient() {
        let err = SandboxError::rejected("empty query");
        assert!(!err.is_transient());
    }

    #[test]
    fn test_unavailable_is_transient() {
        let err = SandboxError::Unavailable("connection refused".to_string());
        assert!(err.is_transient());
    }

    #[test]
    fn test_io_error_maps_to_unavailable() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let err: SandboxError = sqlx::Error::Io(io_err).into();
        assert!(err.is_transient());
        assert!(matches!(err, SandboxError::Unavailable(_)));
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err: SandboxError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, SandboxError::Unavailable(_)));
    }

    #[test]
    fn test_non_database_error_maps_to_execution() {
        let err: SandboxError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SandboxError::Execution(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_execution_display_is_verbatim() {
        let err = SandboxError::Execution("syntax error at or near \"FORM\"".to_string());
        assert_eq!(format!("{}", err), "syntax error at or near \"FORM\"");
    }
}
