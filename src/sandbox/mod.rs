//! # Query sandbox
//!
//! The core of sqldojo: a textual safety gate plus a privilege- and
//! resource-isolated execution path for untrusted learner SQL.
//!
//! Control flow on the learner path: raw text goes through the lexical
//! [`validator`], the row cap is injected by [`limit`], and the
//! [`executor`] runs the result against the restricted learner pool.
//! Reset requests bypass validation entirely and go straight to the
//! [`reset`] coordinator on the owner pool.
//!
//! `QuerySandbox` is the facade the HTTP layer and CLI talk to; it owns
//! the pipeline ordering, so a query that fails validation can never
//! reach a connection pool.

pub mod errors;
pub mod executor;
pub mod limit;
pub mod pools;
pub mod reset;
pub mod result;
pub mod validator;

use serde_json::Value;

pub use errors::{SandboxError, SandboxResult};
pub use executor::QueryExecutor;
pub use pools::SandboxPools;
pub use reset::{ResetCoordinator, RetryPolicy, SeedReport};
pub use result::ExecutionResult;

/// Facade over the validate → limit → execute pipeline and the reset
/// coordinator. One instance is shared by all requests; the pools inside
/// are the only shared state.
#[derive(Debug, Clone)]
pub struct QuerySandbox {
    executor: QueryExecutor,
    coordinator: ResetCoordinator,
}

impl QuerySandbox {
    /// Wires the sandbox from its two pools
    pub fn new(pools: SandboxPools, row_cap: usize) -> Self {
        Self {
            executor: QueryExecutor::new(pools.learner, row_cap),
            coordinator: ResetCoordinator::new(pools.owner),
        }
    }

    /// Validates and executes learner SQL on the restricted pool
    pub async fn run_query(&self, query: &str) -> SandboxResult<ExecutionResult> {
        if let Err(err) = validator::validate(query) {
            tracing::info!(reason = %err, "query rejected");
            return Err(err);
        }
        self.executor.execute(query).await
    }

    /// Validates learner SQL and returns its JSON query plan
    pub async fn explain_query(&self, query: &str) -> SandboxResult<Value> {
        if let Err(err) = validator::validate(query) {
            tracing::info!(reason = %err, "explain rejected");
            return Err(err);
        }
        self.executor.explain(query).await
    }

    /// Interactive dataset reset; failures surface immediately
    pub async fn reset(&self) -> SandboxResult<()> {
        self.coordinator.reset().await
    }

    /// Startup seeding with bounded retry against a not-yet-ready store
    pub async fn seed_with_retry(&self, policy: &RetryPolicy) -> SandboxResult<SeedReport> {
        self.coordinator.seed_with_retry(policy).await
    }
}
