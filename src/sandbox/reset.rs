//! Dataset seeding and reset under the owner role
//!
//! The seed script is the sole source of truth for dataset state after a
//! reset. It is replayed verbatim over a single owner connection using
//! the simple query protocol, so the full multi-statement script either
//! runs or fails as the store reports it.
//!
//! Two variants:
//! - `reset()` — interactive, mid-session. No retry: by that point the
//!   store is assumed available, so any failure is surfaced immediately.
//! - `seed_with_retry()` — startup. Retries only on the transient "store
//!   is not yet accepting connections" signature, sleeping a fixed delay
//!   between attempts, up to a fixed attempt bound. Any other failure, or
//!   exhausting the bound, is terminal; the CLI exits non-zero so the
//!   process never serves an unseeded dataset.

use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;

use super::errors::SandboxResult;

/// Canonical SQL establishing the practice dataset's initial state
pub const SEED_SQL: &str = include_str!("seed.sql");

/// Bounded fixed-delay retry policy for the startup seed path
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (not retries)
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_millis(2000),
        }
    }
}

/// Outcome of a successful seed run, with the attempt count observable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Attempts made, including the successful one
    pub attempts: u32,
}

/// Replays the seed script through the owner pool
#[derive(Debug, Clone)]
pub struct ResetCoordinator {
    owner: PgPool,
}

impl ResetCoordinator {
    /// Creates a coordinator over the owner pool
    pub fn new(owner: PgPool) -> Self {
        Self { owner }
    }

    /// Replays the full seed script once. Interactive variant: no retry.
    pub async fn reset(&self) -> SandboxResult<()> {
        sqlx::raw_sql(SEED_SQL).execute(&self.owner).await?;
        tracing::info!("dataset reset from seed script");
        Ok(())
    }

    /// Startup variant: replays the seed script, retrying per `policy` on
    /// the transient not-ready signature.
    pub async fn seed_with_retry(&self, policy: &RetryPolicy) -> SandboxResult<SeedReport> {
        run_with_retry(policy, || self.reset()).await
    }
}

/// Drives a fallible operation through the startup retry state machine:
/// Attempting → Succeeded, or on a transient failure → fixed-delay sleep →
/// Attempting again, or (non-transient failure | attempt bound reached) →
/// terminal error.
pub async fn run_with_retry<F, Fut>(policy: &RetryPolicy, mut op: F) -> SandboxResult<SeedReport>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SandboxResult<()>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match op().await {
            Ok(()) => return Ok(SeedReport { attempts }),
            Err(err) if err.is_transient() && attempts < policy.max_attempts => {
                tracing::warn!(
                    attempt = attempts,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    "store not ready, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
