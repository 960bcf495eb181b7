//! Execution router for validated learner SQL
//!
//! Runs validated text verbatim against the restricted learner pool and
//! converts every store-level failure into a structured error carrying
//! the store's own message. Nothing here ever touches the owner pool.
//!
//! Rows are decoded dynamically: the learner's column set is unknown
//! ahead of time, so each value is decoded by its PostgreSQL type into a
//! JSON value, with a textual fallback for exotic types.

use std::time::Instant;

use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row, TypeInfo, ValueRef};

use super::errors::{SandboxError, SandboxResult};
use super::limit::apply_limit;
use super::result::{ExecutionResult, ResultRow};

/// Executes validated learner queries against the restricted pool
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    learner: PgPool,
    row_cap: usize,
}

impl QueryExecutor {
    /// Creates an executor over the learner pool with the given row cap
    pub fn new(learner: PgPool, row_cap: usize) -> Self {
        Self { learner, row_cap }
    }

    /// Returns the configured row cap
    pub fn row_cap(&self) -> usize {
        self.row_cap
    }

    /// Executes a validated query with the row cap injected.
    ///
    /// The result never carries more than `row_cap` rows; `truncated` is
    /// true iff exactly `row_cap` rows came back.
    pub async fn execute(&self, query: &str) -> SandboxResult<ExecutionResult> {
        let bounded = apply_limit(query, self.row_cap);
        let started = Instant::now();
        let rows = sqlx::query(&bounded).fetch_all(&self.learner).await?;
        let result = rows_to_result(&rows, self.row_cap)?;
        tracing::debug!(
            rows = result.row_count,
            truncated = result.truncated,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "query executed"
        );
        Ok(result)
    }

    /// Runs the query under `EXPLAIN (FORMAT JSON)` and returns the plan
    /// opaquely. No limit injection: plans are inherently bounded.
    pub async fn explain(&self, query: &str) -> SandboxResult<Value> {
        let statement = explain_statement(query);
        let row = sqlx::query(&statement).fetch_one(&self.learner).await?;
        let plan: Value = row
            .try_get(0)
            .map_err(|e| SandboxError::Execution(e.to_string()))?;
        Ok(plan)
    }
}

/// Wraps a validated query with the JSON-format EXPLAIN directive
fn explain_statement(query: &str) -> String {
    format!("EXPLAIN (FORMAT JSON) {}", query.trim())
}

/// Clamps a result to the row cap. The injected LIMIT normally keeps the
/// store from returning more than `cap` rows, but a learner query carrying
/// its own larger LIMIT bypasses the injector, so the executor clamps as
/// well. `truncated` is true iff the clamped count equals the cap.
pub fn bounded_row_count(total: usize, cap: usize) -> (usize, bool) {
    let returned = total.min(cap);
    (returned, returned == cap)
}

fn rows_to_result(rows: &[PgRow], cap: usize) -> SandboxResult<ExecutionResult> {
    let (row_count, truncated) = bounded_row_count(rows.len(), cap);

    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();

    let mut decoded = Vec::with_capacity(row_count);
    for row in &rows[..row_count] {
        let mut object = ResultRow::new();
        for (idx, column) in row.columns().iter().enumerate() {
            let value = decode_value(row, idx, column.type_info().name())?;
            object.insert(column.name().to_string(), value);
        }
        decoded.push(object);
    }

    Ok(ExecutionResult {
        columns,
        rows: decoded,
        row_count,
        truncated,
    })
}

/// Decodes a single column value into JSON by its PostgreSQL type name
fn decode_value(row: &PgRow, idx: usize, type_name: &str) -> SandboxResult<Value> {
    let raw = row
        .try_get_raw(idx)
        .map_err(|e| SandboxError::Execution(e.to_string()))?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOL" => Value::Bool(row.try_get::<bool, _>(idx)?),
        "INT2" => Value::from(row.try_get::<i16, _>(idx)? as i64),
        "INT4" => Value::from(row.try_get::<i32, _>(idx)? as i64),
        "INT8" => Value::from(row.try_get::<i64, _>(idx)?),
        "FLOAT4" => float_value(row.try_get::<f32, _>(idx)? as f64),
        "FLOAT8" => float_value(row.try_get::<f64, _>(idx)?),
        // Decimals are carried as strings to avoid precision loss
        "NUMERIC" => Value::String(row.try_get::<rust_decimal::Decimal, _>(idx)?.to_string()),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => Value::String(row.try_get::<String, _>(idx)?),
        "UUID" => Value::String(row.try_get::<uuid::Uuid, _>(idx)?.to_string()),
        "DATE" => Value::String(row.try_get::<chrono::NaiveDate, _>(idx)?.to_string()),
        "TIME" => Value::String(row.try_get::<chrono::NaiveTime, _>(idx)?.to_string()),
        "TIMESTAMP" => Value::String(row.try_get::<chrono::NaiveDateTime, _>(idx)?.to_string()),
        "TIMESTAMPTZ" => Value::String(
            row.try_get::<chrono::DateTime<chrono::Utc>, _>(idx)?
                .to_rfc3339(),
        ),
        "JSON" | "JSONB" => row.try_get::<Value, _>(idx)?,
        // Exotic types: textual fallback, null when even that fails
        _ => row
            .try_get::<String, _>(idx)
            .map(Value::String)
            .unwrap_or(Value::Null),
    };
    Ok(value)
}

/// NaN and infinity have no JSON representation
fn float_value(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_statement_wrapping() {
        assert_eq!(
            explain_statement("SELECT * FROM orders"),
            "EXPLAIN (FORMAT JSON) SELECT * FROM orders"
        );
        assert_eq!(
            explain_statement("  SELECT 1  "),
            "EXPLAIN (FORMAT JSON) SELECT 1"
        );
    }

    #[test]
    fn test_bounded_row_count_clamps_at_cap() {
        // A learner-supplied LIMIT above the cap can deliver more rows
        // than the injector would; the clamp bounds them regardless
        assert_eq!(bounded_row_count(2000, 1000), (1000, true));
        assert_eq!(bounded_row_count(1000, 1000), (1000, true));
        assert_eq!(bounded_row_count(999, 1000), (999, false));
        assert_eq!(bounded_row_count(0, 1000), (0, false));
    }

    #[test]
    fn test_float_value_handles_non_finite() {
        assert_eq!(float_value(1.5), serde_json::json!(1.5));
        assert_eq!(float_value(f64::NAN), Value::Null);
        assert_eq!(float_value(f64::INFINITY), Value::Null);
    }
}
