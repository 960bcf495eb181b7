//! Sandbox HTTP Routes
//!
//! The wire contract consumed by the learner UI:
//! - `POST /query` — validate and execute learner SQL
//! - `POST /explain` — validate and return the JSON query plan
//! - `POST /reset` — replay the seed script (interactive, no retry)
//!
//! Validation and execution failures are structured `success: false`
//! envelopes, never handler faults; the envelope is the contract, so the
//! HTTP status stays 200 for both outcomes.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sandbox::result::ResultRow;
use crate::sandbox::{ExecutionResult, QuerySandbox, SandboxError};

// ==================
// Shared State
// ==================

/// Sandbox state shared across handlers
pub struct SandboxState {
    pub sandbox: QuerySandbox,
}

impl SandboxState {
    pub fn new(sandbox: QuerySandbox) -> Self {
        Self { sandbox }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Envelope for `POST /query`. On success `row_count`/`limited` are
/// present and `error` is absent; on failure `error` is present and
/// `rows`/`columns` are empty.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub success: bool,
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    fn ok(result: ExecutionResult) -> Self {
        Self {
            success: true,
            columns: result.columns,
            rows: result.rows,
            row_count: Some(result.row_count),
            limited: Some(result.truncated),
            error: None,
        }
    }

    fn err(err: &SandboxError) -> Self {
        Self {
            success: false,
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: None,
            limited: None,
            error: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub success: bool,
    /// The store's structured plan output, passed through opaquely
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ==================
// Routes
// ==================

/// Create sandbox routes
pub fn sandbox_routes(state: Arc<SandboxState>) -> Router {
    Router::new()
        .route("/query", post(query_handler))
        .route("/explain", post(explain_handler))
        .route("/reset", post(reset_handler))
        .with_state(state)
}

async fn query_handler(
    State(state): State<Arc<SandboxState>>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    match state.sandbox.run_query(&request.query).await {
        Ok(result) => Json(QueryResponse::ok(result)),
        Err(err) => Json(QueryResponse::err(&err)),
    }
}

async fn explain_handler(
    State(state): State<Arc<SandboxState>>,
    Json(request): Json<QueryRequest>,
) -> Json<ExplainResponse> {
    match state.sandbox.explain_query(&request.query).await {
        Ok(plan) => Json(ExplainResponse {
            success: true,
            plan: Some(plan),
            error: None,
        }),
        Err(err) => Json(ExplainResponse {
            success: false,
            plan: None,
            error: Some(err.to_string()),
        }),
    }
}

async fn reset_handler(State(state): State<Arc<SandboxState>>) -> Json<ResetResponse> {
    match state.sandbox.reset().await {
        Ok(()) => Json(ResetResponse {
            success: true,
            message: Some("dataset reset".to_string()),
            error: None,
        }),
        Err(err) => Json(ResetResponse {
            success: false,
            message: None,
            error: Some(err.to_string()),
        }),
    }
}
