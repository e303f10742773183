//! HTTP API for the Kaution Engine.
//!
//! This module exposes a small REST API around the deposit calculator
//! using the [`axum`](https://crates.io/crates/axum) framework.  The
//! API accepts [`DepositInputs`] as JSON and answers with the computed
//! [`DepositResult`], a side-by-side comparison of every deposit type,
//! or a plain-text summary.

use crate::catalog::{DepositTypeOption, DEPOSIT_TYPES};
use crate::engine::{compare_deposit_types, compute};
use crate::error::{ApiError, ApiResult};
use crate::models::{DepositInputs, DepositResult};
use crate::report::render_summary;
use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// Application state shared across requests.  The catalog never
/// changes after start-up, so no locking is needed.
pub struct AppState {
    pub catalog: Vec<DepositTypeOption>,
}

/// Build the API router over the given catalog.
pub fn build_router(catalog: Vec<DepositTypeOption>) -> Router {
    let state = Arc::new(AppState { catalog });
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/deposit-types", get(deposit_types_handler))
        .route("/api/defaults", get(defaults_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/compare", post(compare_handler))
        .route("/api/report", post(report_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Handler for GET /api/deposit-types
async fn deposit_types_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<DepositTypeOption>> {
    Json(app_state.catalog.clone())
}

/// Handler for GET /api/defaults
async fn defaults_handler() -> Json<DepositInputs> {
    let today = chrono::Local::now().date_naive();
    Json(DepositInputs::defaults(today))
}

/// Handler for POST /api/calculate
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<DepositInputs>, JsonRejection>,
) -> ApiResult<Json<DepositResult>> {
    let Json(inputs) = payload?;
    Ok(Json(compute(inputs, &app_state.catalog)))
}

/// Handler for POST /api/compare
async fn compare_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<DepositInputs>, JsonRejection>,
) -> ApiResult<Json<Vec<DepositResult>>> {
    let Json(inputs) = payload?;
    Ok(Json(compare_deposit_types(&inputs, &app_state.catalog)))
}

/// Handler for POST /api/report
async fn report_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<DepositInputs>, JsonRejection>,
) -> ApiResult<String> {
    let Json(inputs) = payload?;
    let result = compute(inputs, &app_state.catalog);
    Ok(render_summary(&result))
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Launch the API server with the built-in catalog.  Blocks until the
/// server terminates (e.g. when interrupted).
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let router = build_router(DEPOSIT_TYPES.to_vec());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
