//! Runs JSON API
//!
//! - `GET {prefix}/` lists run ids, newest first
//! - `GET {prefix}/:run_id/environment` returns `environment.json`
//! - `GET {prefix}/:run_id/output` returns `output.jsonl` as `{"rows": [...]}`
//! - `GET {prefix}/:run_id/files` lists the files in the run directory

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::blocking;
use crate::{ApiResult, AppState};

/// Output endpoint response
#[derive(Debug, Serialize)]
pub struct OutputResponse {
    pub rows: Vec<Value>,
}

/// GET /runs/
pub async fn list_runs(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let store = state.store.clone();
    let runs = blocking(move || store.list_runs()).await?;
    Ok(Json(runs))
}

/// GET /runs/:run_id/environment
///
/// 404 if the run or file is missing, 500 if the file is not valid JSON.
pub async fn get_environment(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let store = state.store.clone();
    let environment = blocking(move || store.resolve_run(&run_id)?.read_environment()).await?;
    Ok(Json(environment))
}

/// GET /runs/:run_id/output
pub async fn get_output(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<OutputResponse>> {
    let store = state.store.clone();
    let rows = blocking(move || store.resolve_run(&run_id)?.read_output()).await?;
    Ok(Json(OutputResponse { rows }))
}

/// GET /runs/:run_id/files
pub async fn get_files(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    let store = state.store.clone();
    let files = blocking(move || store.resolve_run(&run_id)?.list_files()).await?;
    Ok(Json(files))
}

/// Build runs routes under `prefix` (no trailing slash)
///
/// The list route answers with and without the trailing slash.
pub fn runs_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, get(list_runs))
        .route(&format!("{}/", prefix), get(list_runs))
        .route(&format!("{}/:run_id/environment", prefix), get(get_environment))
        .route(&format!("{}/:run_id/output", prefix), get(get_output))
        .route(&format!("{}/:run_id/files", prefix), get(get_files))
}
