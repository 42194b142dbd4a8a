//! stress-ui library - Stress-test results viewer
//!
//! Read-only web front end over the run directories written by the stress
//! test tool. Serves a JSON API and HTML pages from the same router.

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use stress_common::Settings;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod results;

pub use crate::error::{ApiError, ApiResult};
use crate::results::RunStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Run directory access (read-only)
    pub store: Arc<RunStore>,
    /// Resolved settings, fixed for the life of the process
    pub settings: Arc<Settings>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create application state rooted at `settings.result_dir`
    pub fn new(settings: Settings) -> Self {
        Self {
            store: Arc::new(RunStore::new(settings.result_dir.clone())),
            settings: Arc::new(settings),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// The JSON API is reachable under both `/runs` and `/api/runs`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::runs_routes("/runs"))
        .merge(api::runs_routes("/api/runs"))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
