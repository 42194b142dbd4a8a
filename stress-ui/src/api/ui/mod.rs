//! UI Routes - HTML pages for the results viewer
//!
//! - **Index** (`index`): all runs, newest first
//! - **Run Detail** (`run_detail`): files, environment and output of one run
//! - **Static Assets** (`static_assets`): embedded stylesheet
//! - **Layout** (`layout`): page shell, escaping, HTML error pages

use axum::{routing::get, Router};

use crate::AppState;

pub mod layout;
mod index;
mod run_detail;
mod static_assets;

use index::index_page;
use run_detail::run_detail_page;
use static_assets::serve_style_css;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(index_page))
        .route("/view/:run_id", get(run_detail_page))
        // Static assets
        .route("/static/style.css", get(serve_style_css))
}
