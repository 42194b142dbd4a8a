//! HTTP API handlers for stress-ui

pub mod health;
pub mod runs;
pub mod ui;

pub use health::health_routes;
pub use runs::runs_routes;
pub use ui::ui_routes;

use crate::ApiResult;

/// Run a blocking filesystem read on the blocking thread pool
pub async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> stress_common::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}
