//! stress-ui - Stress-test results viewer
//!
//! Serves the run directories written by the stress test tool as JSON and
//! HTML. Never writes to the results directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stress_common::config::{load_dotenv, Settings, SettingsOverrides, TomlConfig};
use stress_ui::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for stress-ui
///
/// Settings flags fall back to PROJECT_NAME, RESULT_DIR, STRESS_UI_HOST and
/// STRESS_UI_PORT, then the config file, then compiled defaults.
#[derive(Parser, Debug)]
#[command(name = "stress-ui")]
#[command(about = "Read-only web viewer for stress-test run results")]
#[command(version)]
struct Args {
    /// Root directory containing one subdirectory per run
    #[arg(short, long)]
    result_dir: Option<PathBuf>,

    /// Display name used in page titles
    #[arg(long)]
    project_name: Option<String>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML config file
    #[arg(short, long, env = "STRESS_UI_CONFIG")]
    config: Option<PathBuf>,

    /// .env file to load (default: search from the working directory)
    #[arg(long)]
    env_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            project_name: self.project_name.clone(),
            result_dir: self.result_dir.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stress_ui=info,stress_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting stress-ui v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // .env goes into the process environment before environment overrides are read
    load_dotenv(args.env_file.as_deref());

    let file_config = TomlConfig::load_or_default(args.config.as_deref());
    let overrides = args.overrides().or(SettingsOverrides::from_env());
    let settings = Settings::resolve(overrides, file_config);

    info!("Project: {}", settings.project_name);
    info!("Results directory: {}", settings.result_dir.display());
    if !settings.result_dir.is_dir() {
        info!("Results directory does not exist yet; run list will be empty");
    }

    let addr = settings.bind_address();
    let app = build_router(AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("stress-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
