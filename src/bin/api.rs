//! Turnout API Server
//!
//! Run with: cargo run --bin turnout-api
//!
//! # Configuration
//!
//! Read from the first config file found (see `turnout-cli config`), with
//! environment overrides:
//! - `TURNOUT_REMOTE_URL`: Remote JSON document (unset: offline)
//! - `TURNOUT_REMOTE_TIMEOUT_SECS`: Remote request timeout
//! - `TURNOUT_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TURNOUT_API_PORT`: Port to listen on (default: 8086)
//! - `TURNOUT_NOTIFY_TTL_MS`: Notification lifetime (default: 4000)
//! - `TURNOUT_LOG_LEVEL`, `TURNOUT_LOG_FORMAT`, `RUST_LOG`: Logging

use std::path::PathBuf;
use std::sync::Arc;

use turnout::api::{serve, AppState};
use turnout::config::Config;
use turnout::logging;
use turnout::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // An explicit config path may be given as the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref())?;

    logging::init(&config.logging);
    tracing::info!("Starting Turnout API server v{}", env!("CARGO_PKG_VERSION"));

    match &config.remote.url {
        Some(url) => tracing::info!("Remote document: {}", url),
        None => tracing::info!("Remote sync disabled (set TURNOUT_REMOTE_URL to enable)"),
    }

    let session = Arc::new(Session::from_config(&config)?);

    // Initial load; failures are logged and the server starts empty
    session.start().await;
    tracing::info!("Loaded {} records", session.record_count().await);

    let state = AppState::new(Arc::clone(&session), config.api.clone());
    serve(state, &config.api).await?;

    tracing::info!("Turnout API server stopped");
    Ok(())
}
