//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// 503 while the most recent pull has failed; the session still serves
/// its local records, but they may be stale.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match remote_health(&state).await {
        Some(false) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let remote_ok = remote_health(&state).await;

    let (status, remote) = match remote_ok {
        Some(true) => ("healthy", "ok"),
        Some(false) => ("degraded", "error"),
        None => ("healthy", "unknown"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        remote: remote.to_string(),
        records: state.session.record_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Outcome of the last pull, if any
async fn remote_health(state: &AppState) -> Option<bool> {
    state
        .session
        .gateway()
        .state()
        .await
        .last_pull
        .map(|status| status.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
