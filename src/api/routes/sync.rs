//! Sync Routes
//!
//! Endpoints for the remote document sync.
//!
//! - POST /api/v1/sync - Sync now (pull the remote document)
//! - GET /api/v1/sync/status - Get sync status

use axum::{extract::State, Json};
use chrono::TimeZone;
use std::sync::Arc;

use crate::api::dto::{SyncResponse, SyncStatusResponse};
use crate::api::state::AppState;

/// POST /api/v1/sync
///
/// Replaces the session's records with the remote document. A failed pull
/// is reported in the body, not as an HTTP error; the records are left as
/// they were.
pub async fn trigger_sync(State(state): State<Arc<AppState>>) -> Json<SyncResponse> {
    match state.session.sync_now().await {
        Ok(records) => {
            tracing::info!(records, "Manual sync completed");
            Json(SyncResponse {
                status: "success".to_string(),
                records,
                error: None,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Manual sync failed");
            Json(SyncResponse {
                status: "failed".to_string(),
                records: 0,
                error: Some(e.to_string()),
            })
        }
    }
}

/// GET /api/v1/sync/status
pub async fn get_sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatusResponse> {
    let gateway = state.session.gateway();
    let sync_state = gateway.state().await;

    Json(SyncStatusResponse {
        remote: gateway.remote().kind().to_string(),
        location: gateway.remote().location().to_string(),
        last_pull: sync_state.last_pull_timestamp.and_then(rfc3339),
        last_push: sync_state.last_push_timestamp.and_then(rfc3339),
        state: sync_state,
    })
}

fn rfc3339(millis: i64) -> Option<String> {
    chrono::Utc
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339() {
        assert_eq!(rfc3339(0).as_deref(), Some("1970-01-01T00:00:00+00:00"));
    }
}
