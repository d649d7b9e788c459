//! Notification Routes
//!
//! - GET /api/v1/notifications - Visible notifications, oldest first

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::NotificationsResponse;
use crate::api::state::AppState;

/// GET /api/v1/notifications
pub async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        notifications: state.session.notifications().active().await,
    })
}
