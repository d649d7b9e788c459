//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Page bodies are [`View`](crate::view::View) values serialized as-is;
//! these types cover everything else.

use serde::{Deserialize, Serialize};

use crate::notify::Notification;
use crate::record::Record;
use crate::sync::SyncState;
use crate::view::SearchHit;

// ============================================
// RECORD DTOs
// ============================================

/// `?q=` search term
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Search results
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub term: String,
    pub count: usize,
    pub hits: Vec<SearchHit>,
}

/// Outcome of submitting the Add form
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// "saved" if the push reached the remote, "saved_locally" otherwise
    pub status: String,
    pub record: Record,
    pub synced: bool,
}

// ============================================
// SYNC DTOs
// ============================================

/// Sync response
#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    /// "success" or "failed"
    pub status: String,
    /// Records loaded from the remote
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sync status response
#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    /// Remote kind ("http" or "memory")
    pub remote: String,
    pub location: String,
    /// Last pull time (RFC 3339)
    pub last_pull: Option<String>,
    /// Last push time (RFC 3339)
    pub last_push: Option<String>,
    pub state: SyncState,
}

// ============================================
// NOTIFICATION DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Outcome of the last pull: "ok", "error" or "unknown"
    pub remote: String,
    pub records: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
