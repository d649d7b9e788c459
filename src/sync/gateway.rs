//! Sync Gateway
//!
//! Mirrors the store to the remote document, wholesale in both directions.
//! A pull replaces the store; a push overwrites the remote. There is no
//! merge, no version check and no retry: concurrent writers overwrite each
//! other and the last write to land wins.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::error::SyncResult;
use crate::notify::Notifications;
use crate::store::Store;
use crate::sync::codec::{decode_document, encode_document};
use crate::sync::remote::DocumentStore;

/// Which way a sync went
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Pull,
    Push,
}

/// Outcome of one pull or push
#[derive(Debug, Clone, Serialize)]
pub struct SyncStatus {
    pub direction: Direction,
    /// When the operation finished (ms since epoch)
    pub timestamp: i64,
    /// Records read or written
    pub records: usize,
    pub duration_ms: u64,
    pub success: bool,
    pub error: Option<String>,
}

/// What the gateway remembers about past syncs
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncState {
    /// Timestamp of the last successful pull
    pub last_pull_timestamp: Option<i64>,
    /// Timestamp of the last successful push
    pub last_push_timestamp: Option<i64>,
    pub last_pull: Option<SyncStatus>,
    pub last_push: Option<SyncStatus>,
}

/// Whole-document sync between a [`Store`] and a [`DocumentStore`]
pub struct SyncGateway {
    remote: Arc<dyn DocumentStore>,
    notifications: Notifications,
    state: RwLock<SyncState>,
}

impl SyncGateway {
    pub fn new(remote: Arc<dyn DocumentStore>, notifications: Notifications) -> Self {
        Self {
            remote,
            notifications,
            state: RwLock::new(SyncState::default()),
        }
    }

    pub fn remote(&self) -> &dyn DocumentStore {
        self.remote.as_ref()
    }

    pub async fn state(&self) -> SyncState {
        self.state.read().await.clone()
    }

    /// Read the remote document and replace the store with it.
    ///
    /// On failure the store is left exactly as it was. Either way the user
    /// gets a notification; the error is also returned for callers that
    /// care.
    pub async fn pull(&self, store: &RwLock<Store>) -> SyncResult<usize> {
        let start = Instant::now();

        let result = match self.remote.read().await {
            Ok(body) => decode_document(&body),
            Err(e) => Err(e),
        };

        match result {
            Ok(records) => {
                let count = records.len();
                store.write().await.replace_all(records);

                tracing::info!(
                    remote = self.remote.location(),
                    records = count,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Pulled remote document"
                );
                self.record(Direction::Pull, start, count, None).await;
                self.notifications.info("Data loaded from cloud").await;
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(remote = self.remote.location(), error = %e, "Pull failed");
                self.record(Direction::Pull, start, 0, Some(e.to_string())).await;
                self.notifications.failure("Could not load data").await;
                Err(e)
            }
        }
    }

    /// Overwrite the remote document with the store's current contents.
    ///
    /// The snapshot is taken before the write is issued; the store lock is
    /// not held across the network call. A failed push does not touch the
    /// store.
    pub async fn push(&self, store: &RwLock<Store>) -> SyncResult<usize> {
        let start = Instant::now();
        let snapshot = store.read().await.snapshot();
        let count = snapshot.len();

        let result = match encode_document(&snapshot) {
            Ok(body) => self.remote.write(body).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    remote = self.remote.location(),
                    records = count,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Pushed store to remote"
                );
                self.record(Direction::Push, start, count, None).await;
                self.notifications.info("Synced with cloud").await;
                Ok(count)
            }
            Err(e) => {
                tracing::error!(remote = self.remote.location(), error = %e, "Push failed");
                self.record(Direction::Push, start, 0, Some(e.to_string())).await;
                self.notifications.failure("Failed to sync").await;
                Err(e)
            }
        }
    }

    async fn record(&self, direction: Direction, start: Instant, records: usize, error: Option<String>) {
        let now = Utc::now().timestamp_millis();
        let status = SyncStatus {
            direction,
            timestamp: now,
            records,
            duration_ms: start.elapsed().as_millis() as u64,
            success: error.is_none(),
            error,
        };

        let mut state = self.state.write().await;
        match direction {
            Direction::Pull => {
                if status.success {
                    state.last_pull_timestamp = Some(now);
                }
                state.last_pull = Some(status);
            }
            Direction::Push => {
                if status.success {
                    state.last_push_timestamp = Some(now);
                }
                state.last_push = Some(status);
            }
        }
    }
}
