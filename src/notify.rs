//! Transient notifications
//!
//! Status messages ("Record saved.", "Failed to sync", ...) that disappear
//! on their own after a fixed delay. Notifications stack; there is no
//! deduplication and no cap on how many are visible at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default lifetime of a notification
pub const DEFAULT_TTL: Duration = Duration::from_millis(4000);

/// Visual tone of a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// A local action succeeded
    Success,
    /// Data arrived or left (sync activity)
    Info,
    /// Something failed; the session carries on
    Failure,
}

impl Tone {
    pub fn glyph(&self) -> &'static str {
        match self {
            Tone::Success => "✅",
            Tone::Info => "☁️",
            Tone::Failure => "⚠️",
        }
    }
}

/// A visible notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub tone: Tone,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tone.glyph(), self.message)
    }
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    visible: Vec<(Notification, Instant)>,
}

/// Shared handle to the notification area.
///
/// Cheap to clone; every clone posts to the same board.
#[derive(Debug, Clone)]
pub struct Notifications {
    board: Arc<Mutex<Board>>,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifications {
    /// Create a notification area whose messages live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(Board::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Post a notification and schedule its removal.
    ///
    /// Returns the notification id.
    pub async fn notify(&self, tone: Tone, message: impl Into<String>) -> u64 {
        let message = message.into();
        let expires_at = Instant::now() + self.ttl;

        let id = {
            let mut board = self.board.lock().await;
            board.next_id += 1;
            let id = board.next_id;
            board.visible.push((
                Notification {
                    id,
                    tone,
                    message: message.clone(),
                    created_at: Utc::now(),
                },
                expires_at,
            ));
            id
        };

        tracing::debug!(id, tone = ?tone, message = %message, "Notification posted");

        let board = Arc::clone(&self.board);
        tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            board.lock().await.visible.retain(|(n, _)| n.id != id);
        });

        id
    }

    pub async fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(Tone::Success, message).await
    }

    pub async fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(Tone::Info, message).await
    }

    pub async fn failure(&self, message: impl Into<String>) -> u64 {
        self.notify(Tone::Failure, message).await
    }

    /// Visible notifications, oldest first.
    ///
    /// Anything past its deadline is hidden even if the removal task has
    /// not run yet.
    pub async fn active(&self) -> Vec<Notification> {
        let now = Instant::now();
        let mut board = self.board.lock().await;
        board.visible.retain(|(_, expires_at)| *expires_at > now);
        board.visible.iter().map(|(n, _)| n.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_ttl() {
        let notes = Notifications::default();
        notes.success("Record saved.").await;

        tokio::time::advance(Duration::from_millis(3999)).await;
        assert_eq!(notes.active().await.len(), 1);

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(notes.active().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_stack_without_dedup() {
        let notes = Notifications::new(Duration::from_secs(4));
        notes.failure("Failed to sync").await;
        tokio::time::advance(Duration::from_secs(1)).await;
        notes.failure("Failed to sync").await;
        notes.info("Data loaded from cloud").await;

        let active = notes.active().await;
        let messages: Vec<&str> = active.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Failed to sync", "Failed to sync", "Data loaded from cloud"]);

        // The first one goes, the later two stay
        tokio::time::advance(Duration::from_millis(3500)).await;
        assert_eq!(notes.active().await.len(), 2);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(notes.active().await.is_empty());
    }

    #[tokio::test]
    async fn test_display_includes_glyph() {
        let notes = Notifications::default();
        notes.success("Record saved.").await;

        let active = notes.active().await;
        assert_eq!(active[0].to_string(), "✅ Record saved.");
        assert_eq!(active[0].tone, Tone::Success);
    }
}
