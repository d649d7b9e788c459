//! In-process document store
//!
//! Stands in for the remote when no URL is configured (offline mode) and
//! in tests, where it can be told to fail or to delay individual writes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::error::{SyncError, SyncResult};
use crate::sync::remote::DocumentStore;

pub struct MemoryDocumentStore {
    document: Mutex<Vec<u8>>,
    write_delays: Mutex<VecDeque<Duration>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new("null")
    }
}

impl MemoryDocumentStore {
    /// Create a store holding `document` as its body
    pub fn new(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Mutex::new(document.into()),
            write_delays: Mutex::new(VecDeque::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// Current document body
    pub async fn document(&self) -> Vec<u8> {
        self.document.lock().await.clone()
    }

    /// Replace the document behind the session's back (another writer)
    pub async fn set_document(&self, document: impl Into<Vec<u8>>) {
        *self.document.lock().await = document.into();
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay the next write by `delay` before it lands.
    ///
    /// Delays are consumed in the order writes arrive.
    pub async fn delay_next_write(&self, delay: Duration) {
        self.write_delays.lock().await.push_back(delay);
    }

    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn location(&self) -> &str {
        "memory://logs.json"
    }

    async fn read(&self) -> SyncResult<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SyncError::Unavailable("read refused".to_string()));
        }
        Ok(self.document.lock().await.clone())
    }

    async fn write(&self, body: Vec<u8>) -> SyncResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let delay = self.write_delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SyncError::Unavailable("write refused".to_string()));
        }
        *self.document.lock().await = body;
        Ok(())
    }
}
