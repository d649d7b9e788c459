//! Remote Sync
//!
//! Keeps the in-memory store and the remote JSON document in step, one
//! whole document at a time.
//!
//! ## Architecture
//!
//! - **DocumentStore**: whole-document GET/PUT seam (HTTP or in-memory)
//! - **Codec**: JSON array on the way out, lenient decoding on the way in
//! - **SyncGateway**: `pull` (remote → store) and `push` (store → remote)
//!
//! ## Data Flow
//!
//! 1. "Sync now" pulls the remote document and replaces the store
//! 2. Every successful Add pushes the full store to the remote
//! 3. Each outcome is posted as a transient notification

mod codec;
mod gateway;
mod memory;
mod remote;

pub use codec::{decode_document, encode_document};
pub use gateway::{Direction, SyncGateway, SyncState, SyncStatus};
pub use memory::MemoryDocumentStore;
pub use remote::{DocumentStore, HttpDocumentStore};
