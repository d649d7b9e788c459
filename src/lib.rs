//! # Turnout
//!
//! PPE cleaning tracker for fire stations. Each cleaning of turnout gear is
//! logged as a record; records are searched, listed and charted, and the
//! whole collection is mirrored to a remote JSON document.
//!
//! ## Features
//!
//! - **Record store**: ordered in-memory collection with search and tallies
//! - **Remote sync**: whole-document pull and push (Firebase-style `.json` URLs)
//! - **Pages**: Search, Add, Logs and Chart rendered from the store
//! - **Notifications**: transient status messages that expire on their own
//! - **Front ends**: interactive terminal, REST API and an API client
//!
//! ## Modules
//!
//! - [`record`]: the record type and the Add-form draft
//! - [`store`]: in-memory record collection
//! - [`sync`]: remote document store and sync gateway
//! - [`view`]: router, page renderers and terminal rendering
//! - [`notify`]: transient notifications
//! - [`session`]: the owned application state behind every front end
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use turnout::notify::Notifications;
//! use turnout::record::RecordDraft;
//! use turnout::session::Session;
//! use turnout::sync::HttpDocumentStore;
//! use turnout::view::{Page, TextRenderer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let remote = HttpDocumentStore::new("https://example.firebaseio.com/logs.json", None)?;
//!     let session = Session::new(Arc::new(remote), Notifications::default());
//!
//!     // Load the remote document once
//!     session.start().await;
//!
//!     // Add a record; the whole store is pushed afterwards
//!     session
//!         .submit(RecordDraft {
//!             name: "Jane Doe".into(),
//!             serial: "1234".into(),
//!             item: "Helmet".into(),
//!             cleaned_by: "Jane Doe".into(),
//!             inspection: true,
//!         })
//!         .await?;
//!
//!     let view = session.navigate(Page::Logs).await;
//!     print!("{}", TextRenderer::default().render(&view));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod record;
pub mod session;
pub mod store;
pub mod sync;
pub mod view;

// Re-export top-level types for convenience
pub use record::{Field, Record, RecordDraft, DATE_FORMAT};

pub use store::{Store, Tally};

pub use error::{SyncError, SyncResult, ValidationError};

pub use sync::{
    DocumentStore, Direction, HttpDocumentStore, MemoryDocumentStore, SyncGateway, SyncState,
    SyncStatus,
};

pub use notify::{Notification, Notifications, Tone};

pub use view::{Page, Router, TextRenderer, View};

pub use session::{Session, Submission};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
