//! Session
//!
//! The application state for one running tracker: the record store, the
//! current page, what the user has typed, the notification area and the
//! sync gateway. Every user action is a method here; front ends (terminal,
//! HTTP) only translate input into these calls and render the resulting
//! [`View`].

use chrono::Local;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{SyncResult, ValidationError};
use crate::notify::Notifications;
use crate::record::{Record, RecordDraft};
use crate::store::Store;
use crate::sync::{DocumentStore, HttpDocumentStore, MemoryDocumentStore, SyncGateway};
use crate::view::{self, ChartView, Page, PageInput, Router, SearchHit, View};

/// Result of a successful Add
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// The record as appended to the store
    pub record: Record,
    /// Whether the follow-up push reached the remote
    pub synced: bool,
}

pub struct Session {
    store: RwLock<Store>,
    router: RwLock<Router>,
    input: RwLock<PageInput>,
    notifications: Notifications,
    gateway: SyncGateway,
}

impl Session {
    /// Empty session syncing against `remote`
    pub fn new(remote: Arc<dyn DocumentStore>, notifications: Notifications) -> Self {
        Self {
            store: RwLock::new(Store::new()),
            router: RwLock::new(Router::new()),
            input: RwLock::new(PageInput::default()),
            gateway: SyncGateway::new(remote, notifications.clone()),
            notifications,
        }
    }

    /// Build a session from configuration.
    ///
    /// Without a remote URL the session runs offline against an in-process
    /// document.
    pub fn from_config(config: &Config) -> SyncResult<Self> {
        let remote: Arc<dyn DocumentStore> = match &config.remote.url {
            Some(url) => Arc::new(HttpDocumentStore::new(url.clone(), config.remote.timeout())?),
            None => {
                tracing::warn!("No remote URL configured, running offline");
                Arc::new(MemoryDocumentStore::default())
            }
        };

        tracing::info!(
            remote = remote.location(),
            kind = remote.kind(),
            "Session created"
        );

        Ok(Self::new(remote, Notifications::new(config.notifications.ttl())))
    }

    /// Load the remote document once and render the initial page.
    ///
    /// A failed load is reported through the notification area; the
    /// session starts with an empty store.
    pub async fn start(&self) -> View {
        let _ = self.gateway.pull(&self.store).await;
        self.current_view().await
    }

    /// Switch page and render it.
    ///
    /// Entering Add from another page starts from an empty form.
    pub async fn navigate(&self, page: Page) -> View {
        let previous = {
            let mut router = self.router.write().await;
            let previous = router.current();
            router.navigate(page);
            previous
        };

        if page == Page::Add && previous != Page::Add {
            self.input.write().await.draft = RecordDraft::default();
        }

        self.current_view().await
    }

    /// Update the search box; the Search page re-filters immediately
    pub async fn set_search(&self, term: impl Into<String>) -> View {
        self.input.write().await.search_term = term.into();
        self.navigate(Page::Search).await
    }

    /// Replace the Add form contents without submitting
    pub async fn update_draft(&self, draft: RecordDraft) -> View {
        self.router.write().await.navigate(Page::Add);
        self.input.write().await.draft = draft;
        self.current_view().await
    }

    /// Submit the Add form.
    ///
    /// A blank required field rejects the draft: nothing is appended and
    /// nothing is pushed. Otherwise the record is appended, the form is
    /// cleared and the whole store is pushed. A failed push keeps the record
    /// locally; `synced` reports the outcome.
    pub async fn submit(&self, draft: RecordDraft) -> Result<Submission, ValidationError> {
        let record = match draft.clone().into_record(&Local::now()) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "Draft rejected");
                self.input.write().await.draft = draft;
                return Err(e);
            }
        };

        self.store.write().await.append(record.clone());
        tracing::info!(name = %record.name, serial = %record.serial, "Record added");

        self.notifications.success("Record saved.").await;
        self.input.write().await.draft = RecordDraft::default();

        let synced = self.gateway.push(&self.store).await.is_ok();
        Ok(Submission { record, synced })
    }

    /// Pull the remote document, replacing the store.
    ///
    /// Returns the number of records loaded.
    pub async fn sync_now(&self) -> SyncResult<usize> {
        self.gateway.pull(&self.store).await
    }

    /// Render the current page from the current store
    pub async fn current_view(&self) -> View {
        let page = self.page().await;
        let store = self.store.read().await;
        let input = self.input.read().await;
        view::render(page, &store, &input)
    }

    pub async fn page(&self) -> Page {
        self.router.read().await.current()
    }

    /// Search hits without changing page or search box
    pub async fn search(&self, term: &str) -> Vec<SearchHit> {
        self.store.read().await.search(term).map(SearchHit::from).collect()
    }

    /// Snapshot of every record in store order
    pub async fn records(&self) -> Vec<Record> {
        self.store.read().await.snapshot()
    }

    pub async fn record_count(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn chart(&self) -> ChartView {
        view::chart_page(&*self.store.read().await)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn gateway(&self) -> &SyncGateway {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::decode_document;

    fn offline(document: &str) -> (Session, Arc<MemoryDocumentStore>) {
        let remote = Arc::new(MemoryDocumentStore::new(document));
        let session = Session::new(remote.clone(), Notifications::default());
        (session, remote)
    }

    fn jane() -> RecordDraft {
        RecordDraft {
            name: "Jane Doe".to_string(),
            serial: "1234".to_string(),
            item: "Helmet".to_string(),
            cleaned_by: "Jane Doe".to_string(),
            inspection: true,
        }
    }

    #[tokio::test]
    async fn test_start_pulls_and_shows_search() {
        let (session, remote) = offline(r#"[{"name":"Sam","serial":"9","item":"Coat"}]"#);

        let view = session.start().await;

        assert_eq!(remote.read_count(), 1);
        match view {
            View::Search(search) => assert_eq!(search.hits.len(), 1),
            other => panic!("expected search view, got {:?}", other.page()),
        }
    }

    #[tokio::test]
    async fn test_empty_name_neither_appends_nor_pushes() {
        let (session, remote) = offline("null");
        let draft = RecordDraft {
            name: "   ".to_string(),
            ..jane()
        };

        session.update_draft(draft.clone()).await;
        let err = session.submit(draft).await.unwrap_err();

        assert_eq!(err, ValidationError::MissingField(crate::record::Field::Name));
        assert!(session.records().await.is_empty());
        assert_eq!(remote.write_count(), 0);

        // The rejected input stays in the form
        match session.current_view().await {
            View::Add(add) => {
                assert!(!add.can_submit);
                assert_eq!(add.fields[1].value, "1234");
            }
            other => panic!("expected add view, got {:?}", other.page()),
        }
    }

    #[tokio::test]
    async fn test_reentering_add_shows_empty_form() {
        let (session, _remote) = offline("null");
        session
            .update_draft(RecordDraft {
                name: "Half typed".to_string(),
                ..Default::default()
            })
            .await;

        // Navigating to the page already showing keeps the draft
        match session.navigate(Page::Add).await {
            View::Add(add) => assert_eq!(add.fields[0].value, "Half typed"),
            other => panic!("expected add view, got {:?}", other.page()),
        }

        session.navigate(Page::Logs).await;
        match session.navigate(Page::Add).await {
            View::Add(add) => {
                assert!(add.fields.iter().all(|f| f.value.is_empty()));
                assert!(!add.inspection);
            }
            other => panic!("expected add view, got {:?}", other.page()),
        }
    }

    #[tokio::test]
    async fn test_jane_doe_add_pushes_full_store() {
        let (session, remote) = offline("null");

        let submission = session.submit(jane()).await.unwrap();

        assert!(submission.synced);
        assert!(submission.record.inspection);
        assert!(submission.record.timestamp > 0);

        let records = session.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], submission.record);

        let pushed = decode_document(&remote.document().await).unwrap();
        assert_eq!(pushed, records);

        let messages: Vec<String> = session
            .notifications()
            .active()
            .await
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["Record saved.", "Synced with cloud"]);
    }

    #[tokio::test]
    async fn test_failed_push_keeps_record() {
        let (session, remote) = offline("null");
        remote.fail_writes(true);

        let submission = session.submit(jane()).await.unwrap();

        assert!(!submission.synced);
        assert_eq!(session.records().await.len(), 1);
        assert!(session
            .notifications()
            .active()
            .await
            .iter()
            .any(|n| n.message == "Failed to sync"));
    }

    #[tokio::test]
    async fn test_submit_clears_form() {
        let (session, _remote) = offline("null");
        session.update_draft(jane()).await;
        session.submit(jane()).await.unwrap();

        match session.navigate(Page::Add).await {
            View::Add(add) => {
                assert!(add.fields.iter().all(|f| f.value.is_empty()));
                assert!(!add.inspection);
            }
            other => panic!("expected add view, got {:?}", other.page()),
        }
    }

    #[tokio::test]
    async fn test_sync_now_replaces_store() {
        let (session, remote) = offline("null");
        session.submit(jane()).await.unwrap();

        remote
            .set_document(r#"{"0":{"name":"A"},"2":{"name":"C"},"1":{"name":"B"}}"#)
            .await;
        assert_eq!(session.sync_now().await.unwrap(), 3);

        let names: Vec<String> = session.records().await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_set_search_filters_and_navigates() {
        let (session, _remote) = offline("null");
        session.submit(jane()).await.unwrap();
        session.navigate(Page::Logs).await;

        match session.set_search("JANE").await {
            View::Search(search) => {
                assert_eq!(search.term, "JANE");
                assert_eq!(search.hits.len(), 1);
            }
            other => panic!("expected search view, got {:?}", other.page()),
        }
        assert_eq!(session.page().await, Page::Search);
        assert!(session.search("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_config_uses_memory_document() {
        let session = Session::from_config(&Config::default()).unwrap();
        assert_eq!(session.gateway().remote().kind(), "memory");
        assert_eq!(session.chart().await.labels.len(), 0);
    }
}
