//! Remote document store
//!
//! One fixed location holding one JSON document. Reads return the whole
//! document, writes replace it unconditionally. No auth, no query
//! parameters, no conditional headers.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};

/// Whole-document GET/PUT against a single remote location
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name for logs and health output
    fn kind(&self) -> &'static str;

    /// Where the document lives
    fn location(&self) -> &str;

    /// Read the full document body
    async fn read(&self) -> SyncResult<Vec<u8>>;

    /// Replace the full document body
    async fn write(&self, body: Vec<u8>) -> SyncResult<()>;
}

/// HTTP document store (e.g. a Firebase Realtime Database `.json` URL)
pub struct HttpDocumentStore {
    client: Client,
    url: String,
}

impl HttpDocumentStore {
    /// Create a store for `url`.
    ///
    /// `timeout` of `None` leaves reqwest's default in place (no timeout).
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> SyncResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    fn kind(&self) -> &'static str {
        "http"
    }

    fn location(&self) -> &str {
        &self.url
    }

    async fn read(&self) -> SyncResult<Vec<u8>> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn write(&self, body: Vec<u8>) -> SyncResult<()> {
        let response = self
            .client
            .put(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(SyncError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Bytes, extract::State, http::StatusCode, routing::get, Router};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Minimal stand-in for the remote service: one document, GET/PUT
    async fn spawn_document_server(initial: &str) -> (String, Arc<Mutex<Vec<u8>>>) {
        let doc = Arc::new(Mutex::new(initial.as_bytes().to_vec()));

        async fn read(State(doc): State<Arc<Mutex<Vec<u8>>>>) -> Vec<u8> {
            doc.lock().await.clone()
        }

        async fn write(State(doc): State<Arc<Mutex<Vec<u8>>>>, body: Bytes) -> StatusCode {
            *doc.lock().await = body.to_vec();
            StatusCode::OK
        }

        let app = Router::new()
            .route("/logs.json", get(read).put(write))
            .route("/broken.json", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .with_state(Arc::clone(&doc));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), doc)
    }

    #[tokio::test]
    async fn test_read_and_write_roundtrip_over_http() {
        let (base, doc) = spawn_document_server("null").await;
        let store = HttpDocumentStore::new(format!("{}/logs.json", base), None).unwrap();

        assert_eq!(store.read().await.unwrap(), b"null");

        store.write(br#"[{"name":"A"}]"#.to_vec()).await.unwrap();
        assert_eq!(doc.lock().await.as_slice(), br#"[{"name":"A"}]"#);
        assert_eq!(store.read().await.unwrap(), br#"[{"name":"A"}]"#);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (base, _doc) = spawn_document_server("[]").await;
        let store = HttpDocumentStore::new(format!("{}/broken.json", base), None).unwrap();

        let err = store.read().await.unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = HttpDocumentStore::new(
            format!("http://{}/logs.json", addr),
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        assert!(matches!(store.read().await, Err(SyncError::Network(_))));
        assert!(matches!(store.write(b"[]".to_vec()).await, Err(SyncError::Network(_))));
    }
}
