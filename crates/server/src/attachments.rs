//! Upload of record attachments to an external object store.
//!
//! The store only ever sees the resolved public URL. Upload failures are
//! reported here and turned into "no attachment" by the handlers.

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use uuid::Uuid;

/// A file received with a record form.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("object store answered {0}")]
    Status(reqwest::StatusCode),
}

/// Destination of uploaded attachments.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stores the file and returns the public URL it can be fetched from.
    async fn store(&self, attachment: Attachment) -> Result<String, UploadError>;
}

/// Used when no object store is configured: files are dropped and records
/// are saved without attachment.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disabled;

#[async_trait]
impl AttachmentStore for Disabled {
    async fn store(&self, attachment: Attachment) -> Result<String, UploadError> {
        tracing::debug!(
            "attachment uploads disabled, dropping {} ({} bytes)",
            attachment.file_name,
            attachment.bytes.len()
        );
        Ok(String::new())
    }
}

/// Object store reached with a plain HTTP `PUT {base_url}/{object}`.
#[derive(Clone, Debug)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    public_url: String,
}

impl HttpObjectStore {
    /// `public_url` is the prefix of the returned links, defaulting to
    /// `base_url` when the bucket is served from the same place.
    pub fn new(base_url: &str, public_url: Option<&str>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let public_url = public_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url.clone());
        Self {
            client: reqwest::Client::new(),
            base_url,
            public_url,
        }
    }
}

#[async_trait]
impl AttachmentStore for HttpObjectStore {
    async fn store(&self, attachment: Attachment) -> Result<String, UploadError> {
        let object = object_name(&attachment.file_name);
        let mut request = self
            .client
            .put(format!("{}/{object}", self.base_url))
            .body(attachment.bytes);
        if let Some(content_type) = attachment.content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(UploadError::Status(response.status()));
        }

        Ok(format!("{}/{object}", self.public_url))
    }
}

/// Unique, URL-safe object name keeping the original file name readable.
fn object_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    let cleaned = if cleaned.is_empty() { "attachment" } else { cleaned };
    format!("{}-{cleaned}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::put,
    };

    use super::*;

    type Received = Arc<Mutex<Vec<(String, Option<String>, Bytes)>>>;

    async fn receive(
        State(received): State<Received>,
        Path(object): Path<String>,
        headers: HeaderMap,
        body: Bytes,
    ) -> StatusCode {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        received.lock().unwrap().push((object, content_type, body));
        StatusCode::OK
    }

    async fn spawn_bucket(status_ok: bool) -> (String, Received) {
        let received: Received = Arc::default();
        let app = if status_ok {
            Router::new()
                .route("/bucket/{object}", put(receive))
                .with_state(received.clone())
        } else {
            Router::new().route(
                "/bucket/{object}",
                put(|| async { StatusCode::FORBIDDEN }),
            )
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/bucket/"), received)
    }

    fn receipt() -> Attachment {
        Attachment {
            file_name: "receipt jan.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"\x89PNG fake"),
        }
    }

    #[test]
    fn object_name_is_url_safe() {
        let name = object_name("my receipt (1).png");
        assert!(name.ends_with("-my_receipt__1_.png"));
        assert!(object_name("..").ends_with("-attachment"));
        assert_ne!(object_name("a.png"), object_name("a.png"));
    }

    #[tokio::test]
    async fn disabled_returns_empty_url() {
        assert_eq!(Disabled.store(receipt()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn http_store_puts_bytes_and_returns_public_url() {
        let (base_url, received) = spawn_bucket(true).await;
        let store = HttpObjectStore::new(&base_url, Some("https://cdn.example.com/files/"));

        let url = store.store(receipt()).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (object, content_type, body) = &received[0];
        assert_eq!(url, format!("https://cdn.example.com/files/{object}"));
        assert!(object.ends_with("receipt_jan.png"));
        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert_eq!(body.as_ref(), b"\x89PNG fake");
    }

    #[tokio::test]
    async fn http_store_reports_rejections() {
        let (base_url, _) = spawn_bucket(false).await;
        let store = HttpObjectStore::new(&base_url, None);

        let err = store.store(receipt()).await.unwrap_err();
        assert!(matches!(err, UploadError::Status(status) if status.as_u16() == 403));
    }
}
