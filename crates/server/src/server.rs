use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use engine::Engine;

use std::sync::Arc;

use crate::{MAX_ATTACHMENT_BYTES, attachments::AttachmentStore, queries, records};

/// Room for the text fields and multipart framing around the attachment.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub attachments: Arc<dyn AttachmentStore>,
}

impl ServerState {
    pub fn new(engine: Engine, attachments: impl AttachmentStore + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
            attachments: Arc::new(attachments),
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(queries::health))
        .route("/dashboard", get(queries::dashboard))
        .route("/getrecords", get(records::list))
        .route("/getlast10records", get(queries::last_records))
        .route("/gettopexpense", get(queries::top_expenses))
        .route("/getrecord/{id}", get(records::get))
        .route("/searchrecords", get(queries::search))
        .route("/insertrecord", post(records::insert))
        .route("/editrecord/{id}", put(records::update))
        .route("/deleterecord/{id}", delete(records::delete))
        .layer(DefaultBodyLimit::max(MAX_ATTACHMENT_BYTES + FORM_OVERHEAD_BYTES))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
