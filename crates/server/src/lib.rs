use axum::{Json, extract::multipart::MultipartError, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use attachments::{Attachment, AttachmentStore, Disabled, HttpObjectStore, UploadError};
pub use server::{ServerState, router, run_with_listener};

mod attachments;
mod form;
mod queries;
mod records;
mod server;

pub mod types {
    pub mod record {
        pub use api_types::record::{ListLimit, RecordSaved, RecordView, SearchQuery};
    }

    pub mod stats {
        pub use api_types::stats::Dashboard;
    }

    pub use api_types::{Health, Message};
}

/// Maximum size of an uploaded attachment.
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Malformed or oversized multipart body; keeps the status axum picked.
    Multipart(MultipartError),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidArgument(_) | EngineError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        EngineError::AmountOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::KeyNotFound(_) => "Record not found".to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Multipart(err) => (err.status(), err.body_text()),
        };

        (status, Json(api_types::Message { message })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<MultipartError> for ServerError {
    fn from(value: MultipartError) -> Self {
        Self::Multipart(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_invalid_argument_maps_to_400() {
        let res =
            ServerError::from(EngineError::InvalidArgument("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_invalid_amount_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_overflow_maps_to_422() {
        let res = ServerError::from(EngineError::AmountOverflow("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_hides_the_id() {
        assert_eq!(
            message_for_engine_error(EngineError::KeyNotFound("abc".to_string())),
            "Record not found"
        );
    }
}
