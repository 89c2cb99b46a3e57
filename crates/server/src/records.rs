//! Record API endpoints

use api_types::{
    Message,
    record::{RecordSaved, RecordView},
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use engine::Record;

use crate::{ServerError, form::RecordForm, server::ServerState};

pub(crate) fn view(record: Record) -> RecordView {
    RecordView {
        id: record.id,
        name: record.name,
        amount: record.amount.to_decimal(),
        date: record.date,
        notes: record.notes,
        attachment: record.attachment,
    }
}

pub(crate) fn views(records: Vec<Record>) -> Json<Vec<RecordView>> {
    Json(records.into_iter().map(view).collect())
}

pub async fn list(State(state): State<ServerState>) -> Json<Vec<RecordView>> {
    views(state.engine.records().await)
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<RecordView>, ServerError> {
    let record = state.engine.record(&id).await?;
    Ok(Json(view(record)))
}

pub async fn insert(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RecordSaved>), ServerError> {
    let fields = RecordForm::read(multipart)
        .await?
        .into_fields(state.attachments.as_ref())
        .await?;
    let record = state.engine.insert(fields).await;
    tracing::debug!("inserted record {} ({})", record.id, record.amount);

    Ok((
        StatusCode::CREATED,
        Json(RecordSaved {
            message: "Insert Successful".to_string(),
            record: view(record),
        }),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<RecordSaved>, ServerError> {
    // Fail before uploading anything for an unknown id.
    state.engine.record(&id).await?;

    let fields = RecordForm::read(multipart)
        .await?
        .into_fields(state.attachments.as_ref())
        .await?;
    let record = state.engine.update(&id, fields).await?;
    tracing::debug!("updated record {} ({})", record.id, record.amount);

    Ok(Json(RecordSaved {
        message: "Update Successful".to_string(),
        record: view(record),
    }))
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Json<Message> {
    if state.engine.delete(&id).await {
        tracing::debug!("deleted record {id}");
    }

    Json(Message {
        message: "Delete successful".to_string(),
    })
}
