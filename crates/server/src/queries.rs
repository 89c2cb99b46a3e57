//! Dashboard, listing and search endpoints

use api_types::{
    Health,
    record::{ListLimit, RecordView, SearchQuery},
    stats::Dashboard,
};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::DEFAULT_LIMIT;

use crate::{ServerError, records::views, server::ServerState};

/// Handle requests for the dashboard totals
pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<Dashboard>, ServerError> {
    let summary = state.engine.dashboard_summary().await?;

    Ok(Json(Dashboard {
        month_records: summary.month_count,
        total_amount: summary.total_amount.to_decimal(),
    }))
}

pub async fn last_records(
    State(state): State<ServerState>,
    Query(query): Query<ListLimit>,
) -> Json<Vec<RecordView>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    views(state.engine.last_n(limit).await)
}

pub async fn top_expenses(
    State(state): State<ServerState>,
    Query(query): Query<ListLimit>,
) -> Json<Vec<RecordView>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    views(state.engine.top_expenses(limit).await)
}

pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<RecordView>>, ServerError> {
    let term = query.s.unwrap_or_default();
    let found = state.engine.search(&term).await?;
    Ok(views(found))
}

pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        records: state.engine.len().await,
    })
}
