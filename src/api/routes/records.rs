//! Record Routes
//!
//! - GET /api/v1/records?q= - Search records by name or serial
//! - POST /api/v1/records - Submit the Add form

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{SearchQuery, SearchResponse, SubmitResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::record::RecordDraft;

/// GET /api/v1/records?q=
///
/// An empty or missing term returns every record.
pub async fn search_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let term = query.q.unwrap_or_default();
    let hits = state.session.search(&term).await;

    Json(SearchResponse {
        term,
        count: hits.len(),
        hits,
    })
}

/// POST /api/v1/records
///
/// Rejects incomplete drafts with 400. A saved record whose push failed is
/// still a 201; `synced` tells the two apart.
pub async fn submit_record(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<RecordDraft>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let submission = state.session.submit(draft).await?;

    let status = if submission.synced { "saved" } else { "saved_locally" };
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            status: status.to_string(),
            record: submission.record,
            synced: submission.synced,
        }),
    ))
}
