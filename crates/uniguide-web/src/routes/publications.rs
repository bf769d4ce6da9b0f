//! Publications table route handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uniguide_core::dashboard::PUBLICATION_EDITABLE;

use crate::state::AppState;
use crate::view::{SaveRequest, SaveResponse, SearchParams, TableView};

pub async fn list_publications(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(params): Query<SearchParams>,
) -> Json<TableView> {
    let table = state
        .dashboard
        .publications(&keyword, params.search.as_deref())
        .await;
    Json(TableView::new(&table, &[PUBLICATION_EDITABLE]))
}

/// POST - write back edited venues.
pub async fn save_publications(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Json<SaveResponse> {
    let (edited, search) = req.edited();
    let outcome = state
        .dashboard
        .save_publications(&keyword, search.as_deref(), &edited)
        .await;
    Json(SaveResponse::new(outcome, &[PUBLICATION_EDITABLE]))
}
