//! Faculty table route handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uniguide_core::dashboard::FACULTY_EDITABLE;

use crate::state::AppState;
use crate::view::{SaveRequest, SaveResponse, SearchParams, TableView};

pub async fn list_faculty(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<SearchParams>,
) -> Json<TableView> {
    let table = state.dashboard.faculty(&name, params.search.as_deref()).await;
    Json(TableView::new(&table, &[FACULTY_EDITABLE]))
}

/// POST - write back edited phone numbers.
pub async fn save_faculty(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Json<SaveResponse> {
    let (edited, search) = req.edited();
    let outcome = state
        .dashboard
        .save_faculty(&name, search.as_deref(), &edited)
        .await;
    Json(SaveResponse::new(outcome, &[FACULTY_EDITABLE]))
}
