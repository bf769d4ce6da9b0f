//! Institution route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uniguide_core::model::Institution;

use crate::state::AppState;
use crate::view::TableView;

pub async fn list_universities(State(state): State<AppState>) -> Json<TableView> {
    let table = state.dashboard.universities().await;
    Json(TableView::new(&table, &[]))
}

pub async fn get_university(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Institution>, (StatusCode, String)> {
    let institution = state
        .dashboard
        .institution(&name)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Institution not found: {}", name)))?;

    Ok(Json(institution))
}

pub async fn list_keywords(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<Vec<String>> {
    Json(state.dashboard.keywords(&name).await)
}
