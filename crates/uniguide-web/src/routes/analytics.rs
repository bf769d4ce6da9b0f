//! Chart route handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uniguide_core::chart::{self, BarChart, PieChart};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct TopFacultyParams {
    pub keyword: Option<String>,
}

pub async fn collaborators(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<PieChart> {
    let counts = state.dashboard.top_collaborators(&name).await;
    Json(chart::collaborators_pie(&counts))
}

/// `null` when there is no keyword or nothing to plot.
pub async fn top_faculty(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<TopFacultyParams>,
) -> Json<Option<BarChart>> {
    let keyword = params.keyword.unwrap_or_default();
    let scores = state.dashboard.top_faculty(&name, &keyword).await;
    Json(chart::top_faculty_bars(&scores))
}
