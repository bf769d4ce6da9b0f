//! University Guide Web Server
//!
//! Axum-based JSON API over the dashboard.

pub mod routes;
pub mod state;
pub mod view;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uniguide_core::Dashboard;

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Institutions
        .route("/universities", get(routes::universities::list_universities))
        .route("/universities/{name}", get(routes::universities::get_university))
        .route("/universities/{name}/keywords", get(routes::universities::list_keywords))
        // Editable tables
        .route(
            "/universities/{name}/faculty",
            get(routes::faculty::list_faculty).post(routes::faculty::save_faculty),
        )
        .route(
            "/keywords/{keyword}/publications",
            get(routes::publications::list_publications)
                .post(routes::publications::save_publications),
        )
        // Analytics
        .route("/universities/{name}/collaborators", get(routes::analytics::collaborators))
        .route("/universities/{name}/top-faculty", get(routes::analytics::top_faculty))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(dashboard: Dashboard, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(dashboard);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
