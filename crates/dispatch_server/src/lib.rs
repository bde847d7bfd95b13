//! HTTP surface for the ride dispatch service.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::state::AppState;

/// Build the full application router.
///
/// When `static_dir` exists it is mounted at `/static` and `/` serves its
/// `index.html`; otherwise only the JSON API is exposed.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = routes::api_router().route("/health", get(health));

    match static_dir {
        Some(dir) if dir.is_dir() => {
            info!(static_dir = %dir.display(), "serving static UI files");
            app = app
                .route_service("/", ServeFile::new(dir.join("index.html")))
                .nest_service("/static", ServeDir::new(dir));
        }
        Some(dir) => {
            info!(static_dir = %dir.display(), "static directory not found, API-only mode");
        }
        None => {}
    }

    app.layer(cors).with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
