pub mod health;
pub mod upload_form;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(upload_form::upload_form_handler))
        .route("/health", get(health::health_handler))
        // Upload comparison (form posts to the trailing-slash path)
        .route("/compare", post(handlers::handle_compare_upload))
        .route("/compare/", post(handlers::handle_compare_upload))
        // Pre-extracted text comparison
        .route("/api/v1/compare", post(handlers::handle_compare_text))
        .route(
            "/api/v1/compare/details",
            post(handlers::handle_compare_details),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
