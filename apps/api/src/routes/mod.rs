pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/samples", get(handlers::handle_samples))
        .route(
            "/api/v1/resume-screen",
            post(handlers::handle_resume_screen),
        )
        .route(
            "/api/v1/resume-screen/text",
            post(handlers::handle_resume_screen_text),
        )
        .route("/api/v1/sentiment", post(handlers::handle_sentiment))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
