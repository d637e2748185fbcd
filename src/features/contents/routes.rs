use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::contents::dtos::MAX_CONTENT_SIZE;
use crate::features::contents::handlers::{get_content, upload_content, upload_content_from_url};
use crate::features::contents::services::ContentService;

/// Create routes for the contents feature
pub fn routes(service: Arc<ContentService>) -> Router {
    Router::new()
        .route(
            "/api/contents",
            // Allow body size up to MAX_CONTENT_SIZE + buffer for multipart overhead
            post(upload_content).layer(DefaultBodyLimit::max(MAX_CONTENT_SIZE + 1024 * 1024)),
        )
        .route("/api/contents/url", post(upload_content_from_url))
        .route("/api/contents/{id}", get(get_content))
        .with_state(service)
}
