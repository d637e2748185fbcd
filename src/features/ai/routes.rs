use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::ai::handlers;
use crate::features::ai::services::AiService;

/// Create routes for the analysis endpoints
pub fn routes(service: Arc<AiService>) -> Router {
    Router::new()
        .route("/api/ai/verify", post(handlers::verify_content))
        .route("/api/ai/deepfake-detect", post(handlers::detect_deepfake))
        .route(
            "/api/ai/contents/{id}/analysis",
            get(handlers::get_content_analysis),
        )
        .route("/api/ai/analyze-text", post(handlers::analyze_text))
        .route(
            "/api/ai/analyze-image-metadata",
            post(handlers::analyze_image_metadata),
        )
        .route("/api/ai/check-source", post(handlers::check_source))
        .route("/api/ai/verify-claim", post(handlers::verify_claim))
        .route("/api/ai/third-party-status", get(handlers::third_party_status))
        .with_state(service)
}
