use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::streaming::handlers;
use crate::features::streaming::services::StreamService;

/// Create routes for the streaming registry
pub fn routes(service: Arc<StreamService>) -> Router {
    Router::new()
        .route(
            "/api/streams",
            post(handlers::start_stream).get(handlers::list_streams),
        )
        .route("/api/streams/live-text", post(handlers::analyze_live_text))
        .route("/api/streams/{id}", get(handlers::get_stream_status))
        .route("/api/streams/{id}/chunks", post(handlers::process_chunk))
        .route("/api/streams/{id}/stop", post(handlers::stop_stream))
        .with_state(service)
}
