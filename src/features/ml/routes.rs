use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::ml::dtos::MAX_IMAGE_SIZE;
use crate::features::ml::handlers;
use crate::features::ml::services::ModelManager;

/// Create routes for the ML model registry
pub fn routes(manager: Arc<ModelManager>) -> Router {
    Router::new()
        .route("/api/ml/analyze-text", post(handlers::analyze_text))
        .route(
            "/api/ml/analyze-image",
            post(handlers::analyze_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route("/api/ml/models", get(handlers::list_models))
        .route("/api/ml/models/{model_type}/load", post(handlers::load_model))
        .route(
            "/api/ml/models/{model_type}/activate",
            post(handlers::activate_model),
        )
        .route("/api/ml/models/{model_type}/train", post(handlers::train_model))
        .route(
            "/api/ml/models/{model_type}/performance",
            get(handlers::model_performance),
        )
        .with_state(manager)
}
