use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::ml::models::{ModelInfo, Prediction, TrainingReport};

/// Maximum image size accepted for ML analysis (50MB)
pub const MAX_IMAGE_SIZE: usize = 50 * 1024 * 1024;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnalyzeTextDto {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
    /// Pin a model version instead of the active one
    #[schema(example = "1.0.0")]
    pub model_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TextAnalysisResponseDto {
    pub text: String,
    pub analysis_result: Prediction,
}

/// Multipart form for image analysis (Swagger documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct AnalyzeImageDto {
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    #[schema(example = "1.0.0")]
    pub model_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageAnalysisResponseDto {
    pub filename: String,
    pub content_type: String,
    pub analysis_result: Prediction,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListModelsQuery {
    /// Restrict the listing to one model type
    pub model_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ModelListResponseDto {
    /// Registered versions per model type
    pub models: BTreeMap<String, Vec<String>>,
    /// Active version per model type
    pub active_models: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LoadModelQuery {
    /// Version to load, the active one when omitted
    pub model_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoadModelResponseDto {
    pub model_type: String,
    pub model: ModelInfo,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActivateModelDto {
    #[validate(length(min = 1, message = "model_version is required"))]
    #[schema(example = "1.0.0")]
    pub model_version: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivateModelResponseDto {
    pub model_type: String,
    pub active_version: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrainModelDto {
    #[schema(value_type = Vec<Object>)]
    pub training_data: Vec<serde_json::Value>,
    #[schema(value_type = Vec<Object>)]
    #[serde(default)]
    pub validation_data: Vec<serde_json::Value>,
    pub model_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrainModelResponseDto {
    pub model_type: String,
    /// Version that was trained, `active` when none was pinned
    pub model_version: String,
    pub training_result: TrainingReport,
}
