use serde_json::Value;
use thiserror::Error;

use crate::core::error::AppError;
use crate::features::ml::models::{ModelInfo, ModelInput, Prediction, TrainingReport};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model type {0} not found")]
    UnknownModelType(String),

    #[error("Model version {version} not found for type {model_type}")]
    UnknownVersion { model_type: String, version: String },

    #[error("No active model set for type {0}")]
    NoActiveVersion(String),

    #[error("Invalid model identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Model {model} expects {expected} input, got {actual}")]
    UnsupportedInput {
        model: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to load model {0}")]
    LoadFailed(String),
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownModelType(_)
            | ModelError::UnknownVersion { .. }
            | ModelError::NoActiveVersion(_) => AppError::NotFound(err.to_string()),
            ModelError::InvalidIdentifier(_) | ModelError::UnsupportedInput { .. } => {
                AppError::BadRequest(err.to_string())
            }
            ModelError::LoadFailed(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// A versioned analysis model that can be loaded, queried and retrained
pub trait AnalysisModel: Send + Sync {
    fn info(&self) -> ModelInfo;

    fn is_loaded(&self) -> bool;

    fn load(&self) -> Result<(), ModelError>;

    /// Run inference, loading the model first when needed
    fn predict(&self, input: &ModelInput) -> Result<Prediction, ModelError>;

    fn train(&self, training: &[Value], validation: &[Value])
        -> Result<TrainingReport, ModelError>;
}
