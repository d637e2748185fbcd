mod analysis_model;
mod image_analysis_model;
mod model_manager;
mod text_analysis_model;

pub use analysis_model::{AnalysisModel, ModelError};
pub use image_analysis_model::ImageAnalysisModel;
pub use model_manager::{ModelManager, IMAGE_ANALYSIS, PERFORMANCE_LOG_CAPACITY, TEXT_ANALYSIS};
pub use text_analysis_model::TextAnalysisModel;
