mod model_input;
mod performance;
mod prediction;

pub use model_input::ModelInput;
pub use performance::{PerformanceRecord, PerformanceStats, RecordKind};
pub use prediction::{
    ImagePrediction, ManipulationAssessment, ModelInfo, Prediction, TextPrediction,
    TrainingReport,
};
