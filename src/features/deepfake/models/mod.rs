mod detection_result;

pub use detection_result::{DeepfakeAssessment, DeepfakeIndicator, DetectionResult, MediaKind};
