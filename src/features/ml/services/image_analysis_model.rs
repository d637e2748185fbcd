use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use serde_json::Value;

use super::{AnalysisModel, ModelError};
use crate::features::ml::models::{
    ImagePrediction, ManipulationAssessment, ModelInfo, ModelInput, Prediction, TrainingReport,
};

const FEATURES_ANALYZED: [&str; 5] = [
    "compression_artifacts",
    "facial_landmarks",
    "eye_blink_consistency",
    "lighting_consistency",
    "edge_analysis",
];

/// CNN-style image authenticity model
pub struct ImageAnalysisModel {
    name: String,
    version: String,
    loaded: AtomicBool,
}

impl ImageAnalysisModel {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            loaded: AtomicBool::new(false),
        }
    }

    fn analyze(&self, image: &[u8]) -> ImagePrediction {
        let size = image.len();
        let deepfake_probability = (0.1 + (size % 100) as f64 / 1000.0).min(0.9);
        let authenticity_score = 1.0 - deepfake_probability;

        ImagePrediction {
            image_size: size,
            deepfake_probability,
            authenticity_score,
            confidence: 0.8 + (size % 50) as f64 / 500.0,
            assessment: ManipulationAssessment::from_score(authenticity_score),
            features_analyzed: FEATURES_ANALYZED.iter().map(|f| f.to_string()).collect(),
            model_name: self.name.clone(),
            model_version: self.version.clone(),
            timestamp: Utc::now(),
        }
    }
}

impl Default for ImageAnalysisModel {
    fn default() -> Self {
        Self::new("resnet50", "1.0.0")
    }
}

impl AnalysisModel for ImageAnalysisModel {
    fn info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.name.clone(),
            model_version: self.version.clone(),
            is_loaded: self.is_loaded(),
        }
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    fn load(&self) -> Result<(), ModelError> {
        self.loaded.store(true, Ordering::Release);
        tracing::info!(
            "Image analysis model {} v{} loaded successfully",
            self.name,
            self.version
        );
        Ok(())
    }

    fn predict(&self, input: &ModelInput) -> Result<Prediction, ModelError> {
        let ModelInput::Bytes(image) = input else {
            return Err(ModelError::UnsupportedInput {
                model: self.name.clone(),
                expected: "bytes",
                actual: input.kind(),
            });
        };

        if !self.is_loaded() {
            self.load()?;
        }

        Ok(Prediction::Image(self.analyze(image)))
    }

    fn train(
        &self,
        training: &[Value],
        validation: &[Value],
    ) -> Result<TrainingReport, ModelError> {
        Ok(TrainingReport {
            status: "simulated_training_completed".to_string(),
            training_samples: training.len(),
            validation_samples: validation.len(),
            accuracy: 0.88,
            f1_score: 0.85,
            training_time: "simulated_4_hours".to_string(),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn predict_image(model: &ImageAnalysisModel, bytes: Vec<u8>) -> ImagePrediction {
        match model.predict(&ModelInput::Bytes(bytes)).unwrap() {
            Prediction::Image(prediction) => prediction,
            other => panic!("unexpected prediction: {:?}", other),
        }
    }

    #[test]
    fn test_size_driven_scores() {
        let model = ImageAnalysisModel::default();
        let prediction = predict_image(&model, vec![0u8; 1234]);

        // 1234 % 100 = 34, 1234 % 50 = 34
        assert_eq!(prediction.image_size, 1234);
        assert!(approx(prediction.deepfake_probability, 0.134));
        assert!(approx(prediction.authenticity_score, 0.866));
        assert!(approx(prediction.confidence, 0.868));
        assert_eq!(prediction.assessment, ManipulationAssessment::LikelyAuthentic);
        assert_eq!(prediction.features_analyzed.len(), 5);
        assert!(model.is_loaded());
    }

    #[test]
    fn test_empty_image() {
        let prediction = predict_image(&ImageAnalysisModel::default(), Vec::new());
        assert!(approx(prediction.deepfake_probability, 0.1));
        assert!(approx(prediction.confidence, 0.8));
        assert_eq!(prediction.assessment, ManipulationAssessment::HighlyAuthentic);
    }

    #[test]
    fn test_manipulation_band() {
        assert_eq!(
            ManipulationAssessment::from_score(0.35),
            ManipulationAssessment::LikelyManipulated
        );
    }

    #[test]
    fn test_rejects_text() {
        let err = ImageAnalysisModel::default()
            .predict(&ModelInput::Text("not an image".into()))
            .unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedInput { expected: "bytes", .. }));
    }
}
