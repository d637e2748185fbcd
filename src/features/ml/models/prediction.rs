use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::content_analysis::models::PatternHits;
use crate::features::verification::models::VerificationAssessment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    pub model_name: String,
    pub model_version: String,
    pub is_loaded: bool,
}

/// Assessment bands used by the image model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ManipulationAssessment {
    #[serde(rename = "Highly Authentic")]
    HighlyAuthentic,
    #[serde(rename = "Likely Authentic")]
    LikelyAuthentic,
    #[serde(rename = "Uncertain")]
    Uncertain,
    #[serde(rename = "Likely Manipulated")]
    LikelyManipulated,
    #[serde(rename = "Highly Suspect")]
    HighlySuspect,
}

impl ManipulationAssessment {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::HighlyAuthentic
        } else if score >= 0.7 {
            Self::LikelyAuthentic
        } else if score >= 0.5 {
            Self::Uncertain
        } else if score >= 0.3 {
            Self::LikelyManipulated
        } else {
            Self::HighlySuspect
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextPrediction {
    pub text_length: usize,
    pub pattern_matches: Vec<PatternHits>,
    pub misinformation_score: f64,
    pub authenticity_score: f64,
    pub confidence: f64,
    pub assessment: VerificationAssessment,
    pub model_name: String,
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImagePrediction {
    pub image_size: usize,
    pub deepfake_probability: f64,
    pub authenticity_score: f64,
    pub confidence: f64,
    pub assessment: ManipulationAssessment,
    pub features_analyzed: Vec<String>,
    pub model_name: String,
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Prediction {
    Text(TextPrediction),
    Image(ImagePrediction),
}

impl Prediction {
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Text(p) => p.confidence,
            Self::Image(p) => p.confidence,
        }
    }
}

/// Metrics reported by a (simulated) training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingReport {
    pub status: String,
    pub training_samples: usize,
    pub validation_samples: usize,
    pub accuracy: f64,
    pub f1_score: f64,
    pub training_time: String,
    pub timestamp: DateTime<Utc>,
}
