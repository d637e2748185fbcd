use chrono::Utc;
use serde_json::Value;

use crate::features::deepfake::models::{
    DeepfakeAssessment, DeepfakeIndicator, DetectionResult, MediaKind,
};
use crate::features::verification::models::Severity;
use crate::features::verification::services::{content_fingerprint, Metadata};

const CAMERA_FIELDS: [&str; 3] = ["Make", "Model", "Software"];
const EXIF_TIME_FIELDS: [&str; 3] = ["DateTime", "DateTimeOriginal", "DateTimeDigitized"];
const AI_TOOLS: [&str; 4] = ["dall-e", "midjourney", "stable diffusion", "dreamstudio"];

const MAX_NATURAL_DIMENSION: f64 = 4000.0;
const LONG_VIDEO_SECS: f64 = 300.0;
const HIGH_BITRATE: f64 = 10_000_000.0;

struct Detection {
    probability: f64,
    confidence: f64,
    indicators: Vec<DeepfakeIndicator>,
    processing_time: f64,
}

/// Heuristic deepfake detector working from content metadata
#[derive(Debug, Clone, Default)]
pub struct DeepfakeDetectionEngine;

impl DeepfakeDetectionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, content: &[u8], kind: &MediaKind, metadata: &Metadata) -> DetectionResult {
        let detection = match kind {
            MediaKind::Image => self.detect_image(metadata),
            MediaKind::Video => self.detect_video(metadata),
            MediaKind::Other(other) => Detection {
                probability: 0.1,
                confidence: 0.2,
                indicators: vec![DeepfakeIndicator::new(
                    "unsupported_format",
                    format!("Deepfake detection not supported for {}", other),
                    Severity::Low,
                    0.0,
                )],
                processing_time: 0.0,
            },
        };

        tracing::debug!(
            "Deepfake detection for {}: probability {:.2} from {} indicators",
            kind.as_str(),
            detection.probability,
            detection.indicators.len()
        );

        DetectionResult {
            analysis_id: content_fingerprint(content),
            timestamp: Utc::now(),
            content_type: kind.as_str().to_string(),
            deepfake_probability: detection.probability,
            confidence: detection.confidence,
            indicators: detection.indicators,
            processing_time: detection.processing_time,
            assessment: DeepfakeAssessment::from_probability(detection.probability),
        }
    }

    fn detect_image(&self, metadata: &Metadata) -> Detection {
        let mut indicators = Vec::new();

        if let Some(exif) = metadata.get("exif").and_then(Value::as_object) {
            indicators.extend(exif_consistency(exif));
        }

        let width = metadata.get("width").and_then(Value::as_f64);
        let height = metadata.get("height").and_then(Value::as_f64);
        if let (Some(width), Some(height)) = (width, height) {
            if width > MAX_NATURAL_DIMENSION || height > MAX_NATURAL_DIMENSION {
                indicators.push(DeepfakeIndicator::new(
                    "high_resolution",
                    "Very high resolution may indicate AI generation",
                    Severity::Low,
                    0.3,
                ));
            }
        }

        let impact: f64 = indicators.iter().map(|i| i.confidence).sum();
        Detection {
            probability: (0.3 + impact).min(0.95),
            confidence: (0.5 + indicators.len() as f64 * 0.1).min(0.9),
            indicators,
            processing_time: 0.1,
        }
    }

    fn detect_video(&self, metadata: &Metadata) -> Detection {
        let mut indicators = Vec::new();

        if metadata
            .get("duration")
            .and_then(Value::as_f64)
            .is_some_and(|duration| duration > LONG_VIDEO_SECS)
        {
            indicators.push(DeepfakeIndicator::new(
                "long_duration",
                "Long videos require more thorough analysis",
                Severity::Info,
                0.1,
            ));
        }

        if metadata
            .get("bitrate")
            .and_then(Value::as_f64)
            .is_some_and(|bitrate| bitrate > HIGH_BITRATE)
        {
            indicators.push(DeepfakeIndicator::new(
                "high_bitrate",
                "High bitrate may indicate professional production",
                Severity::Positive,
                -0.1,
            ));
        }

        let impact: f64 = indicators.iter().map(|i| i.confidence.max(0.0)).sum();
        Detection {
            probability: (0.4 + impact).clamp(0.05, 0.95),
            confidence: 0.7,
            indicators,
            processing_time: 0.5,
        }
    }
}

fn exif_consistency(exif: &serde_json::Map<String, Value>) -> Vec<DeepfakeIndicator> {
    let mut indicators = Vec::new();

    if CAMERA_FIELDS.iter().all(|field| !exif.contains_key(*field)) {
        indicators.push(DeepfakeIndicator::new(
            "missing_camera_data",
            "No camera information in EXIF data",
            Severity::Medium,
            0.4,
        ));
    } else if let Some(software) = exif.get("Software") {
        let software = match software {
            Value::String(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };
        if AI_TOOLS.iter().any(|tool| software.contains(tool)) {
            indicators.push(DeepfakeIndicator::new(
                "ai_generation_tool",
                format!("Generated with AI tool: {}", software),
                Severity::High,
                0.8,
            ));
        }
    }

    if EXIF_TIME_FIELDS.iter().all(|field| !exif.contains_key(*field)) {
        indicators.push(DeepfakeIndicator::new(
            "missing_timestamps",
            "No timestamp information in EXIF data",
            Severity::Medium,
            0.3,
        ));
    }

    indicators
}
