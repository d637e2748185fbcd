use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::verification::models::Severity;

/// Broad media category a detector handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other(String),
}

impl MediaKind {
    /// Map a MIME type to a media kind
    ///
    /// Anything that is neither image nor video falls back to `Image`, the same
    /// treatment uploads have always received.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("video") {
            Self::Video
        } else {
            Self::Image
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Other(kind) => kind,
        }
    }
}

impl From<&str> for MediaKind {
    fn from(kind: &str) -> Self {
        match kind {
            "image" => Self::Image,
            "video" => Self::Video,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DeepfakeAssessment {
    #[serde(rename = "Likely Authentic")]
    LikelyAuthentic,
    #[serde(rename = "Possibly Authentic")]
    PossiblyAuthentic,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Likely Deepfake")]
    LikelyDeepfake,
}

impl DeepfakeAssessment {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.2 {
            Self::LikelyAuthentic
        } else if probability < 0.5 {
            Self::PossiblyAuthentic
        } else if probability < 0.8 {
            Self::Suspicious
        } else {
            Self::LikelyDeepfake
        }
    }
}

/// A single deepfake heuristic that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeepfakeIndicator {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: Severity,
    /// Contribution to the deepfake probability; negative values count as zero
    pub confidence: f64,
}

impl DeepfakeIndicator {
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        confidence: f64,
    ) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            severity,
            confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetectionResult {
    /// First 16 hex characters of the SHA-256 of the content bytes
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    /// Media kind that was analysed (`image`, `video`, ...)
    pub content_type: String,
    pub deepfake_probability: f64,
    pub confidence: f64,
    pub indicators: Vec<DeepfakeIndicator>,
    /// Nominal processing cost in seconds
    pub processing_time: f64,
    pub assessment: DeepfakeAssessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("video/quicktime"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("text/plain"), MediaKind::Image);
    }

    #[test]
    fn test_media_kind_from_label() {
        assert_eq!(MediaKind::from("video"), MediaKind::Video);
        assert_eq!(MediaKind::from("audio"), MediaKind::Other("audio".to_string()));
        assert_eq!(MediaKind::from("audio").as_str(), "audio");
    }

    #[test]
    fn test_assessment_thresholds() {
        assert_eq!(
            DeepfakeAssessment::from_probability(0.1),
            DeepfakeAssessment::LikelyAuthentic
        );
        assert_eq!(
            DeepfakeAssessment::from_probability(0.2),
            DeepfakeAssessment::PossiblyAuthentic
        );
        assert_eq!(
            DeepfakeAssessment::from_probability(0.5),
            DeepfakeAssessment::Suspicious
        );
        assert_eq!(
            DeepfakeAssessment::from_probability(0.8),
            DeepfakeAssessment::LikelyDeepfake
        );
    }
}
