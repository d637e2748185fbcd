use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Finding, MetadataAnalysis};
use crate::features::fact_check::models::ClaimVerificationReport;

/// Human-readable band for a verification score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum VerificationAssessment {
    #[serde(rename = "Highly Authentic")]
    HighlyAuthentic,
    #[serde(rename = "Likely Authentic")]
    LikelyAuthentic,
    #[serde(rename = "Uncertain")]
    Uncertain,
    #[serde(rename = "Likely Misinformation")]
    LikelyMisinformation,
    #[serde(rename = "Highly Suspect")]
    HighlySuspect,
}

impl VerificationAssessment {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::HighlyAuthentic
        } else if score >= 0.7 {
            Self::LikelyAuthentic
        } else if score >= 0.5 {
            Self::Uncertain
        } else if score >= 0.3 {
            Self::LikelyMisinformation
        } else {
            Self::HighlySuspect
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlyAuthentic => "Highly Authentic",
            Self::LikelyAuthentic => "Likely Authentic",
            Self::Uncertain => "Uncertain",
            Self::LikelyMisinformation => "Likely Misinformation",
            Self::HighlySuspect => "Highly Suspect",
        }
    }
}

impl std::fmt::Display for VerificationAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of running the verification engine over one piece of content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationResult {
    /// First 16 hex characters of the SHA-256 of the content bytes
    pub content_id: String,
    pub timestamp: DateTime<Utc>,
    pub content_type: String,
    pub verification_score: f64,
    pub confidence: f64,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_analysis: Option<MetadataAnalysis>,
    pub assessment: VerificationAssessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_verification: Option<ClaimVerificationReport>,
}
