use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::contents::dtos::ContentResponseDto;
use crate::features::deepfake::models::DetectionResult;
use crate::features::fact_check::models::ProviderStatus;
use crate::features::verification::models::VerificationResult;
use crate::features::verification::Metadata;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContentIdDto {
    pub content_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyContentResponseDto {
    pub content_id: Uuid,
    pub verification: VerificationResult,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeepfakeDetectResponseDto {
    pub content_id: Uuid,
    pub detection: DetectionResult,
}

/// Stored analysis results for a content record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentAnalysisResponseDto {
    pub content: ContentResponseDto,
    #[schema(value_type = Option<Object>)]
    pub verification_result: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub deepfake_result: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnalyzeTextRequestDto {
    #[validate(length(min = 1, message = "text is required"))]
    #[schema(example = "BREAKING NEWS: scientists agree nobody saw this coming")]
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeImageMetadataDto {
    /// EXIF and file properties, e.g. `{"exif": {"Make": "Canon"}, "file_size": 2048}`
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckSourceDto {
    #[validate(url(message = "Invalid URL format"))]
    #[schema(example = "https://www.reuters.com/world/some-story")]
    pub url: String,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyClaimDto {
    #[validate(length(min = 1, max = 2000, message = "claim must be 1-2000 characters"))]
    pub claim: String,
    /// Two-letter language code
    #[serde(default = "default_language")]
    #[schema(example = "en")]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThirdPartyStatusResponseDto {
    /// True when at least one provider has an API key
    pub available: bool,
    pub services: BTreeMap<String, ProviderStatus>,
}
