use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::ai::dtos::{
    ContentAnalysisResponseDto, DeepfakeDetectResponseDto, ThirdPartyStatusResponseDto,
    VerifyContentResponseDto,
};
use crate::features::content_analysis::models::{
    ImageIntegrityReport, SourceCredibility, TextAnalysis,
};
use crate::features::content_analysis::{
    ImageMetadataAnalyzer, SourceCredibilityChecker, TextAnalyzer,
};
use crate::features::contents::models::{Content, ContentStatus};
use crate::features::contents::ContentService;
use crate::features::deepfake::{DeepfakeDetectionEngine, MediaKind};
use crate::features::fact_check::models::ClaimVerificationReport;
use crate::features::fact_check::{ClaimVerifier, FactCheckService};
use crate::features::verification::{ContentVerificationEngine, Metadata};

/// Runs the analysis engines against stored content and ad-hoc input
pub struct AiService {
    contents: Arc<ContentService>,
    fact_check: Arc<FactCheckService>,
    verification: ContentVerificationEngine,
    deepfake: DeepfakeDetectionEngine,
    text_analyzer: TextAnalyzer,
    image_analyzer: ImageMetadataAnalyzer,
    source_checker: SourceCredibilityChecker,
}

impl AiService {
    pub fn new(contents: Arc<ContentService>, fact_check: Arc<FactCheckService>) -> Self {
        let verification = ContentVerificationEngine::with_claim_verifier(fact_check.clone());
        Self {
            contents,
            fact_check,
            verification,
            deepfake: DeepfakeDetectionEngine::new(),
            text_analyzer: TextAnalyzer::new(),
            image_analyzer: ImageMetadataAnalyzer::new(),
            source_checker: SourceCredibilityChecker::new(),
        }
    }

    /// Client metadata merged with the stored file properties
    fn analysis_metadata(content: &Content, extra: &[(&str, Value)]) -> Metadata {
        let mut metadata = match &content.metadata {
            Value::Object(map) => map.clone(),
            _ => Metadata::new(),
        };
        metadata.insert("filename".to_string(), json!(content.filename));
        metadata.insert("file_size".to_string(), json!(content.file_size));
        for (key, value) in extra {
            metadata.insert(key.to_string(), value.clone());
        }
        metadata
    }

    /// Mark the record failed, keeping the original error
    async fn fail(&self, id: Uuid, cause: AppError) -> AppError {
        if let Err(e) = self.contents.set_status(id, ContentStatus::Failed).await {
            error!("Failed to mark content {} as failed: {}", id, e);
        }
        cause
    }

    pub async fn verify_content(&self, id: Uuid) -> Result<VerifyContentResponseDto> {
        let stored = self.contents.get_with_data(id).await?;
        self.contents.set_status(id, ContentStatus::Processing).await?;

        let metadata = Self::analysis_metadata(
            &stored.content,
            &[("uploaded_at", json!(stored.content.created_at.to_rfc3339()))],
        );
        let verification = self
            .verification
            .verify(&stored.data, &stored.content.content_type, &metadata)
            .await;

        let result = match serde_json::to_value(&verification) {
            Ok(value) => value,
            Err(e) => {
                let cause = AppError::Internal(format!("Failed to serialize verification: {}", e));
                return Err(self.fail(id, cause).await);
            }
        };

        if let Err(e) = self
            .contents
            .save_verification(id, verification.verification_score, result)
            .await
        {
            return Err(self.fail(id, e).await);
        }

        info!(
            "Content {} verified: score={:.2}, assessment={}",
            id, verification.verification_score, verification.assessment
        );

        Ok(VerifyContentResponseDto {
            content_id: id,
            verification,
        })
    }

    pub async fn detect_deepfake(&self, id: Uuid) -> Result<DeepfakeDetectResponseDto> {
        let stored = self.contents.get_with_data(id).await?;
        self.contents.set_status(id, ContentStatus::Processing).await?;

        let metadata = Self::analysis_metadata(
            &stored.content,
            &[("content_type", json!(stored.content.content_type))],
        );
        let kind = MediaKind::from_mime(&stored.content.content_type);
        let detection = self.deepfake.detect(&stored.data, &kind, &metadata);

        let result = match serde_json::to_value(&detection) {
            Ok(value) => value,
            Err(e) => {
                let cause = AppError::Internal(format!("Failed to serialize detection: {}", e));
                return Err(self.fail(id, cause).await);
            }
        };

        if let Err(e) = self
            .contents
            .save_deepfake(id, detection.deepfake_probability, result)
            .await
        {
            return Err(self.fail(id, e).await);
        }

        info!(
            "Deepfake detection for content {}: probability={:.2}",
            id, detection.deepfake_probability
        );

        Ok(DeepfakeDetectResponseDto {
            content_id: id,
            detection,
        })
    }

    pub async fn content_analysis(&self, id: Uuid) -> Result<ContentAnalysisResponseDto> {
        let mut content = self.contents.get(id).await?;
        let verification_result = content.verification_result.take();
        let deepfake_result = content.deepfake_result.take();

        Ok(ContentAnalysisResponseDto {
            content: content.into(),
            verification_result,
            deepfake_result,
        })
    }

    pub fn analyze_text(&self, text: &str) -> TextAnalysis {
        self.text_analyzer.analyze(text)
    }

    pub fn analyze_image_metadata(&self, metadata: &Metadata) -> ImageIntegrityReport {
        self.image_analyzer.analyze(metadata)
    }

    pub fn check_source(&self, url: &str) -> SourceCredibility {
        self.source_checker.check(url)
    }

    pub async fn verify_claim(&self, claim: &str, language: &str) -> Result<ClaimVerificationReport> {
        Ok(self.fact_check.check(claim, language).await?)
    }

    pub fn third_party_status(&self) -> ThirdPartyStatusResponseDto {
        ThirdPartyStatusResponseDto {
            available: self.fact_check.is_available(),
            services: self.fact_check.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn content(metadata: Value) -> Content {
        Content {
            id: Uuid::nil(),
            filename: "clip.mp4".to_string(),
            storage_key: "contents/clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            file_size: 4096,
            metadata,
            uploaded_by: None,
            verification_score: None,
            deepfake_probability: None,
            verification_result: None,
            deepfake_result: None,
            status: "uploaded".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_analysis_metadata_merges_file_properties() {
        let metadata = AiService::analysis_metadata(
            &content(json!({ "duration": 12, "filename": "client-name.mp4" })),
            &[("content_type", json!("video/mp4"))],
        );

        assert_eq!(metadata["duration"], 12);
        assert_eq!(metadata["filename"], "clip.mp4");
        assert_eq!(metadata["file_size"], 4096);
        assert_eq!(metadata["content_type"], "video/mp4");
    }

    #[test]
    fn test_analysis_metadata_ignores_non_object_metadata() {
        let metadata = AiService::analysis_metadata(&content(json!([1, 2])), &[]);
        assert_eq!(metadata.len(), 2);
    }
}
