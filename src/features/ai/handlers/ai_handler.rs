use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, ValidatedJson};
use crate::features::ai::dtos::{
    AnalyzeImageMetadataDto, AnalyzeTextRequestDto, CheckSourceDto, ContentAnalysisResponseDto,
    ContentIdDto, DeepfakeDetectResponseDto, ThirdPartyStatusResponseDto, VerifyClaimDto,
    VerifyContentResponseDto,
};
use crate::features::ai::services::AiService;
use crate::features::content_analysis::models::{
    ImageIntegrityReport, SourceCredibility, TextAnalysis,
};
use crate::features::fact_check::models::ClaimVerificationReport;
use crate::shared::types::ApiResponse;

/// Verify stored content
///
/// Runs the verification engine on the uploaded bytes and stores the result
/// on the content record.
#[utoipa::path(
    post,
    path = "/api/ai/verify",
    tag = "ai",
    request_body = ContentIdDto,
    responses(
        (status = 200, description = "Verification completed", body = ApiResponse<VerifyContentResponseDto>),
        (status = 404, description = "Content not found")
    )
)]
pub async fn verify_content(
    State(service): State<Arc<AiService>>,
    AppJson(dto): AppJson<ContentIdDto>,
) -> Result<Json<ApiResponse<VerifyContentResponseDto>>> {
    let response = service.verify_content(dto.content_id).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Content verification completed".to_string()),
        None,
    )))
}

/// Run deepfake detection on stored content
#[utoipa::path(
    post,
    path = "/api/ai/deepfake-detect",
    tag = "ai",
    request_body = ContentIdDto,
    responses(
        (status = 200, description = "Detection completed", body = ApiResponse<DeepfakeDetectResponseDto>),
        (status = 404, description = "Content not found")
    )
)]
pub async fn detect_deepfake(
    State(service): State<Arc<AiService>>,
    AppJson(dto): AppJson<ContentIdDto>,
) -> Result<Json<ApiResponse<DeepfakeDetectResponseDto>>> {
    let response = service.detect_deepfake(dto.content_id).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Deepfake detection completed".to_string()),
        None,
    )))
}

/// Get stored analysis results for a content record
#[utoipa::path(
    get,
    path = "/api/ai/contents/{id}/analysis",
    tag = "ai",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Stored analysis", body = ApiResponse<ContentAnalysisResponseDto>),
        (status = 404, description = "Content not found")
    )
)]
pub async fn get_content_analysis(
    State(service): State<Arc<AiService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContentAnalysisResponseDto>>> {
    let analysis = service.content_analysis(id).await?;
    Ok(Json(ApiResponse::data(analysis)))
}

/// Misinformation and credibility analysis of free text
#[utoipa::path(
    post,
    path = "/api/ai/analyze-text",
    tag = "ai",
    request_body = AnalyzeTextRequestDto,
    responses(
        (status = 200, description = "Text analysed", body = ApiResponse<TextAnalysis>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn analyze_text(
    State(service): State<Arc<AiService>>,
    ValidatedJson(dto): ValidatedJson<AnalyzeTextRequestDto>,
) -> Result<Json<ApiResponse<TextAnalysis>>> {
    Ok(Json(ApiResponse::data(service.analyze_text(&dto.text))))
}

/// Integrity check of image metadata
#[utoipa::path(
    post,
    path = "/api/ai/analyze-image-metadata",
    tag = "ai",
    request_body = AnalyzeImageMetadataDto,
    responses(
        (status = 200, description = "Metadata analysed", body = ApiResponse<ImageIntegrityReport>),
        (status = 400, description = "Invalid body")
    )
)]
pub async fn analyze_image_metadata(
    State(service): State<Arc<AiService>>,
    AppJson(dto): AppJson<AnalyzeImageMetadataDto>,
) -> Result<Json<ApiResponse<ImageIntegrityReport>>> {
    Ok(Json(ApiResponse::data(
        service.analyze_image_metadata(&dto.metadata),
    )))
}

/// Credibility of a source URL
#[utoipa::path(
    post,
    path = "/api/ai/check-source",
    tag = "ai",
    request_body = CheckSourceDto,
    responses(
        (status = 200, description = "Source checked", body = ApiResponse<SourceCredibility>),
        (status = 400, description = "Invalid URL")
    )
)]
pub async fn check_source(
    State(service): State<Arc<AiService>>,
    ValidatedJson(dto): ValidatedJson<CheckSourceDto>,
) -> Result<Json<ApiResponse<SourceCredibility>>> {
    Ok(Json(ApiResponse::data(service.check_source(&dto.url))))
}

/// Check a claim against the configured fact-checking providers
///
/// Provider failures are reported per provider as `{error, verified: false}`.
#[utoipa::path(
    post,
    path = "/api/ai/verify-claim",
    tag = "ai",
    request_body = VerifyClaimDto,
    responses(
        (status = 200, description = "Claim checked", body = ApiResponse<ClaimVerificationReport>),
        (status = 400, description = "Empty claim or invalid language")
    )
)]
pub async fn verify_claim(
    State(service): State<Arc<AiService>>,
    ValidatedJson(dto): ValidatedJson<VerifyClaimDto>,
) -> Result<Json<ApiResponse<ClaimVerificationReport>>> {
    let report = service.verify_claim(&dto.claim, &dto.language).await?;
    Ok(Json(ApiResponse::data(report)))
}

/// Configuration state of the fact-checking providers
#[utoipa::path(
    get,
    path = "/api/ai/third-party-status",
    tag = "ai",
    responses(
        (status = 200, description = "Provider status", body = ApiResponse<ThirdPartyStatusResponseDto>)
    )
)]
pub async fn third_party_status(
    State(service): State<Arc<AiService>>,
) -> Result<Json<ApiResponse<ThirdPartyStatusResponseDto>>> {
    Ok(Json(ApiResponse::data(service.third_party_status())))
}
