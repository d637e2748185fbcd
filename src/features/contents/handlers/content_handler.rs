use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::core::extractor::ValidatedJson;
use crate::features::contents::dtos::{
    parse_metadata, validate_upload, validate_uploaded_by, ContentResponseDto, UploadContentDto,
    UploadFromUrlDto,
};
use crate::features::contents::services::ContentService;
use crate::shared::multipart::read_upload_form;
use crate::shared::types::ApiResponse;

/// Upload content for verification
///
/// Accepts multipart/form-data with:
/// - `file`: The content to verify (required)
/// - `metadata`: JSON object with client-side metadata (optional)
/// - `uploaded_by`: Free-form uploader label (optional)
#[utoipa::path(
    post,
    path = "/api/contents",
    tag = "contents",
    request_body(
        content = UploadContentDto,
        content_type = "multipart/form-data",
        description = "Content upload form with optional metadata and uploader label",
    ),
    responses(
        (status = 201, description = "Content uploaded successfully", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Missing file, unsupported type, invalid metadata or over-long filename/uploader"),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_content(
    State(service): State<Arc<ContentService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ContentResponseDto>>), AppError> {
    let form = read_upload_form(multipart, "file").await?;
    let metadata = parse_metadata(form.field("metadata"))?;
    let uploaded_by = form.field("uploaded_by").map(str::to_string);
    validate_uploaded_by(uploaded_by.as_deref())?;
    let (file, _) = form.require_file()?;
    validate_upload(&file)?;

    debug!(
        "Uploading content: name={}, type={}, size={}",
        file.file_name,
        file.content_type,
        file.data.len()
    );

    let content = service.create(file, metadata, uploaded_by).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(content.into()),
            Some("Content uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Download content from a URL and store it like an upload
///
/// The MIME type is taken from the response `Content-Type` header and the
/// filename from the last path segment of the URL.
#[utoipa::path(
    post,
    path = "/api/contents/url",
    tag = "contents",
    request_body = UploadFromUrlDto,
    responses(
        (status = 201, description = "Content downloaded and stored", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Invalid URL, download failure or unsupported type"),
        (status = 413, description = "Remote content too large")
    )
)]
pub async fn upload_content_from_url(
    State(service): State<Arc<ContentService>>,
    ValidatedJson(dto): ValidatedJson<UploadFromUrlDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContentResponseDto>>), AppError> {
    validate_uploaded_by(dto.uploaded_by.as_deref())?;
    let file = service.download(&dto.url).await?;
    validate_upload(&file)?;

    debug!(
        "Storing downloaded content: url={}, name={}, type={}, size={}",
        dto.url,
        file.file_name,
        file.content_type,
        file.data.len()
    );

    let uploaded_by = dto.uploaded_by.filter(|label| !label.trim().is_empty());
    let content = service
        .create(file, dto.metadata.unwrap_or_default(), uploaded_by)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(content.into()),
            Some("Content downloaded and uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Get a content record by ID
#[utoipa::path(
    get,
    path = "/api/contents/{id}",
    tag = "contents",
    params(("id" = Uuid, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content record", body = ApiResponse<ContentResponseDto>),
        (status = 404, description = "Content not found")
    )
)]
pub async fn get_content(
    State(service): State<Arc<ContentService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContentResponseDto>>, AppError> {
    let content = service.get(id).await?;
    Ok(Json(ApiResponse::data(content.into())))
}
