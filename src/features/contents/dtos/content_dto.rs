use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::contents::models::Content;
use crate::features::verification::{Metadata, SUPPORTED_CONTENT_TYPES};
use crate::shared::multipart::UploadedFile;

/// Maximum upload size in bytes (50MB)
pub const MAX_CONTENT_SIZE: usize = 50 * 1024 * 1024;

/// Video containers accepted on upload in addition to the verifiable types
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["video/quicktime", "video/x-msvideo"];

/// Column widths of `contents.filename` and `contents.uploaded_by`
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MAX_UPLOADER_LENGTH: usize = 255;

pub fn is_content_type_allowed(content_type: &str) -> bool {
    SUPPORTED_CONTENT_TYPES.contains(&content_type) || ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// Size, type and name checks shared by multipart and URL uploads
pub fn validate_upload(file: &UploadedFile) -> Result<()> {
    if file.data.len() > MAX_CONTENT_SIZE {
        return Err(AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_CONTENT_SIZE,
            MAX_CONTENT_SIZE / 1024 / 1024
        )));
    }

    if !is_content_type_allowed(&file.content_type) {
        return Err(AppError::BadRequest(format!(
            "Unsupported content type: {}",
            file.content_type
        )));
    }

    if file.file_name.chars().count() > MAX_FILENAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Filename must be at most {} characters",
            MAX_FILENAME_LENGTH
        )));
    }

    Ok(())
}

pub fn validate_uploaded_by(uploaded_by: Option<&str>) -> Result<()> {
    match uploaded_by {
        Some(label) if label.chars().count() > MAX_UPLOADER_LENGTH => Err(AppError::BadRequest(
            format!("uploaded_by must be at most {} characters", MAX_UPLOADER_LENGTH),
        )),
        _ => Ok(()),
    }
}

/// Parse the optional `metadata` form field; it must be a JSON object
pub fn parse_metadata(raw: Option<&str>) -> Result<Metadata> {
    let Some(raw) = raw else {
        return Ok(Metadata::new());
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(
            "metadata must be a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::BadRequest(format!("Invalid metadata JSON: {}", e))),
    }
}

/// Upload content request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadContentDto {
    /// The file to verify
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Client metadata as a JSON object string
    #[schema(example = r#"{"width": 1920, "height": 1080}"#)]
    pub metadata: Option<String>,
    /// Free-form label of the uploader
    #[schema(example = "newsroom-desk")]
    pub uploaded_by: Option<String>,
}

/// Request body for `POST /api/contents/url`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadFromUrlDto {
    #[validate(url(message = "Invalid URL format"))]
    #[schema(example = "https://example.com/photo.jpg")]
    pub url: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Metadata>,
    #[validate(length(max = 255, message = "uploaded_by must be at most 255 characters"))]
    pub uploaded_by: Option<String>,
}

/// Content record as returned by the API (never includes the bytes)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContentResponseDto {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub file_size: i64,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub uploaded_by: Option<String>,
    pub verification_score: Option<f64>,
    pub deepfake_probability: Option<f64>,
    /// `uploaded`, `processing`, `completed` or `failed`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Content> for ContentResponseDto {
    fn from(content: Content) -> Self {
        Self {
            id: content.id,
            filename: content.filename,
            content_type: content.content_type,
            file_size: content.file_size,
            metadata: content.metadata,
            uploaded_by: content.uploaded_by,
            verification_score: content.verification_score,
            deepfake_probability: content.deepfake_probability,
            status: content.status,
            created_at: content.created_at,
            updated_at: content.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_content_types() {
        assert!(is_content_type_allowed("text/plain"));
        assert!(is_content_type_allowed("video/quicktime"));
        assert!(is_content_type_allowed("video/x-msvideo"));
        assert!(!is_content_type_allowed("application/pdf"));
        assert!(!is_content_type_allowed("image/gif"));
    }

    fn upload(name: &str, content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: vec![b'a'; size],
        }
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(&upload("claim.txt", "text/plain", 16)).is_ok());

        assert!(matches!(
            validate_upload(&upload("big.txt", "text/plain", MAX_CONTENT_SIZE + 1)),
            Err(AppError::PayloadTooLarge(_))
        ));
        assert!(matches!(
            validate_upload(&upload("doc.pdf", "application/pdf", 16)),
            Err(AppError::BadRequest(_))
        ));

        let at_limit = format!("{}.txt", "n".repeat(MAX_FILENAME_LENGTH - 4));
        assert!(validate_upload(&upload(&at_limit, "text/plain", 16)).is_ok());

        let too_long = format!("{}.txt", "n".repeat(MAX_FILENAME_LENGTH));
        assert!(matches!(
            validate_upload(&upload(&too_long, "text/plain", 16)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_uploaded_by_counts_characters() {
        assert!(validate_uploaded_by(None).is_ok());
        // Multi-byte labels are measured in characters like VARCHAR(255)
        assert!(validate_uploaded_by(Some(&"é".repeat(MAX_UPLOADER_LENGTH))).is_ok());
        assert!(matches!(
            validate_uploaded_by(Some(&"x".repeat(MAX_UPLOADER_LENGTH + 1))),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_url_dto_validation() {
        let dto: UploadFromUrlDto =
            serde_json::from_value(serde_json::json!({ "url": "not a url" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: UploadFromUrlDto = serde_json::from_value(serde_json::json!({
            "url": "https://example.com/a.jpg",
            "metadata": { "width": 10 }
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.metadata.unwrap()["width"], 10);
    }

    #[test]
    fn test_parse_metadata() {
        assert!(parse_metadata(None).unwrap().is_empty());

        let parsed = parse_metadata(Some(r#"{"width": 10}"#)).unwrap();
        assert_eq!(parsed["width"], 10);

        assert!(matches!(
            parse_metadata(Some("[1, 2]")),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_metadata(Some("{not json")),
            Err(AppError::BadRequest(_))
        ));
    }
}
