use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use crate::core::error::{AppError, Result};

/// A file part read fully into memory
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Multipart body split into its file part and plain text fields
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Non-empty text field value
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn require_file(self) -> Result<(UploadedFile, HashMap<String, String>)> {
        let file = self
            .file
            .ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
        Ok((file, self.fields))
    }
}

/// Body-limit violations surface as 413, anything else as a bad request
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    debug!("{}: {}", context, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: request body too large", context))
    } else {
        AppError::BadRequest(format!("{}: {}", context, e))
    }
}

/// Read every part of a multipart body; the part named `file_field` is kept as bytes
pub async fn read_upload_form(mut multipart: Multipart, file_field: &str) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart data", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == file_field {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error("Failed to read file data", e))?;

            form.file = Some(UploadedFile {
                file_name,
                content_type,
                data: data.to_vec(),
            });
        } else {
            let text = field.text().await.map_err(|e| {
                multipart_error(&format!("Failed to read {} field", field_name), e)
            })?;
            form.fields.insert(field_name, text);
        }
    }

    Ok(form)
}
