use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::contents::dtos::MAX_CONTENT_SIZE;
use crate::shared::multipart::UploadedFile;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Downloads remote content into an `UploadedFile`
#[derive(Clone)]
pub struct UrlFetcher {
    http_client: reqwest::Client,
}

impl UrlFetcher {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// GET `url` and read at most `MAX_CONTENT_SIZE + 1` bytes of the body.
    ///
    /// The MIME type comes from the `Content-Type` header and the file name
    /// from the last path segment of the URL.
    pub async fn fetch(&self, url: &str) -> Result<UploadedFile> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::BadRequest(format!("Invalid URL format: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::BadRequest(
                "Only http and https URLs can be downloaded".to_string(),
            ));
        }

        let mut response = self
            .http_client
            .get(parsed.clone())
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Download of {} failed: {}", url, e);
                AppError::BadRequest(format!("Error downloading content from URL: {}", e))
            })?;

        if response
            .content_length()
            .is_some_and(|len| len > MAX_CONTENT_SIZE as u64)
        {
            return Err(too_large());
        }

        let content_type = content_type_from_header(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        let mut data = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            AppError::BadRequest(format!("Error downloading content from URL: {}", e))
        })? {
            if data.len() + chunk.len() > MAX_CONTENT_SIZE {
                return Err(too_large());
            }
            data.extend_from_slice(&chunk);
        }

        let file_name = file_name_from_url(&parsed);
        debug!(
            "Downloaded {}: name={}, type={}, size={}",
            url,
            file_name,
            content_type,
            data.len()
        );

        Ok(UploadedFile {
            file_name,
            content_type,
            data,
        })
    }
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge(format!(
        "File too large. Maximum size is {} bytes ({} MB)",
        MAX_CONTENT_SIZE,
        MAX_CONTENT_SIZE / 1024 / 1024
    ))
}

/// Bare MIME type without parameters such as `charset`
fn content_type_from_header(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .filter(|mime| !mime.is_empty())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("content_{}", Uuid::new_v4()))
}
