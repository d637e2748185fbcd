use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::contents::clients::UrlFetcher;
use crate::features::contents::models::{Content, ContentStatus, StoredContent};
use crate::features::verification::Metadata;
use crate::shared::multipart::UploadedFile;

const CONTENT_COLUMNS: &str = "id, filename, storage_key, content_type, file_size, metadata, \
     uploaded_by, verification_score, deepfake_probability, verification_result, \
     deepfake_result, status, created_at, updated_at";

/// Service for stored content and its analysis results
pub struct ContentService {
    pool: PgPool,
    fetcher: UrlFetcher,
}

impl ContentService {
    pub fn new(pool: PgPool, http_client: reqwest::Client) -> Self {
        Self {
            pool,
            fetcher: UrlFetcher::new(http_client),
        }
    }

    /// Download remote content so it can be stored like an upload
    pub async fn download(&self, url: &str) -> Result<UploadedFile> {
        self.fetcher.fetch(url).await
    }

    /// Key under which the bytes are addressed: `contents/{id}/{filename}`
    fn storage_key(id: Uuid, filename: &str) -> String {
        let safe: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("contents/{}/{}", id, safe)
    }

    /// Persist an upload with its client metadata
    pub async fn create(
        &self,
        file: UploadedFile,
        metadata: Metadata,
        uploaded_by: Option<String>,
    ) -> Result<Content> {
        let id = Uuid::new_v4();
        let storage_key = Self::storage_key(id, &file.file_name);
        let file_size = file.data.len() as i64;

        let content = sqlx::query_as::<_, Content>(&format!(
            r#"
            INSERT INTO contents (id, filename, storage_key, content_type, file_size, data, metadata, uploaded_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(id)
        .bind(&file.file_name)
        .bind(&storage_key)
        .bind(&file.content_type)
        .bind(file_size)
        .bind(&file.data)
        .bind(serde_json::Value::Object(metadata))
        .bind(uploaded_by)
        .bind(ContentStatus::Uploaded.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Content stored: id={}, key={}, type={}, size={}",
            content.id, content.storage_key, content.content_type, content.file_size
        );

        Ok(content)
    }

    pub async fn get(&self, id: Uuid) -> Result<Content> {
        sqlx::query_as::<_, Content>(&format!(
            "SELECT {} FROM contents WHERE id = $1",
            CONTENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))
    }

    /// Content record together with its bytes, for the analysis engines
    pub async fn get_with_data(&self, id: Uuid) -> Result<StoredContent> {
        sqlx::query_as::<_, StoredContent>(&format!(
            "SELECT {}, data FROM contents WHERE id = $1",
            CONTENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))
    }

    pub async fn set_status(&self, id: Uuid, status: ContentStatus) -> Result<()> {
        sqlx::query("UPDATE contents SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        debug!("Content {} status set to {}", id, status.as_str());
        Ok(())
    }

    /// Store a verification outcome and mark the content completed
    pub async fn save_verification(
        &self,
        id: Uuid,
        score: f64,
        result: serde_json::Value,
    ) -> Result<Content> {
        let content = sqlx::query_as::<_, Content>(&format!(
            r#"
            UPDATE contents
            SET verification_score = $2, verification_result = $3, status = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(id)
        .bind(score)
        .bind(result)
        .bind(ContentStatus::Completed.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

        info!("Verification stored for content {}: score={:.2}", id, score);
        Ok(content)
    }

    /// Store a deepfake detection outcome and mark the content completed
    pub async fn save_deepfake(
        &self,
        id: Uuid,
        probability: f64,
        result: serde_json::Value,
    ) -> Result<Content> {
        let content = sqlx::query_as::<_, Content>(&format!(
            r#"
            UPDATE contents
            SET deepfake_probability = $2, deepfake_result = $3, status = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(id)
        .bind(probability)
        .bind(result)
        .bind(ContentStatus::Completed.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {} not found", id)))?;

        info!(
            "Deepfake result stored for content {}: probability={:.2}",
            id, probability
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_sanitizes_filename() {
        let id = Uuid::nil();
        assert_eq!(
            ContentService::storage_key(id, "my photo (1).png"),
            "contents/00000000-0000-0000-0000-000000000000/my_photo__1_.png"
        );
        assert_eq!(
            ContentService::storage_key(id, "../etc/passwd"),
            "contents/00000000-0000-0000-0000-000000000000/.._etc_passwd"
        );
    }
}
