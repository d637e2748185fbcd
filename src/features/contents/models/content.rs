use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Processing state of an uploaded content record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Uploaded,
    Processing,
    Completed,
    Failed,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Database model for contents, without the raw bytes
#[derive(Debug, Clone, FromRow)]
pub struct Content {
    pub id: Uuid,
    pub filename: String,
    pub storage_key: String,
    pub content_type: String,
    pub file_size: i64,
    pub metadata: serde_json::Value,
    pub uploaded_by: Option<String>,
    pub verification_score: Option<f64>,
    pub deepfake_probability: Option<f64>,
    pub verification_result: Option<serde_json::Value>,
    pub deepfake_result: Option<serde_json::Value>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content row together with its stored bytes
#[derive(Debug, FromRow)]
pub struct StoredContent {
    #[sqlx(flatten)]
    pub content: Content,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_match_serde() {
        for status in [
            ContentStatus::Uploaded,
            ContentStatus::Processing,
            ContentStatus::Completed,
            ContentStatus::Failed,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }
}
