use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::ml::models::Prediction;
use crate::features::streaming::models::{ChunkResult, StreamStatus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartStreamDto {
    /// Processor key: `text_stream` or `video_stream`
    #[validate(length(min = 1, message = "content_type is required"))]
    #[schema(example = "text_stream")]
    pub content_type: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub initial_data: serde_json::Value,
    /// Free-form label of whoever opened the stream
    pub owner: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChunkProcessedResponseDto {
    pub stream_id: Uuid,
    pub chunk_id: String,
    pub result: ChunkResult,
    pub processed_chunks: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StreamListResponseDto {
    pub streams: Vec<StreamStatus>,
    /// Content types a stream can be started with
    pub content_types: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LiveTextDto {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
    /// Open stream to count the snippet against
    pub stream_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LiveTextResponseDto {
    pub stream_id: Option<Uuid>,
    pub chunk_id: String,
    pub analysis: Prediction,
    pub stream_status: Option<StreamStatus>,
}
