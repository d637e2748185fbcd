use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StreamState {
    Active,
    Completed,
}

/// An open stream in the registry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StreamSession {
    pub stream_id: Uuid,
    /// Processor key, e.g. `text_stream`
    pub content_type: String,
    pub owner: Option<String>,
    #[schema(value_type = Object)]
    pub initial_data: serde_json::Value,
    pub started_at: DateTime<Utc>,
    pub processed_chunks: u64,
    pub status: StreamState,
}

impl StreamSession {
    /// Seconds elapsed since the stream started
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        (now - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// A session snapshot with its uptime
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StreamStatus {
    #[serde(flatten)]
    pub session: StreamSession,
    pub uptime: f64,
}

/// Final numbers of a stopped stream
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StreamSummary {
    pub stream_id: Uuid,
    pub content_type: String,
    pub processed_chunks: u64,
    /// Seconds between start and stop
    pub duration: f64,
    pub status: StreamState,
}

/// One chunk pushed into a stream
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StreamChunk {
    pub chunk_id: Option<String>,
    /// Payload for `text_stream`
    pub text: Option<String>,
    /// Payload for `video_stream`
    pub frame_count: Option<u64>,
}

impl StreamChunk {
    pub fn chunk_id(&self) -> &str {
        self.chunk_id.as_deref().unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextChunkResult {
    pub chunk_id: String,
    pub word_count: usize,
    pub char_count: usize,
    pub authenticity_score: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VideoChunkResult {
    pub chunk_id: String,
    pub frame_count: u64,
    pub deepfake_probability: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ChunkResult {
    Text(TextChunkResult),
    Video(VideoChunkResult),
}
