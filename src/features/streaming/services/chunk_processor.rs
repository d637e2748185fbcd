use chrono::Utc;

use crate::features::streaming::models::{
    ChunkResult, StreamChunk, TextChunkResult, VideoChunkResult,
};

pub const TEXT_STREAM: &str = "text_stream";
pub const VIDEO_STREAM: &str = "video_stream";

/// Per-content-type handler for stream chunks
pub trait ChunkProcessor: Send + Sync {
    /// Registry key this processor serves
    fn content_type(&self) -> &'static str;

    fn process(&self, chunk: &StreamChunk) -> ChunkResult;
}

/// Word and character counts with a length-based authenticity score
#[derive(Debug, Default)]
pub struct TextStreamProcessor;

impl ChunkProcessor for TextStreamProcessor {
    fn content_type(&self) -> &'static str {
        TEXT_STREAM
    }

    fn process(&self, chunk: &StreamChunk) -> ChunkResult {
        let text = chunk.text.as_deref().unwrap_or_default();
        let word_count = text.split_whitespace().count();

        ChunkResult::Text(TextChunkResult {
            chunk_id: chunk.chunk_id().to_string(),
            word_count,
            char_count: text.chars().count(),
            authenticity_score: (0.8 - word_count as f64 * 0.001).clamp(0.0, 1.0),
            timestamp: Utc::now(),
        })
    }
}

/// Frame-count based deepfake probability
#[derive(Debug, Default)]
pub struct VideoStreamProcessor;

impl ChunkProcessor for VideoStreamProcessor {
    fn content_type(&self) -> &'static str {
        VIDEO_STREAM
    }

    fn process(&self, chunk: &StreamChunk) -> ChunkResult {
        let frame_count = chunk.frame_count.unwrap_or(0);

        ChunkResult::Video(VideoChunkResult {
            chunk_id: chunk.chunk_id().to_string(),
            frame_count,
            deepfake_probability: (0.1 + frame_count as f64 * 0.005).clamp(0.0, 1.0),
            timestamp: Utc::now(),
        })
    }
}
