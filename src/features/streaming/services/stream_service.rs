use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ChunkProcessor, TextStreamProcessor, VideoStreamProcessor, TEXT_STREAM};
use crate::core::error::AppError;
use crate::features::ml::models::{ModelInput, Prediction};
use crate::features::ml::services::{ModelManager, TEXT_ANALYSIS};
use crate::features::streaming::dtos::{ChunkProcessedResponseDto, LiveTextResponseDto};
use crate::features::streaming::models::{
    ChunkResult, StreamChunk, StreamSession, StreamState, StreamStatus, StreamSummary,
};

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("No processor available for {0}")]
    UnknownContentType(String),

    #[error("Stream {0} not found")]
    StreamNotFound(Uuid),

    #[error("Stream {stream_id} carries {content_type}, live text needs a text_stream")]
    NotTextStream { stream_id: Uuid, content_type: String },
}

impl From<StreamError> for AppError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::UnknownContentType(_) | StreamError::NotTextStream { .. } => {
                AppError::BadRequest(err.to_string())
            }
            StreamError::StreamNotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}

/// Registry of open streams and the processors that handle their chunks
///
/// Stream lifecycle events are reported through `tracing`.
pub struct StreamService {
    processors: HashMap<&'static str, Arc<dyn ChunkProcessor>>,
    streams: RwLock<HashMap<Uuid, StreamSession>>,
    models: Arc<ModelManager>,
}

impl StreamService {
    pub fn new(models: Arc<ModelManager>) -> Self {
        Self {
            processors: HashMap::new(),
            streams: RwLock::new(HashMap::new()),
            models,
        }
    }

    /// Service with the `text_stream` and `video_stream` processors registered
    pub fn with_default_processors(models: Arc<ModelManager>) -> Self {
        let mut service = Self::new(models);
        service.register_processor(Arc::new(TextStreamProcessor));
        service.register_processor(Arc::new(VideoStreamProcessor));
        service
    }

    pub fn register_processor(&mut self, processor: Arc<dyn ChunkProcessor>) {
        let content_type = processor.content_type();
        self.processors.insert(content_type, processor);
        info!("Registered stream processor for content type: {}", content_type);
    }

    pub fn content_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.processors.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub async fn start(
        &self,
        content_type: &str,
        initial_data: serde_json::Value,
        owner: Option<String>,
    ) -> Result<StreamSession, StreamError> {
        if !self.processors.contains_key(content_type) {
            warn!("No processor registered for content type: {}", content_type);
            return Err(StreamError::UnknownContentType(content_type.to_string()));
        }

        let session = StreamSession {
            stream_id: Uuid::new_v4(),
            content_type: content_type.to_string(),
            owner,
            initial_data,
            started_at: Utc::now(),
            processed_chunks: 0,
            status: StreamState::Active,
        };

        self.streams
            .write()
            .await
            .insert(session.stream_id, session.clone());

        info!(
            "Started stream {} ({}) for {}",
            session.stream_id,
            session.content_type,
            session.owner.as_deref().unwrap_or("anonymous")
        );
        Ok(session)
    }

    /// Run the stream's processor on `chunk` and bump its counter.
    /// Callers hold the registry write lock.
    fn apply_chunk(
        &self,
        session: &mut StreamSession,
        chunk: &StreamChunk,
    ) -> Result<ChunkResult, StreamError> {
        let processor = self
            .processors
            .get(session.content_type.as_str())
            .ok_or_else(|| StreamError::UnknownContentType(session.content_type.clone()))?;

        let result = processor.process(chunk);
        session.processed_chunks += 1;

        debug!(
            "Stream {} processed chunk {} ({} total)",
            session.stream_id,
            chunk.chunk_id(),
            session.processed_chunks
        );
        Ok(result)
    }

    pub async fn process_chunk(
        &self,
        stream_id: Uuid,
        chunk: &StreamChunk,
    ) -> Result<ChunkProcessedResponseDto, StreamError> {
        let mut streams = self.streams.write().await;
        let session = streams
            .get_mut(&stream_id)
            .ok_or(StreamError::StreamNotFound(stream_id))?;

        let result = self.apply_chunk(session, chunk)?;

        Ok(ChunkProcessedResponseDto {
            stream_id,
            chunk_id: chunk.chunk_id().to_string(),
            result,
            processed_chunks: session.processed_chunks,
        })
    }

    /// Close a stream and drop it from the registry
    pub async fn stop(&self, stream_id: Uuid) -> Result<StreamSummary, StreamError> {
        let session = self
            .streams
            .write()
            .await
            .remove(&stream_id)
            .ok_or(StreamError::StreamNotFound(stream_id))?;

        let summary = StreamSummary {
            stream_id,
            content_type: session.content_type.clone(),
            processed_chunks: session.processed_chunks,
            duration: session.elapsed_secs(Utc::now()),
            status: StreamState::Completed,
        };

        info!(
            "Stopped stream {} after {:.1}s and {} chunks",
            stream_id, summary.duration, summary.processed_chunks
        );
        Ok(summary)
    }

    pub async fn status(&self, stream_id: Uuid) -> Result<StreamStatus, StreamError> {
        let streams = self.streams.read().await;
        let session = streams
            .get(&stream_id)
            .ok_or(StreamError::StreamNotFound(stream_id))?;

        Ok(StreamStatus {
            uptime: session.elapsed_secs(Utc::now()),
            session: session.clone(),
        })
    }

    /// Active streams, oldest first
    pub async fn list(&self) -> Vec<StreamStatus> {
        let now = Utc::now();
        let streams = self.streams.read().await;
        let mut statuses: Vec<StreamStatus> = streams
            .values()
            .map(|session| StreamStatus {
                uptime: session.elapsed_secs(now),
                session: session.clone(),
            })
            .collect();
        statuses.sort_by_key(|status| status.session.started_at);
        statuses
    }

    /// Count `chunk` on an open text stream and return the updated status,
    /// all under one write lock
    async fn record_live_chunk(
        &self,
        stream_id: Uuid,
        chunk: &StreamChunk,
    ) -> Result<StreamStatus, StreamError> {
        let mut streams = self.streams.write().await;
        let session = streams
            .get_mut(&stream_id)
            .ok_or(StreamError::StreamNotFound(stream_id))?;

        if session.content_type != TEXT_STREAM {
            return Err(StreamError::NotTextStream {
                stream_id,
                content_type: session.content_type.clone(),
            });
        }

        self.apply_chunk(session, chunk)?;

        Ok(StreamStatus {
            uptime: session.elapsed_secs(Utc::now()),
            session: session.clone(),
        })
    }

    /// One-shot analysis of a live text snippet with the active text model
    ///
    /// When `stream_id` is given it must name an open `text_stream`; the
    /// snippet is counted as one of its chunks before the model runs, so a
    /// rejected stream never reaches the model's performance log.
    pub async fn analyze_live_text(
        &self,
        text: &str,
        stream_id: Option<Uuid>,
    ) -> Result<LiveTextResponseDto, AppError> {
        let chunk_id = Uuid::new_v4().to_string();

        let stream_status = match stream_id {
            Some(stream_id) => {
                let chunk = StreamChunk {
                    chunk_id: Some(chunk_id.clone()),
                    text: Some(text.to_string()),
                    frame_count: None,
                };
                Some(self.record_live_chunk(stream_id, &chunk).await?)
            }
            None => None,
        };

        let analysis: Prediction = self
            .models
            .predict(TEXT_ANALYSIS, &ModelInput::Text(text.to_string()), None)
            .await?;

        Ok(LiveTextResponseDto {
            stream_id,
            chunk_id,
            analysis,
            stream_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn service() -> StreamService {
        let models = ModelManager::with_default_models().await.unwrap();
        StreamService::with_default_processors(Arc::new(models))
    }

    fn text_chunk(text: &str) -> StreamChunk {
        StreamChunk {
            chunk_id: Some("c".to_string()),
            text: Some(text.to_string()),
            frame_count: None,
        }
    }

    #[tokio::test]
    async fn test_default_processors() {
        let service = service().await;
        assert_eq!(service.content_types(), vec!["text_stream", "video_stream"]);
    }

    #[tokio::test]
    async fn test_start_rejects_unknown_content_type() {
        let service = service().await;
        let err = service
            .start("audio_stream", json!({}), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StreamError::UnknownContentType(ref t) if t == "audio_stream"));
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_stream_lifecycle() {
        let service = service().await;
        let session = service
            .start("text_stream", json!({ "source": "radio" }), Some("desk".to_string()))
            .await
            .unwrap();

        let first = service
            .process_chunk(session.stream_id, &text_chunk("one two"))
            .await
            .unwrap();
        assert_eq!(first.processed_chunks, 1);
        let second = service
            .process_chunk(session.stream_id, &text_chunk("three"))
            .await
            .unwrap();
        assert_eq!(second.processed_chunks, 2);

        let status = service.status(session.stream_id).await.unwrap();
        assert_eq!(status.session.processed_chunks, 2);
        assert_eq!(status.session.owner.as_deref(), Some("desk"));
        assert!(status.uptime >= 0.0);
        assert_eq!(service.list().await.len(), 1);

        let summary = service.stop(session.stream_id).await.unwrap();
        assert_eq!(summary.processed_chunks, 2);
        assert_eq!(summary.status, StreamState::Completed);
        assert!(service.list().await.is_empty());

        assert!(matches!(
            service.stop(session.stream_id).await,
            Err(StreamError::StreamNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_chunk_for_unknown_stream() {
        let service = service().await;
        let err = service
            .process_chunk(Uuid::new_v4(), &text_chunk("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, StreamError::StreamNotFound(_)));
        assert!(matches!(AppError::from(err), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_live_text_counts_chunk_on_open_stream() {
        let service = service().await;

        let one_shot = service.analyze_live_text("urgent update", None).await.unwrap();
        assert!(one_shot.stream_status.is_none());
        assert!(matches!(one_shot.analysis, Prediction::Text(_)));

        let session = service.start("text_stream", json!({}), None).await.unwrap();
        let live = service
            .analyze_live_text("urgent update", Some(session.stream_id))
            .await
            .unwrap();
        let status = live.stream_status.unwrap();
        assert_eq!(status.session.processed_chunks, 1);

        let missing = service.analyze_live_text("hello", Some(Uuid::new_v4())).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_live_text_on_unknown_stream_skips_the_model() {
        let service = service().await;

        let result = service.analyze_live_text("hello", Some(Uuid::new_v4())).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let stats = service.models.performance_stats(TEXT_ANALYSIS).await.unwrap();
        assert_eq!(stats.total_predictions, 0);
    }

    #[tokio::test]
    async fn test_live_text_rejects_video_stream() {
        let service = service().await;
        let session = service.start("video_stream", json!({}), None).await.unwrap();

        let result = service
            .analyze_live_text("caption", Some(session.stream_id))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        let status = service.status(session.stream_id).await.unwrap();
        assert_eq!(status.session.processed_chunks, 0);
        let stats = service.models.performance_stats(TEXT_ANALYSIS).await.unwrap();
        assert_eq!(stats.total_predictions, 0);
    }

    #[tokio::test]
    async fn test_concurrent_chunks_are_all_counted() {
        let service = Arc::new(service().await);
        let session = service.start("text_stream", json!({}), None).await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .process_chunk(session.stream_id, &text_chunk(&format!("chunk {}", i)))
                        .await
                        .unwrap()
                        .processed_chunks
                })
            })
            .collect();

        let mut counts = Vec::new();
        for task in tasks {
            counts.push(task.await.unwrap());
        }
        counts.sort_unstable();

        assert_eq!(counts, (1..=20).collect::<Vec<u64>>());
    }
}
