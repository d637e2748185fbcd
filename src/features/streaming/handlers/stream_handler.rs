use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, ValidatedJson};
use crate::features::streaming::dtos::{
    ChunkProcessedResponseDto, LiveTextDto, LiveTextResponseDto, StartStreamDto,
    StreamListResponseDto,
};
use crate::features::streaming::models::{StreamChunk, StreamSession, StreamStatus, StreamSummary};
use crate::features::streaming::services::StreamService;
use crate::shared::types::{ApiResponse, Meta};

/// Open a stream
#[utoipa::path(
    post,
    path = "/api/streams",
    tag = "streaming",
    request_body = StartStreamDto,
    responses(
        (status = 201, description = "Stream started", body = ApiResponse<StreamSession>),
        (status = 400, description = "No processor for the content type")
    )
)]
pub async fn start_stream(
    State(service): State<Arc<StreamService>>,
    ValidatedJson(dto): ValidatedJson<StartStreamDto>,
) -> Result<(StatusCode, Json<ApiResponse<StreamSession>>)> {
    let session = service
        .start(&dto.content_type, dto.initial_data, dto.owner)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(session),
            Some("Stream processing started successfully".to_string()),
            None,
        )),
    ))
}

/// Push a chunk into an open stream
#[utoipa::path(
    post,
    path = "/api/streams/{id}/chunks",
    tag = "streaming",
    params(("id" = Uuid, Path, description = "Stream ID")),
    request_body = StreamChunk,
    responses(
        (status = 200, description = "Chunk processed", body = ApiResponse<ChunkProcessedResponseDto>),
        (status = 404, description = "Stream not found")
    )
)]
pub async fn process_chunk(
    State(service): State<Arc<StreamService>>,
    Path(id): Path<Uuid>,
    AppJson(chunk): AppJson<StreamChunk>,
) -> Result<Json<ApiResponse<ChunkProcessedResponseDto>>> {
    let processed = service.process_chunk(id, &chunk).await?;
    Ok(Json(ApiResponse::data(processed)))
}

/// Close a stream
#[utoipa::path(
    post,
    path = "/api/streams/{id}/stop",
    tag = "streaming",
    params(("id" = Uuid, Path, description = "Stream ID")),
    responses(
        (status = 200, description = "Stream stopped", body = ApiResponse<StreamSummary>),
        (status = 404, description = "Stream not found")
    )
)]
pub async fn stop_stream(
    State(service): State<Arc<StreamService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StreamSummary>>> {
    let summary = service.stop(id).await?;
    Ok(Json(ApiResponse::success(
        Some(summary),
        Some("Stream processing stopped successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/streams/{id}",
    tag = "streaming",
    params(("id" = Uuid, Path, description = "Stream ID")),
    responses(
        (status = 200, description = "Stream status", body = ApiResponse<StreamStatus>),
        (status = 404, description = "Stream not found")
    )
)]
pub async fn get_stream_status(
    State(service): State<Arc<StreamService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StreamStatus>>> {
    let status = service.status(id).await?;
    Ok(Json(ApiResponse::data(status)))
}

/// List active streams
#[utoipa::path(
    get,
    path = "/api/streams",
    tag = "streaming",
    responses(
        (status = 200, description = "Active streams", body = ApiResponse<StreamListResponseDto>)
    )
)]
pub async fn list_streams(
    State(service): State<Arc<StreamService>>,
) -> Result<Json<ApiResponse<StreamListResponseDto>>> {
    let streams = service.list().await;
    let total = streams.len() as i64;
    let content_types = service
        .content_types()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(ApiResponse::success(
        Some(StreamListResponseDto {
            streams,
            content_types,
        }),
        None,
        Some(Meta { total }),
    )))
}

/// Analyze a live text snippet
///
/// Runs the active text analysis model; when `stream_id` is given it must
/// name an open `text_stream` and the snippet is counted as one of its chunks.
#[utoipa::path(
    post,
    path = "/api/streams/live-text",
    tag = "streaming",
    request_body = LiveTextDto,
    responses(
        (status = 200, description = "Text analysed", body = ApiResponse<LiveTextResponseDto>),
        (status = 400, description = "Stream is not a text stream"),
        (status = 404, description = "Stream not found")
    )
)]
pub async fn analyze_live_text(
    State(service): State<Arc<StreamService>>,
    ValidatedJson(dto): ValidatedJson<LiveTextDto>,
) -> Result<Json<ApiResponse<LiveTextResponseDto>>> {
    let response = service.analyze_live_text(&dto.text, dto.stream_id).await?;
    Ok(Json(ApiResponse::data(response)))
}
