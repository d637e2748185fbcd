use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery, ValidatedJson};
use crate::features::ml::dtos::{
    ActivateModelDto, ActivateModelResponseDto, AnalyzeImageDto, AnalyzeTextDto,
    ImageAnalysisResponseDto, ListModelsQuery, LoadModelQuery, LoadModelResponseDto,
    ModelListResponseDto, TextAnalysisResponseDto, TrainModelDto, TrainModelResponseDto,
    MAX_IMAGE_SIZE,
};
use crate::features::ml::models::{ModelInput, PerformanceStats};
use crate::features::ml::services::{ModelManager, IMAGE_ANALYSIS, TEXT_ANALYSIS};
use crate::shared::multipart::read_upload_form;
use crate::shared::types::ApiResponse;

/// Analyze text with the text analysis model
#[utoipa::path(
    post,
    path = "/api/ml/analyze-text",
    request_body = AnalyzeTextDto,
    responses(
        (status = 200, description = "Text analysed", body = ApiResponse<TextAnalysisResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Model version not found")
    ),
    tag = "ml"
)]
pub async fn analyze_text(
    State(manager): State<Arc<ModelManager>>,
    ValidatedJson(dto): ValidatedJson<AnalyzeTextDto>,
) -> Result<Json<ApiResponse<TextAnalysisResponseDto>>> {
    let analysis_result = manager
        .predict(
            TEXT_ANALYSIS,
            &ModelInput::Text(dto.text.clone()),
            dto.model_version.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::data(TextAnalysisResponseDto {
        text: dto.text,
        analysis_result,
    })))
}

/// Analyze an uploaded image with the image analysis model
///
/// Accepts multipart/form-data with a `file` part and an optional
/// `model_version` field.
#[utoipa::path(
    post,
    path = "/api/ml/analyze-image",
    request_body(
        content = AnalyzeImageDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Image analysed", body = ApiResponse<ImageAnalysisResponseDto>),
        (status = 400, description = "Missing file"),
        (status = 404, description = "Model version not found"),
        (status = 413, description = "File too large")
    ),
    tag = "ml"
)]
pub async fn analyze_image(
    State(manager): State<Arc<ModelManager>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImageAnalysisResponseDto>>> {
    let form = read_upload_form(multipart, "file").await?;
    let model_version = form.field("model_version").map(str::to_string);
    let (file, _) = form.require_file()?;

    if file.data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_IMAGE_SIZE,
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    let analysis_result = manager
        .predict(
            IMAGE_ANALYSIS,
            &ModelInput::Bytes(file.data),
            model_version.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::data(ImageAnalysisResponseDto {
        filename: file.file_name,
        content_type: file.content_type,
        analysis_result,
    })))
}

/// List registered models and their active versions
#[utoipa::path(
    get,
    path = "/api/ml/models",
    params(ListModelsQuery),
    responses(
        (status = 200, description = "Registered models", body = ApiResponse<ModelListResponseDto>)
    ),
    tag = "ml"
)]
pub async fn list_models(
    State(manager): State<Arc<ModelManager>>,
    AppQuery(query): AppQuery<ListModelsQuery>,
) -> Result<Json<ApiResponse<ModelListResponseDto>>> {
    let models = manager.list(query.model_type.as_deref()).await;
    let active_models = manager.active_versions().await;

    Ok(Json(ApiResponse::data(ModelListResponseDto {
        models,
        active_models,
    })))
}

/// Load a model version into memory
#[utoipa::path(
    post,
    path = "/api/ml/models/{model_type}/load",
    params(
        ("model_type" = String, Path, description = "Model type, e.g. text_analysis"),
        LoadModelQuery
    ),
    responses(
        (status = 200, description = "Model loaded", body = ApiResponse<LoadModelResponseDto>),
        (status = 404, description = "Model type or version not found")
    ),
    tag = "ml"
)]
pub async fn load_model(
    State(manager): State<Arc<ModelManager>>,
    Path(model_type): Path<String>,
    AppQuery(query): AppQuery<LoadModelQuery>,
) -> Result<Json<ApiResponse<LoadModelResponseDto>>> {
    let model = manager
        .load(&model_type, query.model_version.as_deref())
        .await?;

    let message = format!(
        "Model {} v{} loaded successfully",
        model_type, model.model_version
    );
    Ok(Json(ApiResponse::success(
        Some(LoadModelResponseDto { model_type, model }),
        Some(message),
        None,
    )))
}

/// Make a registered version the active one for its type
#[utoipa::path(
    post,
    path = "/api/ml/models/{model_type}/activate",
    params(("model_type" = String, Path, description = "Model type")),
    request_body = ActivateModelDto,
    responses(
        (status = 200, description = "Active version updated", body = ApiResponse<ActivateModelResponseDto>),
        (status = 404, description = "Model type or version not found")
    ),
    tag = "ml"
)]
pub async fn activate_model(
    State(manager): State<Arc<ModelManager>>,
    Path(model_type): Path<String>,
    ValidatedJson(dto): ValidatedJson<ActivateModelDto>,
) -> Result<Json<ApiResponse<ActivateModelResponseDto>>> {
    manager.set_active(&model_type, &dto.model_version).await?;

    Ok(Json(ApiResponse::data(ActivateModelResponseDto {
        model_type,
        active_version: dto.model_version,
    })))
}

/// Run a (simulated) training job
#[utoipa::path(
    post,
    path = "/api/ml/models/{model_type}/train",
    params(("model_type" = String, Path, description = "Model type")),
    request_body = TrainModelDto,
    responses(
        (status = 200, description = "Training finished", body = ApiResponse<TrainModelResponseDto>),
        (status = 400, description = "Training data missing"),
        (status = 404, description = "Model type or version not found")
    ),
    tag = "ml"
)]
pub async fn train_model(
    State(manager): State<Arc<ModelManager>>,
    Path(model_type): Path<String>,
    AppJson(dto): AppJson<TrainModelDto>,
) -> Result<Json<ApiResponse<TrainModelResponseDto>>> {
    if dto.training_data.is_empty() {
        return Err(AppError::Validation(
            "training_data must contain at least one sample".to_string(),
        ));
    }

    let training_result = manager
        .train(
            &model_type,
            &dto.training_data,
            &dto.validation_data,
            dto.model_version.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::data(TrainModelResponseDto {
        model_type,
        model_version: dto.model_version.unwrap_or_else(|| "active".to_string()),
        training_result,
    })))
}

/// Prediction and training history for a model type
#[utoipa::path(
    get,
    path = "/api/ml/models/{model_type}/performance",
    params(("model_type" = String, Path, description = "Model type")),
    responses(
        (status = 200, description = "Performance statistics", body = ApiResponse<PerformanceStats>),
        (status = 404, description = "Model type not found")
    ),
    tag = "ml"
)]
pub async fn model_performance(
    State(manager): State<Arc<ModelManager>>,
    Path(model_type): Path<String>,
) -> Result<Json<ApiResponse<PerformanceStats>>> {
    let stats = manager.performance_stats(&model_type).await?;
    Ok(Json(ApiResponse::data(stats)))
}
