use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::performance::dtos::{
    AlertsDto, ClearedProfilesDto, ConnectionStatsDto, DatabaseStatsDto, HistoryQuery,
    ProfileListDto, ProfileQuery, ResourceReportDto,
};
use crate::features::performance::models::{
    MonitoringPoint, ProcessMetrics, RequestProfile, SystemMetrics,
};
use crate::features::performance::services::PerformanceService;
use crate::shared::types::{ApiResponse, Meta};

// ============================================================================
// Database
// ============================================================================

/// Connection pool usage
#[utoipa::path(
    get,
    path = "/api/performance/db/connections",
    tag = "performance",
    responses(
        (status = 200, description = "Pool statistics", body = ApiResponse<ConnectionStatsDto>)
    )
)]
pub async fn get_connection_stats(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<ConnectionStatsDto>> {
    Json(ApiResponse::data(service.database().connection_stats()))
}

/// Server-side activity counters for the application database
#[utoipa::path(
    get,
    path = "/api/performance/db/stats",
    tag = "performance",
    responses(
        (status = 200, description = "Database statistics", body = ApiResponse<DatabaseStatsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_database_stats(
    State(service): State<Arc<PerformanceService>>,
) -> Result<Json<ApiResponse<DatabaseStatsDto>>> {
    let stats = service.database().database_stats().await?;
    Ok(Json(ApiResponse::data(stats)))
}

// ============================================================================
// Profiling
// ============================================================================

/// Per-route request timings, slowest average first
#[utoipa::path(
    get,
    path = "/api/performance/profiling/profiles",
    tag = "performance",
    responses(
        (status = 200, description = "Request profiles", body = ApiResponse<ProfileListDto>)
    )
)]
pub async fn list_profiles(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<ProfileListDto>> {
    let profiles = service.profiler().profiles().await;
    let total = profiles.len();
    Json(ApiResponse::success(
        Some(ProfileListDto { profiles, total }),
        None,
        Some(Meta {
            total: total as i64,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/performance/profiling/profile",
    tag = "performance",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Request profile", body = ApiResponse<RequestProfile>),
        (status = 404, description = "No requests recorded under that name")
    )
)]
pub async fn get_profile(
    State(service): State<Arc<PerformanceService>>,
    AppQuery(query): AppQuery<ProfileQuery>,
) -> Result<Json<ApiResponse<RequestProfile>>> {
    let profile = service
        .profiler()
        .profile(&query.name)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Profile '{}' not found", query.name)))?;
    Ok(Json(ApiResponse::data(profile)))
}

#[utoipa::path(
    delete,
    path = "/api/performance/profiling/profiles",
    tag = "performance",
    responses(
        (status = 200, description = "Profiles cleared", body = ApiResponse<ClearedProfilesDto>)
    )
)]
pub async fn clear_profiles(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<ClearedProfilesDto>> {
    let cleared = service.profiler().clear().await;
    tracing::info!("Cleared {} request profiles", cleared);
    Json(ApiResponse::success(
        Some(ClearedProfilesDto { cleared }),
        Some("Profiles cleared successfully".to_string()),
        None,
    ))
}

// ============================================================================
// Monitoring
// ============================================================================

/// Current host CPU, memory, disk and network figures
#[utoipa::path(
    get,
    path = "/api/performance/monitoring/system",
    tag = "performance",
    responses(
        (status = 200, description = "System metrics", body = ApiResponse<SystemMetrics>)
    )
)]
pub async fn get_system_metrics(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<SystemMetrics>> {
    Json(ApiResponse::data(service.monitor().system_metrics().await))
}

#[utoipa::path(
    get,
    path = "/api/performance/monitoring/process",
    tag = "performance",
    responses(
        (status = 200, description = "Process metrics", body = ApiResponse<ProcessMetrics>)
    )
)]
pub async fn get_process_metrics(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<ProcessMetrics>> {
    Json(ApiResponse::data(service.monitor().process_metrics().await))
}

/// Usage figures above their alert thresholds
#[utoipa::path(
    get,
    path = "/api/performance/monitoring/alerts",
    tag = "performance",
    responses(
        (status = 200, description = "Active alerts", body = ApiResponse<AlertsDto>)
    )
)]
pub async fn get_alerts(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<AlertsDto>> {
    let alerts = service.monitor().alerts().await;
    let count = alerts.len();
    Json(ApiResponse::data(AlertsDto { alerts, count }))
}

#[utoipa::path(
    get,
    path = "/api/performance/monitoring/report",
    tag = "performance",
    responses(
        (status = 200, description = "Resource utilization report", body = ApiResponse<ResourceReportDto>)
    )
)]
pub async fn get_report(
    State(service): State<Arc<PerformanceService>>,
) -> Json<ApiResponse<ResourceReportDto>> {
    Json(ApiResponse::data(service.monitor().report().await))
}

/// Most recent sampled points, oldest first
#[utoipa::path(
    get,
    path = "/api/performance/monitoring/history",
    tag = "performance",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Monitoring history", body = ApiResponse<Vec<MonitoringPoint>>),
        (status = 400, description = "limit must be at least 1")
    )
)]
pub async fn get_history(
    State(service): State<Arc<PerformanceService>>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<MonitoringPoint>>>> {
    let limit = query.limit();
    if limit == 0 {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }

    let history = service.monitor().history(limit).await;
    let total = history.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(history),
        None,
        Some(Meta { total }),
    )))
}
