use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppQuery;
use crate::features::dashboard::dtos::{
    CorrelationDto, CustomDashboardDto, CustomDashboardQuery, DashboardExportDto, DashboardQuery,
    DashboardSummaryDto, DashboardWidget, ExportFormat, ExportQuery, InsightsDto,
    ThirdPartyStatsDto, TrendAnalysisDto, TrendsDto, TrendsQuery, VerificationSummaryDto,
};
use crate::features::dashboard::services::{to_csv, DashboardService};
use crate::shared::types::ApiResponse;

// ============================================================================
// Summary
// ============================================================================

/// Totals, averages and content type distribution
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service.get_summary(query.uploaded_by.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

// ============================================================================
// Trends
// ============================================================================

/// Daily counts and averages over the last `days` days
#[utoipa::path(
    get,
    path = "/api/dashboard/trends",
    tag = "Dashboard",
    params(TrendsQuery),
    responses(
        (status = 200, description = "Daily trends", body = ApiResponse<TrendsDto>),
        (status = 400, description = "days out of range"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_trends(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<TrendsQuery>,
) -> Result<Json<ApiResponse<TrendsDto>>, AppError> {
    let trends = service
        .get_trends(query.uploaded_by.as_deref(), query.days)
        .await?;
    Ok(Json(ApiResponse::success(Some(trends), None, None)))
}

/// Trend direction, weekly/seasonal/growth patterns, correlations and anomalies
#[utoipa::path(
    get,
    path = "/api/dashboard/trends/analysis",
    tag = "Dashboard",
    params(TrendsQuery),
    responses(
        (status = 200, description = "Trend analysis", body = ApiResponse<TrendAnalysisDto>),
        (status = 400, description = "days out of range"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_trend_analysis(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<TrendsQuery>,
) -> Result<Json<ApiResponse<TrendAnalysisDto>>, AppError> {
    let analysis = service
        .get_trend_analysis(query.uploaded_by.as_deref(), query.days)
        .await?;
    Ok(Json(ApiResponse::success(Some(analysis), None, None)))
}

// ============================================================================
// Breakdowns
// ============================================================================

/// Verified content per assessment band
#[utoipa::path(
    get,
    path = "/api/dashboard/verification-summary",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Verification summary", body = ApiResponse<VerificationSummaryDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_verification_summary(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<VerificationSummaryDto>>, AppError> {
    let summary = service
        .get_verification_summary(query.uploaded_by.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Fact-check verdicts per provider
#[utoipa::path(
    get,
    path = "/api/dashboard/third-party-stats",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Third-party statistics", body = ApiResponse<ThirdPartyStatsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_third_party_stats(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<ThirdPartyStatsDto>>, AppError> {
    let stats = service
        .get_third_party_stats(query.uploaded_by.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Correlation between verification score and deepfake probability
#[utoipa::path(
    get,
    path = "/api/dashboard/correlation",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Correlation", body = ApiResponse<CorrelationDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_correlation(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<CorrelationDto>>, AppError> {
    let correlation = service.get_correlation(query.uploaded_by.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(correlation), None, None)))
}

// ============================================================================
// Insights, custom dashboards and export
// ============================================================================

/// Rule-based insights over the summary, bands, fact checks and recent activity
#[utoipa::path(
    get,
    path = "/api/dashboard/insights",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Generated insights", body = ApiResponse<InsightsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_insights(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<DashboardQuery>,
) -> Result<Json<ApiResponse<InsightsDto>>, AppError> {
    let insights = service.get_insights(query.uploaded_by.as_deref()).await?;
    Ok(Json(ApiResponse::success(Some(insights), None, None)))
}

/// Selected widgets with a default grid layout
#[utoipa::path(
    get,
    path = "/api/dashboard/custom",
    tag = "Dashboard",
    params(CustomDashboardQuery),
    responses(
        (status = 200, description = "Custom dashboard", body = ApiResponse<CustomDashboardDto>),
        (status = 400, description = "Unknown widget"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_custom_dashboard(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<CustomDashboardQuery>,
) -> Result<Json<ApiResponse<CustomDashboardDto>>, AppError> {
    let widgets = DashboardWidget::parse_list(query.widgets.as_deref())?;
    let dashboard = service
        .get_custom_dashboard(query.uploaded_by.as_deref(), &widgets)
        .await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}

/// Download every dashboard section as a JSON document or CSV file
#[utoipa::path(
    get,
    path = "/api/dashboard/export",
    tag = "Dashboard",
    params(ExportQuery),
    responses(
        (status = 200, description = "Dashboard export; CSV is flattened into section,metric,value rows",
            content((DashboardExportDto = "application/json"), (String = "text/csv"))),
        (status = 400, description = "Unknown format"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn export_dashboard(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<ExportQuery>,
) -> Result<Response, AppError> {
    let export = service.get_export(query.uploaded_by.as_deref()).await?;

    let body = match query.format {
        ExportFormat::Json => serde_json::to_string_pretty(&export)
            .map_err(|e| AppError::Internal(format!("Failed to serialize export: {}", e)))?,
        ExportFormat::Csv => to_csv(&export),
    };
    let filename = format!(
        "veritas_dashboard_export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        query.format.extension()
    );

    Ok((
        [
            (header::CONTENT_TYPE, query.format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}
