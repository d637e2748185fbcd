use utoipa::{Modify, OpenApi};

use crate::features::ai::{dtos as ai_dtos, handlers as ai_handlers};
use crate::features::content_analysis::models as analysis_models;
use crate::features::contents::{
    dtos as contents_dtos, handlers as contents_handlers, models as contents_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::deepfake::models as deepfake_models;
use crate::features::fact_check::models as fact_check_models;
use crate::features::ml::{dtos as ml_dtos, handlers as ml_handlers, models as ml_models};
use crate::features::performance::{
    dtos as performance_dtos, handlers as performance_handlers, models as performance_models,
};
use crate::features::streaming::{
    dtos as streaming_dtos, handlers as streaming_handlers, models as streaming_models,
};
use crate::features::verification::models as verification_models;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // ML
        ml_handlers::analyze_text,
        ml_handlers::analyze_image,
        ml_handlers::list_models,
        ml_handlers::load_model,
        ml_handlers::activate_model,
        ml_handlers::train_model,
        ml_handlers::model_performance,
        // Contents
        contents_handlers::upload_content,
        contents_handlers::upload_content_from_url,
        contents_handlers::get_content,
        // AI
        ai_handlers::verify_content,
        ai_handlers::detect_deepfake,
        ai_handlers::get_content_analysis,
        ai_handlers::analyze_text,
        ai_handlers::analyze_image_metadata,
        ai_handlers::check_source,
        ai_handlers::verify_claim,
        ai_handlers::third_party_status,
        // Streaming
        streaming_handlers::start_stream,
        streaming_handlers::list_streams,
        streaming_handlers::process_chunk,
        streaming_handlers::stop_stream,
        streaming_handlers::get_stream_status,
        streaming_handlers::analyze_live_text,
        // Dashboard
        dashboard_handlers::get_summary,
        dashboard_handlers::get_trends,
        dashboard_handlers::get_verification_summary,
        dashboard_handlers::get_third_party_stats,
        dashboard_handlers::get_correlation,
        dashboard_handlers::get_trend_analysis,
        dashboard_handlers::get_insights,
        dashboard_handlers::get_custom_dashboard,
        dashboard_handlers::export_dashboard,
        // Performance
        performance_handlers::get_connection_stats,
        performance_handlers::get_database_stats,
        performance_handlers::list_profiles,
        performance_handlers::get_profile,
        performance_handlers::clear_profiles,
        performance_handlers::get_system_metrics,
        performance_handlers::get_process_metrics,
        performance_handlers::get_alerts,
        performance_handlers::get_report,
        performance_handlers::get_history,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Verification
            verification_models::Severity,
            verification_models::Finding,
            verification_models::VerificationAssessment,
            verification_models::VerificationResult,
            verification_models::MetadataAnalysis,
            verification_models::ImageMetadataAnalysis,
            verification_models::VideoMetadataAnalysis,
            verification_models::TextMetadataAnalysis,
            verification_models::ExifSummary,
            verification_models::AuthorInfo,
            verification_models::AvailableFields,
            verification_models::FieldSet,
            verification_models::Presence,
            // Deepfake
            deepfake_models::DeepfakeAssessment,
            deepfake_models::DeepfakeIndicator,
            deepfake_models::DetectionResult,
            // Content analysis
            analysis_models::TextAnalysis,
            analysis_models::TextIndicators,
            analysis_models::PatternHits,
            analysis_models::Readability,
            analysis_models::ImageIntegrityReport,
            analysis_models::EditingIndicator,
            analysis_models::SourceCredibility,
            analysis_models::SourceCategory,
            ApiResponse<analysis_models::TextAnalysis>,
            ApiResponse<analysis_models::ImageIntegrityReport>,
            ApiResponse<analysis_models::SourceCredibility>,
            // Fact check
            fact_check_models::ClaimVerificationReport,
            fact_check_models::ProviderStatus,
            ApiResponse<fact_check_models::ClaimVerificationReport>,
            // ML
            ml_models::ModelInfo,
            ml_models::Prediction,
            ml_models::TextPrediction,
            ml_models::ImagePrediction,
            ml_models::ManipulationAssessment,
            ml_models::TrainingReport,
            ml_models::PerformanceRecord,
            ml_models::PerformanceStats,
            ml_models::RecordKind,
            ml_dtos::AnalyzeTextDto,
            ml_dtos::AnalyzeImageDto,
            ml_dtos::ActivateModelDto,
            ml_dtos::TrainModelDto,
            ml_dtos::TextAnalysisResponseDto,
            ml_dtos::ImageAnalysisResponseDto,
            ml_dtos::ModelListResponseDto,
            ml_dtos::LoadModelResponseDto,
            ml_dtos::ActivateModelResponseDto,
            ml_dtos::TrainModelResponseDto,
            ApiResponse<ml_dtos::TextAnalysisResponseDto>,
            ApiResponse<ml_dtos::ImageAnalysisResponseDto>,
            ApiResponse<ml_dtos::ModelListResponseDto>,
            ApiResponse<ml_dtos::LoadModelResponseDto>,
            ApiResponse<ml_dtos::ActivateModelResponseDto>,
            ApiResponse<ml_dtos::TrainModelResponseDto>,
            ApiResponse<ml_models::PerformanceStats>,
            // Contents
            contents_models::ContentStatus,
            contents_dtos::UploadContentDto,
            contents_dtos::UploadFromUrlDto,
            contents_dtos::ContentResponseDto,
            ApiResponse<contents_dtos::ContentResponseDto>,
            // AI
            ai_dtos::ContentIdDto,
            ai_dtos::VerifyContentResponseDto,
            ai_dtos::DeepfakeDetectResponseDto,
            ai_dtos::ContentAnalysisResponseDto,
            ai_dtos::AnalyzeTextRequestDto,
            ai_dtos::AnalyzeImageMetadataDto,
            ai_dtos::CheckSourceDto,
            ai_dtos::VerifyClaimDto,
            ai_dtos::ThirdPartyStatusResponseDto,
            ApiResponse<ai_dtos::VerifyContentResponseDto>,
            ApiResponse<ai_dtos::DeepfakeDetectResponseDto>,
            ApiResponse<ai_dtos::ContentAnalysisResponseDto>,
            ApiResponse<ai_dtos::ThirdPartyStatusResponseDto>,
            // Streaming
            streaming_models::StreamState,
            streaming_models::StreamSession,
            streaming_models::StreamStatus,
            streaming_models::StreamSummary,
            streaming_models::StreamChunk,
            streaming_models::ChunkResult,
            streaming_models::TextChunkResult,
            streaming_models::VideoChunkResult,
            streaming_dtos::StartStreamDto,
            streaming_dtos::ChunkProcessedResponseDto,
            streaming_dtos::StreamListResponseDto,
            streaming_dtos::LiveTextDto,
            streaming_dtos::LiveTextResponseDto,
            ApiResponse<streaming_models::StreamSession>,
            ApiResponse<streaming_models::StreamStatus>,
            ApiResponse<streaming_models::StreamSummary>,
            ApiResponse<streaming_dtos::ChunkProcessedResponseDto>,
            ApiResponse<streaming_dtos::StreamListResponseDto>,
            ApiResponse<streaming_dtos::LiveTextResponseDto>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::DailyTrendDto,
            dashboard_dtos::TrendsDto,
            dashboard_dtos::VerificationSummaryDto,
            dashboard_dtos::ServiceStatsDto,
            dashboard_dtos::ThirdPartyStatsDto,
            dashboard_dtos::CorrelationDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<dashboard_dtos::TrendsDto>,
            ApiResponse<dashboard_dtos::VerificationSummaryDto>,
            ApiResponse<dashboard_dtos::ThirdPartyStatsDto>,
            ApiResponse<dashboard_dtos::CorrelationDto>,
            dashboard_dtos::TrendDirection,
            dashboard_dtos::MetricTrendDto,
            dashboard_dtos::TrendPatternDto,
            dashboard_dtos::AnomalyDto,
            dashboard_dtos::TrendCorrelationsDto,
            dashboard_dtos::TrendAnalysisDto,
            dashboard_dtos::InsightKind,
            dashboard_dtos::InsightPriority,
            dashboard_dtos::InsightDto,
            dashboard_dtos::InsightsDto,
            dashboard_dtos::DashboardWidget,
            dashboard_dtos::WidgetLayoutDto,
            dashboard_dtos::DashboardWidgetsDto,
            dashboard_dtos::CustomDashboardDto,
            dashboard_dtos::ExportFormat,
            dashboard_dtos::DashboardExportDto,
            ApiResponse<dashboard_dtos::TrendAnalysisDto>,
            ApiResponse<dashboard_dtos::InsightsDto>,
            ApiResponse<dashboard_dtos::CustomDashboardDto>,
            // Performance
            performance_models::CpuMetrics,
            performance_models::MemoryMetrics,
            performance_models::DiskMetrics,
            performance_models::NetworkMetrics,
            performance_models::SystemMetrics,
            performance_models::ProcessMemory,
            performance_models::ProcessMetrics,
            performance_models::MonitoringPoint,
            performance_models::AlertKind,
            performance_models::AlertSeverity,
            performance_models::PerformanceAlert,
            performance_models::RequestProfile,
            performance_dtos::ConnectionStatsDto,
            performance_dtos::DatabaseStatsDto,
            performance_dtos::ProfileListDto,
            performance_dtos::ClearedProfilesDto,
            performance_dtos::AlertsDto,
            performance_dtos::ResourceAveragesDto,
            performance_dtos::ResourceReportDto,
            ApiResponse<performance_dtos::ConnectionStatsDto>,
            ApiResponse<performance_dtos::DatabaseStatsDto>,
            ApiResponse<performance_dtos::ProfileListDto>,
            ApiResponse<performance_models::RequestProfile>,
            ApiResponse<performance_dtos::ClearedProfilesDto>,
            ApiResponse<performance_models::SystemMetrics>,
            ApiResponse<performance_models::ProcessMetrics>,
            ApiResponse<performance_dtos::AlertsDto>,
            ApiResponse<performance_dtos::ResourceReportDto>,
        )
    ),
    tags(
        (name = "ml", description = "Model registry, inference and training"),
        (name = "contents", description = "Content upload and retrieval"),
        (name = "ai", description = "Content verification, deepfake detection and fact checking"),
        (name = "streaming", description = "Real-time stream analysis"),
        (name = "Dashboard", description = "Verification analytics"),
        (name = "performance", description = "Database, request and host monitoring"),
    ),
    info(
        title = "VeritasAI API",
        version = "0.1.0",
        description = "API documentation for VeritasAI",
    )
)]
pub struct ApiDoc;

/// Overrides the generated info block with values resolved at startup
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_feature() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/ml/analyze-text",
            "/api/contents",
            "/api/ai/verify",
            "/api/streams/{id}/chunks",
            "/api/dashboard/trends",
            "/api/contents/url",
            "/api/dashboard/trends/analysis",
            "/api/dashboard/insights",
            "/api/dashboard/custom",
            "/api/dashboard/export",
            "/api/performance/db/connections",
            "/api/performance/db/stats",
            "/api/performance/profiling/profiles",
            "/api/performance/monitoring/history",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Overridden".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("Overridden"));
    }
}
