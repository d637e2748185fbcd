mod dashboard_dto;

pub use dashboard_dto::{
    AnomalyDto, CorrelationDto, CustomDashboardDto, CustomDashboardQuery, DailyTrendDto,
    DashboardExportDto, DashboardQuery, DashboardSummaryDto, DashboardWidget, DashboardWidgetsDto,
    ExportFormat, ExportQuery, InsightDto, InsightKind, InsightPriority, InsightsDto,
    MetricTrendDto, ServiceStatsDto, ThirdPartyStatsDto, TrendAnalysisDto, TrendCorrelationsDto,
    TrendDirection, TrendPatternDto, TrendsDto, TrendsQuery, VerificationSummaryDto,
    WidgetLayoutDto, DEFAULT_TREND_DAYS, MAX_TREND_DAYS,
};
