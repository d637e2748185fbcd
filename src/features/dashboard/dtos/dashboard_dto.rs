use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::core::error::AppError;

pub const DEFAULT_TREND_DAYS: i64 = 30;
pub const MAX_TREND_DAYS: i64 = 365;

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// Only count content uploaded under this label
    pub uploaded_by: Option<String>,
}

fn default_days() -> i64 {
    DEFAULT_TREND_DAYS
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TrendsQuery {
    /// Only count content uploaded under this label
    pub uploaded_by: Option<String>,

    /// Window size in days
    #[serde(default = "default_days")]
    #[param(minimum = 1, maximum = 365)]
    pub days: i64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CustomDashboardQuery {
    /// Only count content uploaded under this label
    pub uploaded_by: Option<String>,

    /// Comma separated widget names: `summary`, `trends`, `verification`,
    /// `third_party`. Defaults to all of them.
    #[param(example = "summary,trends")]
    pub widgets: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// Only count content uploaded under this label
    pub uploaded_by: Option<String>,

    /// `json` (default) or `csv`
    #[serde(default)]
    #[param(value_type = Option<ExportFormat>)]
    pub format: ExportFormat,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_content: i64,
    pub verified_content: i64,
    pub deepfake_analyzed: i64,
    /// Verified content whose result carries a third-party report
    pub third_party_verified: i64,
    pub avg_verification_score: f64,
    pub avg_deepfake_probability: f64,
    pub content_type_distribution: BTreeMap<String, i64>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyTrendDto {
    pub date: NaiveDate,
    pub content_count: i64,
    pub avg_verification_score: f64,
    pub avg_deepfake_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendsDto {
    pub period_days: i64,
    pub trends: Vec<DailyTrendDto>,
    /// Least-squares slope of the daily verification averages per day
    pub verification_trend_slope: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

/// Verified content counted per assessment band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct VerificationSummaryDto {
    pub total_verified: i64,
    pub highly_authentic: i64,
    pub likely_authentic: i64,
    pub uncertain: i64,
    pub likely_misinformation: i64,
    pub highly_suspect: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatsDto {
    pub total: i64,
    /// `true` / `mostly_true` ratings
    pub verified_true: i64,
    /// `false` / `mostly_false` ratings
    pub verified_false: i64,
    /// `mixed` / `uncertain` ratings
    pub verified_mixed: i64,
    pub errors: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ThirdPartyStatsDto {
    pub total_third_party_verified: i64,
    pub service_breakdown: BTreeMap<String, ServiceStatsDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct CorrelationDto {
    /// Contents with both a verification score and a deepfake probability
    pub sample_size: i64,
    /// Pearson coefficient; null with fewer than two samples or no variance
    pub correlation: Option<f64>,
    /// Least-squares slope of deepfake probability against verification score
    pub slope: Option<f64>,
}

// ============================================================================
// Trend analysis
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Linear trend of one daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricTrendDto {
    pub metric: String,
    pub direction: TrendDirection,
    /// Change per day
    pub slope: f64,
    pub r_squared: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrendPatternDto {
    /// Daily volume differs by weekday
    WeeklyPattern {
        busiest_day: String,
        slowest_day: String,
        variation_coefficient: f64,
        day_averages: BTreeMap<String, f64>,
    },
    /// Daily volume differs by calendar month
    SeasonalPattern {
        peak_month: u32,
        low_month: u32,
        variation_coefficient: f64,
        month_averages: BTreeMap<String, f64>,
    },
    /// Volume on the last day is well above the first
    GrowthPattern {
        overall_growth_rate: f64,
        start_value: i64,
        end_value: i64,
        period_days: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnomalyDto {
    pub date: NaiveDate,
    pub metric: String,
    pub value: f64,
    pub z_score: f64,
}

/// Pearson coefficients between the daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendCorrelationsDto {
    pub content_vs_verification: Option<f64>,
    pub content_vs_deepfake: Option<f64>,
    pub verification_vs_deepfake: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendAnalysisDto {
    pub period_days: i64,
    pub total_data_points: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub content_trend: MetricTrendDto,
    pub verification_trend: MetricTrendDto,
    pub deepfake_trend: MetricTrendDto,
    pub patterns: Vec<TrendPatternDto>,
    /// Null with fewer than three days of data
    pub correlations: Option<TrendCorrelationsDto>,
    pub anomalies: Vec<AnomalyDto>,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Insights
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Improvement,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

impl InsightKind {
    pub fn priority(&self) -> InsightPriority {
        match self {
            Self::Warning => InsightPriority::High,
            Self::Improvement | Self::Neutral => InsightPriority::Medium,
            Self::Positive => InsightPriority::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsightDto {
    pub category: String,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub priority: InsightPriority,
    /// Numbers the insight was derived from
    #[schema(value_type = Object)]
    pub data_points: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsightsDto {
    pub insights: Vec<InsightDto>,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Custom dashboard
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DashboardWidget {
    Summary,
    Trends,
    Verification,
    ThirdParty,
}

impl DashboardWidget {
    pub const ALL: [DashboardWidget; 4] = [
        Self::Summary,
        Self::Trends,
        Self::Verification,
        Self::ThirdParty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Trends => "trends",
            Self::Verification => "verification",
            Self::ThirdParty => "third_party",
        }
    }

    /// Parse a comma separated list, keeping first occurrences in order.
    /// An absent or blank list selects every widget.
    pub fn parse_list(raw: Option<&str>) -> Result<Vec<Self>, AppError> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(Self::ALL.to_vec());
        };

        let mut widgets = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let widget: Self = name.parse()?;
            if !widgets.contains(&widget) {
                widgets.push(widget);
            }
        }
        Ok(widgets)
    }
}

impl fmt::Display for DashboardWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardWidget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" | "analytics" => Ok(Self::Summary),
            "trends" => Ok(Self::Trends),
            "verification" => Ok(Self::Verification),
            "third_party" => Ok(Self::ThirdParty),
            other => Err(AppError::BadRequest(format!(
                "Unknown widget: {}. Expected one of summary, trends, verification, third_party",
                other
            ))),
        }
    }
}

/// Grid placement on a 12 column layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WidgetLayoutDto {
    pub widget: DashboardWidget,
    pub row: u32,
    pub col: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DashboardWidgetsDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DashboardSummaryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<TrendsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationSummaryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_party: Option<ThirdPartyStatsDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomDashboardDto {
    pub widgets: DashboardWidgetsDto,
    pub layout: Vec<WidgetLayoutDto>,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardExportDto {
    pub summary: DashboardSummaryDto,
    pub trends: TrendsDto,
    pub verification_summary: VerificationSummaryDto,
    pub third_party_stats: ThirdPartyStatsDto,
    pub correlation: CorrelationDto,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_list_defaults_to_all() {
        assert_eq!(
            DashboardWidget::parse_list(None).unwrap(),
            DashboardWidget::ALL.to_vec()
        );
        assert_eq!(
            DashboardWidget::parse_list(Some("  ")).unwrap(),
            DashboardWidget::ALL.to_vec()
        );
    }

    #[test]
    fn test_widget_list_keeps_order_and_drops_duplicates() {
        let widgets =
            DashboardWidget::parse_list(Some("third_party, Trends,analytics,trends")).unwrap();
        assert_eq!(
            widgets,
            vec![
                DashboardWidget::ThirdParty,
                DashboardWidget::Trends,
                DashboardWidget::Summary
            ]
        );
    }

    #[test]
    fn test_widget_list_rejects_unknown_names() {
        let err = DashboardWidget::parse_list(Some("summary,weather")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.starts_with("Unknown widget: weather")));
    }

    #[test]
    fn test_insight_priority() {
        assert_eq!(InsightKind::Warning.priority(), InsightPriority::High);
        assert_eq!(InsightKind::Improvement.priority(), InsightPriority::Medium);
        assert_eq!(InsightKind::Neutral.priority(), InsightPriority::Medium);
        assert_eq!(InsightKind::Positive.priority(), InsightPriority::Low);
    }

    #[test]
    fn test_insight_serializes_kind_as_type() {
        let insight = InsightDto {
            category: "content_volume".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            recommendation: "r".to_string(),
            kind: InsightKind::Positive,
            priority: InsightPriority::Low,
            data_points: serde_json::json!({}),
        };
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["type"], "positive");
        assert_eq!(value["priority"], "low");
    }

    #[test]
    fn test_export_format_parses_lowercase() {
        let query: ExportQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.format, ExportFormat::Json);
        let query: ExportQuery =
            serde_json::from_value(serde_json::json!({ "format": "csv" })).unwrap();
        assert_eq!(query.format, ExportFormat::Csv);
        assert!(
            serde_json::from_value::<ExportQuery>(serde_json::json!({ "format": "xml" })).is_err()
        );
    }

    #[test]
    fn test_growth_pattern_is_tagged() {
        let pattern = TrendPatternDto::GrowthPattern {
            overall_growth_rate: 1.0,
            start_value: 1,
            end_value: 2,
            period_days: 9,
        };
        let value = serde_json::to_value(&pattern).unwrap();
        assert_eq!(value["type"], "growth_pattern");
        assert_eq!(value["end_value"], 2);
    }
}
