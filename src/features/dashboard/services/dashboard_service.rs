use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use super::{insights, trend_analyzer};
use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{
    CorrelationDto, CustomDashboardDto, DailyTrendDto, DashboardExportDto, DashboardSummaryDto,
    DashboardWidget, DashboardWidgetsDto, InsightsDto, ServiceStatsDto, ThirdPartyStatsDto,
    TrendAnalysisDto, TrendsDto, VerificationSummaryDto, WidgetLayoutDto, DEFAULT_TREND_DAYS,
    MAX_TREND_DAYS,
};
use crate::shared::stats::{linear_fit, round2};

/// Shared `uploaded_by` filter, always bound as `$1`
const OWNER_FILTER: &str = "($1::TEXT IS NULL OR uploaded_by = $1)";

/// A stored verification result carrying a third-party report
const HAS_THIRD_PARTY: &str =
    "jsonb_typeof(verification_result->'third_party_verification') = 'object'";

#[derive(Debug, FromRow)]
struct SummaryRow {
    total_content: i64,
    verified_content: i64,
    deepfake_analyzed: i64,
    third_party_verified: i64,
    avg_verification_score: Option<f64>,
    avg_deepfake_probability: Option<f64>,
}

#[derive(Debug, FromRow)]
struct DailyRow {
    date: NaiveDate,
    content_count: i64,
    avg_verification_score: Option<f64>,
    avg_deepfake_probability: Option<f64>,
}

#[derive(Debug, FromRow)]
struct ServiceRow {
    service: String,
    total: i64,
    verified_true: i64,
    verified_false: i64,
    verified_mixed: i64,
    errors: i64,
}

/// Service for analytics over stored content
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Summary
    // ========================================================================

    pub async fn get_summary(&self, uploaded_by: Option<&str>) -> Result<DashboardSummaryDto> {
        let totals = sqlx::query_as::<_, SummaryRow>(&format!(
            r#"
            SELECT
                COUNT(*) AS total_content,
                COUNT(verification_score) AS verified_content,
                COUNT(deepfake_probability) AS deepfake_analyzed,
                COUNT(*) FILTER (WHERE {has_third_party}) AS third_party_verified,
                AVG(verification_score) AS avg_verification_score,
                AVG(deepfake_probability) AS avg_deepfake_probability
            FROM contents
            WHERE {owner}
            "#,
            has_third_party = HAS_THIRD_PARTY,
            owner = OWNER_FILTER
        ))
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch dashboard summary: {:?}", e);
            AppError::Database(e)
        })?;

        let distribution = sqlx::query_as::<_, (String, i64)>(&format!(
            r#"
            SELECT content_type, COUNT(*)
            FROM contents
            WHERE {}
            GROUP BY content_type
            "#,
            OWNER_FILTER
        ))
        .bind(uploaded_by)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch content type distribution: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardSummaryDto {
            total_content: totals.total_content,
            verified_content: totals.verified_content,
            deepfake_analyzed: totals.deepfake_analyzed,
            third_party_verified: totals.third_party_verified,
            avg_verification_score: round2(totals.avg_verification_score.unwrap_or(0.0)),
            avg_deepfake_probability: round2(totals.avg_deepfake_probability.unwrap_or(0.0)),
            content_type_distribution: distribution.into_iter().collect(),
            generated_at: Utc::now(),
        })
    }

    // ========================================================================
    // Trends
    // ========================================================================

    pub async fn get_trends(&self, uploaded_by: Option<&str>, days: i64) -> Result<TrendsDto> {
        if !(1..=MAX_TREND_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}",
                MAX_TREND_DAYS
            )));
        }

        let now = Utc::now();
        let rows = sqlx::query_as::<_, DailyRow>(&format!(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::DATE AS date,
                COUNT(*) AS content_count,
                AVG(verification_score) AS avg_verification_score,
                AVG(deepfake_probability) AS avg_deepfake_probability
            FROM contents
            WHERE {} AND created_at >= $2 AND created_at <= $3
            GROUP BY 1
            ORDER BY 1
            "#,
            OWNER_FILTER
        ))
        .bind(uploaded_by)
        .bind(now - Duration::days(days))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch daily trends: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(build_trends(rows, days, now))
    }

    /// Trend direction, patterns, correlations and anomalies over `days`
    pub async fn get_trend_analysis(
        &self,
        uploaded_by: Option<&str>,
        days: i64,
    ) -> Result<TrendAnalysisDto> {
        let trends = self.get_trends(uploaded_by, days).await?;
        Ok(trend_analyzer::analyze(&trends, Utc::now()))
    }

    // ========================================================================
    // Verification and third-party breakdowns
    // ========================================================================

    pub async fn get_verification_summary(
        &self,
        uploaded_by: Option<&str>,
    ) -> Result<VerificationSummaryDto> {
        // Bands follow VerificationAssessment::from_score
        sqlx::query_as::<_, VerificationSummaryDto>(&format!(
            r#"
            SELECT
                COUNT(verification_score) AS total_verified,
                COUNT(*) FILTER (WHERE verification_score >= 0.9) AS highly_authentic,
                COUNT(*) FILTER (WHERE verification_score >= 0.7 AND verification_score < 0.9) AS likely_authentic,
                COUNT(*) FILTER (WHERE verification_score >= 0.5 AND verification_score < 0.7) AS uncertain,
                COUNT(*) FILTER (WHERE verification_score >= 0.3 AND verification_score < 0.5) AS likely_misinformation,
                COUNT(*) FILTER (WHERE verification_score < 0.3) AS highly_suspect
            FROM contents
            WHERE {}
            "#,
            OWNER_FILTER
        ))
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch verification summary: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_third_party_stats(
        &self,
        uploaded_by: Option<&str>,
    ) -> Result<ThirdPartyStatsDto> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM contents WHERE {} AND {}",
            OWNER_FILTER, HAS_THIRD_PARTY
        ))
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count third-party verifications: {:?}", e);
            AppError::Database(e)
        })?;

        // A failed provider is stored as {"error": string, "verified": bool}
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            r#"
            WITH outcomes AS (
                SELECT
                    r.key AS service,
                    jsonb_typeof(r.value->'error') = 'string'
                        AND jsonb_typeof(r.value->'verified') = 'boolean' AS failed,
                    lower(r.value->>'rating') AS rating
                FROM contents c
                CROSS JOIN LATERAL jsonb_each(
                    CASE
                        WHEN jsonb_typeof(c.verification_result->'third_party_verification'->'results') = 'object'
                        THEN c.verification_result->'third_party_verification'->'results'
                        ELSE '{{}}'::JSONB
                    END
                ) AS r(key, value)
                WHERE {owner}
            )
            SELECT
                service,
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE NOT failed AND rating IN ('true', 'mostly_true')) AS verified_true,
                COUNT(*) FILTER (WHERE NOT failed AND rating IN ('false', 'mostly_false')) AS verified_false,
                COUNT(*) FILTER (WHERE NOT failed AND rating IN ('mixed', 'uncertain')) AS verified_mixed,
                COUNT(*) FILTER (WHERE failed) AS errors
            FROM outcomes
            GROUP BY service
            ORDER BY service
            "#,
            owner = OWNER_FILTER.replace("uploaded_by", "c.uploaded_by")
        ))
        .bind(uploaded_by)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch third-party statistics: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(build_third_party_stats(total, rows))
    }

    pub async fn get_correlation(&self, uploaded_by: Option<&str>) -> Result<CorrelationDto> {
        // corr() and regr_slope() are NULL below two rows or without variance
        sqlx::query_as::<_, CorrelationDto>(&format!(
            r#"
            SELECT
                COUNT(*) AS sample_size,
                corr(verification_score, deepfake_probability) AS correlation,
                regr_slope(deepfake_probability, verification_score) AS slope
            FROM contents
            WHERE {} AND verification_score IS NOT NULL AND deepfake_probability IS NOT NULL
            "#,
            OWNER_FILTER
        ))
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch correlation: {:?}", e);
            AppError::Database(e)
        })
    }

    // ========================================================================
    // Insights, custom dashboards and export
    // ========================================================================

    pub async fn get_insights(&self, uploaded_by: Option<&str>) -> Result<InsightsDto> {
        let (summary, verification, third_party, trends) = tokio::try_join!(
            self.get_summary(uploaded_by),
            self.get_verification_summary(uploaded_by),
            self.get_third_party_stats(uploaded_by),
            self.get_trends(uploaded_by, DEFAULT_TREND_DAYS),
        )?;

        let insights = insights::generate(&insights::InsightInputs {
            summary: &summary,
            verification: &verification,
            third_party: &third_party,
            trends: &trends.trends,
        });
        tracing::debug!("Generated {} dashboard insights", insights.len());

        Ok(InsightsDto {
            insights,
            generated_at: Utc::now(),
        })
    }

    pub async fn get_custom_dashboard(
        &self,
        uploaded_by: Option<&str>,
        widgets: &[DashboardWidget],
    ) -> Result<CustomDashboardDto> {
        let mut data = DashboardWidgetsDto::default();

        for widget in widgets {
            match widget {
                DashboardWidget::Summary => {
                    data.summary = Some(self.get_summary(uploaded_by).await?)
                }
                DashboardWidget::Trends => {
                    data.trends = Some(self.get_trends(uploaded_by, DEFAULT_TREND_DAYS).await?)
                }
                DashboardWidget::Verification => {
                    data.verification = Some(self.get_verification_summary(uploaded_by).await?)
                }
                DashboardWidget::ThirdParty => {
                    data.third_party = Some(self.get_third_party_stats(uploaded_by).await?)
                }
            }
        }

        Ok(CustomDashboardDto {
            widgets: data,
            layout: default_layout(widgets),
            generated_at: Utc::now(),
        })
    }

    pub async fn get_export(&self, uploaded_by: Option<&str>) -> Result<DashboardExportDto> {
        let (summary, trends, verification_summary, third_party_stats, correlation) = tokio::try_join!(
            self.get_summary(uploaded_by),
            self.get_trends(uploaded_by, DEFAULT_TREND_DAYS),
            self.get_verification_summary(uploaded_by),
            self.get_third_party_stats(uploaded_by),
            self.get_correlation(uploaded_by),
        )?;

        Ok(DashboardExportDto {
            summary,
            trends,
            verification_summary,
            third_party_stats,
            correlation,
            generated_at: Utc::now(),
        })
    }
}

fn build_trends(rows: Vec<DailyRow>, days: i64, now: DateTime<Utc>) -> TrendsDto {
    let trends: Vec<DailyTrendDto> = rows
        .into_iter()
        .map(|row| DailyTrendDto {
            date: row.date,
            content_count: row.content_count,
            avg_verification_score: round2(row.avg_verification_score.unwrap_or(0.0)),
            avg_deepfake_probability: round2(row.avg_deepfake_probability.unwrap_or(0.0)),
        })
        .collect();

    let (offsets, scores): (Vec<f64>, Vec<f64>) = match trends.first() {
        Some(first) => trends
            .iter()
            .map(|t| ((t.date - first.date).num_days() as f64, t.avg_verification_score))
            .unzip(),
        None => (Vec::new(), Vec::new()),
    };

    TrendsDto {
        period_days: days,
        verification_trend_slope: linear_fit(&offsets, &scores).map(|fit| fit.slope),
        trends,
        generated_at: now,
    }
}

fn build_third_party_stats(total: i64, rows: Vec<ServiceRow>) -> ThirdPartyStatsDto {
    ThirdPartyStatsDto {
        total_third_party_verified: total,
        service_breakdown: rows
            .into_iter()
            .map(|row| {
                (
                    row.service,
                    ServiceStatsDto {
                        total: row.total,
                        verified_true: row.verified_true,
                        verified_false: row.verified_false,
                        verified_mixed: row.verified_mixed,
                        errors: row.errors,
                    },
                )
            })
            .collect(),
    }
}

/// Two widgets per row on a 12 column grid
fn default_layout(widgets: &[DashboardWidget]) -> Vec<WidgetLayoutDto> {
    widgets
        .iter()
        .enumerate()
        .map(|(i, widget)| WidgetLayoutDto {
            widget: *widget,
            row: (i / 2) as u32,
            col: (i % 2) as u32 * 6,
            width: 6,
            height: 4,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(date: NaiveDate, count: i64, score: Option<f64>) -> DailyRow {
        DailyRow {
            date,
            content_count: count,
            avg_verification_score: score,
            avg_deepfake_probability: None,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_build_trends_rounds_and_fits_slope() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let rows = vec![
            daily(start, 2, Some(0.6)),
            daily(start + Duration::days(1), 1, Some(0.75)),
            daily(start + Duration::days(2), 1, Some(0.9)),
            // No verified content that day
            daily(start + Duration::days(4), 3, None),
        ];

        let trends = build_trends(rows, 30, Utc::now());
        assert_eq!(trends.period_days, 30);
        assert_eq!(trends.trends.len(), 4);
        assert_eq!(trends.trends[3].avg_verification_score, 0.0);
        assert_eq!(trends.trends[0].avg_deepfake_probability, 0.0);

        let slope = trends.verification_trend_slope.unwrap();
        let expected = linear_fit(&[0.0, 1.0, 2.0, 4.0], &[0.6, 0.75, 0.9, 0.0])
            .unwrap()
            .slope;
        assert!(approx(slope, expected));
    }

    #[test]
    fn test_build_trends_single_day_has_no_slope() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let trends = build_trends(vec![daily(start, 1, Some(0.456))], 7, Utc::now());
        assert_eq!(trends.trends[0].avg_verification_score, 0.46);
        assert_eq!(trends.verification_trend_slope, None);

        let empty = build_trends(Vec::new(), 7, Utc::now());
        assert!(empty.trends.is_empty());
        assert_eq!(empty.verification_trend_slope, None);
    }

    #[test]
    fn test_build_third_party_stats() {
        let stats = build_third_party_stats(
            2,
            vec![ServiceRow {
                service: "snopes".to_string(),
                total: 2,
                verified_true: 1,
                verified_false: 1,
                verified_mixed: 0,
                errors: 0,
            }],
        );
        assert_eq!(stats.total_third_party_verified, 2);
        assert_eq!(stats.service_breakdown["snopes"].verified_false, 1);
    }

    #[test]
    fn test_default_layout() {
        let layout = default_layout(&DashboardWidget::ALL);
        let cells: Vec<(u32, u32)> = layout.iter().map(|l| (l.row, l.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 6), (1, 0), (1, 6)]);
        assert!(layout.iter().all(|l| l.width == 6 && l.height == 4));
        assert_eq!(layout[3].widget, DashboardWidget::ThirdParty);
    }

    #[test]
    fn test_owner_filter_is_rewritten_for_joins() {
        assert_eq!(
            OWNER_FILTER.replace("uploaded_by", "c.uploaded_by"),
            "($1::TEXT IS NULL OR c.uploaded_by = $1)"
        );
    }

    async fn seed(
        pool: &PgPool,
        owner: &str,
        content_type: &str,
        score: Option<f64>,
        deepfake: Option<f64>,
        result: Option<serde_json::Value>,
    ) {
        let id = uuid::Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO contents (id, filename, storage_key, content_type, file_size, data,
                                  uploaded_by, verification_score, deepfake_probability, verification_result)
            VALUES ($1, 'seed', $2, $3, 4, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(format!("contents/{}/seed", id))
        .bind(content_type)
        .bind(b"seed".to_vec())
        .bind(owner)
        .bind(score)
        .bind(deepfake)
        .bind(result)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seeded(pool: &PgPool) {
        let third_party = serde_json::json!({
            "verification_score": 0.95,
            "third_party_verification": {
                "claim": "bridge reopened",
                "results": {
                    "snopes": { "rating": "True" },
                    "politifact": { "error": "timeout", "verified": false }
                },
                "timestamp": "2025-05-01T00:00:00Z"
            }
        });
        seed(pool, "desk", "text/plain", Some(0.95), None, Some(third_party)).await;
        seed(pool, "desk", "image/jpeg", Some(0.35), Some(0.8), None).await;
        seed(pool, "archive", "text/plain", None, None, None).await;
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_summary_aggregates_in_sql(pool: PgPool) {
        seeded(&pool).await;
        let service = DashboardService::new(pool);

        let all = service.get_summary(None).await.unwrap();
        assert_eq!(all.total_content, 3);
        assert_eq!(all.verified_content, 2);
        assert_eq!(all.deepfake_analyzed, 1);
        assert_eq!(all.third_party_verified, 1);
        assert_eq!(all.avg_verification_score, 0.65);
        assert_eq!(all.avg_deepfake_probability, 0.8);
        assert_eq!(all.content_type_distribution.get("text/plain"), Some(&2));

        let desk = service.get_summary(Some("desk")).await.unwrap();
        assert_eq!(desk.total_content, 2);
        assert_eq!(desk.content_type_distribution.get("image/jpeg"), Some(&1));
        assert_eq!(desk.content_type_distribution.get("text/plain"), Some(&1));

        let nobody = service.get_summary(Some("nobody")).await.unwrap();
        assert_eq!(nobody.total_content, 0);
        assert_eq!(nobody.avg_verification_score, 0.0);
        assert!(nobody.content_type_distribution.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_bands_and_third_party_breakdown(pool: PgPool) {
        seeded(&pool).await;
        let service = DashboardService::new(pool);

        let bands = service.get_verification_summary(None).await.unwrap();
        assert_eq!(bands.total_verified, 2);
        assert_eq!(bands.highly_authentic, 1);
        assert_eq!(bands.likely_misinformation, 1);
        assert_eq!(bands.uncertain, 0);

        let stats = service.get_third_party_stats(Some("desk")).await.unwrap();
        assert_eq!(stats.total_third_party_verified, 1);
        let snopes = &stats.service_breakdown["snopes"];
        assert_eq!(snopes.total, 1);
        assert_eq!(snopes.verified_true, 1);
        assert_eq!(snopes.errors, 0);
        let politifact = &stats.service_breakdown["politifact"];
        assert_eq!(politifact.errors, 1);
        assert_eq!(politifact.verified_false, 0);

        let correlation = service.get_correlation(None).await.unwrap();
        assert_eq!(correlation.sample_size, 1);
        assert_eq!(correlation.correlation, None);
    }
}
