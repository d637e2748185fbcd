use serde_json::json;

use crate::features::dashboard::dtos::{
    DailyTrendDto, DashboardSummaryDto, InsightDto, InsightKind, ThirdPartyStatsDto,
    VerificationSummaryDto,
};
use crate::shared::stats::mean;

/// Everything the insight rules look at
pub struct InsightInputs<'a> {
    pub summary: &'a DashboardSummaryDto,
    pub verification: &'a VerificationSummaryDto,
    pub third_party: &'a ThirdPartyStatsDto,
    pub trends: &'a [DailyTrendDto],
}

fn insight(
    category: &str,
    title: &str,
    description: String,
    recommendation: &str,
    kind: InsightKind,
    data_points: serde_json::Value,
) -> InsightDto {
    InsightDto {
        category: category.to_string(),
        title: title.to_string(),
        description,
        recommendation: recommendation.to_string(),
        kind,
        priority: kind.priority(),
        data_points,
    }
}

/// Rule-based observations about content, verification, fact-check usage
/// and recent activity
pub fn generate(inputs: &InsightInputs<'_>) -> Vec<InsightDto> {
    let mut insights = content_insights(inputs.summary);
    insights.extend(verification_insights(inputs.verification));
    insights.extend(third_party_insights(inputs.third_party));
    insights.extend(trend_insights(inputs.trends));
    insights
}

fn content_insights(summary: &DashboardSummaryDto) -> Vec<InsightDto> {
    let mut insights = Vec::new();
    let total = summary.total_content;

    if total > 100 {
        insights.push(insight(
            "content_volume",
            "High Content Volume",
            format!("{} pieces of content have been analyzed.", total),
            "Review the most frequently analyzed content types to streamline the workflow.",
            InsightKind::Positive,
            json!({ "total_content": total }),
        ));
    }

    if total > 0 {
        let verification_rate = summary.verified_content as f64 / total as f64 * 100.0;
        if verification_rate < 50.0 {
            insights.push(insight(
                "verification_rate",
                "Low Verification Rate",
                format!("Only {:.1}% of uploaded content has been verified.", verification_rate),
                "Verify content more regularly to keep the analytics representative.",
                InsightKind::Improvement,
                json!({
                    "verified_content": summary.verified_content,
                    "total_content": total,
                    "verification_rate": verification_rate,
                }),
            ));
        }

        let deepfake_rate = summary.deepfake_analyzed as f64 / total as f64 * 100.0;
        if summary.deepfake_analyzed > 0 && deepfake_rate > 30.0 {
            insights.push(insight(
                "deepfake_analysis",
                "High Deepfake Analysis Rate",
                format!("{:.1}% of content has a deepfake analysis.", deepfake_rate),
                "Keep the deepfake detection models up to date.",
                InsightKind::Positive,
                json!({
                    "deepfake_analyzed": summary.deepfake_analyzed,
                    "deepfake_rate": deepfake_rate,
                }),
            ));
        }
    }

    let avg = summary.avg_verification_score;
    if avg > 0.8 {
        insights.push(insight(
            "verification_quality",
            "High Quality Content",
            format!("The average verification score is {:.2}.", avg),
            "Continue relying on the current sources.",
            InsightKind::Positive,
            json!({ "avg_verification_score": avg }),
        ));
    } else if avg > 0.0 && avg < 0.4 {
        insights.push(insight(
            "verification_quality",
            "Content Quality Concern",
            format!("The average verification score is {:.2}, which is low.", avg),
            "Review content sources and fact-check more carefully.",
            InsightKind::Warning,
            json!({ "avg_verification_score": avg }),
        ));
    }

    let distribution = &summary.content_type_distribution;
    let distributed: i64 = distribution.values().sum();
    if let Some((content_type, count)) = distribution.iter().max_by_key(|(_, count)| **count) {
        if distributed > 0 && *count as f64 / distributed as f64 > 0.7 {
            insights.push(insight(
                "content_diversity",
                "Content Type Focus",
                format!("{} makes up over 70% of analyzed content.", content_type),
                "Analyze a wider mix of content types for a more complete picture.",
                InsightKind::Neutral,
                json!({ "primary_content_type": content_type, "distribution": distribution }),
            ));
        }
    }

    insights
}

fn verification_insights(summary: &VerificationSummaryDto) -> Vec<InsightDto> {
    let mut insights = Vec::new();
    let total = summary.total_verified;
    if total == 0 {
        return insights;
    }
    let ratio = |count: i64| count as f64 / total as f64;

    let authentic = ratio(summary.highly_authentic + summary.likely_authentic);
    if authentic > 0.8 {
        insights.push(insight(
            "authenticity",
            "High Authenticity Rate",
            format!("{:.1}% of verified content is authentic or likely authentic.", authentic * 100.0),
            "Keep the current curation standards.",
            InsightKind::Positive,
            json!({ "authentic_ratio": authentic }),
        ));
    } else if authentic < 0.3 {
        insights.push(insight(
            "authenticity",
            "Low Authenticity Concern",
            format!("Only {:.1}% of verified content is authentic.", authentic * 100.0),
            "Prioritize more reliable publishers.",
            InsightKind::Warning,
            json!({ "authentic_ratio": authentic }),
        ));
    }

    let misinformation = ratio(summary.likely_misinformation + summary.highly_suspect);
    if misinformation > 0.2 {
        insights.push(insight(
            "misinformation",
            "Misinformation Detection",
            format!("{:.1}% of verified content was flagged as potential misinformation.", misinformation * 100.0),
            "Share the findings so the flagged content can be corrected.",
            InsightKind::Positive,
            json!({ "misinformation_ratio": misinformation }),
        ));
    }

    let uncertain = ratio(summary.uncertain);
    if uncertain > 0.4 {
        insights.push(insight(
            "uncertainty",
            "High Uncertainty Rate",
            format!("{:.1}% of verified content is uncertain.", uncertain * 100.0),
            "Look for additional sources or run third-party fact checks.",
            InsightKind::Improvement,
            json!({ "uncertain_ratio": uncertain }),
        ));
    }

    insights
}

fn third_party_insights(stats: &ThirdPartyStatsDto) -> Vec<InsightDto> {
    let mut insights = Vec::new();

    if stats.total_third_party_verified > 0 {
        insights.push(insight(
            "third_party",
            "Third-Party Verification Active",
            format!(
                "Third-party fact checks ran on {} pieces of content.",
                stats.total_third_party_verified
            ),
            "Keep using external fact-checking services.",
            InsightKind::Positive,
            json!({ "third_party_verifications": stats.total_third_party_verified }),
        ));
    }

    let services = stats.service_breakdown.len();
    if services > 1 {
        insights.push(insight(
            "service_diversity",
            "Multiple Verification Sources",
            format!("{} fact-checking services contributed verdicts.", services),
            "Keep several services enabled for balanced verdicts.",
            InsightKind::Positive,
            json!({ "services_used": services }),
        ));
    } else if services == 1 {
        insights.push(insight(
            "service_diversity",
            "Single Verification Source",
            "Only one fact-checking service contributed verdicts.".to_string(),
            "Configure more providers to get multiple perspectives.",
            InsightKind::Improvement,
            json!({ "services_used": 1 }),
        ));
    }

    for (service, service_stats) in &stats.service_breakdown {
        if service_stats.total == 0 {
            continue;
        }
        let error_rate = service_stats.errors as f64 / service_stats.total as f64;
        if error_rate > 0.1 {
            insights.push(insight(
                "service_performance",
                "Service Reliability Issue",
                format!("{} failed {:.1}% of requests.", service, error_rate * 100.0),
                "Check the provider's credentials and connectivity.",
                InsightKind::Warning,
                json!({ "service": service, "error_rate": error_rate }),
            ));
        }
    }

    insights
}

/// Compares the last three days with the rest of the last week
fn trend_insights(trends: &[DailyTrendDto]) -> Vec<InsightDto> {
    let recent = &trends[trends.len().saturating_sub(7)..];
    let counts: Vec<f64> = recent.iter().map(|t| t.content_count as f64).collect();
    if counts.len() < 2 {
        return Vec::new();
    }

    let split = counts.len().saturating_sub(3);
    let (Some(avg_recent), Some(avg_previous)) = (
        mean(&counts[split..]),
        if counts.len() > 3 {
            mean(&counts[..split])
        } else {
            Some(counts[0])
        },
    ) else {
        return Vec::new();
    };
    let data_points = json!({ "recent_average": avg_recent, "previous_average": avg_previous });

    if avg_recent > avg_previous * 1.5 {
        vec![insight(
            "trend_analysis",
            "Increasing Activity",
            "Content analysis activity increased over the last few days.".to_string(),
            "Keep the momentum going.",
            InsightKind::Positive,
            data_points,
        )]
    } else if avg_recent < avg_previous * 0.5 {
        vec![insight(
            "trend_analysis",
            "Decreasing Activity",
            "Content analysis activity decreased recently.".to_string(),
            "Keep a consistent verification routine.",
            InsightKind::Improvement,
            data_points,
        )]
    } else {
        Vec::new()
    }
}
