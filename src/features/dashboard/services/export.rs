use std::fmt::Display;

use crate::features::dashboard::dtos::DashboardExportDto;

/// Quote a CSV field when it contains a separator, quote or newline
fn esc(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn opt<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Flatten an export into `section,metric,value` rows
pub fn to_csv(export: &DashboardExportDto) -> String {
    let mut rows: Vec<(String, String, String)> = Vec::new();
    let mut push = |section: &str, metric: String, value: String| {
        rows.push((section.to_string(), metric, value));
    };

    let summary = &export.summary;
    push("summary", "total_content".into(), summary.total_content.to_string());
    push("summary", "verified_content".into(), summary.verified_content.to_string());
    push("summary", "deepfake_analyzed".into(), summary.deepfake_analyzed.to_string());
    push("summary", "third_party_verified".into(), summary.third_party_verified.to_string());
    push("summary", "avg_verification_score".into(), summary.avg_verification_score.to_string());
    push("summary", "avg_deepfake_probability".into(), summary.avg_deepfake_probability.to_string());
    for (content_type, count) in &summary.content_type_distribution {
        push("content_type", content_type.clone(), count.to_string());
    }

    let bands = &export.verification_summary;
    for (band, count) in [
        ("total_verified", bands.total_verified),
        ("highly_authentic", bands.highly_authentic),
        ("likely_authentic", bands.likely_authentic),
        ("uncertain", bands.uncertain),
        ("likely_misinformation", bands.likely_misinformation),
        ("highly_suspect", bands.highly_suspect),
    ] {
        push("verification", band.into(), count.to_string());
    }

    let third_party = &export.third_party_stats;
    push(
        "third_party",
        "total_third_party_verified".into(),
        third_party.total_third_party_verified.to_string(),
    );
    for (service, stats) in &third_party.service_breakdown {
        for (metric, value) in [
            ("total", stats.total),
            ("verified_true", stats.verified_true),
            ("verified_false", stats.verified_false),
            ("verified_mixed", stats.verified_mixed),
            ("errors", stats.errors),
        ] {
            push("third_party", format!("{}.{}", service, metric), value.to_string());
        }
    }

    let correlation = &export.correlation;
    push("correlation", "sample_size".into(), correlation.sample_size.to_string());
    push("correlation", "correlation".into(), opt(correlation.correlation));
    push("correlation", "slope".into(), opt(correlation.slope));

    push("trends", "period_days".into(), export.trends.period_days.to_string());
    push("trends", "verification_trend_slope".into(), opt(export.trends.verification_trend_slope));
    for day in &export.trends.trends {
        push("trends", format!("{}.content_count", day.date), day.content_count.to_string());
        push("trends", format!("{}.avg_verification_score", day.date), day.avg_verification_score.to_string());
        push("trends", format!("{}.avg_deepfake_probability", day.date), day.avg_deepfake_probability.to_string());
    }

    let mut csv = String::from("section,metric,value\n");
    for (section, metric, value) in rows {
        csv.push_str(&format!("{},{},{}\n", esc(&section), esc(&metric), esc(&value)));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::dashboard::dtos::{
        CorrelationDto, DailyTrendDto, DashboardSummaryDto, ServiceStatsDto, ThirdPartyStatsDto,
        TrendsDto, VerificationSummaryDto,
    };
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;

    fn export() -> DashboardExportDto {
        let now = Utc::now();
        DashboardExportDto {
            summary: DashboardSummaryDto {
                total_content: 3,
                verified_content: 2,
                deepfake_analyzed: 1,
                third_party_verified: 1,
                avg_verification_score: 0.65,
                avg_deepfake_probability: 0.2,
                content_type_distribution: BTreeMap::from([("text/plain".to_string(), 3)]),
                generated_at: now,
            },
            trends: TrendsDto {
                period_days: 30,
                trends: vec![DailyTrendDto {
                    date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    content_count: 3,
                    avg_verification_score: 0.65,
                    avg_deepfake_probability: 0.2,
                }],
                verification_trend_slope: None,
                generated_at: now,
            },
            verification_summary: VerificationSummaryDto {
                total_verified: 2,
                likely_authentic: 2,
                ..Default::default()
            },
            third_party_stats: ThirdPartyStatsDto {
                total_third_party_verified: 1,
                service_breakdown: BTreeMap::from([(
                    "fact, \"check\"".to_string(),
                    ServiceStatsDto {
                        total: 1,
                        verified_true: 1,
                        ..Default::default()
                    },
                )]),
            },
            correlation: CorrelationDto {
                sample_size: 1,
                correlation: None,
                slope: None,
            },
            generated_at: now,
        }
    }

    #[test]
    fn test_esc() {
        assert_eq!(esc("plain"), "plain");
        assert_eq!(esc("a,b"), "\"a,b\"");
        assert_eq!(esc("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(esc("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_rows() {
        let csv = to_csv(&export());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "section,metric,value");
        assert!(lines.contains(&"summary,total_content,3"));
        assert!(lines.contains(&"content_type,text/plain,3"));
        assert!(lines.contains(&"verification,likely_authentic,2"));
        assert!(lines.contains(&"correlation,correlation,"));
        assert!(lines.contains(&"trends,2025-03-01.content_count,3"));
        assert!(lines.contains(&"third_party,\"fact, \"\"check\"\".total\",1"));
        assert!(lines.iter().skip(1).all(|l| l.split(',').count() >= 3));
    }
}
