use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

use crate::features::dashboard::dtos::{
    AnomalyDto, DailyTrendDto, MetricTrendDto, TrendAnalysisDto, TrendCorrelationsDto,
    TrendDirection, TrendPatternDto, TrendsDto,
};
use crate::shared::stats::{coefficient_of_variation, linear_fit, mean, pearson, std_dev};

/// Slopes below this magnitude (per day) count as flat
const STABLE_SLOPE: f64 = 0.01;
const WEEKLY_MIN_POINTS: usize = 14;
const WEEKLY_MIN_VARIATION: f64 = 0.2;
const SEASONAL_MIN_VARIATION: f64 = 0.3;
const GROWTH_MIN_POINTS: usize = 10;
const GROWTH_MIN_RATE: f64 = 0.5;
const ANOMALY_MIN_POINTS: usize = 5;
const ANOMALY_Z_SCORE: f64 = 2.0;
const CORRELATION_MIN_POINTS: usize = 3;

/// Trend, pattern, correlation and anomaly analysis of daily trends
pub fn analyze(trends: &TrendsDto, now: DateTime<Utc>) -> TrendAnalysisDto {
    let points = &trends.trends;

    let counts: Vec<f64> = points.iter().map(|p| p.content_count as f64).collect();
    let scores: Vec<f64> = points.iter().map(|p| p.avg_verification_score).collect();
    let probabilities: Vec<f64> = points.iter().map(|p| p.avg_deepfake_probability).collect();
    let offsets = day_offsets(points);

    TrendAnalysisDto {
        period_days: trends.period_days,
        total_data_points: points.len(),
        start_date: points.first().map(|p| p.date),
        end_date: points.last().map(|p| p.date),
        content_trend: metric_trend("content_count", &offsets, &counts),
        verification_trend: metric_trend("verification_score", &offsets, &scores),
        deepfake_trend: metric_trend("deepfake_probability", &offsets, &probabilities),
        patterns: patterns(points),
        correlations: correlations(&counts, &scores, &probabilities),
        anomalies: [
            anomalies(points, "content_count", &counts),
            anomalies(points, "verification_score", &scores),
        ]
        .concat(),
        generated_at: now,
    }
}

/// Days since the first point, so gaps in the series keep their width
fn day_offsets(points: &[DailyTrendDto]) -> Vec<f64> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    points
        .iter()
        .map(|p| (p.date - first.date).num_days() as f64)
        .collect()
}

fn metric_trend(metric: &str, offsets: &[f64], values: &[f64]) -> MetricTrendDto {
    let average = mean(values).unwrap_or(0.0);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if values.is_empty() { (0.0, 0.0) } else { (min, max) };

    let (direction, slope, r_squared) = match linear_fit(offsets, values) {
        Some(fit) if fit.slope.abs() < STABLE_SLOPE => {
            (TrendDirection::Stable, fit.slope, fit.r_squared)
        }
        Some(fit) if fit.slope > 0.0 => (TrendDirection::Increasing, fit.slope, fit.r_squared),
        Some(fit) => (TrendDirection::Decreasing, fit.slope, fit.r_squared),
        None => (TrendDirection::InsufficientData, 0.0, 0.0),
    };

    MetricTrendDto {
        metric: metric.to_string(),
        direction,
        slope,
        r_squared,
        average,
        min,
        max,
    }
}

fn patterns(points: &[DailyTrendDto]) -> Vec<TrendPatternDto> {
    let mut patterns = Vec::new();
    if points.len() >= WEEKLY_MIN_POINTS {
        patterns.extend(weekly_pattern(points));
    }
    patterns.extend(seasonal_pattern(points));
    patterns.extend(growth_pattern(points));
    patterns
}

/// Average count per group, keyed by `key`
fn group_averages<K: Ord + Copy>(
    points: &[DailyTrendDto],
    key: impl Fn(&DailyTrendDto) -> K,
) -> BTreeMap<K, f64> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for point in points {
        groups
            .entry(key(point))
            .or_default()
            .push(point.content_count as f64);
    }
    groups
        .into_iter()
        .filter_map(|(k, counts)| Some((k, mean(&counts)?)))
        .collect()
}

/// Keys of the largest and smallest averages
fn extremes<K: Copy>(averages: &BTreeMap<K, f64>) -> Option<(K, K)> {
    let max = averages
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(k, _)| *k)?;
    let min = averages
        .iter()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(k, _)| *k)?;
    Some((max, min))
}

fn weekly_pattern(points: &[DailyTrendDto]) -> Option<TrendPatternDto> {
    let averages = group_averages(points, |p| p.date.weekday().num_days_from_monday());
    let values: Vec<f64> = averages.values().copied().collect();
    let variation = coefficient_of_variation(&values);
    if variation <= WEEKLY_MIN_VARIATION {
        return None;
    }

    let name = |day: u32| weekday_name(day).to_string();
    let (busiest, slowest) = extremes(&averages)?;
    Some(TrendPatternDto::WeeklyPattern {
        busiest_day: name(busiest),
        slowest_day: name(slowest),
        variation_coefficient: variation,
        day_averages: averages.into_iter().map(|(d, v)| (name(d), v)).collect(),
    })
}

fn weekday_name(days_from_monday: u32) -> &'static str {
    match days_from_monday {
        0 => "monday",
        1 => "tuesday",
        2 => "wednesday",
        3 => "thursday",
        4 => "friday",
        5 => "saturday",
        _ => "sunday",
    }
}

fn seasonal_pattern(points: &[DailyTrendDto]) -> Option<TrendPatternDto> {
    let averages = group_averages(points, |p| p.date.month());
    let values: Vec<f64> = averages.values().copied().collect();
    let variation = coefficient_of_variation(&values);
    if variation <= SEASONAL_MIN_VARIATION {
        return None;
    }

    let (peak_month, low_month) = extremes(&averages)?;
    Some(TrendPatternDto::SeasonalPattern {
        peak_month,
        low_month,
        variation_coefficient: variation,
        month_averages: averages
            .into_iter()
            .map(|(m, v)| (m.to_string(), v))
            .collect(),
    })
}

fn growth_pattern(points: &[DailyTrendDto]) -> Option<TrendPatternDto> {
    if points.len() < GROWTH_MIN_POINTS {
        return None;
    }
    let (first, last) = (points.first()?, points.last()?);
    if first.content_count <= 0 {
        return None;
    }

    let growth = (last.content_count - first.content_count) as f64 / first.content_count as f64;
    (growth > GROWTH_MIN_RATE).then(|| TrendPatternDto::GrowthPattern {
        overall_growth_rate: growth,
        start_value: first.content_count,
        end_value: last.content_count,
        period_days: (last.date - first.date).num_days(),
    })
}

fn correlations(counts: &[f64], scores: &[f64], probabilities: &[f64]) -> Option<TrendCorrelationsDto> {
    if counts.len() < CORRELATION_MIN_POINTS {
        return None;
    }
    Some(TrendCorrelationsDto {
        content_vs_verification: pearson(counts, scores),
        content_vs_deepfake: pearson(counts, probabilities),
        verification_vs_deepfake: pearson(scores, probabilities),
    })
}

fn anomalies(points: &[DailyTrendDto], metric: &str, values: &[f64]) -> Vec<AnomalyDto> {
    if values.len() < ANOMALY_MIN_POINTS {
        return Vec::new();
    }
    let (Some(mean), Some(std)) = (mean(values), std_dev(values)) else {
        return Vec::new();
    };
    if std == 0.0 {
        return Vec::new();
    }

    points
        .iter()
        .zip(values)
        .filter_map(|(point, value)| {
            let z_score = ((value - mean) / std).abs();
            (z_score > ANOMALY_Z_SCORE).then(|| AnomalyDto {
                date: point.date,
                metric: metric.to_string(),
                value: *value,
                z_score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(date: NaiveDate, count: i64, score: f64) -> DailyTrendDto {
        DailyTrendDto {
            date,
            content_count: count,
            avg_verification_score: score,
            avg_deepfake_probability: 0.0,
        }
    }

    fn series(start: NaiveDate, counts: &[i64]) -> TrendsDto {
        TrendsDto {
            period_days: 30,
            trends: counts
                .iter()
                .enumerate()
                .map(|(i, c)| day(start + chrono::Duration::days(i as i64), *c, 0.5))
                .collect(),
            verification_trend_slope: None,
            generated_at: Utc::now(),
        }
    }

    fn monday() -> NaiveDate {
        // 2025-01-06 is a Monday
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    #[test]
    fn test_empty_series() {
        let analysis = analyze(&series(monday(), &[]), Utc::now());
        assert_eq!(analysis.total_data_points, 0);
        assert_eq!(analysis.start_date, None);
        assert_eq!(
            analysis.content_trend.direction,
            TrendDirection::InsufficientData
        );
        assert!(analysis.patterns.is_empty());
        assert!(analysis.correlations.is_none());
        assert!(analysis.anomalies.is_empty());
    }

    #[test]
    fn test_direction_uses_day_offsets() {
        let trends = TrendsDto {
            trends: vec![day(monday(), 2, 0.2), day(monday() + chrono::Duration::days(10), 4, 0.9)],
            ..series(monday(), &[])
        };

        let analysis = analyze(&trends, Utc::now());
        assert_eq!(analysis.content_trend.direction, TrendDirection::Increasing);
        assert!((analysis.content_trend.slope - 0.2).abs() < 1e-9);
        assert_eq!(analysis.content_trend.min, 2.0);
        assert_eq!(analysis.content_trend.max, 4.0);
        assert_eq!(analysis.verification_trend.direction, TrendDirection::Increasing);
        assert_eq!(analysis.deepfake_trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_growth_pattern() {
        let analysis = analyze(
            &series(monday(), &[2, 2, 2, 2, 2, 2, 2, 2, 2, 4]),
            Utc::now(),
        );
        let growth = analysis
            .patterns
            .iter()
            .find(|p| matches!(p, TrendPatternDto::GrowthPattern { .. }));
        assert_eq!(
            growth,
            Some(&TrendPatternDto::GrowthPattern {
                overall_growth_rate: 1.0,
                start_value: 2,
                end_value: 4,
                period_days: 9,
            })
        );

        // Fewer than ten days never reports growth
        let short = analyze(&series(monday(), &[1, 5, 9]), Utc::now());
        assert!(short.patterns.is_empty());
    }

    #[test]
    fn test_weekly_pattern_finds_busiest_day() {
        // Two weeks, Mondays carry most of the volume
        let counts = [10, 1, 1, 1, 1, 1, 1, 10, 1, 1, 1, 1, 1, 1];
        let analysis = analyze(&series(monday(), &counts), Utc::now());

        let weekly = analysis
            .patterns
            .iter()
            .find_map(|p| match p {
                TrendPatternDto::WeeklyPattern {
                    busiest_day,
                    day_averages,
                    ..
                } => Some((busiest_day.clone(), day_averages.len())),
                _ => None,
            })
            .unwrap();
        assert_eq!(weekly.0, "monday");
        assert_eq!(weekly.1, 7);
    }

    #[test]
    fn test_seasonal_pattern_across_months() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let trends = TrendsDto {
            trends: vec![
                day(jan, 1, 0.5),
                day(jan + chrono::Duration::days(1), 1, 0.5),
                day(jan + chrono::Duration::days(2), 9, 0.5),
                day(jan + chrono::Duration::days(3), 9, 0.5),
            ],
            ..series(jan, &[])
        };

        let analysis = analyze(&trends, Utc::now());
        assert!(analysis.patterns.iter().any(|p| matches!(
            p,
            TrendPatternDto::SeasonalPattern {
                peak_month: 2,
                low_month: 1,
                ..
            }
        )));
    }

    #[test]
    fn test_anomaly_detection() {
        let counts = [3, 3, 3, 3, 3, 3, 3, 3, 3, 30];
        let analysis = analyze(&series(monday(), &counts), Utc::now());

        assert_eq!(analysis.anomalies.len(), 1);
        let anomaly = &analysis.anomalies[0];
        assert_eq!(anomaly.metric, "content_count");
        assert_eq!(anomaly.value, 30.0);
        assert_eq!(anomaly.date, monday() + chrono::Duration::days(9));
        assert!(anomaly.z_score > 2.0);
    }

    #[test]
    fn test_correlations_need_three_points() {
        let two = analyze(&series(monday(), &[1, 2]), Utc::now());
        assert!(two.correlations.is_none());

        let mut trends = series(monday(), &[1, 2, 3]);
        for (point, score) in trends.trends.iter_mut().zip([0.2, 0.4, 0.6]) {
            point.avg_verification_score = score;
        }
        let three = analyze(&trends, Utc::now());
        let correlations = three.correlations.unwrap();
        assert!((correlations.content_vs_verification.unwrap() - 1.0).abs() < 1e-9);
        // Constant deepfake series has no defined correlation
        assert_eq!(correlations.verification_vs_deepfake, None);
    }
}
