use monitor_core::numeric::round_half_up;
use monitor_core::DailyMetric;
use serde::Serialize;

/// Headline statistics for a window of daily metrics.
///
/// An empty window yields zeroes and no extrema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub weighted_sentiment: f64,
    pub total_volume: u64,
    pub positive_share: f64,
    pub neutral_share: f64,
    pub negative_share: f64,
    /// Last day's sentiment minus the first day's, by position in the window.
    pub change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_sentiment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sentiment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_positive_day: Option<DailyMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_negative_day: Option<DailyMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_day: Option<DailyMetric>,
}

impl SummaryStats {
    pub fn compute(metrics: &[DailyMetric]) -> Self {
        let (Some(first), Some(last)) = (metrics.first(), metrics.last()) else {
            return Self::default();
        };

        let mut total_volume = 0u64;
        let mut weighted_sentiment = 0.0;
        let mut positive_total = 0u64;
        let mut neutral_total = 0u64;
        let mut negative_total = 0u64;
        let mut strongest_positive = first;
        let mut strongest_negative = first;
        let mut busiest = first;

        for metric in metrics {
            total_volume += metric.total_volume;
            weighted_sentiment += metric.avg_sentiment * metric.total_volume as f64;
            positive_total += metric.positive_count;
            neutral_total += metric.neutral_count;
            negative_total += metric.negative_count;

            // Strict comparisons: the earliest day wins ties.
            if metric.avg_sentiment > strongest_positive.avg_sentiment {
                strongest_positive = metric;
            }
            if metric.avg_sentiment < strongest_negative.avg_sentiment {
                strongest_negative = metric;
            }
            if metric.total_volume > busiest.total_volume {
                busiest = metric;
            }
        }

        let denominator = total_volume.max(1) as f64;
        Self {
            weighted_sentiment: weighted_sentiment / denominator,
            total_volume,
            positive_share: positive_total as f64 / denominator,
            neutral_share: neutral_total as f64 / denominator,
            negative_share: negative_total as f64 / denominator,
            change: last.avg_sentiment - first.avg_sentiment,
            first_sentiment: Some(first.avg_sentiment),
            last_sentiment: Some(last.avg_sentiment),
            strongest_positive_day: Some(strongest_positive.clone()),
            strongest_negative_day: Some(strongest_negative.clone()),
            busiest_day: Some(busiest.clone()),
        }
    }

    /// Mean volume per day over `days`, rounded; zero for an empty window.
    pub fn average_daily_volume(&self, days: usize) -> u64 {
        if days == 0 {
            return 0;
        }
        round_half_up(self.total_volume as f64 / days as f64) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use monitor_core::KeywordMetric;

    fn metric(day: u32, sentiment: f64, volume: u64) -> DailyMetric {
        let positive = volume / 2;
        let negative = volume / 5;
        DailyMetric {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            avg_sentiment: sentiment,
            positive_count: positive,
            neutral_count: volume - positive - negative,
            negative_count: negative,
            total_volume: volume,
            keywords: vec![KeywordMetric::new("workflow", 10.0)],
        }
    }

    #[test]
    fn test_empty_window_is_all_zero() {
        let stats = SummaryStats::compute(&[]);
        assert_eq!(stats, SummaryStats::default());
        assert_eq!(stats.total_volume, 0);
        assert!(stats.busiest_day.is_none());
        assert!(stats.strongest_positive_day.is_none());
        assert_eq!(stats.average_daily_volume(0), 0);
    }

    #[test]
    fn test_weighted_sentiment_and_shares() {
        let metrics = vec![metric(1, 20.0, 100), metric(2, -10.0, 50)];
        let stats = SummaryStats::compute(&metrics);

        assert_eq!(stats.total_volume, 150);
        assert!((stats.weighted_sentiment - 10.0).abs() < 1e-12);
        assert!((stats.positive_share - 75.0 / 150.0).abs() < 1e-12);
        assert!((stats.negative_share - 30.0 / 150.0).abs() < 1e-12);
        assert!((stats.positive_share + stats.neutral_share + stats.negative_share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_change_uses_first_and_last_positions() {
        let metrics = vec![
            metric(1, 5.0, 10),
            metric(2, 40.0, 10),
            metric(3, -30.0, 10),
            metric(4, 12.5, 10),
        ];
        let stats = SummaryStats::compute(&metrics);

        assert_eq!(stats.change, 7.5);
        assert_eq!(stats.first_sentiment, Some(5.0));
        assert_eq!(stats.last_sentiment, Some(12.5));
        assert_eq!(stats.strongest_positive_day.unwrap().avg_sentiment, 40.0);
        assert_eq!(stats.strongest_negative_day.unwrap().avg_sentiment, -30.0);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let metrics = vec![
            metric(1, 10.0, 80),
            metric(2, 10.0, 80),
            metric(3, 10.0, 20),
        ];
        let stats = SummaryStats::compute(&metrics);

        let first_date = metrics[0].date;
        assert_eq!(stats.strongest_positive_day.unwrap().date, first_date);
        assert_eq!(stats.strongest_negative_day.unwrap().date, first_date);
        assert_eq!(stats.busiest_day.unwrap().date, first_date);
    }

    #[test]
    fn test_zero_volume_window_uses_unit_denominator() {
        let metrics = vec![metric(1, 25.0, 0)];
        let stats = SummaryStats::compute(&metrics);
        assert_eq!(stats.total_volume, 0);
        assert_eq!(stats.weighted_sentiment, 0.0);
        assert_eq!(stats.positive_share, 0.0);
    }

    #[test]
    fn test_average_daily_volume_rounds() {
        let metrics = vec![metric(1, 0.0, 10), metric(2, 0.0, 11)];
        let stats = SummaryStats::compute(&metrics);
        assert_eq!(stats.average_daily_volume(metrics.len()), 11);
    }
}
