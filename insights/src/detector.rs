use monitor_core::numeric::round_half_up;
use monitor_core::DailyMetric;
use serde::Serialize;
use std::fmt;

use crate::summary::SummaryStats;

/// Stable card identifier that consumers can key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Volume,
    Positive,
    Negative,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Volume => "volume",
            InsightKind::Positive => "positive",
            InsightKind::Negative => "negative",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub id: InsightKind,
    pub title: String,
    pub tone: Tone,
    pub description: String,
}

/// Derives the highlight cards for a window: volume, then strongest
/// positive day, then strongest negative day. Empty windows yield no cards.
pub fn build_insights(metrics: &[DailyMetric]) -> Vec<InsightCard> {
    if metrics.is_empty() {
        return Vec::new();
    }
    let summary = SummaryStats::compute(metrics);
    build_insights_from_summary(&summary, metrics.len())
}

/// Same as [`build_insights`] for callers that already hold the window's
/// summary. `day_count` is the number of days the summary was computed over.
pub fn build_insights_from_summary(summary: &SummaryStats, day_count: usize) -> Vec<InsightCard> {
    if day_count == 0 {
        return Vec::new();
    }
    let average_volume = summary.total_volume as f64 / day_count as f64;
    let mut cards = Vec::with_capacity(3);

    if let Some(busiest) = &summary.busiest_day {
        let lift = volume_lift(busiest.total_volume, average_volume);
        let description = if lift >= 0 {
            format!(
                "{} saw mentions surge {}% above the period baseline.",
                busiest.date,
                lift.abs()
            )
        } else {
            format!(
                "{} dipped {}% below typical mention volume.",
                busiest.date,
                lift.abs()
            )
        };
        cards.push(InsightCard {
            id: InsightKind::Volume,
            title: "Volume spike detected".to_string(),
            tone: if lift >= 0 { Tone::Positive } else { Tone::Neutral },
            description,
        });
    }

    if let Some(day) = &summary.strongest_positive_day {
        cards.push(InsightCard {
            id: InsightKind::Positive,
            title: "Highest positive sentiment".to_string(),
            tone: Tone::Positive,
            description: format!(
                "{} hit a sentiment score of {:.1}, driven by {}.",
                day.date,
                day.avg_sentiment,
                leading_terms(day, "community themes")
            ),
        });
    }

    if let Some(day) = &summary.strongest_negative_day {
        cards.push(InsightCard {
            id: InsightKind::Negative,
            title: "Watch list".to_string(),
            tone: Tone::Negative,
            description: format!(
                "{} skewed negative ({:.1}) with conversations around {}.",
                day.date,
                day.avg_sentiment,
                leading_terms(day, "pain points")
            ),
        });
    }

    cards
}

/// Percentage by which `busiest` exceeds `average`, rounded half up.
fn volume_lift(busiest: u64, average: f64) -> i64 {
    round_half_up((busiest as f64 - average) / average.max(1.0) * 100.0) as i64
}

fn leading_terms(day: &DailyMetric, fallback: &str) -> String {
    let joined = day.top_terms(2).collect::<Vec<_>>().join(" & ");
    if joined.is_empty() {
        fallback.to_string()
    } else {
        joined
    }
}
