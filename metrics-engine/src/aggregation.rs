use chrono::NaiveDate;
use indexmap::IndexMap;
use monitor_core::numeric::{round_tenths, to_fixed};
use monitor_core::{DailyMetric, ExampleItem, KeywordMetric};
use std::collections::BTreeMap;

use crate::generator::EntitySeries;

pub const AGGREGATE_KEYWORD_LIMIT: usize = 8;

/// Running totals for one date while blending entity series.
#[derive(Debug, Default)]
struct Accumulator {
    total_volume: u64,
    weighted_sentiment: f64,
    positive_count: u64,
    neutral_count: u64,
    negative_count: u64,
    // Insertion order is the first-seen order, used to break weight ties.
    keywords: IndexMap<String, f64>,
}

impl Accumulator {
    fn add(&mut self, metric: &DailyMetric) {
        self.total_volume += metric.total_volume;
        self.weighted_sentiment += metric.avg_sentiment * metric.total_volume as f64;
        self.positive_count += metric.positive_count;
        self.neutral_count += metric.neutral_count;
        self.negative_count += metric.negative_count;
        for keyword in &metric.keywords {
            *self.keywords.entry(keyword.term.clone()).or_insert(0.0) += keyword.weight;
        }
    }

    fn finish(self, date: NaiveDate) -> DailyMetric {
        let mut keywords: Vec<KeywordMetric> = self
            .keywords
            .into_iter()
            .map(|(term, weight)| KeywordMetric::new(term, to_fixed(weight, 1)))
            .collect();
        keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        keywords.truncate(AGGREGATE_KEYWORD_LIMIT);

        // An empty day keeps a volume of 1 rather than a degenerate zero.
        let total_volume = self.total_volume.max(1);
        DailyMetric {
            date,
            avg_sentiment: round_tenths(self.weighted_sentiment / total_volume as f64),
            positive_count: self.positive_count,
            neutral_count: self.neutral_count,
            negative_count: self.negative_count,
            total_volume,
            keywords,
        }
    }
}

/// Blends per-entity series into one volume-weighted series, ascending by
/// date. Series are visited in the order given, which fixes keyword
/// tie-breaking.
pub fn aggregate_metrics<'a, I>(series: I) -> Vec<DailyMetric>
where
    I: IntoIterator<Item = &'a [DailyMetric]>,
{
    let mut by_date: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for metrics in series {
        for metric in metrics {
            by_date.entry(metric.date).or_default().add(metric);
        }
    }

    by_date
        .into_iter()
        .map(|(date, accumulator)| accumulator.finish(date))
        .collect()
}

/// Union of every entity's examples per date, in entity order. Items keep
/// their originating entity id.
pub fn aggregate_examples(series: &[EntitySeries]) -> BTreeMap<NaiveDate, Vec<ExampleItem>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<ExampleItem>> = BTreeMap::new();
    for entity_series in series {
        for (metric, examples) in entity_series.metrics.iter().zip(&entity_series.examples) {
            by_date
                .entry(metric.date)
                .or_default()
                .extend(examples.iter().cloned());
        }
    }
    by_date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn metric(day: u32, sentiment: f64, volume: u64, keywords: &[(&str, f64)]) -> DailyMetric {
        let positive = volume / 2;
        let negative = volume / 4;
        DailyMetric {
            date: date(day),
            avg_sentiment: sentiment,
            positive_count: positive,
            neutral_count: volume - positive - negative,
            negative_count: negative,
            total_volume: volume,
            keywords: keywords
                .iter()
                .map(|(term, weight)| KeywordMetric::new(*term, *weight))
                .collect(),
        }
    }

    #[test]
    fn test_two_entities_one_date() {
        let a = vec![metric(1, 20.0, 100, &[])];
        let b = vec![metric(1, -10.0, 50, &[])];

        let blended = aggregate_metrics([a.as_slice(), b.as_slice()]);

        assert_eq!(blended.len(), 1);
        assert_eq!(blended[0].total_volume, 150);
        assert_eq!(blended[0].avg_sentiment, 10.0);
        assert_eq!(
            blended[0].positive_count + blended[0].neutral_count + blended[0].negative_count,
            150
        );
    }

    #[test]
    fn test_keywords_summed_and_ties_keep_first_seen_order() {
        let a = vec![metric(1, 0.0, 10, &[("workflow", 10.0), ("memory", 5.0)])];
        let b = vec![metric(1, 0.0, 10, &[("policy", 12.5), ("workflow", 2.5)])];

        let blended = aggregate_metrics([a.as_slice(), b.as_slice()]);
        let terms: Vec<(&str, f64)> = blended[0]
            .keywords
            .iter()
            .map(|k| (k.term.as_str(), k.weight))
            .collect();

        assert_eq!(
            terms,
            vec![("workflow", 12.5), ("policy", 12.5), ("memory", 5.0)]
        );
    }

    #[test]
    fn test_output_sorted_by_date_and_capped() {
        let many: Vec<(String, f64)> = (0..12).map(|i| (format!("term{i}"), i as f64)).collect();
        let refs: Vec<(&str, f64)> = many.iter().map(|(t, w)| (t.as_str(), *w)).collect();
        let a = vec![metric(3, 1.0, 10, &refs), metric(1, 1.0, 10, &[])];
        let b = vec![metric(2, 1.0, 10, &[])];

        let blended = aggregate_metrics([a.as_slice(), b.as_slice()]);

        let dates: Vec<NaiveDate> = blended.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3)]);
        assert_eq!(blended[2].keywords.len(), AGGREGATE_KEYWORD_LIMIT);
        assert_eq!(blended[2].keywords[0].term, "term11");
    }

    #[test]
    fn test_zero_volume_day_is_floored_to_one() {
        let a = vec![metric(1, 40.0, 0, &[])];
        let blended = aggregate_metrics([a.as_slice()]);
        assert_eq!(blended[0].total_volume, 1);
        assert_eq!(blended[0].avg_sentiment, 0.0);
    }
}
