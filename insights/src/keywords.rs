use indexmap::IndexMap;
use monitor_core::numeric::to_fixed;
use monitor_core::{DailyMetric, KeywordMetric};

/// Default cap for ad-hoc range keyword queries.
pub const RANGE_KEYWORD_LIMIT: usize = 30;

/// Default cap for the dashboard-wide keyword cloud.
pub const DASHBOARD_KEYWORD_LIMIT: usize = 40;

/// Sums keyword weights by term across `metrics` and returns the heaviest
/// `limit` terms, descending. Ties keep the order in which terms were first
/// seen while walking the window.
pub fn aggregate_keywords(metrics: &[DailyMetric], limit: usize) -> Vec<KeywordMetric> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for metric in metrics {
        for keyword in &metric.keywords {
            *totals.entry(keyword.term.as_str()).or_insert(0.0) += keyword.weight;
        }
    }

    let mut ranked: Vec<KeywordMetric> = totals
        .into_iter()
        .map(|(term, weight)| KeywordMetric::new(term, to_fixed(weight, 1)))
        .collect();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked.truncate(limit);
    ranked
}
