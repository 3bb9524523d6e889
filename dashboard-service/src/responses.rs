use chrono::NaiveDate;
use insights::{InsightCard, SummaryStats};
use monitor_core::{DailyMetric, ExampleItem, KeywordMetric};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub entity: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days inside the requested window.
    pub total_days: usize,
    /// Days in the entity's full series.
    pub available_days: usize,
    pub data: Vec<DailyMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplesResponse {
    pub entity: String,
    pub date: NaiveDate,
    pub count: usize,
    pub data: Vec<ExampleItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsResponse {
    pub entity: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: Vec<KeywordMetric>,
}

/// Everything the dashboard shows for one entity and window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub entity: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: usize,
    pub average_daily_volume: u64,
    pub tone_label: String,
    pub change_description: String,
    pub summary: SummaryStats,
    pub insights: Vec<InsightCard>,
    pub keywords: Vec<KeywordMetric>,
}
