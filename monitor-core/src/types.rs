use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Id of the reserved entity that holds the volume-weighted blend of every
/// other entity. It is never a generation source itself.
pub const AGGREGATE_ENTITY_ID: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub accent_color: String,
    pub soft_color: String,
}

impl Entity {
    pub fn is_aggregate(&self) -> bool {
        self.id == AGGREGATE_ENTITY_ID
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    pub term: String,
    pub weight: f64,
}

impl KeywordMetric {
    pub fn new(term: impl Into<String>, weight: f64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// One day of activity for a single entity (or for the aggregate view).
///
/// `total_volume` always equals the sum of the three category counts for
/// generated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub avg_sentiment: f64,
    pub positive_count: u64,
    pub neutral_count: u64,
    pub negative_count: u64,
    pub total_volume: u64,
    pub keywords: Vec<KeywordMetric>,
}

impl DailyMetric {
    /// Terms of the first `limit` keywords, in stored (descending weight) order.
    pub fn top_terms(&self, limit: usize) -> impl Iterator<Item = &str> {
        self.keywords.iter().take(limit).map(|k| k.term.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    /// Generation order; the position in this array is the category index.
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Neutral,
        SentimentCategory::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentCategory {
    type Err = crate::QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentCategory::Positive),
            "neutral" => Ok(SentimentCategory::Neutral),
            "negative" => Ok(SentimentCategory::Negative),
            other => Err(crate::QueryError::InvalidSentiment {
                value: other.to_string(),
            }),
        }
    }
}

/// A sample post attached to a day of activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleItem {
    pub id: String,
    pub entity_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub url: String,
    pub sentiment: SentimentCategory,
    pub confidence: f64,
    pub author: String,
    pub score: i64,
    pub snippet: String,
}

/// Inclusive bounds of the generated window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateExtent {
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
}
