use chrono::{Duration, NaiveDate};
use monitor_core::{DateExtent, QueryError, SentimentCategory, AGGREGATE_ENTITY_ID};
use serde::{Deserialize, Serialize};

/// Quick-select window lengths offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePreset {
    Week,
    Month,
    Quarter,
}

impl RangePreset {
    pub const ALL: [RangePreset; 3] = [RangePreset::Week, RangePreset::Month, RangePreset::Quarter];

    pub fn days(&self) -> u32 {
        match self {
            RangePreset::Week => 7,
            RangePreset::Month => 30,
            RangePreset::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.days() == days)
    }

    /// Parses the raw `range` parameter. Anything but "7", "30" or "90" is
    /// `None`, which callers treat as the full extent.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u32>().ok().and_then(Self::from_days)
    }
}

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

impl From<DateExtent> for DateWindow {
    fn from(extent: DateExtent) -> Self {
        Self::new(extent.earliest_date, extent.latest_date)
    }
}

/// `[latest - (days - 1), latest]`, with the start floored at the earliest
/// generated date.
pub fn compute_preset_range(preset: RangePreset, extent: DateExtent) -> DateWindow {
    let span = Duration::days(i64::from(preset.days()) - 1);
    let start = (extent.latest_date - span).max(extent.earliest_date);
    DateWindow::new(start, extent.latest_date)
}

/// Pulls a custom window back inside `bounds`. A start past the upper bound
/// moves to it, an end before the lower bound moves to it, and an inverted
/// window collapses onto its end date.
pub fn clamp_range(window: DateWindow, bounds: DateWindow) -> DateWindow {
    let mut start = window.start_date;
    let mut end = window.end_date;
    if start > bounds.end_date {
        start = bounds.end_date;
    }
    if end < bounds.start_date {
        end = bounds.start_date;
    }
    if start > end {
        start = end;
    }
    DateWindow::new(start, end)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| QueryError::InvalidDate {
        value: value.to_string(),
    })
}

/// Raw parameters of a metrics request, as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetricsQuery {
    pub entity: Option<String>,
    pub range: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetricsQuery {
    pub entity: String,
    pub window: DateWindow,
}

impl MetricsQuery {
    pub fn for_entity(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Entity defaults to the aggregate view. Explicit `start`/`end` take
    /// precedence over the preset bounds and are not clamped to the extent,
    /// but an inverted window collapses onto its end date.
    pub fn resolve(&self, extent: DateExtent) -> Result<ResolvedMetricsQuery, QueryError> {
        let preset = self
            .range
            .as_deref()
            .and_then(RangePreset::parse)
            .map(|preset| compute_preset_range(preset, extent))
            .unwrap_or_else(|| DateWindow::from(extent));

        let start_date = match non_empty(&self.start) {
            Some(raw) => parse_date(raw)?,
            None => preset.start_date,
        };
        let end_date = match non_empty(&self.end) {
            Some(raw) => parse_date(raw)?,
            None => preset.end_date,
        };
        let start_date = start_date.min(end_date);

        Ok(ResolvedMetricsQuery {
            entity: entity_or_aggregate(&self.entity),
            window: DateWindow::new(start_date, end_date),
        })
    }
}

/// Raw parameters of a day-examples request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExamplesQuery {
    pub entity: Option<String>,
    pub date: Option<String>,
    pub sentiment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExamplesQuery {
    pub entity: String,
    pub date: NaiveDate,
    pub sentiment: Option<SentimentCategory>,
}

impl ExamplesQuery {
    pub fn new(entity: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            date: Some(date.into()),
            sentiment: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn resolve(&self) -> Result<ResolvedExamplesQuery, QueryError> {
        let raw_date = non_empty(&self.date).ok_or_else(|| QueryError::MissingParameter {
            name: "date".to_string(),
        })?;
        let sentiment = non_empty(&self.sentiment)
            .map(str::parse::<SentimentCategory>)
            .transpose()?;

        Ok(ResolvedExamplesQuery {
            entity: entity_or_aggregate(&self.entity),
            date: parse_date(raw_date)?,
            sentiment,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn entity_or_aggregate(entity: &Option<String>) -> String {
    non_empty(entity).unwrap_or(AGGREGATE_ENTITY_ID).to_string()
}
