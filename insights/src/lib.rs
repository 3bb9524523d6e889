pub mod detector;
pub mod export;
pub mod format;
pub mod keywords;
pub mod summary;

pub use detector::{build_insights, build_insights_from_summary, InsightCard, InsightKind, Tone};
pub use export::{export_filename, metrics_to_csv, write_csv, CSV_HEADER};
pub use format::{describe_change, sentiment_tone_label};
pub use keywords::{aggregate_keywords, DASHBOARD_KEYWORD_LIMIT, RANGE_KEYWORD_LIMIT};
pub use summary::SummaryStats;
