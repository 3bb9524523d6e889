//! Request-facing layer over the metrics engine: parses caller parameters,
//! resolves date windows and assembles dashboard responses.

pub mod query;
pub mod responses;
pub mod service;

pub use query::{
    clamp_range, compute_preset_range, parse_date, DateWindow, ExamplesQuery, MetricsQuery,
    RangePreset, ResolvedExamplesQuery, ResolvedMetricsQuery,
};
pub use responses::{DashboardSnapshot, ExamplesResponse, KeywordsResponse, MetricsResponse};
pub use service::DashboardService;
