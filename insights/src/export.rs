use chrono::NaiveDate;
use monitor_core::{DailyMetric, ExportError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CSV_HEADER: [&str; 7] = [
    "date",
    "average_sentiment",
    "total_volume",
    "positive_count",
    "neutral_count",
    "negative_count",
    "top_keywords",
];

/// Number of keyword terms listed per row.
const ROW_KEYWORDS: usize = 5;

/// Renders a metric window as CSV: a header row then one row per day, rows
/// separated by `\n` with no trailing newline. Fields containing a comma or
/// a double quote are quoted with inner quotes doubled.
pub fn metrics_to_csv(metrics: &[DailyMetric]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for metric in metrics {
        let keywords = metric.top_terms(ROW_KEYWORDS).collect::<Vec<_>>().join(" |");
        writer.write_record([
            metric.date.to_string(),
            format!("{:.1}", metric.avg_sentiment),
            metric.total_volume.to_string(),
            metric.positive_count.to_string(),
            metric.neutral_count.to_string(),
            metric.negative_count.to_string(),
            keywords,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut table = String::from_utf8(bytes)?;
    if table.ends_with('\n') {
        table.pop();
    }
    Ok(table)
}

/// `<prefix>-<entity>-<start>-to-<end>.csv`
pub fn export_filename(prefix: &str, entity_id: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("{prefix}-{entity_id}-{start}-to-{end}.csv")
}

/// Writes the window to `dir/<filename>`. An empty window writes nothing
/// and returns `Ok(None)`.
pub fn write_csv(
    metrics: &[DailyMetric],
    dir: &Path,
    filename: &str,
) -> Result<Option<PathBuf>, ExportError> {
    if metrics.is_empty() {
        warn!("Skipping export of {}: window is empty", filename);
        return Ok(None);
    }

    let table = metrics_to_csv(metrics)?;
    let path = dir.join(filename);
    fs::write(&path, table)?;
    info!("Exported {} days to {}", metrics.len(), path.display());
    Ok(Some(path))
}
