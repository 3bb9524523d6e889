use chrono::NaiveDate;
use insights::{
    aggregate_keywords, build_insights_from_summary, describe_change, export_filename,
    sentiment_tone_label, write_csv, SummaryStats,
};
use metrics_engine::MetricsStore;
use monitor_core::{
    CoreError, DashboardConfig, DateExtent, Entity, ExampleItem, MonitorConfig, QueryError,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::query::{
    clamp_range, compute_preset_range, DateWindow, ExamplesQuery, MetricsQuery, RangePreset,
};
use crate::responses::{DashboardSnapshot, ExamplesResponse, KeywordsResponse, MetricsResponse};

type SnapshotKey = (String, NaiveDate, NaiveDate);

/// Read-only query surface over a [`MetricsStore`].
///
/// The dataset never changes after generation, so dashboard snapshots are
/// cached without expiry.
#[derive(Debug)]
pub struct DashboardService {
    store: Arc<MetricsStore>,
    settings: DashboardConfig,
    snapshots: Arc<RwLock<HashMap<SnapshotKey, DashboardSnapshot>>>,
}

impl DashboardService {
    pub fn new(store: Arc<MetricsStore>, settings: DashboardConfig) -> Self {
        Self {
            store,
            settings,
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(
            Arc::new(MetricsStore::from_config(&config.generation)),
            config.dashboard.clone(),
        )
    }

    pub fn store(&self) -> &Arc<MetricsStore> {
        &self.store
    }

    /// Runs generation on the blocking pool if it has not happened yet.
    pub async fn warm(&self) -> Result<DateExtent, CoreError> {
        if self.store.is_generated() {
            return Ok(self.store.date_extent());
        }

        let started = Instant::now();
        let store = Arc::clone(&self.store);
        let extent = tokio::task::spawn_blocking(move || store.date_extent())
            .await
            .map_err(|e| CoreError::Internal {
                message: format!("Generation task failed: {}", e),
            })?;
        info!(
            "Dataset ready ({} to {}) in {:?}",
            extent.earliest_date,
            extent.latest_date,
            started.elapsed()
        );
        Ok(extent)
    }

    /// Entities in display order, aggregate view first.
    pub async fn entities(&self) -> Vec<Entity> {
        self.store.entities().cloned().collect()
    }

    pub async fn metrics(&self, query: &MetricsQuery) -> Result<MetricsResponse, CoreError> {
        let extent = self.warm().await?;
        let resolved = query.resolve(extent)?;
        let window = resolved.window;

        let data = self
            .store
            .range_for(&resolved.entity, window.start_date, window.end_date)
            .to_vec();
        debug!(
            "Metrics for '{}' {}..{}: {} days",
            resolved.entity,
            window.start_date,
            window.end_date,
            data.len()
        );

        Ok(MetricsResponse {
            available_days: self.store.series_for(&resolved.entity).len(),
            total_days: data.len(),
            entity: resolved.entity,
            start_date: window.start_date,
            end_date: window.end_date,
            data,
        })
    }

    pub async fn examples(&self, query: &ExamplesQuery) -> Result<ExamplesResponse, CoreError> {
        let resolved = query.resolve()?;
        self.warm().await?;

        let data: Vec<ExampleItem> = self
            .store
            .examples_for(&resolved.entity, resolved.date)
            .iter()
            .filter(|example| resolved.sentiment.map_or(true, |s| example.sentiment == s))
            .cloned()
            .collect();

        Ok(ExamplesResponse {
            count: data.len(),
            entity: resolved.entity,
            date: resolved.date,
            data,
        })
    }

    /// Same selection as [`examples`](Self::examples), ordered by
    /// confidence, highest first. Equal confidences keep stored order.
    pub async fn day_examples(
        &self,
        query: &ExamplesQuery,
    ) -> Result<ExamplesResponse, CoreError> {
        let mut response = self.examples(query).await?;
        response
            .data
            .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(response)
    }

    /// Ranked keywords for an ad-hoc window. `limit` falls back to the
    /// configured range limit.
    pub async fn keywords(
        &self,
        query: &MetricsQuery,
        limit: Option<usize>,
    ) -> Result<KeywordsResponse, CoreError> {
        let extent = self.warm().await?;
        let resolved = query.resolve(extent)?;
        let window = resolved.window;
        let metrics = self
            .store
            .range_for(&resolved.entity, window.start_date, window.end_date);
        let data = aggregate_keywords(
            metrics,
            limit.unwrap_or(self.settings.range_keyword_limit),
        );

        Ok(KeywordsResponse {
            entity: resolved.entity,
            start_date: window.start_date,
            end_date: window.end_date,
            data,
        })
    }

    /// The configured default preset window over the generated extent.
    pub async fn default_window(&self) -> Result<DateWindow, CoreError> {
        let extent = self.warm().await?;
        let preset =
            RangePreset::from_days(self.settings.default_range_days).unwrap_or(RangePreset::Month);
        Ok(compute_preset_range(preset, extent))
    }

    /// Dashboard view of `entity_id`. `window` is clamped to the generated
    /// extent; `None` uses the default preset.
    pub async fn snapshot(
        &self,
        entity_id: &str,
        window: Option<DateWindow>,
    ) -> Result<DashboardSnapshot, CoreError> {
        self.require_entity(entity_id)?;
        let window = self.resolve_window(window).await?;
        let key = (entity_id.to_string(), window.start_date, window.end_date);

        {
            let cache = self.snapshots.read().await;
            if let Some(snapshot) = cache.get(&key) {
                debug!("Returning cached snapshot for '{}'", entity_id);
                return Ok(snapshot.clone());
            }
        }

        debug!(
            "Building snapshot for '{}' {}..{}",
            entity_id, window.start_date, window.end_date
        );
        let snapshot = self.build_snapshot(entity_id, window);

        {
            let mut cache = self.snapshots.write().await;
            cache.insert(key, snapshot.clone());
        }

        Ok(snapshot)
    }

    /// Writes the window as CSV into `dir`. Returns `None` without touching
    /// the filesystem when the window holds no days.
    pub async fn export_csv(
        &self,
        entity_id: &str,
        window: Option<DateWindow>,
        dir: &Path,
    ) -> Result<Option<PathBuf>, CoreError> {
        self.require_entity(entity_id)?;
        let window = self.resolve_window(window).await?;
        let metrics = self
            .store
            .range_for(entity_id, window.start_date, window.end_date);
        let filename = export_filename(
            &self.settings.export_prefix,
            entity_id,
            window.start_date,
            window.end_date,
        );
        Ok(write_csv(metrics, dir, &filename)?)
    }

    pub async fn cached_snapshots(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn clear_cache(&self) {
        self.snapshots.write().await.clear();
        debug!("Snapshot cache cleared");
    }

    fn require_entity(&self, entity_id: &str) -> Result<&Entity, QueryError> {
        self.store
            .entity(entity_id)
            .ok_or_else(|| QueryError::UnknownEntity {
                id: entity_id.to_string(),
            })
    }

    async fn resolve_window(&self, window: Option<DateWindow>) -> Result<DateWindow, CoreError> {
        match window {
            Some(window) => {
                let extent = self.warm().await?;
                Ok(clamp_range(window, DateWindow::from(extent)))
            }
            None => self.default_window().await,
        }
    }

    fn build_snapshot(&self, entity_id: &str, window: DateWindow) -> DashboardSnapshot {
        let metrics = self
            .store
            .range_for(entity_id, window.start_date, window.end_date);
        let summary = SummaryStats::compute(metrics);

        DashboardSnapshot {
            entity: entity_id.to_string(),
            start_date: window.start_date,
            end_date: window.end_date,
            total_days: metrics.len(),
            average_daily_volume: summary.average_daily_volume(metrics.len()),
            tone_label: sentiment_tone_label(summary.weighted_sentiment).to_string(),
            change_description: describe_change(summary.change).to_string(),
            insights: build_insights_from_summary(&summary, metrics.len()),
            keywords: aggregate_keywords(metrics, self.settings.dashboard_keyword_limit),
            summary,
        }
    }
}
