use chrono::{Duration, NaiveDate, Utc};
use monitor_core::{
    DailyMetric, DateExtent, Entity, ExampleItem, GenerationConfig, AGGREGATE_ENTITY_ID,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

use crate::aggregation::{aggregate_examples, aggregate_metrics};
use crate::catalog::Catalog;
use crate::generator::{EntitySeries, EntitySeriesGenerator, GenerationParams};

/// Everything produced by one generation pass. Immutable once built.
#[derive(Debug)]
struct Dataset {
    series: HashMap<String, Vec<DailyMetric>>,
    examples: HashMap<String, BTreeMap<NaiveDate, Vec<ExampleItem>>>,
    extent: DateExtent,
}

/// Lazily generated, memoized holder of every entity's series.
///
/// The first query runs generation exactly once; concurrent first callers
/// block on the same initialization and all observe the finished dataset.
/// Afterwards every query is a read of immutable data.
#[derive(Debug)]
pub struct MetricsStore {
    catalog: Catalog,
    params: GenerationParams,
    end_date: NaiveDate,
    dataset: OnceLock<Dataset>,
}

impl MetricsStore {
    /// A store whose window ends today (UTC).
    pub fn new(catalog: Catalog, params: GenerationParams) -> Self {
        Self::ending_on(catalog, params, Utc::now().date_naive())
    }

    pub fn ending_on(catalog: Catalog, params: GenerationParams, end_date: NaiveDate) -> Self {
        Self {
            catalog,
            params,
            end_date,
            dataset: OnceLock::new(),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        let params = GenerationParams::from(config);
        match config.end_date {
            Some(end_date) => Self::ending_on(Catalog::default(), params, end_date),
            None => Self::new(Catalog::default(), params),
        }
    }

    pub fn is_generated(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.catalog.entities()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.catalog.entity(id)
    }

    /// Full series for `entity_id`, ascending by date. Empty for unknown ids.
    pub fn series_for(&self, entity_id: &str) -> &[DailyMetric] {
        self.dataset()
            .series
            .get(entity_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Days with `start <= date <= end`, in series order.
    pub fn range_for(&self, entity_id: &str, start: NaiveDate, end: NaiveDate) -> &[DailyMetric] {
        let series = self.series_for(entity_id);
        let from = series.partition_point(|m| m.date < start);
        let to = series.partition_point(|m| m.date <= end);
        if from >= to {
            return &[];
        }
        &series[from..to]
    }

    pub fn examples_for(&self, entity_id: &str, date: NaiveDate) -> &[ExampleItem] {
        self.dataset()
            .examples
            .get(entity_id)
            .and_then(|by_date| by_date.get(&date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every example for `entity_id` across the window, in date order.
    pub fn all_examples(&self, entity_id: &str) -> Vec<&ExampleItem> {
        self.dataset()
            .examples
            .get(entity_id)
            .map(|by_date| by_date.values().flatten().collect())
            .unwrap_or_default()
    }

    pub fn date_extent(&self) -> DateExtent {
        self.dataset().extent
    }

    pub fn latest_metric_date(&self, entity_id: &str) -> Option<NaiveDate> {
        self.series_for(entity_id).last().map(|m| m.date)
    }

    fn dataset(&self) -> &Dataset {
        self.dataset.get_or_init(|| self.generate())
    }

    fn generate(&self) -> Dataset {
        let started = Instant::now();
        let window = i64::from(self.params.effective_window_days());
        let start_date = self.end_date - Duration::days(window - 1);

        info!(
            "Generating synthetic metrics for {} entities from {} to {}",
            self.catalog.sources().count(),
            start_date,
            self.end_date
        );

        let generated: Vec<EntitySeries> = self
            .catalog
            .sources()
            .enumerate()
            .map(|(index, profile)| {
                EntitySeriesGenerator::new(index, profile, start_date, &self.params).generate()
            })
            .collect();

        let aggregate = aggregate_metrics(generated.iter().map(|s| s.metrics.as_slice()));
        let aggregate_examples = aggregate_examples(&generated);
        debug!("Aggregated {} days into '{}'", aggregate.len(), AGGREGATE_ENTITY_ID);

        let mut series = HashMap::with_capacity(generated.len() + 1);
        let mut examples = HashMap::with_capacity(generated.len() + 1);
        for entity_series in generated {
            let by_date: BTreeMap<NaiveDate, Vec<ExampleItem>> = entity_series
                .metrics
                .iter()
                .map(|m| m.date)
                .zip(entity_series.examples)
                .collect();
            examples.insert(entity_series.entity_id.clone(), by_date);
            series.insert(entity_series.entity_id, entity_series.metrics);
        }
        series.insert(AGGREGATE_ENTITY_ID.to_string(), aggregate);
        examples.insert(AGGREGATE_ENTITY_ID.to_string(), aggregate_examples);

        info!(
            "Generated {} series in {:?}",
            series.len(),
            started.elapsed()
        );

        Dataset {
            series,
            examples,
            extent: DateExtent {
                earliest_date: start_date,
                latest_date: self.end_date,
            },
        }
    }
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new(Catalog::default(), GenerationParams::default())
    }
}
