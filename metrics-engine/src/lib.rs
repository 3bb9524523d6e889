//! Deterministic synthetic activity for the tracked communities.
//!
//! [`MetricsStore`] is the entry point: it generates every entity's series
//! on first access and answers range and day lookups afterwards.

pub mod aggregation;
pub mod catalog;
pub mod generator;
pub mod seeded_random;
pub mod store;


pub use aggregation::{aggregate_examples, aggregate_metrics, AGGREGATE_KEYWORD_LIMIT};
pub use catalog::{Catalog, EntityProfile};
pub use generator::{EntitySeries, EntitySeriesGenerator, GenerationParams, ENTITY_KEYWORD_LIMIT};
pub use seeded_random::SeededRandom;
pub use store::MetricsStore;
