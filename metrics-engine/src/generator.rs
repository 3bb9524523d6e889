//! Per-entity synthetic series.
//!
//! Every value is a closed-form function of (entity index, day index) plus
//! draws from a single [`SeededRandom`] stream owned by the generator. The
//! order of draws is part of the output contract: per day it is sentiment
//! noise, volume noise, positive share, negative share, then two draws per
//! vocabulary term (intensity, weight), then three per example (confidence,
//! score, author suffix).

use chrono::{Duration, NaiveDate};
use monitor_core::numeric::{clamp, round_half_up, round_tenths, to_fixed};
use monitor_core::{DailyMetric, ExampleItem, GenerationConfig, KeywordMetric, SentimentCategory};
use tracing::debug;

use crate::catalog::EntityProfile;
use crate::seeded_random::SeededRandom;

pub const ENTITY_KEYWORD_LIMIT: usize = 6;
const FALLBACK_KEYWORD: &str = "insight";

/// Seed constants and window length for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub base_seed: u32,
    pub seed_stride: u32,
    pub window_days: u32,
}

impl GenerationParams {
    pub fn seed_for(&self, index: usize) -> u32 {
        self.base_seed
            .wrapping_add((index as u32).wrapping_mul(self.seed_stride))
    }

    /// Days actually generated; a zero-length window still yields one day.
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.max(1)
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for GenerationParams {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            base_seed: config.base_seed,
            seed_stride: config.seed_stride,
            window_days: config.window_days,
        }
    }
}

/// Generated output for one entity. `examples[d]` belongs to `metrics[d]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity_id: String,
    pub metrics: Vec<DailyMetric>,
    pub examples: Vec<Vec<ExampleItem>>,
}

pub struct EntitySeriesGenerator<'a> {
    index: usize,
    profile: &'a EntityProfile,
    start_date: NaiveDate,
    window_days: u32,
    random: SeededRandom,
}

impl<'a> EntitySeriesGenerator<'a> {
    /// `index` is the entity's position among generation sources (the
    /// aggregate entity excluded), starting at zero.
    pub fn new(
        index: usize,
        profile: &'a EntityProfile,
        start_date: NaiveDate,
        params: &GenerationParams,
    ) -> Self {
        Self {
            index,
            profile,
            start_date,
            window_days: params.effective_window_days(),
            random: SeededRandom::new(params.seed_for(index)),
        }
    }

    pub fn generate(mut self) -> EntitySeries {
        let days = self.window_days as usize;
        let mut metrics = Vec::with_capacity(days);
        let mut examples = Vec::with_capacity(days);

        for day in 0..self.window_days {
            let date = self.start_date + Duration::days(i64::from(day));
            let metric = self.metric_for_day(day, date);
            examples.push(self.examples_for_day(day, date, &metric.keywords));
            metrics.push(metric);
        }

        debug!(
            "Generated {} days for {} (index {})",
            metrics.len(),
            self.profile.entity.id,
            self.index
        );

        EntitySeries {
            entity_id: self.profile.entity.id.clone(),
            metrics,
            examples,
        }
    }

    fn metric_for_day(&mut self, day: u32, date: NaiveDate) -> DailyMetric {
        let d = f64::from(day);
        let i = self.index as f64;

        let seasonality = ((d + i * 4.0) / 11.0).sin() * 28.0;
        let release_wave = ((d + i * 3.0) / 6.0).cos() * 10.0;
        let noise = (self.random.next() - 0.5) * 18.0;
        let avg_sentiment = clamp(
            18.0 - i * 4.0 + seasonality + release_wave + noise,
            -55.0,
            65.0,
        );

        let base_volume = 120.0 + i * 20.0;
        let volume_swing = ((d + i) / 8.0).cos() * 35.0;
        let volume_noise = self.random.next() * 45.0;
        let spike_period = 13 + self.index as u32 * 2;
        let spike = if day % spike_period == 0 { 90.0 } else { 0.0 };
        let total_volume =
            round_half_up(base_volume + volume_swing + volume_noise + spike).max(35.0) as i64;

        let sentiment_factor = avg_sentiment / 100.0;
        let positive_share = clamp(
            0.38 + sentiment_factor * 0.32 + (self.random.next() - 0.5) * 0.08,
            0.08,
            0.78,
        );
        let negative_share = clamp(
            0.22 - sentiment_factor * 0.28 + (self.random.next() - 0.5) * 0.07,
            0.05,
            0.55,
        );
        let neutral_share = clamp(1.0 - positive_share - negative_share, 0.05, 0.6);

        let volume = total_volume as f64;
        let positive_count = round_half_up(volume * positive_share) as i64;
        let negative_count = round_half_up(volume * negative_share) as i64;
        let mut neutral_count = round_half_up(volume * neutral_share) as i64;
        // Rounding residue goes to neutral, floored at zero.
        let remainder = total_volume - positive_count - negative_count - neutral_count;
        if remainder != 0 {
            neutral_count = (neutral_count + remainder).max(0);
        }

        DailyMetric {
            date,
            avg_sentiment: round_tenths(avg_sentiment),
            positive_count: positive_count as u64,
            neutral_count: neutral_count as u64,
            negative_count: negative_count as u64,
            total_volume: total_volume as u64,
            keywords: self.keywords_for_day(d),
        }
    }

    fn keywords_for_day(&mut self, d: f64) -> Vec<KeywordMetric> {
        let i = self.index as f64;
        let mut keywords: Vec<KeywordMetric> = self
            .profile
            .vocabulary
            .iter()
            .enumerate()
            .map(|(position, term)| {
                let t = position as f64;
                let intensity =
                    6.0 - t * 0.6 + ((d + t * 2.0 + i) / 7.0).sin() * 2.0 + self.random.next() * 1.5;
                let weight = to_fixed(intensity.max(0.5) * 12.0 + self.random.next() * 3.0, 1);
                KeywordMetric::new(term.clone(), weight)
            })
            .collect();

        keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        keywords.truncate(ENTITY_KEYWORD_LIMIT);
        keywords
    }

    fn examples_for_day(
        &mut self,
        day: u32,
        date: NaiveDate,
        keywords: &[KeywordMetric],
    ) -> Vec<ExampleItem> {
        let entity = &self.profile.entity;

        SentimentCategory::ALL
            .iter()
            .enumerate()
            .map(|(category_index, &sentiment)| {
                let keyword = if keywords.is_empty() {
                    FALLBACK_KEYWORD
                } else {
                    keywords[(category_index + day as usize) % keywords.len()]
                        .term
                        .as_str()
                };
                let confidence = to_fixed(0.58 + self.random.next() * 0.34, 2);
                let score = round_half_up(10.0 + self.random.next() * 220.0) as i64;
                let author_suffix = 100 + round_half_up(self.random.next() * 800.0) as i64;

                ExampleItem {
                    id: format!("{}-{}-{}", entity.id, date, category_index),
                    entity_id: entity.id.clone(),
                    date,
                    title: format!("{}: {}", title_prefix(sentiment), capitalize_words(keyword)),
                    url: format!(
                        "https://reddit.com/{}/comments/{}{}{}",
                        entity.name, entity.id, day, category_index
                    ),
                    sentiment,
                    confidence,
                    author: format!("u/{}{}", author_handle(sentiment), author_suffix),
                    score,
                    snippet: snippet(sentiment, keyword),
                }
            })
            .collect()
    }
}

fn title_prefix(sentiment: SentimentCategory) -> &'static str {
    match sentiment {
        SentimentCategory::Positive => "Win",
        SentimentCategory::Neutral => "Discussion",
        SentimentCategory::Negative => "Pain",
    }
}

fn author_handle(sentiment: SentimentCategory) -> &'static str {
    match sentiment {
        SentimentCategory::Positive => "optimist",
        SentimentCategory::Neutral => "analyst",
        SentimentCategory::Negative => "skeptic",
    }
}

fn snippet(sentiment: SentimentCategory, keyword: &str) -> String {
    match sentiment {
        SentimentCategory::Positive => format!(
            "Community loved the latest {} improvements and shared upgrade recipes.",
            keyword
        ),
        SentimentCategory::Neutral => format!(
            "Balanced debate exploring how {} impacts day-to-day Codex workstreams.",
            keyword
        ),
        SentimentCategory::Negative => format!(
            "Thread captured pain points around {}, with proposals for fixes and support tickets.",
            keyword
        ),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Uppercases the first character of every word (`[A-Za-z0-9_]+` run).
fn capitalize_words(text: &str) -> String {
    let mut previous_is_word = false;
    text.chars()
        .map(|c| {
            let word = is_word_char(c);
            let mapped = if word && !previous_is_word {
                c.to_ascii_uppercase()
            } else {
                c
            };
            previous_is_word = word;
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn chatgpt() -> EntityProfile {
        Catalog::default()
            .sources()
            .next()
            .cloned()
            .expect("catalog has sources")
    }

    #[test]
    fn test_seed_for_index() {
        let params = GenerationParams::default();
        assert_eq!(params.seed_for(0), 73);
        assert_eq!(params.seed_for(1), 104);
        assert_eq!(params.seed_for(3), 166);
    }

    #[test]
    fn test_first_day_matches_closed_form() {
        let profile = chatgpt();
        let series = EntitySeriesGenerator::new(0, &profile, start(), &GenerationParams::default())
            .generate();

        // Draws for day 0: 0.7474775793962181 (noise), 0.8875488217454404 (volume)
        let noise = (0.7474775793962181 - 0.5) * 18.0;
        let expected_sentiment = round_tenths(clamp(18.0 + 0.0 + 10.0 + noise, -55.0, 65.0));
        let expected_volume =
            round_half_up(120.0 + 35.0 + 0.8875488217454404 * 45.0 + 90.0) as u64;

        let first = &series.metrics[0];
        assert_eq!(first.avg_sentiment, expected_sentiment);
        assert_eq!(first.avg_sentiment, 32.5);
        assert_eq!(first.total_volume, expected_volume);
        assert_eq!(first.total_volume, 285);
        assert_eq!(first.positive_count, 149);
        assert_eq!(first.neutral_count, 105);
        assert_eq!(first.negative_count, 31);
    }

    #[test]
    fn test_first_day_keywords_and_examples() {
        let profile = chatgpt();
        let series = EntitySeriesGenerator::new(0, &profile, start(), &GenerationParams::default())
            .generate();

        let terms: Vec<(&str, f64)> = series.metrics[0]
            .keywords
            .iter()
            .map(|k| (k.term.as_str(), k.weight))
            .collect();
        assert_eq!(
            terms,
            vec![
                ("prompting", 88.7),
                ("workflow", 88.1),
                ("memory", 76.0),
                ("bug report", 74.4),
                ("shortcuts", 72.4),
                ("update", 71.8),
            ]
        );

        let examples = &series.examples[0];
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0].id, "chatgpt-2024-04-02-0");
        assert_eq!(examples[0].title, "Win: Prompting");
        assert_eq!(
            examples[0].url,
            "https://reddit.com/r/ChatGPT/comments/chatgpt00"
        );
        assert_eq!(examples[0].confidence, 0.9);
        assert_eq!(examples[0].author, "u/optimist330");
        assert_eq!(examples[0].score, 111);
        assert_eq!(examples[1].title, "Discussion: Workflow");
        assert_eq!(examples[1].author, "u/analyst789");
        assert_eq!(examples[1].score, 137);
        assert_eq!(examples[2].sentiment, SentimentCategory::Negative);
        assert_eq!(examples[2].title, "Pain: Memory");
        assert_eq!(examples[2].confidence, 0.6);
        assert_eq!(
            examples[2].snippet,
            "Thread captured pain points around memory, with proposals for fixes and support tickets."
        );
    }

    #[test]
    fn test_second_day_reference() {
        let profile = chatgpt();
        let series = EntitySeriesGenerator::new(0, &profile, start(), &GenerationParams::default())
            .generate();

        let second = &series.metrics[1];
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        assert_eq!(second.avg_sentiment, 35.2);
        assert_eq!(second.total_volume, 176);
        assert_eq!(second.keywords[0].term, "memory");
        assert_eq!(second.keywords[0].weight, 90.4);
    }

    #[test]
    fn test_empty_vocabulary_falls_back() {
        let mut profile = chatgpt();
        profile.vocabulary.clear();
        let params = GenerationParams {
            window_days: 3,
            ..GenerationParams::default()
        };
        let series = EntitySeriesGenerator::new(0, &profile, start(), &params).generate();

        assert_eq!(series.metrics.len(), 3);
        assert!(series.metrics.iter().all(|m| m.keywords.is_empty()));
        assert_eq!(series.examples[0][0].title, "Win: Insight");
    }

    #[test]
    fn test_numeric_ranges_hold_for_every_day() {
        let catalog = Catalog::default();
        let params = GenerationParams::default();
        for (index, profile) in catalog.sources().enumerate() {
            let series = EntitySeriesGenerator::new(index, profile, start(), &params).generate();
            assert_eq!(series.metrics.len(), 90);
            for (metric, examples) in series.metrics.iter().zip(&series.examples) {
                assert!((-55.0..=65.0).contains(&metric.avg_sentiment));
                assert!(metric.total_volume >= 35);
                assert!(metric.keywords.len() <= ENTITY_KEYWORD_LIMIT);
                assert!(metric
                    .keywords
                    .windows(2)
                    .all(|w| w[0].weight >= w[1].weight));
                for example in examples {
                    assert!((0.58..=0.92).contains(&example.confidence));
                    assert!((10..=230).contains(&example.score));
                    assert_eq!(example.date, metric.date);
                }
            }
        }
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("bug report"), "Bug Report");
        assert_eq!(capitalize_words("release notes"), "Release Notes");
        assert_eq!(capitalize_words("x-ray_scan 2go"), "X-Ray_scan 2go");
    }
}
