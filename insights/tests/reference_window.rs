use chrono::NaiveDate;
use insights::{
    aggregate_keywords, build_insights, describe_change, metrics_to_csv, sentiment_tone_label,
    InsightKind, SummaryStats, Tone, DASHBOARD_KEYWORD_LIMIT,
};
use metrics_engine::{Catalog, GenerationParams, MetricsStore};
use monitor_core::AGGREGATE_ENTITY_ID;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn store() -> MetricsStore {
    MetricsStore::ending_on(
        Catalog::default(),
        GenerationParams::default(),
        ymd(2024, 6, 30),
    )
}

#[test]
fn test_last_week_of_aggregate_view() {
    let store = store();
    let window = store.range_for(AGGREGATE_ENTITY_ID, ymd(2024, 6, 24), ymd(2024, 6, 30));

    let daily: Vec<(f64, u64)> = window
        .iter()
        .map(|m| (m.avg_sentiment, m.total_volume))
        .collect();
    assert_eq!(
        daily,
        vec![
            (30.5, 629),
            (25.0, 654),
            (25.1, 727),
            (26.2, 653),
            (18.7, 670),
            (22.0, 755),
            (22.4, 729),
        ]
    );

    let stats = SummaryStats::compute(window);
    assert_eq!(stats.total_volume, 4817);
    assert!((stats.weighted_sentiment - 24.155989204899313).abs() < 1e-9);
    assert!((stats.positive_share - 0.45277143450280255).abs() < 1e-9);
    assert!((stats.change - -8.1).abs() < 1e-9);
    assert_eq!(stats.strongest_positive_day.as_ref().unwrap().date, ymd(2024, 6, 24));
    assert_eq!(stats.strongest_negative_day.as_ref().unwrap().date, ymd(2024, 6, 28));
    assert_eq!(stats.busiest_day.as_ref().unwrap().date, ymd(2024, 6, 29));
    assert_eq!(stats.average_daily_volume(window.len()), 688);

    assert_eq!(sentiment_tone_label(stats.weighted_sentiment), "Positive");
    assert_eq!(describe_change(stats.change), "sharp drop");
}

#[test]
fn test_insight_cards_for_last_week() {
    let store = store();
    let window = store.range_for(AGGREGATE_ENTITY_ID, ymd(2024, 6, 24), ymd(2024, 6, 30));
    let cards = build_insights(window);

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].id, InsightKind::Volume);
    assert_eq!(cards[0].tone, Tone::Positive);
    assert_eq!(
        cards[0].description,
        "2024-06-29 saw mentions surge 10% above the period baseline."
    );
    assert_eq!(
        cards[1].description,
        "2024-06-24 hit a sentiment score of 30.5, driven by workflow & compiler."
    );
    assert_eq!(
        cards[2].description,
        "2024-06-28 skewed negative (18.7) with conversations around workflow & automation."
    );
}

#[test]
fn test_keyword_ranking_for_last_week() {
    let store = store();
    let window = store.range_for(AGGREGATE_ENTITY_ID, ymd(2024, 6, 24), ymd(2024, 6, 30));
    let ranked = aggregate_keywords(window, DASHBOARD_KEYWORD_LIMIT);

    let top: Vec<(&str, f64)> = ranked
        .iter()
        .take(5)
        .map(|k| (k.term.as_str(), k.weight))
        .collect();
    assert_eq!(
        top,
        vec![
            ("workflow", 984.3),
            ("debugger", 530.8),
            ("compiler", 444.1),
            ("extensions", 418.0),
            ("roadmap", 413.4),
        ]
    );
    assert!(ranked.len() <= DASHBOARD_KEYWORD_LIMIT);
    assert!(ranked.windows(2).all(|pair| pair[0].weight >= pair[1].weight));
}

#[test]
fn test_export_has_one_row_per_day() {
    let store = store();
    let window = store.range_for("codex", ymd(2024, 6, 1), ymd(2024, 6, 30));
    let table = metrics_to_csv(window).unwrap();

    let lines: Vec<&str> = table.split('\n').collect();
    assert_eq!(lines.len(), 31);
    assert!(lines[0].starts_with("date,average_sentiment"));
    for (line, metric) in lines[1..].iter().zip(window) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], metric.date.to_string());
        assert_eq!(fields[2], metric.total_volume.to_string());
    }
}
