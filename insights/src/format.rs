//! Short human labels for headline numbers.

/// Buckets a weighted sentiment score into a tone label.
pub fn sentiment_tone_label(score: f64) -> &'static str {
    if score >= 30.0 {
        "Strongly positive"
    } else if score >= 10.0 {
        "Positive"
    } else if score > -10.0 {
        "Balanced"
    } else if score > -30.0 {
        "Cautious"
    } else {
        "Negative"
    }
}

/// Describes the first-to-last sentiment change of a window.
pub fn describe_change(change: f64) -> &'static str {
    if change > 8.0 {
        "sharp upswing"
    } else if change > 3.0 {
        "steady improvement"
    } else if change < -8.0 {
        "sharp drop"
    } else if change < -3.0 {
        "slight decline"
    } else {
        "holding steady"
    }
}
