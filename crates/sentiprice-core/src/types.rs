use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// An uppercase, whitespace-trimmed equity symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Normalizes `raw` into a ticker. Returns `None` for blank input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sentence-vote label produced by the polarity classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Signed score mirroring the label: `1`, `0`, or `-1`.
    #[must_use]
    pub fn score(self) -> i8 {
        match self {
            SentimentLabel::Positive => 1,
            SentimentLabel::Neutral => 0,
            SentimentLabel::Negative => -1,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference prices aligned to one headline.
///
/// `None` means "unavailable" and is never coerced to zero downstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceSnapshot {
    pub at_time: Option<f64>,
    pub plus_1h: Option<f64>,
    pub plus_4h: Option<f64>,
    pub end_of_week: Option<f64>,
    pub end_of_day: Option<f64>,
    pub premarket: Option<f64>,
}

impl PriceSnapshot {
    /// All six prices unavailable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }
}

/// One scraped, scored, and price-aligned headline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsEvent {
    pub ticker: Ticker,
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Tz>,
    /// Article body text, or the title when the body could not be fetched.
    pub content: String,
    pub lookup_score: i8,
    pub pos_words: Vec<String>,
    pub neg_words: Vec<String>,
    pub ambiguous: bool,
    pub vader_score: i8,
    pub vader_label: SentimentLabel,
    pub is_weekend: bool,
    pub after_market_close: bool,
    pub prices: PriceSnapshot,
}

/// Per-ticker aggregate over deduplicated events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerSummary {
    pub ticker: Ticker,
    pub avg_lookup_score: f64,
    pub avg_vader_score: f64,
    pub headlines_count: usize,
    pub avg_1h_change: Option<f64>,
    pub avg_4h_change: Option<f64>,
    pub avg_eod_change: Option<f64>,
    pub avg_eow_change: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_parse_trims_and_uppercases() {
        assert_eq!(Ticker::parse("  aapl ").unwrap().as_str(), "AAPL");
    }

    #[test]
    fn ticker_parse_rejects_blank() {
        assert!(Ticker::parse("   ").is_none());
        assert!(Ticker::parse("").is_none());
    }

    #[test]
    fn label_score_mirrors_sign() {
        assert_eq!(SentimentLabel::Positive.score(), 1);
        assert_eq!(SentimentLabel::Neutral.score(), 0);
        assert_eq!(SentimentLabel::Negative.score(), -1);
    }

    #[test]
    fn unavailable_snapshot_has_no_prices() {
        let snap = PriceSnapshot::unavailable();
        assert!(snap.is_unavailable());
        assert!(snap.at_time.is_none());
        assert!(snap.premarket.is_none());
    }
}
