//! Sequential, throttled collection of scored and price-aligned headlines.
//!
//! For every ticker, in input order:
//!
//! 1. Wait out the throttle delay.
//! 2. Fetch the quote page. Transport errors, non-200 responses, and pages
//!    without a news table fail the ticker; the run moves on.
//! 3. Parse each news row independently, skipping malformed rows, rows with
//!    unrecognized date text, and rows outside the report window.
//! 4. Fetch the article text (falling back to the headline), score it both
//!    ways, and resolve reference prices.
//!
//! Nothing past configuration is fatal. Failures are logged and counted in
//! [`ScrapeStats`].

use std::time::Duration;

use chrono::DateTime;
use chrono_tz::Tz;
use sentiprice_core::timestamp::{after_market_close, is_weekend};
use sentiprice_core::{
    parse_news_timestamp, AppConfig, NewsEvent, PriceSnapshot, ReportWindow, Ticker,
};
use sentiprice_prices::{PriceErrorKind, PriceHistorySource, PriceWindowResolver};
use sentiprice_sentiment::{CompoundScorer, LexiconScorer, PolarityClassifier, VaderScorer};

use crate::client::QuoteClient;
use crate::error::ScrapeError;
use crate::parse::{parse_news_table, RawNewsRow};

const MIN_THROTTLE: Duration = Duration::from_secs(sentiprice_core::MIN_THROTTLE_SECS);

/// Per-run pacing. The throttle never drops below
/// [`MIN_THROTTLE_SECS`](sentiprice_core::MIN_THROTTLE_SECS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    throttle: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self::new(MIN_THROTTLE)
    }
}

impl ScrapeOptions {
    /// Uses `throttle` as the per-ticker delay, raised to the floor if shorter.
    #[must_use]
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle: throttle.max(MIN_THROTTLE),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Duration::from_secs(config.throttle_secs))
    }

    /// Delay before every ticker's quote-page request.
    #[must_use]
    pub fn throttle(self) -> Duration {
        self.throttle
    }
}

/// Progress of one ticker through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Idle,
    Throttled,
    Fetching,
    Parsing,
    /// Finished with this many accepted events.
    Done { events: usize },
    Failed,
}

/// Outcome counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    pub tickers_attempted: usize,
    pub tickers_failed: usize,
    pub rows_seen: usize,
    pub rows_skipped: usize,
    pub unparseable_timestamps: usize,
    pub out_of_window: usize,
    pub article_fallbacks: usize,
    pub events: usize,
    pub price_no_data: usize,
    pub price_missing_bar: usize,
    pub price_fetch_failed: usize,
}

impl ScrapeStats {
    fn record_price_failure(&mut self, kind: PriceErrorKind) {
        match kind {
            PriceErrorKind::NoPriceData => self.price_no_data += 1,
            PriceErrorKind::MissingPriceBar => self.price_missing_bar += 1,
            PriceErrorKind::Fetch => self.price_fetch_failed += 1,
        }
    }
}

/// Collected events (not yet deduplicated) and run bookkeeping.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub events: Vec<NewsEvent>,
    pub stats: ScrapeStats,
    /// Final state per ticker, in input order.
    pub states: Vec<(Ticker, TickerState)>,
}

pub struct NewsPipeline<S, C = VaderScorer> {
    quotes: QuoteClient,
    prices: PriceWindowResolver<S>,
    lexicon: LexiconScorer,
    polarity: PolarityClassifier<C>,
    options: ScrapeOptions,
}

impl<S, C> NewsPipeline<S, C>
where
    S: PriceHistorySource,
    C: CompoundScorer,
{
    pub fn new(
        quotes: QuoteClient,
        prices: PriceWindowResolver<S>,
        lexicon: LexiconScorer,
        polarity: PolarityClassifier<C>,
        options: ScrapeOptions,
    ) -> Self {
        Self {
            quotes,
            prices,
            lexicon,
            polarity,
            options,
        }
    }

    /// Runs every ticker in order and returns the raw event list.
    ///
    /// `now` anchors `Today` rows and must be in the trading zone.
    pub async fn collect_events(
        &self,
        tickers: &[Ticker],
        now: &DateTime<Tz>,
        window: &ReportWindow,
    ) -> ScrapeOutcome {
        let mut events = Vec::new();
        let mut stats = ScrapeStats::default();
        let mut states = Vec::with_capacity(tickers.len());

        for (i, ticker) in tickers.iter().enumerate() {
            stats.tickers_attempted += 1;
            tracing::info!(
                ticker = %ticker,
                index = i + 1,
                total = tickers.len(),
                "collecting headlines"
            );

            let state = match self
                .collect_ticker(ticker, now, window, &mut events, &mut stats)
                .await
            {
                Ok(count) => {
                    tracing::info!(ticker = %ticker, events = count, "ticker complete");
                    TickerState::Done { events: count }
                }
                Err(e) => {
                    stats.tickers_failed += 1;
                    tracing::warn!(ticker = %ticker, error = %e, "ticker failed, skipping");
                    TickerState::Failed
                }
            };
            log_state(ticker, state);
            states.push((ticker.clone(), state));
        }

        stats.events = events.len();
        tracing::info!(
            tickers = stats.tickers_attempted,
            failed = stats.tickers_failed,
            events = stats.events,
            skipped_rows = stats.rows_skipped,
            unparseable = stats.unparseable_timestamps,
            out_of_window = stats.out_of_window,
            article_fallbacks = stats.article_fallbacks,
            price_no_data = stats.price_no_data,
            price_missing_bar = stats.price_missing_bar,
            price_fetch_failed = stats.price_fetch_failed,
            "collection finished"
        );

        ScrapeOutcome {
            events,
            stats,
            states,
        }
    }

    async fn collect_ticker(
        &self,
        ticker: &Ticker,
        now: &DateTime<Tz>,
        window: &ReportWindow,
        events: &mut Vec<NewsEvent>,
        stats: &mut ScrapeStats,
    ) -> Result<usize, ScrapeError> {
        log_state(ticker, TickerState::Idle);

        log_state(ticker, TickerState::Throttled);
        tokio::time::sleep(self.options.throttle).await;

        log_state(ticker, TickerState::Fetching);
        let html = self.quotes.fetch_quote_page(ticker).await?;

        log_state(ticker, TickerState::Parsing);
        let rows = parse_news_table(&html).ok_or_else(|| ScrapeError::MissingNewsTable {
            ticker: ticker.to_string(),
        })?;

        let mut accepted = 0;
        for row in rows {
            stats.rows_seen += 1;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    stats.rows_skipped += 1;
                    tracing::debug!(ticker = %ticker, error = %e, "skipping news row");
                    continue;
                }
            };

            let published_at = match parse_news_timestamp(&row.date_text, now) {
                Ok(at) => at,
                Err(e) => {
                    stats.unparseable_timestamps += 1;
                    tracing::debug!(ticker = %ticker, error = %e, "skipping news row");
                    continue;
                }
            };

            if !window.contains(&published_at) {
                stats.out_of_window += 1;
                continue;
            }

            events.push(self.build_event(ticker, row, published_at, window, stats).await);
            accepted += 1;
        }

        Ok(accepted)
    }

    async fn build_event(
        &self,
        ticker: &Ticker,
        row: RawNewsRow,
        published_at: DateTime<Tz>,
        window: &ReportWindow,
        stats: &mut ScrapeStats,
    ) -> NewsEvent {
        let content = if let Some(text) = self.quotes.fetch_article_text(&row.link).await {
            text
        } else {
            stats.article_fallbacks += 1;
            row.title.clone()
        };

        let lexicon = self.lexicon.score(&content);
        let verdict = self.polarity.classify(&content);

        let prices = match self.prices.resolve(ticker, &published_at, window).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let kind = e.kind();
                if kind == PriceErrorKind::Fetch {
                    tracing::warn!(ticker = %ticker, error = %e, "price lookup failed");
                } else {
                    tracing::debug!(ticker = %ticker, error = %e, "price unavailable");
                }
                stats.record_price_failure(kind);
                PriceSnapshot::unavailable()
            }
        };

        NewsEvent {
            ticker: ticker.clone(),
            title: row.title,
            link: row.link,
            is_weekend: is_weekend(&published_at),
            after_market_close: after_market_close(&published_at),
            published_at,
            content,
            lookup_score: lexicon.score,
            pos_words: lexicon.positive,
            neg_words: lexicon.negative,
            ambiguous: lexicon.ambiguous,
            vader_score: verdict.score(),
            vader_label: verdict.label,
            prices,
        }
    }
}

fn log_state(ticker: &Ticker, state: TickerState) {
    tracing::debug!(ticker = %ticker, state = ?state, "ticker state");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_throttle_is_the_minimum() {
        assert_eq!(ScrapeOptions::default().throttle(), Duration::from_secs(20));
    }

    #[test]
    fn shorter_throttle_is_raised_to_the_minimum() {
        assert_eq!(ScrapeOptions::new(Duration::ZERO).throttle(), Duration::from_secs(20));
        assert_eq!(
            ScrapeOptions::new(Duration::from_secs(5)).throttle(),
            Duration::from_secs(20)
        );
    }

    #[test]
    fn longer_throttle_is_kept() {
        assert_eq!(
            ScrapeOptions::new(Duration::from_secs(45)).throttle(),
            Duration::from_secs(45)
        );
    }

    #[test]
    fn price_failures_are_counted_by_kind() {
        let mut stats = ScrapeStats::default();
        stats.record_price_failure(PriceErrorKind::NoPriceData);
        stats.record_price_failure(PriceErrorKind::MissingPriceBar);
        stats.record_price_failure(PriceErrorKind::MissingPriceBar);
        stats.record_price_failure(PriceErrorKind::Fetch);
        assert_eq!(stats.price_no_data, 1);
        assert_eq!(stats.price_missing_bar, 2);
        assert_eq!(stats.price_fetch_failed, 1);
    }
}
