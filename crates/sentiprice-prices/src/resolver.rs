//! Aligning a headline timestamp to daily reference prices.

use chrono::{DateTime, Days};
use chrono_tz::Tz;
use sentiprice_core::timestamp::before_market_close;
use sentiprice_core::{PriceSnapshot, ReportWindow, Ticker};

use crate::cache::PriceCache;
use crate::client::PriceHistorySource;
use crate::error::PriceError;

/// Days past the window end included in every fetched history, so the
/// end-of-week close can land after the window.
pub const LOOKAHEAD_DAYS: u64 = 7;

pub struct PriceWindowResolver<S> {
    cache: PriceCache<S>,
}

impl<S: PriceHistorySource> PriceWindowResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            cache: PriceCache::new(source),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &PriceCache<S> {
        &self.cache
    }

    /// Reference prices for a headline published at `at`.
    ///
    /// The history covers `[window start date, window end date + 7 days)`
    /// and is fetched once per ticker and window. Before 16:00 local the
    /// at-time price is the day's open, otherwise its close. End-of-day is
    /// the day's close, premarket its open, and end-of-week the close of
    /// the last bar in the history. Intraday `+1h`/`+4h` prices are not
    /// derivable from daily bars and are always unavailable.
    ///
    /// # Errors
    ///
    /// - [`PriceError::Fetch`] when the history cannot be retrieved.
    /// - [`PriceError::NoPriceData`] when the history is empty.
    /// - [`PriceError::MissingPriceBar`] when no bar matches the headline's
    ///   local date.
    pub async fn resolve(
        &self,
        ticker: &Ticker,
        at: &DateTime<Tz>,
        window: &ReportWindow,
    ) -> Result<PriceSnapshot, PriceError> {
        let start = window.start_date();
        let end = window.end_date() + Days::new(LOOKAHEAD_DAYS);

        let bars = self
            .cache
            .bars(ticker, start, end)
            .await
            .map_err(|source| PriceError::Fetch {
                ticker: ticker.to_string(),
                source,
            })?;

        let Some(last) = bars.last() else {
            return Err(PriceError::NoPriceData {
                ticker: ticker.to_string(),
            });
        };

        let date = at.date_naive();
        let bar = bars
            .iter()
            .find(|bar| bar.date == date)
            .ok_or_else(|| PriceError::MissingPriceBar {
                ticker: ticker.to_string(),
                date,
            })?;

        let at_time = if before_market_close(at) {
            bar.open
        } else {
            bar.close
        };

        Ok(PriceSnapshot {
            at_time: Some(at_time),
            plus_1h: None,
            plus_4h: None,
            end_of_week: Some(last.close),
            end_of_day: Some(bar.close),
            premarket: Some(bar.open),
        })
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
