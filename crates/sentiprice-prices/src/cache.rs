//! Run-scoped, single-flight memo of price histories.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use sentiprice_core::Ticker;
use tokio::sync::{Mutex, OnceCell};

use crate::client::PriceHistorySource;
use crate::error::FetchError;
use crate::types::DailyBar;

type CacheKey = (Ticker, NaiveDate, NaiveDate);
type Slot = Arc<OnceCell<Arc<[DailyBar]>>>;

/// Wraps a [`PriceHistorySource`] so each (ticker, start, end) key is fetched
/// at most once. Concurrent callers for the same key wait on the one
/// in-flight fetch. Failed fetches are not cached; the next caller retries.
pub struct PriceCache<S> {
    source: S,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl<S: PriceHistorySource> PriceCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the bars for `ticker` over `[start, end)`, fetching them on
    /// first use.
    ///
    /// # Errors
    ///
    /// Propagates the source's [`FetchError`].
    pub async fn bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<[DailyBar]>, FetchError> {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(
                slots
                    .entry((ticker.clone(), start, end))
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let bars = slot
            .get_or_try_init(|| async {
                let bars = self.source.daily_bars(ticker, start, end).await?;
                tracing::debug!(ticker = %ticker, bars = bars.len(), "cached price history");
                Ok::<_, FetchError>(Arc::<[DailyBar]>::from(bars))
            })
            .await?;
        Ok(Arc::clone(bars))
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of keys with a populated history.
    pub async fn populated(&self) -> usize {
        self.slots
            .lock()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }
}
