use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;

/// One trading day's open and close, dated in the trading zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

/// Top-level envelope of the `v8/finance/chart` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartApiError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuoteSeries {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResult {
    /// Zips timestamps with the first quote series into bars dated in `tz`.
    ///
    /// Entries with a null or non-finite open or close are dropped. The result
    /// is sorted by date with one bar per date (the first one wins).
    pub(crate) fn into_bars(self, tz: Tz) -> Vec<DailyBar> {
        let Some(quote) = self.indicators.quote.into_iter().next() else {
            return Vec::new();
        };

        let mut bars: Vec<DailyBar> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let open = quote.open.get(i).copied().flatten()?;
                let close = quote.close.get(i).copied().flatten()?;
                if !open.is_finite() || !close.is_finite() {
                    return None;
                }
                let date = DateTime::from_timestamp(ts, 0)?
                    .with_timezone(&tz)
                    .date_naive();
                Some(DailyBar { date, open, close })
            })
            .collect();

        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        bars
    }
}
