//! HTTP client for the Yahoo Finance `v8/finance/chart` endpoint.

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::Client;
use sentiprice_core::Ticker;

use crate::error::FetchError;
use crate::types::{ChartResponse, DailyBar};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// A source of daily bars for a ticker over `[start, end)`.
pub trait PriceHistorySource {
    /// Returns the bars dated within `[start, end)`, ascending by date.
    /// An unknown ticker or an empty range yields an empty vector.
    fn daily_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DailyBar>, FetchError>> + Send;
}

/// Daily-bar client for the Yahoo chart API.
///
/// Bars are dated by converting each bar timestamp into the trading zone.
pub struct YahooChartClient {
    client: Client,
    base_url: String,
    timezone: Tz,
}

impl YahooChartClient {
    /// Creates a client pointed at the production chart host.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, timezone: Tz) -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, timezone)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        timezone: Tz,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self::with_client(client, base_url, timezone))
    }

    /// Wraps an already configured `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, timezone: Tz) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            timezone,
        }
    }

    fn chart_url(&self, ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            ticker,
            unix_midnight(start),
            unix_midnight(end),
        )
    }

    async fn fetch_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let url = self.chart_url(ticker, start, end);
        tracing::debug!(ticker = %ticker, %start, %end, "fetching daily bars");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<ChartResponse>(&body);
        if !status.is_success() {
            // Unknown symbols come back as 404 with a "Not Found" chart error.
            let not_found = status == reqwest::StatusCode::NOT_FOUND
                && parsed
                    .as_ref()
                    .ok()
                    .and_then(|r| r.chart.error.as_ref())
                    .is_some_and(|e| e.code.eq_ignore_ascii_case("Not Found"));
            if not_found {
                return Ok(Vec::new());
            }
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let parsed = parsed.map_err(|source| FetchError::Deserialize {
            context: format!("chart({ticker})"),
            source,
        })?;

        if let Some(err) = parsed.chart.error {
            if err.code.eq_ignore_ascii_case("Not Found") {
                return Ok(Vec::new());
            }
            return Err(FetchError::Api {
                code: err.code,
                description: err.description.unwrap_or_default(),
            });
        }

        let bars = parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_bars(self.timezone))
            .unwrap_or_default()
            .into_iter()
            .filter(|bar| bar.date >= start && bar.date < end)
            .collect();
        Ok(bars)
    }
}

impl PriceHistorySource for YahooChartClient {
    fn daily_bars(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DailyBar>, FetchError>> + Send {
        self.fetch_bars(ticker, start, end)
    }
}

/// Seconds since the epoch at 00:00 UTC on `date`.
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}
