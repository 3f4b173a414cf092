//! HTTP client for quote pages and the article pages they link to.

use std::time::Duration;

use reqwest::{Client, Url};
use sentiprice_core::Ticker;

use crate::error::ScrapeError;
use crate::parse::extract_paragraph_text;

const DEFAULT_BASE_URL: &str = "https://finviz.com";

/// Fetches quote pages from the screener host and best-effort article text.
///
/// A single `reqwest::Client` (timeout, connect timeout, `User-Agent`) is
/// shared by both request kinds. No request is retried.
pub struct QuoteClient {
    client: Client,
    base_url: Url,
}

impl QuoteClient {
    /// Creates a client pointed at the production screener host.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScrapeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Self::with_client(client, base_url)
    }

    /// Wraps an already configured `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ScrapeError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScrapeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// `{base}/quote.ashx?t={TICKER}`.
    #[must_use]
    pub fn quote_url(&self, ticker: &Ticker) -> String {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}quote.ashx", self.base_url.path()));
        url.query_pairs_mut().append_pair("t", ticker.as_str());
        url.to_string()
    }

    /// Fetches the raw HTML of a ticker's quote page.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] on network failure or timeout.
    /// - [`ScrapeError::UnexpectedStatus`] on any non-200 response.
    pub async fn fetch_quote_page(&self, ticker: &Ticker) -> Result<String, ScrapeError> {
        let url = self.quote_url(ticker);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.text().await?)
    }

    /// Fetches an article and returns its paragraph text.
    ///
    /// Relative links resolve against the screener host. Returns `None` for
    /// an unresolvable link, a transport failure, a non-200 response, or a
    /// page without paragraph text; the caller falls back to the headline.
    pub async fn fetch_article_text(&self, link: &str) -> Option<String> {
        let url = match self.base_url.join(link) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(link, error = %e, "unresolvable article link");
                return None;
            }
        };

        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "article fetch failed");
                return None;
            }
        };
        if response.status() != reqwest::StatusCode::OK {
            tracing::debug!(url = %url, status = %response.status(), "article fetch non-200");
            return None;
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "article body read failed");
                return None;
            }
        };

        let text = extract_paragraph_text(&html);
        (!text.is_empty()).then_some(text)
    }
}
