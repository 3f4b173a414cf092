use thiserror::Error;

/// Failures that abandon a whole ticker.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("quote page for {ticker} has no news table")]
    MissingNewsTable { ticker: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failures that drop a single news-table row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has {found} cell(s), expected at least 2")]
    TooFewCells { found: usize },

    #[error("headline cell has no link")]
    MissingLink,
}
