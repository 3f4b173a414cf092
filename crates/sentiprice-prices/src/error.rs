use chrono::NaiveDate;
use thiserror::Error;

/// Transport-level failures while fetching a price history.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The chart API answered with an `error` object other than "not found".
    #[error("chart API error {code}: {description}")]
    Api { code: String, description: String },
}

/// Why a headline could not be aligned to prices. Every variant maps to an
/// all-unavailable snapshot in the pipeline.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("no price data for {ticker}")]
    NoPriceData { ticker: String },

    #[error("no daily bar for {ticker} on {date}")]
    MissingPriceBar { ticker: String, date: NaiveDate },

    #[error("price history fetch failed for {ticker}: {source}")]
    Fetch {
        ticker: String,
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceErrorKind {
    NoPriceData,
    MissingPriceBar,
    Fetch,
}

impl PriceError {
    #[must_use]
    pub fn kind(&self) -> PriceErrorKind {
        match self {
            PriceError::NoPriceData { .. } => PriceErrorKind::NoPriceData,
            PriceError::MissingPriceBar { .. } => PriceErrorKind::MissingPriceBar,
            PriceError::Fetch { .. } => PriceErrorKind::Fetch,
        }
    }
}
