//! Shared domain types, configuration, and pure pipeline stages for sentiprice.
//!
//! Everything in this crate is free of network I/O: timestamp normalization,
//! the weekly report window, ticker-file loading, and the final
//! deduplicate-and-summarize aggregation.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod tickers;
pub mod timestamp;
pub mod types;
pub mod window;

use thiserror::Error;

pub use aggregate::{aggregate, dedupe_events, pct_change, summarize, PriceChanges, Report};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, MIN_THROTTLE_SECS};
pub use tickers::{load_tickers, parse_tickers, TickerFileError};
pub use timestamp::{parse_news_timestamp, TimestampError};
pub use types::{NewsEvent, PriceSnapshot, SentimentLabel, Ticker, TickerSummary};
pub use window::ReportWindow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
