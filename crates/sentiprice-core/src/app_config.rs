use std::path::PathBuf;

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tickers_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    /// Trading-region zone used for timestamps, windows, and bar dates.
    pub timezone: Tz,
    /// Fixed wait before each ticker's quote-page fetch.
    pub throttle_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub finviz_base_url: String,
    pub yahoo_base_url: String,
}
