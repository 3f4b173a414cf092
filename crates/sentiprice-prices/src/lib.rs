//! Daily price history and headline price alignment.
//!
//! [`YahooChartClient`] fetches daily open/close bars, [`PriceCache`] memoizes
//! one fetch per (ticker, range) for the duration of a run, and
//! [`PriceWindowResolver`] turns a headline timestamp into a
//! [`PriceSnapshot`](sentiprice_core::PriceSnapshot).

pub mod cache;
pub mod client;
pub mod error;
pub mod resolver;
pub mod types;

pub use cache::PriceCache;
pub use client::{PriceHistorySource, YahooChartClient};
pub use error::{FetchError, PriceError, PriceErrorKind};
pub use resolver::{PriceWindowResolver, LOOKAHEAD_DAYS};
pub use types::DailyBar;
