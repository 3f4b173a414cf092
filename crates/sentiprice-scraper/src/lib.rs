pub mod client;
pub mod error;
pub mod parse;
pub mod pipeline;

pub use client::QuoteClient;
pub use error::{RowError, ScrapeError};
pub use parse::{extract_paragraph_text, parse_news_table, RawNewsRow};
pub use pipeline::{NewsPipeline, ScrapeOptions, ScrapeOutcome, ScrapeStats, TickerState};
