//! Loading the run's ticker list from a screener export.
//!
//! The file is a CSV with a `Ticker` header column (other columns are
//! ignored). Values are trimmed and uppercased; blanks and repeats are
//! dropped while preserving first-seen order.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::types::Ticker;

const TICKER_COLUMN: &str = "Ticker";

#[derive(Debug, Error)]
pub enum TickerFileError {
    #[error("failed to read ticker file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ticker CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("ticker CSV has no \"Ticker\" column")]
    MissingTickerColumn,
}

/// Reads and normalizes tickers from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`TickerFileError::Io`] if the file cannot be opened, and the
/// errors of [`parse_tickers`] for its contents.
pub fn load_tickers(path: &Path) -> Result<Vec<Ticker>, TickerFileError> {
    let file = std::fs::File::open(path).map_err(|source| TickerFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_tickers(file)
}

/// Parses tickers from CSV content.
///
/// # Errors
///
/// Returns [`TickerFileError::MissingTickerColumn`] when no header cell is
/// `Ticker` (case-insensitive), or [`TickerFileError::Csv`] on malformed CSV.
pub fn parse_tickers<R: Read>(reader: R) -> Result<Vec<Ticker>, TickerFileError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let column = csv_reader
        .headers()?
        .iter()
        .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(TICKER_COLUMN))
        .ok_or(TickerFileError::MissingTickerColumn)?;

    let mut seen = HashSet::new();
    let mut tickers = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(ticker) = record.get(column).and_then(Ticker::parse) else {
            continue;
        };
        if seen.insert(ticker.clone()) {
            tickers.push(ticker);
        }
    }
    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn symbols(tickers: &[Ticker]) -> Vec<&str> {
        tickers.iter().map(Ticker::as_str).collect()
    }

    #[test]
    fn parses_ticker_column_among_others() {
        let csv = "No.,Ticker,Company\n1,aapl,Apple\n2, msft ,Microsoft\n";
        let tickers = parse_tickers(csv.as_bytes()).unwrap();
        assert_eq!(symbols(&tickers), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn drops_blanks_and_repeats_preserving_order() {
        let csv = "Ticker\nXYZ\n\nabc\nxyz\n  \nABC\nDEF\n";
        let tickers = parse_tickers(csv.as_bytes()).unwrap();
        assert_eq!(symbols(&tickers), vec!["XYZ", "ABC", "DEF"]);
    }

    #[test]
    fn header_match_ignores_case_and_bom() {
        let csv = "\u{feff}ticker\nNVDA\n";
        let tickers = parse_tickers(csv.as_bytes()).unwrap();
        assert_eq!(symbols(&tickers), vec!["NVDA"]);
    }

    #[test]
    fn missing_ticker_column_is_an_error() {
        let csv = "Symbol\nAAPL\n";
        let err = parse_tickers(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, TickerFileError::MissingTickerColumn));
    }

    #[test]
    fn load_tickers_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Ticker,Sector").unwrap();
        writeln!(file, "amd,Technology").unwrap();
        let tickers = load_tickers(file.path()).unwrap();
        assert_eq!(symbols(&tickers), vec!["AMD"]);
    }

    #[test]
    fn load_tickers_reports_missing_file() {
        let err = load_tickers(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, TickerFileError::Io { .. }));
    }
}
