use std::io::Write;
use std::path::PathBuf;

use chrono::TimeZone;
use chrono_tz::America::New_York;
use sentiprice_core::Ticker;
use sentiprice_scraper::{ScrapeStats, TickerState};

use super::*;
use crate::run::{failed_tickers, report_window, resolve_tickers, stats_line, RunArgs};

fn test_config(tickers_path: PathBuf) -> sentiprice_core::AppConfig {
    sentiprice_core::AppConfig {
        tickers_path,
        output_dir: PathBuf::from("."),
        log_level: "info".to_owned(),
        timezone: New_York,
        throttle_secs: 20,
        request_timeout_secs: 10,
        user_agent: "sentiprice-test/0.1".to_owned(),
        finviz_base_url: "http://127.0.0.1:1".to_owned(),
        yahoo_base_url: "http://127.0.0.1:1".to_owned(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sentiprice"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from(["sentiprice", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            tickers: None,
            ref ticker,
            week_of: None,
            out_dir: None,
            dry_run: false,
        }) if ticker.is_empty()
    ));
}

#[test]
fn run_with_repeated_tickers_and_dry_run() {
    let cli = Cli::try_parse_from([
        "sentiprice",
        "run",
        "--ticker",
        "aapl",
        "--ticker",
        "MSFT",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            ref ticker,
            dry_run: true,
            ..
        }) if ticker == &vec!["aapl".to_owned(), "MSFT".to_owned()]
    ));
}

#[test]
fn run_parses_week_of_and_paths() {
    let cli = Cli::try_parse_from([
        "sentiprice",
        "run",
        "--week-of",
        "2024-01-10",
        "--tickers",
        "screener.csv",
        "--out-dir",
        "reports",
    ])
    .unwrap();
    let Some(Commands::Run {
        tickers,
        week_of,
        out_dir,
        ..
    }) = cli.command
    else {
        panic!("expected run command");
    };
    assert_eq!(week_of, NaiveDate::from_ymd_opt(2024, 1, 10));
    assert_eq!(tickers, Some(PathBuf::from("screener.csv")));
    assert_eq!(out_dir, Some(PathBuf::from("reports")));
}

#[test]
fn run_rejects_malformed_week_of() {
    let result = Cli::try_parse_from(["sentiprice", "run", "--week-of", "01/10/2024"]);
    assert!(result.is_err());
}

#[test]
fn explicit_symbols_override_ticker_file() {
    let config = test_config(PathBuf::from("/definitely/not/here.csv"));
    let args = RunArgs {
        symbols: vec!["abc".to_owned(), " xyz ".to_owned(), "ABC".to_owned(), " ".to_owned()],
        ..RunArgs::default()
    };
    let tickers = resolve_tickers(&config, &args).unwrap();
    let symbols: Vec<&str> = tickers.iter().map(sentiprice_core::Ticker::as_str).collect();
    assert_eq!(symbols, vec!["ABC", "XYZ"]);
}

#[test]
fn ticker_file_is_read_when_no_symbols_given() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "No.,Ticker").unwrap();
    writeln!(file, "1,nvda").unwrap();
    writeln!(file, "2,amd").unwrap();

    let config = test_config(file.path().to_path_buf());
    let tickers = resolve_tickers(&config, &RunArgs::default()).unwrap();
    assert_eq!(tickers.len(), 2);
    assert_eq!(tickers[0].as_str(), "NVDA");
}

#[test]
fn missing_ticker_file_is_an_error() {
    let config = test_config(PathBuf::from("/definitely/not/here.csv"));
    let err = resolve_tickers(&config, &RunArgs::default()).unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.csv"));
}

#[test]
fn report_window_defaults_to_previous_week() {
    let now = New_York.with_ymd_and_hms(2024, 1, 17, 9, 0, 0).unwrap();
    let window = report_window(&now, None);
    assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
}

#[test]
fn report_window_honors_week_of() {
    let now = New_York.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let window = report_window(&now, NaiveDate::from_ymd_opt(2024, 1, 10));
    assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
}

#[test]
fn stats_line_reports_price_failures() {
    let stats = ScrapeStats {
        tickers_attempted: 4,
        tickers_failed: 1,
        rows_seen: 12,
        events: 9,
        price_no_data: 2,
        price_missing_bar: 1,
        price_fetch_failed: 3,
        ..ScrapeStats::default()
    };
    let line = stats_line(&stats);
    assert!(line.starts_with("tickers: 4 (1 failed)"), "got: {line}");
    assert!(
        line.ends_with("prices: 2 no data, 1 missing bar, 3 fetch failed"),
        "got: {line}"
    );
}

#[test]
fn failed_tickers_keep_input_order() {
    let t = |s: &str| Ticker::parse(s).unwrap();
    let states = vec![
        (t("BAD"), TickerState::Failed),
        (t("ABC"), TickerState::Done { events: 2 }),
        (t("BARE"), TickerState::Failed),
    ];
    assert_eq!(failed_tickers(&states), vec!["BAD", "BARE"]);
}
