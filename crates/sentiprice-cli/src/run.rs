//! The weekly `run` command: tickers in, CSV reports out.
//!
//! Only configuration, ticker-file, and export problems abort the run.
//! Per-ticker and per-row failures are absorbed by the pipeline and show up
//! in the logged stats.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use sentiprice_core::{aggregate, load_tickers, AppConfig, ReportWindow, Ticker};
use sentiprice_prices::{PriceWindowResolver, YahooChartClient};
use sentiprice_scraper::{NewsPipeline, QuoteClient, ScrapeOptions, ScrapeStats, TickerState};
use sentiprice_sentiment::{LexiconScorer, PolarityClassifier};

use crate::export;

#[derive(Debug, Default)]
pub(crate) struct RunArgs {
    pub tickers_path: Option<PathBuf>,
    pub symbols: Vec<String>,
    pub week_of: Option<NaiveDate>,
    pub out_dir: Option<PathBuf>,
    pub dry_run: bool,
}

pub(crate) async fn run_weekly(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let tickers = resolve_tickers(config, &args)?;
    if tickers.is_empty() {
        println!("no tickers to process; nothing to do");
        return Ok(());
    }

    let now = Utc::now().with_timezone(&config.timezone);
    let window = report_window(&now, args.week_of);
    println!(
        "scraping from {} to {}",
        window.start().format("%Y-%m-%d %H:%M"),
        window.end().format("%Y-%m-%d %H:%M"),
    );

    if args.dry_run {
        let symbols: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
        println!(
            "dry-run: would collect headlines for {} tickers: [{}]",
            tickers.len(),
            symbols.join(", ")
        );
        return Ok(());
    }

    let pipeline = build_pipeline(config)?;
    let outcome = pipeline.collect_events(&tickers, &now, &window).await;
    println!("{}", stats_line(&outcome.stats));
    let failed = failed_tickers(&outcome.states);
    if !failed.is_empty() {
        println!("failed tickers: {}", failed.join(", "));
    }
    let report = aggregate(outcome.events);
    println!("headlines fetched: {}", report.events.len());

    if report.is_empty() {
        println!("no valid headlines or price data to export");
        return Ok(());
    }

    let out_dir = args.out_dir.unwrap_or_else(|| config.output_dir.clone());
    let written = export::write_report(&out_dir, &report)?;
    tracing::info!(
        news = %written.news.display(),
        summary = %written.summary.display(),
        tickers = report.summaries.len(),
        "report exported"
    );
    println!(
        "wrote {} and {}",
        written.news.display(),
        written.summary.display()
    );
    Ok(())
}

/// One-line run tally, price lookup failures included.
pub(crate) fn stats_line(stats: &ScrapeStats) -> String {
    format!(
        "tickers: {} ({} failed); rows: {} seen, {} skipped, {} unparseable, {} out of window; \
         article fallbacks: {}; prices: {} no data, {} missing bar, {} fetch failed",
        stats.tickers_attempted,
        stats.tickers_failed,
        stats.rows_seen,
        stats.rows_skipped,
        stats.unparseable_timestamps,
        stats.out_of_window,
        stats.article_fallbacks,
        stats.price_no_data,
        stats.price_missing_bar,
        stats.price_fetch_failed,
    )
}

pub(crate) fn failed_tickers(states: &[(Ticker, TickerState)]) -> Vec<&str> {
    states
        .iter()
        .filter(|(_, state)| *state == TickerState::Failed)
        .map(|(ticker, _)| ticker.as_str())
        .collect()
}

/// Explicit `--ticker` symbols win over the ticker file. Either way symbols
/// are normalized and repeats dropped in first-seen order.
pub(crate) fn resolve_tickers(config: &AppConfig, args: &RunArgs) -> anyhow::Result<Vec<Ticker>> {
    if !args.symbols.is_empty() {
        let mut seen = HashSet::new();
        return Ok(args
            .symbols
            .iter()
            .filter_map(|raw| Ticker::parse(raw))
            .filter(|t| seen.insert(t.clone()))
            .collect());
    }

    let path = args
        .tickers_path
        .clone()
        .unwrap_or_else(|| config.tickers_path.clone());
    load_tickers(&path).with_context(|| format!("loading tickers from {}", path.display()))
}

/// The week to report: the one containing `week_of` when given, otherwise
/// the week before `now`.
pub(crate) fn report_window(now: &DateTime<Tz>, week_of: Option<NaiveDate>) -> ReportWindow {
    match week_of {
        Some(date) => ReportWindow::week_containing(date, now.timezone()),
        None => ReportWindow::previous_week(now),
    }
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<NewsPipeline<YahooChartClient>> {
    let quotes = QuoteClient::with_base_url(
        &config.finviz_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let charts = YahooChartClient::with_base_url(
        &config.yahoo_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.timezone,
    )?;

    Ok(NewsPipeline::new(
        quotes,
        PriceWindowResolver::new(charts),
        LexiconScorer::default(),
        PolarityClassifier::vader(),
        ScrapeOptions::from_config(config),
    ))
}
