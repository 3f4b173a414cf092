//! CSV export of the headline sheet and the per-ticker summary.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sentiprice_core::{NewsEvent, PriceChanges, Report, TickerSummary};

pub(crate) const NEWS_FILE: &str = "news_data.csv";
pub(crate) const SUMMARY_FILE: &str = "summary.csv";

const NEWS_HEADER: [&str; 23] = [
    "Ticker",
    "Datetime",
    "Title",
    "Link",
    "Content",
    "Lookup Score",
    "Pos Words",
    "Neg Words",
    "Ambiguous",
    "VADER Score",
    "VADER Label",
    "Weekend News",
    "After Market Close",
    "Price @ Time",
    "+1h Price",
    "+4h Price",
    "End of Week Price",
    "End of Day Price",
    "Premarket Price",
    "Pct_1h",
    "Pct_4h",
    "Pct_EOD",
    "Pct_EOW",
];

const SUMMARY_HEADER: [&str; 8] = [
    "Ticker",
    "Avg_Lookup_Score",
    "Avg_VADER_Score",
    "Headlines_Count",
    "Avg_1h_Change",
    "Avg_4h_Change",
    "Avg_EOD_Change",
    "Avg_EOW_Change",
];

/// Paths of the files written by [`write_report`].
#[derive(Debug)]
pub(crate) struct WrittenReport {
    pub news: PathBuf,
    pub summary: PathBuf,
}

pub(crate) fn write_report(dir: &Path, report: &Report) -> anyhow::Result<WrittenReport> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let news = dir.join(NEWS_FILE);
    let file =
        File::create(&news).with_context(|| format!("creating {}", news.display()))?;
    write_news(file, &report.events).with_context(|| format!("writing {}", news.display()))?;

    let summary = dir.join(SUMMARY_FILE);
    let file =
        File::create(&summary).with_context(|| format!("creating {}", summary.display()))?;
    write_summary(file, &report.summaries)
        .with_context(|| format!("writing {}", summary.display()))?;

    Ok(WrittenReport { news, summary })
}

/// One row per event. The datetime is written as naive trading-zone local
/// time; unavailable prices are `N/A` and missing percent changes are empty.
pub(crate) fn write_news<W: Write>(writer: W, events: &[NewsEvent]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(NEWS_HEADER)?;

    for event in events {
        let p = &event.prices;
        let changes = PriceChanges::for_event(event);
        wtr.write_record([
            event.ticker.to_string(),
            event.published_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            event.title.clone(),
            event.link.clone(),
            event.content.clone(),
            event.lookup_score.to_string(),
            event.pos_words.join(", "),
            event.neg_words.join(", "),
            event.ambiguous.to_string(),
            event.vader_score.to_string(),
            event.vader_label.to_string(),
            event.is_weekend.to_string(),
            event.after_market_close.to_string(),
            price_cell(p.at_time),
            price_cell(p.plus_1h),
            price_cell(p.plus_4h),
            price_cell(p.end_of_week),
            price_cell(p.end_of_day),
            price_cell(p.premarket),
            number_cell(changes.one_hour),
            number_cell(changes.four_hour),
            number_cell(changes.end_of_day),
            number_cell(changes.end_of_week),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_summary<W: Write>(writer: W, summaries: &[TickerSummary]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SUMMARY_HEADER)?;

    for s in summaries {
        wtr.write_record([
            s.ticker.to_string(),
            s.avg_lookup_score.to_string(),
            s.avg_vader_score.to_string(),
            s.headlines_count.to_string(),
            number_cell(s.avg_1h_change),
            number_cell(s.avg_4h_change),
            number_cell(s.avg_eod_change),
            number_cell(s.avg_eow_change),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn price_cell(price: Option<f64>) -> String {
    price.map_or_else(|| "N/A".to_owned(), |v| v.to_string())
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
