use chrono::TimeZone;
use chrono_tz::America::New_York;
use sentiprice_core::{aggregate, PriceSnapshot, SentimentLabel, Ticker};

use super::*;

fn event(ticker: &str, prices: PriceSnapshot) -> NewsEvent {
    NewsEvent {
        ticker: Ticker::parse(ticker).unwrap(),
        title: "ABC beats, raises guidance".to_owned(),
        link: "https://news.example/abc".to_owned(),
        published_at: New_York.with_ymd_and_hms(2024, 1, 10, 9, 45, 0).unwrap(),
        content: "ABC beat estimates.".to_owned(),
        lookup_score: 1,
        pos_words: vec!["beat".to_owned(), "guidance".to_owned()],
        neg_words: Vec::new(),
        ambiguous: false,
        vader_score: 1,
        vader_label: SentimentLabel::Positive,
        is_weekend: false,
        after_market_close: false,
        prices,
    }
}

fn priced() -> PriceSnapshot {
    PriceSnapshot {
        at_time: Some(10.0),
        plus_1h: None,
        plus_4h: None,
        end_of_week: Some(12.0),
        end_of_day: Some(11.0),
        premarket: Some(10.0),
    }
}

fn read_rows(bytes: &[u8]) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_reader(bytes);
    let header = rdr.headers().unwrap().clone();
    let rows = rdr.records().map(Result::unwrap).collect();
    (header, rows)
}

fn cell<'a>(header: &csv::StringRecord, row: &'a csv::StringRecord, name: &str) -> &'a str {
    let idx = header.iter().position(|h| h == name).unwrap();
    row.get(idx).unwrap()
}

#[test]
fn news_rows_render_prices_and_changes() {
    let mut buf = Vec::new();
    write_news(&mut buf, &[event("ABC", priced())]).unwrap();
    let (header, rows) = read_rows(&buf);

    assert_eq!(header.len(), NEWS_HEADER.len());
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(cell(&header, row, "Ticker"), "ABC");
    assert_eq!(cell(&header, row, "Datetime"), "2024-01-10 09:45:00");
    assert_eq!(cell(&header, row, "Pos Words"), "beat, guidance");
    assert_eq!(cell(&header, row, "VADER Label"), "positive");
    assert_eq!(cell(&header, row, "Price @ Time"), "10");
    assert_eq!(cell(&header, row, "+1h Price"), "N/A");
    assert_eq!(cell(&header, row, "+4h Price"), "N/A");
    assert_eq!(cell(&header, row, "Pct_1h"), "");
    assert!(cell(&header, row, "Pct_EOW").starts_with("20"));
}

#[test]
fn unavailable_prices_never_render_as_zero() {
    let mut buf = Vec::new();
    write_news(&mut buf, &[event("XYZ", PriceSnapshot::unavailable())]).unwrap();
    let (header, rows) = read_rows(&buf);

    for name in ["Price @ Time", "End of Week Price", "End of Day Price", "Premarket Price"] {
        assert_eq!(cell(&header, &rows[0], name), "N/A", "column {name}");
    }
    for name in ["Pct_1h", "Pct_4h", "Pct_EOD", "Pct_EOW"] {
        assert_eq!(cell(&header, &rows[0], name), "", "column {name}");
    }
}

#[test]
fn summary_rows_leave_missing_means_empty() {
    let report = aggregate(vec![
        event("ABC", priced()),
        event("XYZ", PriceSnapshot::unavailable()),
    ]);
    let mut buf = Vec::new();
    write_summary(&mut buf, &report.summaries).unwrap();
    let (header, rows) = read_rows(&buf);

    let names: Vec<&str> = header.iter().collect();
    assert_eq!(names, SUMMARY_HEADER.to_vec());
    assert_eq!(rows.len(), 2);

    let xyz = &rows[1];
    assert_eq!(cell(&header, xyz, "Ticker"), "XYZ");
    assert_eq!(cell(&header, xyz, "Headlines_Count"), "1");
    assert_eq!(cell(&header, xyz, "Avg_EOW_Change"), "");
    assert_eq!(cell(&header, xyz, "Avg_EOD_Change"), "");

    let abc = &rows[0];
    assert_eq!(cell(&header, abc, "Avg_Lookup_Score"), "1");
    assert_eq!(cell(&header, abc, "Avg_1h_Change"), "");
    assert!(cell(&header, abc, "Avg_EOW_Change").starts_with("20"));
}

#[test]
fn write_report_creates_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let report = aggregate(vec![event("ABC", priced())]);

    let written = write_report(&out, &report).unwrap();

    assert_eq!(written.news, out.join(NEWS_FILE));
    assert_eq!(written.summary, out.join(SUMMARY_FILE));
    let news = std::fs::read_to_string(&written.news).unwrap();
    assert!(news.starts_with("Ticker,Datetime,Title"));
    let summary = std::fs::read_to_string(&written.summary).unwrap();
    assert!(summary.lines().nth(1).unwrap().starts_with("ABC,1,1,1,"));
}
