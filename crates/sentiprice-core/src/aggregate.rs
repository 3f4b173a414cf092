//! Post-processing over the collected events: deduplication, per-event
//! percent changes, and per-ticker summaries.
//!
//! Missing prices stay missing all the way through. A horizon for which a
//! ticker has no valid sample averages to `None`, not `0.0`.

use std::collections::{BTreeMap, HashSet};

use chrono::DateTime;
use chrono_tz::Tz;

use crate::types::{NewsEvent, Ticker, TickerSummary};

/// Deduplicated events plus their per-ticker summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub events: Vec<NewsEvent>,
    pub summaries: Vec<TickerSummary>,
}

impl Report {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Percent changes from the at-time price to each later reference price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceChanges {
    pub one_hour: Option<f64>,
    pub four_hour: Option<f64>,
    pub end_of_day: Option<f64>,
    pub end_of_week: Option<f64>,
}

impl PriceChanges {
    #[must_use]
    pub fn for_event(event: &NewsEvent) -> Self {
        let p = &event.prices;
        Self {
            one_hour: pct_change(p.at_time, p.plus_1h),
            four_hour: pct_change(p.at_time, p.plus_4h),
            end_of_day: pct_change(p.at_time, p.end_of_day),
            end_of_week: pct_change(p.at_time, p.end_of_week),
        }
    }
}

/// `(target - base) / base * 100`.
///
/// Returns `None` when either price is unavailable or the base is zero.
#[must_use]
pub fn pct_change(base: Option<f64>, target: Option<f64>) -> Option<f64> {
    let (base, target) = (base?, target?);
    if base == 0.0 {
        return None;
    }
    let pct = (target - base) / base * 100.0;
    pct.is_finite().then_some(pct)
}

/// Drops repeat events sharing (ticker, title, published instant), keeping
/// the first, then orders by (ticker, published instant).
///
/// The sort is stable, so rows of one ticker at the same instant keep their
/// page order.
#[must_use]
pub fn dedupe_events(events: Vec<NewsEvent>) -> Vec<NewsEvent> {
    let mut seen: HashSet<(Ticker, String, DateTime<Tz>)> = HashSet::with_capacity(events.len());
    let mut unique: Vec<NewsEvent> = events
        .into_iter()
        .filter(|e| seen.insert((e.ticker.clone(), e.title.clone(), e.published_at)))
        .collect();
    unique.sort_by(|a, b| {
        a.ticker
            .cmp(&b.ticker)
            .then_with(|| a.published_at.cmp(&b.published_at))
    });
    unique
}

/// Per-ticker means over `events`, ordered by ticker.
///
/// Callers should deduplicate first; this function counts what it is given.
#[must_use]
pub fn summarize(events: &[NewsEvent]) -> Vec<TickerSummary> {
    let mut groups: BTreeMap<&Ticker, Vec<&NewsEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(&event.ticker).or_default().push(event);
    }

    groups
        .into_iter()
        .map(|(ticker, group)| {
            let changes: Vec<PriceChanges> =
                group.iter().map(|e| PriceChanges::for_event(e)).collect();
            TickerSummary {
                ticker: ticker.clone(),
                avg_lookup_score: mean(group.iter().map(|e| f64::from(e.lookup_score)))
                    .unwrap_or_default(),
                avg_vader_score: mean(group.iter().map(|e| f64::from(e.vader_score)))
                    .unwrap_or_default(),
                headlines_count: group.len(),
                avg_1h_change: mean(changes.iter().filter_map(|c| c.one_hour)),
                avg_4h_change: mean(changes.iter().filter_map(|c| c.four_hour)),
                avg_eod_change: mean(changes.iter().filter_map(|c| c.end_of_day)),
                avg_eow_change: mean(changes.iter().filter_map(|c| c.end_of_week)),
            }
        })
        .collect()
}

/// Deduplicates and summarizes in one pass.
#[must_use]
pub fn aggregate(events: Vec<NewsEvent>) -> Report {
    let events = dedupe_events(events);
    let summaries = summarize(&events);
    Report { events, summaries }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = count as f64;
    Some(sum / denom)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
