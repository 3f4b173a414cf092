//! Normalization of quote-page news timestamps into zone-aware instants.
//!
//! The quote page renders two shapes of date text:
//!
//! - `Today 03:15PM`: relative to the current date in the trading zone.
//! - `Aug-12-25 03:45PM`: an absolute calendar date-time in the trading zone.
//!
//! Anything else is rejected so the caller can skip the row.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;
use regex::Regex;
use thiserror::Error;

/// Hour (trading-zone local) at which the regular session closes.
pub const MARKET_CLOSE_HOUR: u32 = 16;

const MARKET_CLOSE_SECS: u32 = MARKET_CLOSE_HOUR * 3600;

static TODAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Today\s+(\d{1,2}):(\d{2})\s*(AM|PM)$").expect("valid today regex")
});

static ABSOLUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z]{3})-(\d{2})-(\d{2})\s+(\d{1,2}):(\d{2})\s*(AM|PM)$")
        .expect("valid absolute date regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("unparseable news timestamp {raw:?}")]
    Unparseable { raw: String },

    #[error("local time {raw:?} does not exist in {zone}")]
    NonexistentLocalTime { raw: String, zone: String },
}

/// Parses raw quote-page date text into an instant in `now`'s time zone.
///
/// `now` supplies both the zone and, for `Today` rows, the calendar date.
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
///
/// # Errors
///
/// Returns [`TimestampError::Unparseable`] when the text matches neither
/// accepted format or carries an out-of-range clock value, and
/// [`TimestampError::NonexistentLocalTime`] when the local time falls in a
/// DST gap.
pub fn parse_news_timestamp(raw: &str, now: &DateTime<Tz>) -> Result<DateTime<Tz>, TimestampError> {
    let text = raw.trim();
    let unparseable = || TimestampError::Unparseable {
        raw: raw.to_owned(),
    };

    let naive = if let Some(caps) = TODAY_RE.captures(text) {
        let hour: u32 = caps[1].parse().map_err(|_| unparseable())?;
        let minute: u32 = caps[2].parse().map_err(|_| unparseable())?;
        let hour = to_24_hour(hour, &caps[3]).ok_or_else(unparseable)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(unparseable)?;
        now.date_naive().and_time(time)
    } else if let Some(caps) = ABSOLUTE_RE.captures(text) {
        let canonical = format!(
            "{}-{}-{} {}:{}{}",
            &caps[1],
            &caps[2],
            &caps[3],
            &caps[4],
            &caps[5],
            caps[6].to_uppercase()
        );
        NaiveDateTime::parse_from_str(&canonical, "%b-%d-%y %I:%M%p").map_err(|_| unparseable())?
    } else {
        return Err(unparseable());
    };

    let zone = now.timezone();
    zone.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimestampError::NonexistentLocalTime {
            raw: raw.to_owned(),
            zone: zone.name().to_owned(),
        })
}

/// 12-hour clock to 24-hour: `12AM -> 0`, `12PM -> 12`, other PM hours add 12.
fn to_24_hour(hour: u32, meridiem: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = meridiem.eq_ignore_ascii_case("PM");
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    })
}

/// `true` when the instant's local weekday is Saturday or Sunday.
#[must_use]
pub fn is_weekend(at: &DateTime<Tz>) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `true` when the local time-of-day is strictly before the session close.
#[must_use]
pub fn before_market_close(at: &DateTime<Tz>) -> bool {
    at.hour() < MARKET_CLOSE_HOUR
}

/// `true` when the local time-of-day is strictly after 16:00:00.
///
/// A headline stamped exactly 16:00 is neither before nor after the close.
#[must_use]
pub fn after_market_close(at: &DateTime<Tz>) -> bool {
    let secs = at.num_seconds_from_midnight();
    secs > MARKET_CLOSE_SECS || (secs == MARKET_CLOSE_SECS && at.nanosecond() > 0)
}
