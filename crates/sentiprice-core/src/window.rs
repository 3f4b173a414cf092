//! The inclusive date-time range within which headlines are accepted.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl ReportWindow {
    /// Builds a window from explicit bounds. Both must be in the same zone.
    #[must_use]
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// The full calendar week (Monday 00:00 through Sunday 23:59:59.999999)
    /// preceding the week that contains `now`, in `now`'s zone.
    #[must_use]
    pub fn previous_week(now: &DateTime<Tz>) -> Self {
        Self::week_containing(now.date_naive() - Duration::days(7), now.timezone())
    }

    /// The Monday-to-Sunday week that contains `date`, in `zone`.
    #[must_use]
    pub fn week_containing(date: NaiveDate, zone: Tz) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let next_monday = monday + Duration::days(7);

        let start_naive = monday.and_time(NaiveTime::MIN);
        let end_naive = next_monday.and_time(NaiveTime::MIN) - Duration::microseconds(1);

        Self {
            start: localize(zone, &start_naive, true),
            end: localize(zone, &end_naive, false),
        }
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Inclusive on both bounds.
    #[must_use]
    pub fn contains(&self, at: &DateTime<Tz>) -> bool {
        self.start <= *at && *at <= self.end
    }
}

/// Resolves a local wall-clock time, stepping over DST gaps by reading the
/// wall clock as UTC-offset time when the zone has no such local instant.
fn localize(zone: Tz, naive: &NaiveDateTime, earliest: bool) -> DateTime<Tz> {
    let resolved = zone.from_local_datetime(naive);
    let picked = if earliest {
        resolved.earliest()
    } else {
        resolved.latest()
    };
    picked.unwrap_or_else(|| zone.from_utc_datetime(naive))
}
