//! Calendar-day resolution for the `isToday` / `inFuture` / `inPast`
//! predicates.
//!
//! supports:
//! - dates: "2024-05-01"
//! - date-times (stored as UTC): "2024-05-01 10:00:00", "2024-05-01T10:00",
//!   RFC 3339 with an explicit offset

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::types::Clock;

/// Values up to this many characters are dates, longer ones date-times.
const DATE_LENGTH: usize = 10;

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// The calendar day `value` falls on, as seen from `offset`.
pub(crate) fn day_of(value: &str, offset: &FixedOffset) -> Option<NaiveDate> {
    if value.chars().count() <= DATE_LENGTH {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
    }
    parse_date_time(value).map(|dt| dt.with_timezone(offset).date_naive())
}

fn parse_date_time(value: &str) -> Option<DateTime<Utc>> {
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Where `value`'s day lies relative to today. `None` if it does not parse.
pub(crate) fn compare_to_today(value: &str, clock: &dyn Clock) -> Option<Ordering> {
    let now = clock.now();
    let day = day_of(value, now.offset())?;
    Some(day.cmp(&now.date_naive()))
}
