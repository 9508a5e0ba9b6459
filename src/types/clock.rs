use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Source of "now" for the date predicates.
///
/// The offset of the returned timestamp is the user's time zone: stored
/// date-time attributes (UTC) are shifted into it before their calendar day
/// is compared with today's.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Today's calendar date in the clock's offset.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Noon UTC on the given date. Returns `None` for an invalid date.
    #[must_use]
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let noon = NaiveTime::from_hms_opt(12, 0, 0)?;
        let now = Utc
            .from_utc_datetime(&NaiveDateTime::new(date, noon))
            .fixed_offset();
        Some(Self { now })
    }

    /// Same instant, observed from another offset (seconds east of UTC).
    #[must_use]
    pub fn with_offset(self, offset_seconds: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_seconds)?;
        Some(Self {
            now: self.now.with_timezone(&offset),
        })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}
