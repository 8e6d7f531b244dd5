//! Civil-time view over an evaluation instant.
//!
//! Every component of the engine does its time arithmetic through [`Clock`]:
//! a pairing of the evaluation instant (`now`, UTC) with the UTC offset of
//! the wall clock the widget is rendered against. Hour-of-day windows,
//! calendar-day checks, and the daily due anchor are all functions of this
//! pair, so two surfaces given the same `(now, offset)` agree exactly.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc};

/// Seconds in one civil day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Evaluation clock: an instant plus the wall-clock offset it is viewed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl Clock {
    /// Create a clock for `now` viewed at the given UTC offset.
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Create a clock that treats UTC as the wall clock.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: FixedOffset::east_opt(0).unwrap(),
        }
    }

    /// The evaluation instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The wall-clock offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The evaluation instant in wall-clock time.
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.now.with_timezone(&self.offset)
    }

    /// Wall-clock hour (0-23).
    pub fn hour(&self) -> u32 {
        self.local().hour()
    }

    /// Wall-clock minute (0-59).
    pub fn minute(&self) -> u32 {
        self.local().minute()
    }

    /// Wall-clock calendar date.
    pub fn local_date(&self) -> NaiveDate {
        self.local().date_naive()
    }

    /// Wall-clock calendar date of an arbitrary instant.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Whether `instant` falls on today's wall-clock date.
    pub fn is_today(&self, instant: DateTime<Utc>) -> bool {
        self.date_of(instant) == self.local_date()
    }

    /// Whether `instant` falls on today's or yesterday's wall-clock date.
    pub fn is_today_or_yesterday(&self, instant: DateTime<Utc>) -> bool {
        let date = self.date_of(instant);
        let today = self.local_date();
        date == today || today.pred_opt() == Some(date)
    }

    /// The instant at which a wall-clock date/time occurs, if it exists
    /// unambiguously at this clock's offset.
    pub fn instant_at(&self, date: NaiveDate, time: chrono::NaiveTime) -> Option<DateTime<Utc>> {
        date.and_time(time)
            .and_local_timezone(self.offset)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Wall-clock time-of-day of an arbitrary instant.
    pub fn time_of(&self, instant: DateTime<Utc>) -> chrono::NaiveTime {
        instant.with_timezone(&self.offset).time()
    }

    /// Seconds from `now` until `instant`; negative if already past.
    pub fn seconds_until(&self, instant: DateTime<Utc>) -> i64 {
        (instant - self.now).num_seconds()
    }

    /// Seconds elapsed since `instant`; negative if it is in the future.
    pub fn seconds_since(&self, instant: DateTime<Utc>) -> i64 {
        (self.now - instant).num_seconds()
    }

    /// Whole days from `now` until `instant`, truncated toward zero.
    pub fn days_until(&self, instant: DateTime<Utc>) -> i64 {
        (instant - self.now).num_days()
    }

    /// Whether the wall-clock hour is inside `[start, end)`, wrapping past
    /// midnight when `start > end` (e.g. 23..5).
    pub fn hour_in_window(&self, start: u32, end: u32) -> bool {
        let hour = self.hour();
        if start <= end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        }
    }

    /// A clock advanced by `duration`, same offset.
    pub fn advanced(&self, duration: Duration) -> Self {
        Self {
            now: self.now + duration,
            offset: self.offset,
        }
    }

    /// Day-of-year (1-366) of the wall-clock date. Input to the background
    /// variant formula.
    pub fn ordinal_date(&self) -> u32 {
        self.local_date().ordinal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_hour_uses_offset() {
        let clock = Clock::new(
            at(2025, 6, 1, 22, 30),
            FixedOffset::east_opt(2 * 3600).unwrap(),
        );
        assert_eq!(clock.hour(), 0);
        assert_eq!(clock.local_date(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    }

    #[test]
    fn test_instant_at_round_trips_offset() {
        let clock = Clock::new(
            at(2025, 6, 1, 12, 0),
            FixedOffset::east_opt(2 * 3600).unwrap(),
        );
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let time = chrono::NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        // 09:30 local at +02:00 is 07:30 UTC.
        assert_eq!(clock.instant_at(date, time).unwrap(), at(2025, 6, 2, 7, 30));
    }

    #[test]
    fn test_is_today_or_yesterday() {
        let clock = Clock::utc(at(2025, 6, 2, 8, 0));
        assert!(clock.is_today(at(2025, 6, 2, 0, 1)));
        assert!(clock.is_today_or_yesterday(at(2025, 6, 1, 23, 59)));
        assert!(!clock.is_today_or_yesterday(at(2025, 5, 31, 23, 59)));
    }

    #[test]
    fn test_hour_window_wraps_midnight() {
        let late = Clock::utc(at(2025, 6, 1, 23, 5));
        let early = Clock::utc(at(2025, 6, 1, 2, 0));
        let noon = Clock::utc(at(2025, 6, 1, 12, 0));
        assert!(late.hour_in_window(23, 5));
        assert!(early.hour_in_window(23, 5));
        assert!(!noon.hour_in_window(23, 5));
    }
}
