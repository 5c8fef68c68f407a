//! Calendar windows in local time.
//!
//! "This month" starts at local midnight on the first of the month containing `now`. All
//! helpers take `now` explicitly so a whole computation sees a single instant.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeDelta, Utc};

/// First instant of the local calendar month containing `now`.
#[must_use]
pub fn month_start(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    let first_of_month = now.date_naive() - Days::new(u64::from(now.day0()));
    let local_midnight = first_of_month.and_time(NaiveTime::MIN);
    let utc_offset = TimeDelta::seconds(i64::from(now.offset().local_minus_utc()));

    (local_midnight - utc_offset).and_utc()
}

/// Whether `timestamp` falls on or after the start of the current local month.
#[must_use]
pub fn is_current_month(timestamp: DateTime<Utc>, now: DateTime<FixedOffset>) -> bool {
    timestamp >= month_start(now)
}

/// The same local wall-clock instant one calendar month before `now`.
#[must_use]
pub fn one_month_before(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(1))
        .unwrap_or(now)
        .with_timezone(&Utc)
}

/// Local calendar date of a stored timestamp.
#[must_use]
pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    #[test]
    fn test_month_start_uses_local_midnight() {
        let now = ist().with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        // 1 Oct 00:00 IST is 30 Sep 18:30 UTC
        let expected = Utc.with_ymd_and_hms(2026, 9, 30, 18, 30, 0).unwrap();
        assert_eq!(month_start(now), expected);
    }

    #[test]
    fn test_month_start_on_the_first() {
        let now = ist().with_ymd_and_hms(2026, 1, 1, 0, 5, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 12, 31, 18, 30, 0).unwrap();
        assert_eq!(month_start(now), expected);
    }

    #[test]
    fn test_is_current_month_boundary() {
        let now = ist().with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        let just_before = Utc.with_ymd_and_hms(2026, 9, 30, 18, 29, 59).unwrap();
        let at_start = Utc.with_ymd_and_hms(2026, 9, 30, 18, 30, 0).unwrap();
        assert!(!is_current_month(just_before, now));
        assert!(is_current_month(at_start, now));
    }

    #[test]
    fn test_one_month_before_clamps_month_end() {
        let now = ist().with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let expected = ist().with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap();
        assert_eq!(one_month_before(now), expected.with_timezone(&Utc));
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let late_utc = Utc.with_ymd_and_hms(2026, 10, 18, 20, 0, 0).unwrap();
        assert_eq!(
            local_date(late_utc, ist()),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
    }
}
