//! Scheduling primitives
//!
//! The read-only building blocks of the booking core: availability window
//! checks, overlap detection and slot enumeration. All of them operate on
//! wall-clock time in the single operating timezone.

pub mod calendar;
pub mod conflict;
pub mod slots;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::domain::{DomainError, DomainResult};

pub use calendar::AvailabilityCalendar;
pub use conflict::ConflictDetector;
pub use slots::{Slot, SlotGenerator};

/// Parse an ISO-8601 instant into operating-timezone wall-clock time.
///
/// Accepts both a bare local timestamp (`2026-03-02T09:00:00`) and an
/// offset-qualified one, whose wall clock is taken as-is.
pub fn parse_instant(value: &str) -> DomainResult<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    value.parse::<NaiveDateTime>().map_err(|_| {
        DomainError::invalid(format!("'{}' is not a valid ISO-8601 timestamp", value))
    })
}

/// Parse a calendar date (`YYYY-MM-DD`)
pub fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| DomainError::invalid(format!("'{}' is not a valid date", value)))
}

/// Weekday index with 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// Minutes since midnight, seconds ignored
pub fn minute_of_day(at: NaiveDateTime) -> i32 {
    (at.hour() * 60 + at.minute()) as i32
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_offset_timestamps() {
        let bare = parse_instant("2026-03-02T09:00:00").unwrap();
        assert_eq!(minute_of_day(bare), 540);

        let offset = parse_instant("2026-03-02T09:00:00+05:00").unwrap();
        assert_eq!(offset, bare);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(matches!(
            parse_instant("not-a-date"),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_date("2026-13-40"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        // 2026-03-01 is a Sunday
        assert_eq!(weekday_index(parse_date("2026-03-01").unwrap()), 0);
        assert_eq!(weekday_index(parse_date("2026-03-02").unwrap()), 1);
        assert_eq!(weekday_index(parse_date("2026-03-07").unwrap()), 6);
    }
}
