// fewlot-model - Opaque date/time leaf values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Opaque date/time records.
//!
//! `Time` and `Date` are leaf values: the traversal algorithms treat them
//! as black boxes with their own construction, comparison and (in
//! fewlot-core) binary encoding. Construction validates field domains;
//! out-of-domain fields are rejected rather than coerced.

use std::fmt;

use crate::error::{Error, Result};

/// Nanoseconds per second, the exclusive upper bound for `nanos` fields.
pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// An instant: whole seconds since an epoch plus a nanosecond remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    secs: i64,
    nanos: u32,
}

impl Time {
    /// Create a time value. `nanos` must be below one second.
    pub fn new(secs: i64, nanos: u32) -> Result<Self> {
        if nanos >= NANOS_PER_SEC {
            return Err(Error::invalid(
                "time",
                format!("nanoseconds {} not below {}", nanos, NANOS_PER_SEC),
            ));
        }
        Ok(Time { secs, nanos })
    }

    /// Whole seconds since the epoch.
    #[must_use]
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Nanosecond remainder, always below one second.
    #[must_use]
    pub fn nanos(&self) -> u32 {
        self.nanos
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

/// A broken-down calendar date with time-of-day and UTC offset.
///
/// Field domains follow the usual calendar conventions; `weekday` is
/// 0 (Sunday) through 6, and `second` admits 60 for a leap second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanos: u32,
    pub offset_secs: i32,
}

impl Date {
    /// Create a date value, validating every field domain.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        weekday: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
        offset_secs: i32,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid("date", format!("month {}", month)));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::invalid("date", format!("day {}", day)));
        }
        if weekday > 6 {
            return Err(Error::invalid("date", format!("weekday {}", weekday)));
        }
        if hour > 23 {
            return Err(Error::invalid("date", format!("hour {}", hour)));
        }
        if minute > 59 {
            return Err(Error::invalid("date", format!("minute {}", minute)));
        }
        // 60 admits a leap second
        if second > 60 {
            return Err(Error::invalid("date", format!("second {}", second)));
        }
        if nanos >= NANOS_PER_SEC {
            return Err(Error::invalid(
                "date",
                format!("nanoseconds {} not below {}", nanos, NANOS_PER_SEC),
            ));
        }
        Ok(Date {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            second,
            nanos,
            offset_secs,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:09}{:+}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.nanos,
            self.offset_secs
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_valid() {
        let t = Time::new(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(t.secs(), 1_700_000_000);
        assert_eq!(t.nanos(), 123_456_789);
    }

    #[test]
    fn test_time_rejects_overflowing_nanos() {
        assert!(Time::new(0, NANOS_PER_SEC).is_err());
    }

    #[test]
    fn test_date_valid() {
        let d = Date::new(2024, 5, 17, 5, 13, 45, 30, 0, 3600).unwrap();
        assert_eq!(d.year, 2024);
        assert_eq!(d.weekday, 5);
    }

    #[test]
    fn test_date_leap_second_allowed() {
        assert!(Date::new(2016, 12, 31, 6, 23, 59, 60, 0, 0).is_ok());
    }

    #[test]
    fn test_date_rejects_bad_fields() {
        assert!(Date::new(2024, 0, 1, 0, 0, 0, 0, 0, 0).is_err());
        assert!(Date::new(2024, 13, 1, 0, 0, 0, 0, 0, 0).is_err());
        assert!(Date::new(2024, 1, 32, 0, 0, 0, 0, 0, 0).is_err());
        assert!(Date::new(2024, 1, 1, 7, 0, 0, 0, 0, 0).is_err());
        assert!(Date::new(2024, 1, 1, 0, 24, 0, 0, 0, 0).is_err());
        assert!(Date::new(2024, 1, 1, 0, 0, 60, 0, 0, 0).is_err());
        assert!(Date::new(2024, 1, 1, 0, 0, 0, 61, 0, 0).is_err());
        assert!(Date::new(2024, 1, 1, 0, 0, 0, 0, NANOS_PER_SEC, 0).is_err());
    }

    #[test]
    fn test_ordering_by_fields() {
        let a = Time::new(10, 0).unwrap();
        let b = Time::new(10, 1).unwrap();
        assert!(a < b);
    }
}
