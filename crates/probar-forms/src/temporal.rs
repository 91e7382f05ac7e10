//! Date and time literals for the `date`, `time` and `datetime-local` checks.
//!
//! Caller-supplied bounds go through the strict `validate_*` functions, which
//! fail with a configuration error. The lenient `parse_*` functions are what
//! the mock page uses to sanitize typed values.

use crate::result::{FormsError, FormsResult};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;
use std::sync::OnceLock;

/// `date` value layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `time` value layout
pub const TIME_FORMAT: &str = "%H:%M";
/// `datetime-local` value layout
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid regex"))
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

fn datetime_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2})?$").expect("valid regex")
    })
}

/// Validate a caller-supplied `HH:mm` time bound
///
/// # Errors
///
/// Returns [`FormsError::InvalidTimeFormat`] unless `value` is a 24-hour
/// `HH:mm` time.
pub fn validate_time(value: &str) -> FormsResult<NaiveTime> {
    if !time_pattern().is_match(value) {
        return Err(FormsError::InvalidTimeFormat {
            value: value.to_string(),
        });
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| FormsError::InvalidTimeFormat {
        value: value.to_string(),
    })
}

/// Validate a caller-supplied `YYYY-MM-DD` date bound
///
/// # Errors
///
/// Returns [`FormsError::InvalidDateFormat`] for anything that is not a real
/// calendar date in that layout.
pub fn validate_date(value: &str) -> FormsResult<NaiveDate> {
    parse_date(value).ok_or_else(|| FormsError::InvalidDateFormat {
        value: value.to_string(),
        expected: "YYYY-MM-DD",
        example: "2020-01-01",
    })
}

/// Validate a caller-supplied `YYYY-MM-DDTHH:mm` bound
///
/// Field values may carry seconds; bounds may not.
///
/// # Errors
///
/// Returns [`FormsError::InvalidDateFormat`] for anything that is not a real
/// local date-time in that layout.
pub fn validate_datetime(value: &str) -> FormsResult<NaiveDateTime> {
    let strict = value.len() == 16 && datetime_pattern().is_match(value);
    strict.then(|| parse_datetime(value)).flatten().ok_or_else(|| FormsError::InvalidDateFormat {
        value: value.to_string(),
        expected: "YYYY-MM-DDTHH:mm",
        example: "2020-01-01T00:00",
    })
}

/// Parse a `date` input value
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !date_pattern().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parse a `time` input value (`HH:mm` or `HH:mm:ss`)
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let bytes = value.as_bytes();
    match bytes.len() {
        5 => NaiveTime::parse_from_str(value, TIME_FORMAT).ok(),
        8 => NaiveTime::parse_from_str(value, "%H:%M:%S").ok(),
        _ => None,
    }
    .filter(|_| bytes.get(2) == Some(&b':'))
}

/// Parse a `datetime-local` input value
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if !datetime_pattern().is_match(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Shift a time by whole minutes within the same day
///
/// Returns `None` when the result would cross midnight.
#[must_use]
pub fn shift_time(time: NaiveTime, minutes: i64) -> Option<String> {
    let (shifted, wrapped) = time.overflowing_add_signed(TimeDelta::minutes(minutes));
    (wrapped == 0).then(|| shifted.format(TIME_FORMAT).to_string())
}

/// The day before `date`
#[must_use]
pub fn day_before(date: NaiveDate) -> String {
    date.checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN)
        .format(DATE_FORMAT)
        .to_string()
}

/// The day after `date`
#[must_use]
pub fn day_after(date: NaiveDate) -> String {
    date.checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX)
        .format(DATE_FORMAT)
        .to_string()
}

/// Shift a date-time by whole minutes
#[must_use]
pub fn shift_datetime(datetime: NaiveDateTime, minutes: i64) -> String {
    datetime
        .checked_add_signed(TimeDelta::minutes(minutes))
        .unwrap_or(datetime)
        .format(DATETIME_FORMAT)
        .to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod validation {
        use super::*;

        #[test]
        fn test_valid_times() {
            assert!(validate_time("00:00").is_ok());
            assert!(validate_time("08:00").is_ok());
            assert!(validate_time("23:59").is_ok());
        }

        #[test]
        fn test_invalid_times() {
            for bad in ["8:00", "24:00", "12:60", "12:30:00", "noon", ""] {
                let err = validate_time(bad).unwrap_err();
                assert!(
                    matches!(err, FormsError::InvalidTimeFormat { ref value } if value == bad),
                    "{bad} should be rejected"
                );
            }
        }

        #[test]
        fn test_dates() {
            assert!(validate_date("2020-01-01").is_ok());
            assert!(validate_date("2021-02-29").is_err());
            assert!(validate_date("01/01/2020").is_err());
            assert!(validate_date("20-01-01").is_err());
        }

        #[test]
        fn test_datetimes() {
            assert!(validate_datetime("2020-01-01T00:00").is_ok());
            assert!(validate_datetime("2020-01-01 00:00").is_err());
            assert!(validate_datetime("2020-01-01T00:00:30").is_err());
            assert!(parse_datetime("2020-01-01T00:00:30").is_some());
            assert!(validate_datetime("2020-13-01T00:00").is_err());
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_parse_time_variants() {
            assert!(parse_time("12:30").is_some());
            assert!(parse_time("12:30:15").is_some());
            assert!(parse_time("25:00").is_none());
            assert!(parse_time("12:60").is_none());
            assert!(parse_time("invalid-time").is_none());
            assert!(parse_time("1230").is_none());
        }

        #[test]
        fn test_parse_date_rejects_text() {
            assert!(parse_date("invalid-date").is_none());
            assert!(parse_date("2025-02-12").is_some());
        }
    }

    mod shifting {
        use super::*;

        #[test]
        fn test_shift_time() {
            let t = validate_time("08:00").unwrap();
            assert_eq!(shift_time(t, -1).as_deref(), Some("07:59"));
            assert_eq!(shift_time(t, 1).as_deref(), Some("08:01"));
        }

        #[test]
        fn test_shift_time_stops_at_midnight() {
            assert_eq!(shift_time(validate_time("00:00").unwrap(), -1), None);
            assert_eq!(shift_time(validate_time("23:59").unwrap(), 1), None);
            assert_eq!(
                shift_time(validate_time("00:01").unwrap(), -1).as_deref(),
                Some("00:00")
            );
        }

        #[test]
        fn test_day_shifts() {
            let d = validate_date("2020-01-01").unwrap();
            assert_eq!(day_before(d), "2019-12-31");
            assert_eq!(day_after(validate_date("2025-12-31").unwrap()), "2026-01-01");
        }

        #[test]
        fn test_shift_datetime() {
            let dt = validate_datetime("2020-01-01T00:00").unwrap();
            assert_eq!(shift_datetime(dt, -1), "2019-12-31T23:59");
        }
    }
}
