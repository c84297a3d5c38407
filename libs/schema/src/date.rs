//! Calendar date normalization
//!
//! Clients send dates as `YYYY-MM-DD`, but some omit the leading zero of the
//! month or day (`2024-1-5`). [`normalize_date`] accepts the strict form and,
//! failing that, retries exactly once after zero-padding one-character month
//! and day segments. Nothing else is repaired: out-of-range values, other
//! separators and short years are rejected.

use chrono::NaiveDate;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date '{value}': expected YYYY-MM-DD")]
pub struct DateError {
    pub value: String,
}

impl DateError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// Earliest accepted year; there is no year zero on the calendar.
const MIN_YEAR: i32 = 1;

/// Parse `raw` into a calendar date, padding single-digit month/day segments.
pub fn normalize_date(raw: &str) -> Result<NaiveDate, DateError> {
    if let Some(date) = parse_strict(raw) {
        return Ok(date);
    }

    let padded = pad_segments(raw).ok_or_else(|| DateError::new(raw))?;
    parse_strict(&padded).ok_or_else(|| DateError::new(raw))
}

/// Exactly four year digits, two month digits and two day digits.
fn parse_strict(value: &str) -> Option<NaiveDate> {
    let (year, month, day) = split_segments(value)?;
    if !is_digits(year, 4) || !is_digits(month, 2) || !is_digits(day, 2) {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    if year < MIN_YEAR {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn pad_segments(value: &str) -> Option<String> {
    let (year, month, day) = split_segments(value)?;
    Some(format!(
        "{}-{}-{}",
        year,
        pad_segment(month),
        pad_segment(day)
    ))
}

fn pad_segment(segment: &str) -> Cow<'_, str> {
    if segment.len() == 1 {
        Cow::Owned(format!("0{segment}"))
    } else {
        Cow::Borrowed(segment)
    }
}

fn split_segments(value: &str) -> Option<(&str, &str, &str)> {
    let mut parts = value.split('-');
    let segments = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(segments)
}

fn is_digits(segment: &str, len: usize) -> bool {
    segment.len() == len && segment.bytes().all(|b| b.is_ascii_digit())
}
