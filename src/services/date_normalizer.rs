//! Due-date normalization.
//!
//! Accepts native dates, date-times and strings in a handful of encodings.
//! Parse failures never surface as errors: they become
//! [`NormalizedDate::Unparsed`], which scores exactly like a missing date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::models::{is_truthy, DueDateInput};

/// Explicit patterns tried in order; the first match wins.
///
/// Each entry carries the field separator and whether the year leads, so the
/// year field can be required to have exactly four digits.
const DATE_FORMATS: [(&str, char, bool); 3] = [
    ("%Y-%m-%d", '-', true),
    ("%d-%m-%Y", '-', false),
    ("%Y/%m/%d", '/', true),
];

const ISO_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const ISO_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Outcome of normalizing a due-date value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// No value, or a falsy one
    Absent,
    Parsed(NaiveDate),
    /// A value was supplied but matched no known encoding
    Unparsed(String),
}

impl NormalizedDate {
    /// Calendar date, if one was recovered.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(d) => Some(*d),
            Self::Absent | Self::Unparsed(_) => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }
}

/// Normalize an optional raw due-date value.
pub fn normalize(input: Option<&DueDateInput>) -> NormalizedDate {
    match input {
        None => NormalizedDate::Absent,
        Some(DueDateInput::Date(d)) => NormalizedDate::Parsed(*d),
        Some(DueDateInput::DateTime(dt)) => NormalizedDate::Parsed(dt.date()),
        Some(DueDateInput::Text(s)) => normalize_str(s),
        Some(DueDateInput::Other(v)) if is_truthy(v) => {
            tracing::debug!(value = %v, "due date is not a string, ignoring");
            NormalizedDate::Unparsed(v.to_string())
        }
        Some(DueDateInput::Other(_)) => NormalizedDate::Absent,
    }
}

/// Normalize a due-date string.
pub fn normalize_str(s: &str) -> NormalizedDate {
    if s.is_empty() {
        return NormalizedDate::Absent;
    }

    for (fmt, sep, year_first) in DATE_FORMATS {
        if !has_four_digit_year(s, sep, year_first) {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return NormalizedDate::Parsed(date);
        }
    }

    match parse_iso(s) {
        Some(date) => NormalizedDate::Parsed(date),
        None => {
            tracing::debug!(value = s, "unrecognized due date format");
            NormalizedDate::Unparsed(s.to_string())
        }
    }
}

fn has_four_digit_year(s: &str, sep: char, year_first: bool) -> bool {
    let year = if year_first {
        s.split(sep).next()
    } else {
        s.rsplit(sep).next()
    };
    year.is_some_and(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
}

/// General ISO-8601 fallback. Offset-carrying timestamps keep the calendar
/// date written in the string rather than converting to another zone.
fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ISO_OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.date_naive());
        }
    }
    for fmt in ISO_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    parse_basic_date(s)
}

/// `YYYYMMDD`
fn parse_basic_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
