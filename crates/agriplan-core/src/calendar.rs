//! Calendar primitives.
//!
//! Every piece of calendar arithmetic in the crate goes through this module.
//! Dates are civil (time-zone free) values backed by [`jiff::civil::Date`],
//! so day differences never drift across daylight-saving transitions.

use std::{fmt, str::FromStr};

use jiff::{civil::Date, Span};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PlanError, Result};

/// A calendar-correct `(year, month, day)` value, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Builds a date from its components, rejecting impossible days such as
    /// February 30.
    pub fn new(year: i16, month: i8, day: i8) -> Result<Self> {
        Date::new(year, month, day).map(Self).map_err(|e| {
            PlanError::invalid_date(format!("{year:04}-{month:02}-{day:02}"))
                .with_reason(e.to_string())
        })
    }

    pub fn year(&self) -> i16 {
        self.0.year()
    }

    pub fn month(&self) -> i8 {
        self.0.month()
    }

    pub fn day(&self) -> i8 {
        self.0.day()
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        parse_date(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(de::Error::custom)
    }
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored. Anything else (missing zero padding,
/// time components, signs, impossible days) is rejected.
///
/// # Examples
///
/// ```rust
/// use agriplan_core::calendar::parse_date;
///
/// let date = parse_date("2024-02-29")?;
/// assert_eq!(date.to_string(), "2024-02-29");
/// assert!(parse_date("2023-02-29").is_err());
/// assert!(parse_date("2024-2-1").is_err());
/// # Ok::<(), agriplan_core::PlanError>(())
/// ```
pub fn parse_date(input: &str) -> Result<CalendarDate> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(PlanError::invalid_date(input).with_reason("expected YYYY-MM-DD"));
    }

    let component = |range: std::ops::Range<usize>| -> Result<i16> {
        trimmed[range]
            .parse::<i16>()
            .map_err(|e| PlanError::invalid_date(input).with_reason(e.to_string()))
    };
    let year = component(0..4)?;
    let month = component(5..7)?;
    let day = component(8..10)?;

    let (Ok(month), Ok(day)) = (i8::try_from(month), i8::try_from(day)) else {
        return Err(PlanError::invalid_date(input).with_reason("component out of range"));
    };
    Date::new(year, month, day)
        .map(CalendarDate)
        .map_err(|e| PlanError::invalid_date(input).with_reason(e.to_string()))
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: CalendarDate) -> String {
    date.to_string()
}

/// Shifts a date by a signed number of days.
///
/// Fails only when the result leaves the supported calendar range
/// (years -9999 through 9999).
pub fn add_days(date: CalendarDate, offset: i64) -> Result<CalendarDate> {
    let out_of_range = || PlanError::DateOutOfRange {
        date: date.to_string(),
        offset,
    };
    let span = Span::new().try_days(offset).map_err(|_| out_of_range())?;
    date.0
        .checked_add(span)
        .map(CalendarDate)
        .map_err(|_| out_of_range())
}

/// Signed number of whole days from `a` to `b` (`b - a`).
pub fn day_diff(a: CalendarDate, b: CalendarDate) -> i64 {
    i64::from((b.0 - a.0).get_days())
}

/// The last calendar day of the month containing `date`.
pub fn end_of_month(date: CalendarDate) -> CalendarDate {
    CalendarDate(date.0.last_of_month())
}
