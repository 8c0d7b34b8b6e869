//! Planning horizon and human-facing date ranges.
//!
//! The [`Horizon`] anchors every day index: index `0` is its start date and
//! `total_days - 1` its end date. A horizon can only be obtained through
//! [`Horizon::new`] or [`recalculate_horizon`], so holding one guarantees
//! `end_date >= start_date`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    calendar::{self, CalendarDate},
    error::{PlanError, Result},
};

/// The finite calendar window a plan spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawHorizon")]
pub struct Horizon {
    start_date: CalendarDate,
    end_date: CalendarDate,
    total_days: u32,
}

/// Unvalidated horizon as it appears in documents; `totalDays` is recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHorizon {
    start_date: CalendarDate,
    end_date: CalendarDate,
}

impl TryFrom<RawHorizon> for Horizon {
    type Error = PlanError;

    fn try_from(raw: RawHorizon) -> Result<Self> {
        Horizon::new(raw.start_date, raw.end_date)
    }
}

impl Horizon {
    /// Creates a horizon spanning `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvertedHorizon`] when `end` precedes `start`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self> {
        let diff = calendar::day_diff(start, end);
        if diff < 0 {
            return Err(PlanError::InvertedHorizon {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let total_days = u32::try_from(diff + 1).map_err(|_| {
            PlanError::invalid_input("horizon").with_reason("horizon spans too many days")
        })?;
        Ok(Self {
            start_date: start,
            end_date: end,
            total_days,
        })
    }

    pub fn start_date(&self) -> CalendarDate {
        self.start_date
    }

    pub fn end_date(&self) -> CalendarDate {
        self.end_date
    }

    /// Number of days in the horizon, always at least 1.
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Highest valid day index.
    pub fn last_index(&self) -> u32 {
        self.total_days - 1
    }

    /// Whether `index` lies in `0..total_days`.
    pub fn contains_index(&self, index: u32) -> bool {
        index < self.total_days
    }

    /// Day index of `date`; negative or past-the-end values are returned
    /// unclamped.
    pub fn index_of(&self, date: CalendarDate) -> i64 {
        date_to_day_index(self.start_date, date)
    }

    /// Calendar date of a day index.
    pub fn date_at(&self, index: u32) -> Result<CalendarDate> {
        day_index_to_date(self.start_date, i64::from(index))
    }
}

/// Builds a horizon from two `YYYY-MM-DD` strings.
///
/// This is the only hard-failure entry point of the converter: every other
/// operation needs a valid anchor to clamp against.
///
/// # Errors
///
/// * `PlanError::InvalidDate` - either boundary fails to parse
/// * `PlanError::InvertedHorizon` - `end` is before `start`
///
/// # Examples
///
/// ```rust
/// use agriplan_core::horizon::recalculate_horizon;
///
/// let horizon = recalculate_horizon("2024-03-01", "2024-03-31")?;
/// assert_eq!(horizon.total_days(), 31);
/// assert!(recalculate_horizon("2024-03-31", "2024-03-01").is_err());
/// # Ok::<(), agriplan_core::PlanError>(())
/// ```
pub fn recalculate_horizon(start: &str, end: &str) -> Result<Horizon> {
    let start = calendar::parse_date(start)?;
    let end = calendar::parse_date(end)?;
    Horizon::new(start, end)
}

/// Zero-based offset of `date` from `horizon_start`.
pub fn date_to_day_index(horizon_start: CalendarDate, date: CalendarDate) -> i64 {
    calendar::day_diff(horizon_start, date)
}

/// Calendar date at `index` days after `horizon_start`.
pub fn day_index_to_date(horizon_start: CalendarDate, index: i64) -> Result<CalendarDate> {
    calendar::add_days(horizon_start, index)
}

/// A human-facing inclusive date range.
///
/// `None` on either side means "open": it resolves to the horizon boundary
/// on that side each time the range is converted, so moving the horizon
/// moves open ends with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<CalendarDate>,
    #[serde(default)]
    pub end: Option<CalendarDate>,
}

impl DateRange {
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self { start, end }
    }

    /// A range closed on both sides.
    pub fn between(start: CalendarDate, end: CalendarDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// A single-day range.
    pub fn day(date: CalendarDate) -> Self {
        Self::between(date, date)
    }

    /// Resolves open ends against the horizon.
    pub fn resolve(&self, horizon: &Horizon) -> (CalendarDate, CalendarDate) {
        (
            self.start.unwrap_or(horizon.start_date),
            self.end.unwrap_or(horizon.end_date),
        )
    }
}

/// `START..END`, with an empty side for an open end.
impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, "..")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

/// Parses `START..END`, `START..`, `..END`, `..` or a single `DATE`.
impl FromStr for DateRange {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        let side = |part: &str| {
            let part = part.trim();
            (!part.is_empty())
                .then(|| calendar::parse_date(part))
                .transpose()
        };
        match s.split_once("..") {
            Some((start, end)) => Ok(Self::new(side(start)?, side(end)?)),
            None => Ok(Self::day(calendar::parse_date(s.trim())?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;

    #[test]
    fn test_recalculate_horizon_counts_inclusive_days() {
        let horizon = recalculate_horizon("2024-03-01", "2024-03-31").unwrap();
        assert_eq!(horizon.total_days(), 31);
        assert_eq!(horizon.last_index(), 30);

        let single = recalculate_horizon("2024-03-01", "2024-03-01").unwrap();
        assert_eq!(single.total_days(), 1);
        assert_eq!(single.last_index(), 0);
    }

    #[test]
    fn test_recalculate_horizon_rejects_inverted() {
        match recalculate_horizon("2024-03-02", "2024-03-01") {
            Err(PlanError::InvertedHorizon { start, end }) => {
                assert_eq!(start, "2024-03-02");
                assert_eq!(end, "2024-03-01");
            }
            other => panic!("Expected InvertedHorizon, got {other:?}"),
        }
    }

    #[test]
    fn test_recalculate_horizon_rejects_bad_boundary() {
        assert!(matches!(
            recalculate_horizon("2024-02-30", "2024-03-01"),
            Err(PlanError::InvalidDate { .. })
        ));
        assert!(matches!(
            recalculate_horizon("2024-03-01", ""),
            Err(PlanError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_index_roundtrip_over_horizon() {
        for (start, end) in [
            ("2024-02-20", "2024-03-05"),
            ("2023-12-25", "2024-01-10"),
            ("2025-01-01", "2025-12-31"),
        ] {
            let horizon = recalculate_horizon(start, end).unwrap();
            for index in 0..horizon.total_days() {
                let date = horizon.date_at(index).unwrap();
                assert_eq!(horizon.index_of(date), i64::from(index));
            }
            assert_eq!(horizon.date_at(horizon.last_index()).unwrap(), horizon.end_date());
        }
    }

    #[test]
    fn test_index_of_is_unclamped() {
        let horizon = recalculate_horizon("2025-03-01", "2025-03-10").unwrap();
        assert_eq!(horizon.index_of(parse_date("2025-02-25").unwrap()), -4);
        assert_eq!(horizon.index_of(parse_date("2025-03-15").unwrap()), 14);
    }

    #[test]
    fn test_open_range_resolves_to_horizon() {
        let horizon = recalculate_horizon("2025-03-01", "2025-03-10").unwrap();
        let (start, end) = DateRange::default().resolve(&horizon);
        assert_eq!(start, horizon.start_date());
        assert_eq!(end, horizon.end_date());
    }

    #[test]
    fn test_horizon_deserialize_validates() {
        let ok: Horizon =
            serde_json::from_str(r#"{"startDate":"2024-01-01","endDate":"2024-01-10"}"#).unwrap();
        assert_eq!(ok.total_days(), 10);

        let inverted =
            serde_json::from_str::<Horizon>(r#"{"startDate":"2024-01-10","endDate":"2024-01-01"}"#);
        assert!(inverted.is_err());

        let json = serde_json::to_value(ok).unwrap();
        assert_eq!(json["totalDays"], 10);
    }

    #[test]
    fn test_date_range_parse_and_display() {
        let closed: DateRange = "2025-03-01..2025-03-10".parse().unwrap();
        assert_eq!(closed.start, Some(parse_date("2025-03-01").unwrap()));
        assert_eq!(closed.to_string(), "2025-03-01..2025-03-10");

        let open_start: DateRange = "..2025-03-10".parse().unwrap();
        assert_eq!(open_start.start, None);
        assert_eq!(open_start.to_string(), "..2025-03-10");

        let day: DateRange = "2025-03-05".parse().unwrap();
        assert_eq!(day.start, day.end);
        assert_eq!("..".parse::<DateRange>().unwrap(), DateRange::default());

        assert!(matches!(
            "2025-03-01..soon".parse::<DateRange>(),
            Err(PlanError::InvalidDate { .. })
        ));
    }
}
