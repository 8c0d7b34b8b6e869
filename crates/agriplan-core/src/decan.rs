//! Decan (third-of-month) bucketing for chart rendering.
//!
//! Buckets follow the calendar rather than fixed ten-day windows: days 1–10,
//! 11–20, and 21 through the end of the month. The last third therefore
//! spans 8 to 11 days depending on month length and leap years. Buckets are
//! truncated at both ends of the horizon.

use std::fmt;

use serde::Serialize;

use crate::{
    calendar::{day_diff, end_of_month, CalendarDate},
    error::Result,
    horizon::Horizon,
};

/// Which third of a month a day falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Third {
    /// Days 1 through 10 (上旬)
    Early,
    /// Days 11 through 20 (中旬)
    Middle,
    /// Day 21 through the end of the month (下旬)
    Late,
}

impl Third {
    /// The third containing `day_of_month`.
    pub fn of_day(day_of_month: i8) -> Self {
        if day_of_month <= 10 {
            Third::Early
        } else if day_of_month <= 20 {
            Third::Middle
        } else {
            Third::Late
        }
    }

    /// Last calendar day of this third in the month containing `date`.
    pub fn end_date(&self, date: CalendarDate) -> Result<CalendarDate> {
        match self {
            Third::Early => CalendarDate::new(date.year(), date.month(), 10),
            Third::Middle => CalendarDate::new(date.year(), date.month(), 20),
            Third::Late => Ok(end_of_month(date)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Third::Early => "上旬",
            Third::Middle => "中旬",
            Third::Late => "下旬",
        }
    }
}

impl fmt::Display for Third {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One month-third of the horizon, in day indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecanBucket {
    pub bucket_index: usize,
    pub start_day: u32,
    pub end_day: u32,
    /// `"<month>月 <third>"`, e.g. `3月 上旬`
    pub label: String,
    /// First third of a month
    pub is_major: bool,
    pub third: Third,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
}

impl DecanBucket {
    /// Number of horizon days in the bucket.
    pub fn len(&self) -> u32 {
        self.end_day - self.start_day + 1
    }

    /// Always false; a bucket covers at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Hover text for charts, e.g. `2024年3月 上旬 (2024-03-01 〜 2024-03-10)`.
    pub fn tooltip(&self) -> String {
        format!(
            "{}年{}月 {} ({} 〜 {})",
            self.start_date.year(),
            self.start_date.month(),
            self.third,
            self.start_date,
            self.end_date
        )
    }
}

/// A chart tick at the start of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick<'a> {
    pub day: u32,
    pub label: &'a str,
    pub is_major: bool,
}

/// Decan buckets over a horizon with O(1) day lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecanScale {
    buckets: Vec<DecanBucket>,
    day_to_bucket: Vec<usize>,
}

impl DecanScale {
    /// Partitions `horizon` into month-thirds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agriplan_core::{decan::DecanScale, horizon::recalculate_horizon};
    ///
    /// let scale = DecanScale::new(&recalculate_horizon("2024-03-01", "2024-03-31")?)?;
    /// let labels: Vec<_> = scale.buckets().iter().map(|b| b.label.as_str()).collect();
    /// assert_eq!(labels, ["3月 上旬", "3月 中旬", "3月 下旬"]);
    /// assert_eq!(scale.bucket_range(2), Some((20, 30)));
    /// # Ok::<(), agriplan_core::PlanError>(())
    /// ```
    pub fn new(horizon: &Horizon) -> Result<Self> {
        let last = horizon.last_index();
        let mut buckets = Vec::new();
        let mut day = 0u32;

        // `day` strictly increases and is bounded by `last`.
        while day <= last {
            let date = horizon.date_at(day)?;
            let third = Third::of_day(date.day());
            let remaining = day_diff(date, third.end_date(date)?);
            let end_day = day
                .saturating_add(u32::try_from(remaining).unwrap_or(0))
                .min(last);

            buckets.push(DecanBucket {
                bucket_index: buckets.len(),
                start_day: day,
                end_day,
                label: format!("{}月 {}", date.month(), third),
                is_major: third == Third::Early,
                third,
                start_date: date,
                end_date: horizon.date_at(end_day)?,
            });

            day = end_day + 1;
        }

        let mut day_to_bucket = Vec::with_capacity(horizon.total_days() as usize);
        for bucket in &buckets {
            day_to_bucket.extend((bucket.start_day..=bucket.end_day).map(|_| bucket.bucket_index));
        }

        Ok(Self {
            buckets,
            day_to_bucket,
        })
    }

    pub fn buckets(&self) -> &[DecanBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket containing `day`, or `None` outside the horizon.
    pub fn bucket_of_day(&self, day: u32) -> Option<usize> {
        self.day_to_bucket.get(day as usize).copied()
    }

    /// Inclusive `(start_day, end_day)` of a bucket.
    pub fn bucket_range(&self, bucket_index: usize) -> Option<(u32, u32)> {
        self.buckets
            .get(bucket_index)
            .map(|b| (b.start_day, b.end_day))
    }

    /// Width of a chart span from `start_day` to `end_day`: the number of
    /// buckets it touches (inclusive) times `unit_width`.
    ///
    /// Days are clamped to the horizon and may be given in either order.
    pub fn span_width(&self, start_day: u32, end_day: u32, unit_width: f64) -> f64 {
        let Some(last) = self.day_to_bucket.len().checked_sub(1) else {
            return 0.0;
        };
        let clamp = |day: u32| (day as usize).min(last);
        let (a, b) = (clamp(start_day), clamp(end_day));
        let (first, second) = (self.day_to_bucket[a], self.day_to_bucket[b]);
        let touched = first.abs_diff(second) + 1;
        touched as f64 * unit_width
    }

    /// Ticks at each bucket start, majors at the first third of a month.
    pub fn ticks(&self) -> impl Iterator<Item = Tick<'_>> {
        self.buckets.iter().map(|b| Tick {
            day: b.start_day,
            label: &b.label,
            is_major: b.is_major,
        })
    }

    /// Tooltip for the bucket containing `day`.
    pub fn tooltip_for_day(&self, day: u32) -> Option<String> {
        self.bucket_of_day(day)
            .and_then(|i| self.buckets.get(i))
            .map(DecanBucket::tooltip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizon::recalculate_horizon;

    fn scale(start: &str, end: &str) -> DecanScale {
        DecanScale::new(&recalculate_horizon(start, end).unwrap()).unwrap()
    }

    fn spans(scale: &DecanScale) -> Vec<(u32, u32)> {
        scale.buckets().iter().map(|b| (b.start_day, b.end_day)).collect()
    }

    #[test]
    fn test_full_month_has_three_buckets() {
        let scale = scale("2024-03-01", "2024-03-31");
        assert_eq!(spans(&scale), vec![(0, 9), (10, 19), (20, 30)]);
        let labels: Vec<_> = scale.buckets().iter().map(|b| b.label.clone()).collect();
        assert_eq!(labels, vec!["3月 上旬", "3月 中旬", "3月 下旬"]);
        let majors: Vec<_> = scale.buckets().iter().map(|b| b.is_major).collect();
        assert_eq!(majors, vec![true, false, false]);
    }

    #[test]
    fn test_leap_february_late_third() {
        let scale = scale("2024-02-01", "2024-03-05");
        assert_eq!(spans(&scale), vec![(0, 9), (10, 19), (20, 28), (29, 33)]);
        assert_eq!(scale.buckets()[2].len(), 9);
        assert_eq!(scale.buckets()[3].label, "3月 上旬");

        let common = self::scale("2023-02-01", "2023-02-28");
        assert_eq!(common.buckets()[2].len(), 8);
    }

    #[test]
    fn test_third_end_dates() {
        let d = |s: &str| s.parse::<CalendarDate>().unwrap();
        assert_eq!(Third::of_day(7).end_date(d("2024-05-07")).unwrap(), d("2024-05-10"));
        assert_eq!(Third::of_day(11).end_date(d("2024-05-11")).unwrap(), d("2024-05-20"));
        assert_eq!(Third::of_day(21).end_date(d("2024-04-21")).unwrap(), d("2024-04-30"));
        assert_eq!(Third::of_day(29).end_date(d("2024-02-29")).unwrap(), d("2024-02-29"));
    }

    #[test]
    fn test_horizon_starting_and_ending_mid_third() {
        let scale = scale("2024-03-15", "2024-04-05");
        assert_eq!(spans(&scale), vec![(0, 5), (6, 16), (17, 21)]);
        assert_eq!(scale.buckets()[0].label, "3月 中旬");
        assert!(!scale.buckets()[0].is_major);
        assert_eq!(scale.buckets()[2].label, "4月 上旬");
        assert!(scale.buckets()[2].is_major);
        assert_eq!(scale.buckets()[2].end_date.to_string(), "2024-04-05");
    }

    #[test]
    fn test_single_day_horizon() {
        let scale = scale("2024-01-31", "2024-01-31");
        assert_eq!(spans(&scale), vec![(0, 0)]);
        assert_eq!(scale.buckets()[0].label, "1月 下旬");
    }

    #[test]
    fn test_full_year_has_thirty_six_buckets() {
        let scale = scale("2025-01-01", "2025-12-31");
        assert_eq!(scale.len(), 36);
        assert_eq!(scale.ticks().filter(|t| t.is_major).count(), 12);
        // Buckets tile the horizon without gaps.
        for pair in scale.buckets().windows(2) {
            assert_eq!(pair[0].end_day + 1, pair[1].start_day);
        }
        assert_eq!(scale.buckets().last().unwrap().end_day, 364);
    }

    #[test]
    fn test_day_lookups() {
        let scale = scale("2024-03-01", "2024-03-31");
        assert_eq!(scale.bucket_of_day(0), Some(0));
        assert_eq!(scale.bucket_of_day(9), Some(0));
        assert_eq!(scale.bucket_of_day(10), Some(1));
        assert_eq!(scale.bucket_of_day(30), Some(2));
        assert_eq!(scale.bucket_of_day(31), None);
        assert_eq!(scale.bucket_range(1), Some((10, 19)));
        assert_eq!(scale.bucket_range(3), None);
    }

    #[test]
    fn test_span_width_counts_touched_buckets() {
        let scale = scale("2024-03-01", "2024-03-31");
        assert_eq!(scale.span_width(0, 0, 12.0), 12.0);
        assert_eq!(scale.span_width(9, 10, 12.0), 24.0);
        assert_eq!(scale.span_width(25, 2, 10.0), 30.0);
        assert_eq!(scale.span_width(0, 500, 10.0), 30.0);
    }

    #[test]
    fn test_tooltip() {
        let scale = scale("2024-03-15", "2024-04-05");
        assert_eq!(
            scale.tooltip_for_day(0).unwrap(),
            "2024年3月 中旬 (2024-03-15 〜 2024-03-20)"
        );
        assert_eq!(scale.tooltip_for_day(100), None);
    }
}
