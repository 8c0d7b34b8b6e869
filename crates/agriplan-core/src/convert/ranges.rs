//! Expansion of date ranges into day indices, and the inverse collapse.

use std::collections::BTreeSet;

use log::debug;

use super::{ConversionWarning, WarningKind};
use crate::{
    calendar::CalendarDate,
    error::Result,
    horizon::{day_index_to_date, DateRange, Horizon},
    path::FieldPath,
};

/// Result of expanding ranges: sorted unique indices plus warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub indices: Vec<u32>,
    pub warnings: Vec<ConversionWarning>,
}

/// Expands date ranges into the sorted, deduplicated set of day indices they
/// cover.
///
/// Open ends resolve to the horizon boundary. A range whose resolved end
/// precedes its start contributes nothing and yields `RANGE_EMPTY`. Ends
/// outside the horizon are clamped and yield `RANGE_CLIPPED`; a range lying
/// entirely outside the horizon is clipped to nothing.
///
/// Warning paths are the position of the offending range in `ranges`.
///
/// # Examples
///
/// ```rust
/// use agriplan_core::{
///     calendar::parse_date,
///     convert::expand_ranges_to_indices,
///     horizon::{recalculate_horizon, DateRange},
/// };
///
/// let horizon = recalculate_horizon("2025-03-01", "2025-03-10")?;
/// let ranges = [
///     DateRange::between(parse_date("2025-02-25")?, parse_date("2025-03-01")?),
///     DateRange::between(parse_date("2025-03-05")?, parse_date("2025-03-06")?),
///     DateRange::new(Some(parse_date("2025-03-08")?), None),
/// ];
/// let expansion = expand_ranges_to_indices(&ranges, &horizon);
/// assert_eq!(expansion.indices, vec![0, 4, 5, 7, 8, 9]);
/// assert_eq!(expansion.warnings.len(), 1);
/// # Ok::<(), agriplan_core::PlanError>(())
/// ```
pub fn expand_ranges_to_indices(ranges: &[DateRange], horizon: &Horizon) -> Expansion {
    expand_ranges_at(ranges, horizon, &FieldPath::root())
}

/// [`expand_ranges_to_indices`] with warning paths nested under `base`.
pub fn expand_ranges_at(ranges: &[DateRange], horizon: &Horizon, base: &FieldPath) -> Expansion {
    let last = i64::from(horizon.last_index());
    let mut indices = BTreeSet::new();
    let mut warnings = Vec::new();

    for (position, range) in ranges.iter().enumerate() {
        let path = base.clone().index(position);
        let (start_date, end_date) = range.resolve(horizon);
        let start = horizon.index_of(start_date);
        let end = horizon.index_of(end_date);

        if end < start {
            warnings.push(ConversionWarning::new(
                WarningKind::RangeEmpty,
                path,
                format!("Range {start_date} to {end_date} ends before it starts"),
            ));
            continue;
        }

        let clamped_start = start.max(0);
        let clamped_end = end.min(last);
        if clamped_start != start || clamped_end != end {
            debug!("Clipping range {start_date}..{end_date} to horizon at {path}");
            let message = if clamped_start > clamped_end {
                format!(
                    "Range {start_date} to {end_date} lies outside the horizon {} to {}",
                    horizon.start_date(),
                    horizon.end_date()
                )
            } else {
                format!(
                    "Range {start_date} to {end_date} was clipped to the horizon {} to {}",
                    horizon.start_date(),
                    horizon.end_date()
                )
            };
            warnings.push(ConversionWarning::new(WarningKind::RangeClipped, path, message));
        }

        // Both bounds are within 0..=last here, so they fit in u32.
        let span = clamped_start..=clamped_end;
        indices.extend(span.filter_map(|i| u32::try_from(i).ok()));
    }

    Expansion {
        indices: indices.into_iter().collect(),
        warnings,
    }
}

/// Collapses day indices into the minimal list of maximal contiguous ranges.
///
/// The input is normalized (sorted and deduplicated) first. Adjacent or
/// overlapping input ranges that were expanded earlier come back as a single
/// range, so collapse is idempotent but does not reproduce the original
/// range boundaries.
///
/// # Errors
///
/// Returns `PlanError::DateOutOfRange` only if an index pushes the date past
/// the supported calendar range.
pub fn collapse_indices_to_ranges(
    indices: &[u32],
    horizon_start: CalendarDate,
) -> Result<Vec<DateRange>> {
    let normalized: BTreeSet<u32> = indices.iter().copied().collect();
    let mut runs: Vec<(u32, u32)> = Vec::new();

    for index in normalized {
        match runs.last_mut() {
            Some((_, end)) if index == *end + 1 => *end = index,
            _ => runs.push((index, index)),
        }
    }

    runs.into_iter()
        .map(|(start, end)| {
            Ok(DateRange::between(
                day_index_to_date(horizon_start, i64::from(start))?,
                day_index_to_date(horizon_start, i64::from(end))?,
            ))
        })
        .collect()
}
