//! Conversion of explicit date lists into day indices.

use std::collections::BTreeSet;

use log::debug;

use super::{ConversionWarning, WarningKind};
use crate::{calendar::parse_date, horizon::Horizon, path::FieldPath};

/// Result of converting a date list.
///
/// `indices` is `None` when no valid date remains. That covers both an empty
/// input and an input where every entry was rejected; the two are told apart
/// by `warnings`, see [`DateConversion::filtered_out`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateConversion {
    pub indices: Option<Vec<u32>>,
    pub warnings: Vec<ConversionWarning>,
}

impl DateConversion {
    /// True when dates were supplied but none survived conversion.
    pub fn filtered_out(&self) -> bool {
        self.indices.is_none() && !self.warnings.is_empty()
    }
}

/// Converts `YYYY-MM-DD` strings into sorted unique day indices.
///
/// Unparsable entries are skipped with `INVALID_DATE`. Dates outside the
/// horizon are clamped to its nearest boundary with `RANGE_CLIPPED`.
///
/// # Examples
///
/// ```rust
/// use agriplan_core::{convert::convert_dates_to_indices, horizon::recalculate_horizon};
///
/// let horizon = recalculate_horizon("2025-03-01", "2025-03-10")?;
/// let result = convert_dates_to_indices(&["not-a-date"], &horizon);
/// assert_eq!(result.indices, None);
/// assert_eq!(result.warnings.len(), 1);
/// # Ok::<(), agriplan_core::PlanError>(())
/// ```
pub fn convert_dates_to_indices<S: AsRef<str>>(dates: &[S], horizon: &Horizon) -> DateConversion {
    convert_dates_at(dates, horizon, &FieldPath::root())
}

/// [`convert_dates_to_indices`] with warning paths nested under `base`.
pub fn convert_dates_at<S: AsRef<str>>(
    dates: &[S],
    horizon: &Horizon,
    base: &FieldPath,
) -> DateConversion {
    let last = i64::from(horizon.last_index());
    let mut indices = BTreeSet::new();
    let mut warnings = Vec::new();

    for (position, raw) in dates.iter().enumerate() {
        let raw = raw.as_ref();
        let path = base.clone().index(position);
        let Ok(date) = parse_date(raw) else {
            warnings.push(ConversionWarning::new(
                WarningKind::InvalidDate,
                path,
                format!("'{raw}' is not a valid YYYY-MM-DD date"),
            ));
            continue;
        };

        let index = horizon.index_of(date);
        let clamped = index.clamp(0, last);
        if clamped != index {
            debug!("Clamping date {date} to horizon at {path}");
            let boundary = if index < 0 {
                horizon.start_date()
            } else {
                horizon.end_date()
            };
            warnings.push(ConversionWarning::new(
                WarningKind::RangeClipped,
                path,
                format!("{date} is outside the horizon and was moved to {boundary}"),
            ));
        }
        if let Ok(index) = u32::try_from(clamped) {
            indices.insert(index);
        }
    }

    DateConversion {
        indices: (!indices.is_empty()).then(|| indices.into_iter().collect()),
        warnings,
    }
}
