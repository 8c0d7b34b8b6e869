//! Tabular view of a decan scale.

use std::fmt;

use crate::decan::DecanScale;

/// Formats a [`DecanScale`] as a markdown table, one row per bucket.
///
/// # Examples
///
/// ```rust
/// use agriplan_core::{decan::DecanScale, display::DecanTable, horizon::recalculate_horizon};
///
/// let scale = DecanScale::new(&recalculate_horizon("2024-03-15", "2024-03-31")?)?;
/// let table = DecanTable(&scale).to_string();
/// assert!(table.contains("| 0 | 3月 中旬 | 0–5 | 2024-03-15 | 2024-03-20 |  |"));
/// # Ok::<(), agriplan_core::PlanError>(())
/// ```
pub struct DecanTable<'a>(pub &'a DecanScale);

impl fmt::Display for DecanTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No buckets.");
        }
        writeln!(f, "| # | Label | Days | From | To | Major |")?;
        writeln!(f, "|---|---|---|---|---|---|")?;
        for bucket in self.0.buckets() {
            writeln!(
                f,
                "| {} | {} | {}–{} | {} | {} | {} |",
                bucket.bucket_index,
                bucket.label,
                bucket.start_day,
                bucket.end_day,
                bucket.start_date,
                bucket.end_date,
                if bucket.is_major { "✓" } else { "" }
            )?;
        }
        Ok(())
    }
}
