//! Parameter structures for planner operations
//!
//! Shared parameter structures passed from an interface layer (the CLI
//! today) into the core. They carry raw user input; each one validates
//! itself into typed values through `validate()`, so every interface reports
//! the same errors for the same input.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │  Typed values   │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (Horizon, ...)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers define their own wrapper structs with framework derives
//! and convert into these via `From`.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlanError, Result},
    horizon::{recalculate_horizon, DateRange, Horizon},
    models::AreaUnit,
    planner::PlannerBuilder,
};

/// Parameters naming a planning horizon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct HorizonParams {
    /// First day of the horizon (`YYYY-MM-DD`)
    pub start: String,
    /// Last day of the horizon, inclusive (`YYYY-MM-DD`)
    pub end: String,
}

impl HorizonParams {
    /// Parses both boundaries into a [`Horizon`].
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidDate` - a boundary fails to parse
    /// * `PlanError::InvertedHorizon` - `end` is before `start`
    pub fn validate(&self) -> Result<Horizon> {
        recalculate_horizon(&self.start, &self.end)
    }
}

/// Parameters for expanding date ranges into day indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExpandRanges {
    #[serde(flatten)]
    pub horizon: HorizonParams,
    /// Ranges as `START..END`; either side may be empty for an open end
    #[serde(default)]
    pub ranges: Vec<String>,
}

impl ExpandRanges {
    /// Parses the horizon and every range.
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidDate` / `PlanError::InvertedHorizon` - bad horizon
    /// * `PlanError::InvalidInput` - a range is malformed; the field names
    ///   its position
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agriplan_core::params::{ExpandRanges, HorizonParams};
    ///
    /// let params = ExpandRanges {
    ///     horizon: HorizonParams {
    ///         start: "2025-03-01".to_string(),
    ///         end: "2025-03-31".to_string(),
    ///     },
    ///     ranges: vec!["2025-03-05..2025-03-07".to_string(), "2025-03-30..".to_string()],
    /// };
    /// let (horizon, ranges) = params.validate()?;
    /// assert_eq!(horizon.total_days(), 31);
    /// assert_eq!(ranges[1].end, None);
    /// # Ok::<(), agriplan_core::PlanError>(())
    /// ```
    pub fn validate(&self) -> Result<(Horizon, Vec<DateRange>)> {
        let horizon = self.horizon.validate()?;
        let ranges = self
            .ranges
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                raw.parse::<DateRange>().map_err(|e| {
                    PlanError::invalid_input(format!("ranges[{i}]"))
                        .with_reason(format!("Invalid range '{raw}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((horizon, ranges))
    }
}

/// Planner configuration supplied by an interface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlannerOptions {
    /// Override the plan's horizon start; requires `horizon_end`
    pub horizon_start: Option<String>,
    /// Override the plan's horizon end; requires `horizon_start`
    pub horizon_end: Option<String>,
    /// Unit every area is expressed in on the wire
    pub area_unit: Option<AreaUnit>,
    /// Reject constraints whose ranges all miss the horizon
    #[serde(default)]
    pub strict_constraints: bool,
}

impl PlannerOptions {
    /// Turns the options into a configured [`PlannerBuilder`].
    ///
    /// # Errors
    ///
    /// * `PlanError::InvalidInput` - only one horizon boundary was given
    pub fn validate(&self) -> Result<PlannerBuilder> {
        let builder = PlannerBuilder::new()
            .with_area_unit(self.area_unit)
            .with_strict_constraints(self.strict_constraints);

        match (&self.horizon_start, &self.horizon_end) {
            (Some(start), Some(end)) => Ok(builder.with_horizon(start.clone(), end.clone())),
            (None, None) => Ok(builder),
            (Some(_), None) => Err(PlanError::invalid_input("horizon_end")
                .with_reason("A horizon override needs both a start and an end date")),
            (None, Some(_)) => Err(PlanError::invalid_input("horizon_start")
                .with_reason("A horizon override needs both a start and an end date")),
        }
    }
}
