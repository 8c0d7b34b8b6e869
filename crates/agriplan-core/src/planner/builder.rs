//! Builder for creating and configuring Planner instances.

use super::Planner;
use crate::{
    convert::ConversionOptions,
    error::Result,
    horizon::{recalculate_horizon, Horizon},
    models::AreaUnit,
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    horizon: Option<(String, String)>,
    area_unit: Option<AreaUnit>,
    strict_constraints: bool,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors every plan to this horizon instead of the one it carries.
    ///
    /// Open range ends re-resolve against the new boundaries. The dates are
    /// checked in [`build`](Self::build).
    pub fn with_horizon(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.horizon = Some((start.into(), end.into()));
        self
    }

    /// Expresses every area in `unit` on the wire.
    pub fn with_area_unit(mut self, unit: Option<AreaUnit>) -> Self {
        self.area_unit = unit;
        self
    }

    /// Keeps constraints whose ranges all miss the horizon as empty lists,
    /// which validation then rejects, instead of dropping them.
    pub fn with_strict_constraints(mut self, strict: bool) -> Self {
        self.strict_constraints = strict;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidDate` or `PlanError::InvertedHorizon` when
    /// a configured horizon is malformed.
    pub fn build(self) -> Result<Planner> {
        let horizon: Option<Horizon> = self
            .horizon
            .map(|(start, end)| recalculate_horizon(&start, &end))
            .transpose()?;

        Ok(Planner::new(
            horizon,
            ConversionOptions {
                area_unit: self.area_unit,
                strict_constraints: self.strict_constraints,
            },
        ))
    }
}
