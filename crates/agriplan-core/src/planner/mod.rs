//! High-level planning pipeline.
//!
//! The [`Planner`] is the single entry point the form layer and the
//! submission client use. It chains the lower-level modules:
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  FormPlan   │───▶│  convert    │───▶│  sanitize   │───▶│  validate   │
//! │ (date ranges│    │ (day index  │    │ (drop       │    │ (structured │
//! │  and lists) │    │  sets)      │    │  dangling)  │    │  issues)    │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                      warnings           removals           issues
//! ```
//!
//! Every stage is a pure function: the planner never mutates the plan it is
//! given and holds no state besides its configuration, so one planner can
//! serve concurrent callers.
//!
//! # Usage Examples
//!
//! ```rust
//! use agriplan_core::{
//!     models::{Area, AreaUnit, Crop, FormEvent, FormLand, FormPlan},
//!     horizon::recalculate_horizon,
//!     PlannerBuilder,
//! };
//!
//! let planner = PlannerBuilder::new()
//!     .with_area_unit(Some(AreaUnit::Are))
//!     .build()?;
//!
//! let mut plan = FormPlan::new(recalculate_horizon("2025-03-01", "2025-05-31")?);
//! plan.crops.push(Crop { id: "c1".into(), name: "Spinach".into(), ..Default::default() });
//! plan.lands.push(FormLand {
//!     id: "l1".into(),
//!     name: "Greenhouse".into(),
//!     area: Area::new(0.2, AreaUnit::Hectare),
//!     blocked_ranges: vec![],
//! });
//! plan.events.push(FormEvent {
//!     id: "e1".into(),
//!     crop_id: "c1".into(),
//!     name: "Sowing".into(),
//!     ..Default::default()
//! });
//!
//! let submission = planner.prepare_submission(&plan)?;
//! assert_eq!(submission.plan.horizon.num_days, 92);
//! assert_eq!(submission.plan.lands[0].area.value, 20.0);
//! # Ok::<(), agriplan_core::PlanError>(())
//! ```

use log::{debug, info};

pub mod builder;


pub use builder::PlannerBuilder;

use crate::{
    convert::{form_to_submission, ConversionOptions, ConversionWarning},
    decan::DecanScale,
    error::{PlanError, Result},
    horizon::Horizon,
    models::{FormPlan, OptimizationPlan},
    sanitize::{sanitize, Removal},
    validate::{validate, ValidationIssue},
};

/// Everything the pipeline produced for a plan, valid or not.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    /// Converted and sanitized plan
    pub plan: OptimizationPlan,
    pub warnings: Vec<ConversionWarning>,
    pub removals: Vec<Removal>,
    pub issues: Vec<ValidationIssue>,
}

impl PlanReport {
    /// True when the plan may be handed to the submission client.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// A plan that passed validation, ready for the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub plan: OptimizationPlan,
    /// Advisory conversion warnings
    pub warnings: Vec<ConversionWarning>,
    pub removals: Vec<Removal>,
}

/// Main planner interface: conversion, sanitization and validation.
#[derive(Debug, Clone)]
pub struct Planner {
    horizon: Option<Horizon>,
    options: ConversionOptions,
}

impl Planner {
    /// Creates a new planner with the given configuration.
    pub(crate) fn new(horizon: Option<Horizon>, options: ConversionOptions) -> Self {
        Self { horizon, options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// The horizon a plan is converted against: the configured one if set,
    /// otherwise the plan's own.
    pub fn horizon_for(&self, plan: &FormPlan) -> Horizon {
        self.horizon.unwrap_or(plan.horizon)
    }

    /// Runs convert, sanitize and validate without failing on issues.
    pub fn check(&self, form: &FormPlan) -> PlanReport {
        let anchored;
        let form = match self.horizon {
            Some(horizon) if horizon != form.horizon => {
                debug!(
                    "Re-anchoring plan from {} to {}",
                    form.horizon.start_date(),
                    horizon.start_date()
                );
                anchored = form.with_horizon(horizon);
                &anchored
            }
            _ => form,
        };

        let translated = form_to_submission(form, &self.options);
        let sanitized = sanitize(&translated.plan);
        let issues = validate(&sanitized.plan);

        info!(
            "Checked plan: {} warning(s), {} removal(s), {} issue(s)",
            translated.warnings.len(),
            sanitized.removals.len(),
            issues.len()
        );

        PlanReport {
            plan: sanitized.plan,
            warnings: translated.warnings,
            removals: sanitized.removals,
            issues,
        }
    }

    /// Runs the pipeline and returns a plan ready for submission.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Validation` carrying every issue when the
    /// sanitized plan fails validation. Conversion warnings never fail.
    pub fn prepare_submission(&self, form: &FormPlan) -> Result<Submission> {
        let report = self.check(form);
        if !report.is_valid() {
            return Err(PlanError::Validation {
                issues: report.issues,
            });
        }
        Ok(Submission {
            plan: report.plan,
            warnings: report.warnings,
            removals: report.removals,
        })
    }

    /// Decan scale over the horizon the plan is converted against.
    pub fn decan_scale(&self, form: &FormPlan) -> Result<DecanScale> {
        DecanScale::new(&self.horizon_for(form))
    }
}
