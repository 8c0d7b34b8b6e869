//! Core library for the agriplan crop-scheduling planner.
//!
//! This crate turns a human-facing plan (crops, lands, workers, resources and
//! events with calendar date ranges) into the day-indexed payload an
//! optimization backend consumes, and renders day indices back onto a
//! calendar. It performs no I/O besides loading plan files and holds no
//! global state.
//!
//! # Modules
//!
//! - [`calendar`] and [`horizon`]: calendar-correct dates and the planning
//!   window that anchors every day index
//! - [`convert`]: range/index conversion with accumulated warnings
//! - [`decan`]: third-of-month buckets for chart axes
//! - [`sanitize`] and [`validate`]: referential repair and schema checks
//! - [`planner`]: the pipeline façade combining all of the above
//! - [`display`]: markdown rendering of reports, warnings and scales
//!
//! # Quick Start
//!
//! ```rust
//! use agriplan_core::{models::FormPlan, PlannerBuilder};
//!
//! let plan = FormPlan::from_json(
//!     r#"{
//!         "horizon": {"startDate": "2024-03-01", "endDate": "2024-03-31"},
//!         "crops": [{"id": "c1", "name": "Carrot"}],
//!         "lands": [{"id": "l1", "name": "Plot", "area": {"value": 10, "unit": "a"}}],
//!         "events": [{
//!             "id": "e1",
//!             "cropId": "c1",
//!             "name": "Sowing",
//!             "startRanges": [{"start": "2024-03-05", "end": "2024-03-07"}]
//!         }]
//!     }"#,
//! )?;
//!
//! let planner = PlannerBuilder::new().build()?;
//! let submission = planner.prepare_submission(&plan)?;
//! assert_eq!(submission.plan.events[0].start_cond, Some(vec![4, 5, 6]));
//!
//! let scale = planner.decan_scale(&plan)?;
//! assert_eq!(scale.buckets()[0].label, "3月 上旬");
//! # Ok::<(), agriplan_core::PlanError>(())
//! ```

pub mod calendar;
pub mod convert;
pub mod decan;
pub mod display;
pub mod error;
pub mod horizon;
pub mod models;
pub mod params;
pub mod path;
pub mod planner;
pub mod sanitize;
pub mod validate;

// Re-export commonly used types
pub use calendar::CalendarDate;
pub use convert::{ConversionWarning, WarningKind};
pub use decan::DecanScale;
pub use display::{DecanTable, Issues, OperationStatus, Removals, Warnings};
pub use error::{PlanError, Result};
pub use horizon::{recalculate_horizon, DateRange, Horizon};
pub use models::{FormPlan, OptimizationPlan};
pub use params::{ExpandRanges, HorizonParams, PlannerOptions};
pub use planner::{PlanReport, Planner, PlannerBuilder, Submission};
pub use sanitize::Removal;
pub use validate::{IssueCode, ValidationIssue};
