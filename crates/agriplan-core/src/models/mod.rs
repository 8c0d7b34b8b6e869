//! Data models for the plan entity graph.
//!
//! A plan exists in two shapes that share their non-calendar entities:
//!
//! - [`form`]: the human-facing shape held by the UI, with calendar data as
//!   date ranges and date lists
//! - [`submission`]: the day-indexed shape sent to the optimizer, with
//!   `*Days`/`*Cond` integer arrays
//!
//! Entities reference each other by string id. Events point at a crop and,
//! optionally, at a preceding event of the same crop; crop-area bounds and
//! fixed areas point at crops and lands. The core never creates entities. The
//! sanitizer may drop them, always returning a new plan rather than editing
//! the one it was given.
//!
//! # Examples
//!
//! ```rust
//! use agriplan_core::{
//!     horizon::recalculate_horizon,
//!     models::{Crop, FormEvent, FormPlan},
//! };
//!
//! let mut plan = FormPlan::new(recalculate_horizon("2025-03-01", "2025-06-30")?);
//! plan.crops.push(Crop {
//!     id: "tomato".to_string(),
//!     name: "Tomato".to_string(),
//!     ..Default::default()
//! });
//! plan.events.push(FormEvent {
//!     id: "sow".to_string(),
//!     crop_id: "tomato".to_string(),
//!     name: "Sowing".to_string(),
//!     ..Default::default()
//! });
//! assert_eq!(plan.horizon.total_days(), 122);
//! # Ok::<(), agriplan_core::PlanError>(())
//! ```

pub mod area;
pub mod entity;
pub mod form;
pub mod submission;

#[cfg(test)]
mod tests;

pub use area::{Area, AreaUnit};
pub use entity::{Crop, CropAreaBound, FixedArea, Lag, ObjectiveConfig};
pub use form::{FormEvent, FormLand, FormPlan, FormResource, FormWorker};
pub use submission::{Event, Land, OptimizationPlan, PlanHorizon, Resource, Worker};

use serde::{Deserialize, Deserializer};

/// Reads an optional id, treating a blank string as absent.
pub(crate) fn blank_id_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<String>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.trim().is_empty()))
}
