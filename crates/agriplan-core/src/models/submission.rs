//! Day-indexed plan shape sent to the optimization service.
//!
//! Calendar fields are `*Days`/`*Cond` integer arrays: sorted, deduplicated
//! day indices relative to the horizon start. An absent `startCond`/`endCond`
//! means the event is unconstrained on that side.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Area, Crop, CropAreaBound, FixedArea, Lag, ObjectiveConfig};

/// Horizon length as seen by the optimizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlanHorizon {
    pub num_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Land {
    pub id: String,
    pub name: String,
    pub area: Area,
    #[serde(default)]
    pub blocked_days: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub blocked_days: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub blocked_days: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub crop_id: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "super::blank_id_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub preceding_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag: Option<Lag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_workers: Option<u32>,
    #[serde(default)]
    pub required_resources: Vec<String>,
    #[serde(default)]
    pub uses_land: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cond: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cond: Option<Vec<u32>>,
    #[serde(default)]
    pub blocked_days: Vec<u32>,
}

/// The optimization request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPlan {
    pub horizon: PlanHorizon,
    #[serde(default)]
    pub crops: Vec<Crop>,
    #[serde(default)]
    pub lands: Vec<Land>,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub crop_area_bounds: Vec<CropAreaBound>,
    #[serde(default)]
    pub fixed_areas: Vec<FixedArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<ObjectiveConfig>,
}

impl OptimizationPlan {
    /// Serializes the plan as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
