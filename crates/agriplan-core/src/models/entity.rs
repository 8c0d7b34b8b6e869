//! Entities that look the same in the form and submission shapes.
//!
//! None of these carry calendar data, so they pass through conversion
//! unchanged apart from area unit normalization.

use std::collections::BTreeMap;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Area;

/// A crop that events are scheduled for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Cultivar or variety, if distinguished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,

    /// Expected revenue per square metre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_per_area: Option<f64>,
}

/// Allowed gap in days between an event and its predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Lag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Lower and upper bounds on the total area planted with a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CropAreaBound {
    pub crop_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_area: Option<Area>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_area: Option<Area>,
}

/// A crop pinned to a land with a fixed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct FixedArea {
    pub land_id: String,
    pub crop_id: String,
    pub area: Area,
}

/// Lexicographic objective configuration.
///
/// `stages` is the optimization order; `tolerance` and `weights` may only
/// override stages that appear in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ObjectiveConfig {
    pub stages: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tolerance: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<String, f64>,
}
