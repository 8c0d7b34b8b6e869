//! Human-facing plan shape, as held by the form layer.
//!
//! Every calendar-bearing field is a [`DateRange`] list or a date-string
//! list. Use [`crate::convert::form_to_submission`] to obtain the day-index
//! shape; nothing else should translate between the two.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{Area, Crop, CropAreaBound, FixedArea, Lag, ObjectiveConfig};
use crate::{
    error::{PlanError, Result},
    horizon::{DateRange, Horizon},
};

/// A field with its own blocked (unavailable) date ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLand {
    pub id: String,
    pub name: String,
    pub area: Area,
    #[serde(default)]
    pub blocked_ranges: Vec<DateRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormWorker {
    pub id: String,
    pub name: String,
    /// Maximum events this worker can staff per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub blocked_ranges: Vec<DateRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResource {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub blocked_ranges: Vec<DateRange>,
}

/// A crop operation (sowing, transplanting, harvest, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEvent {
    pub id: String,
    pub crop_id: String,
    pub name: String,

    /// Event of the same crop that must happen first
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

    /// Windows the event may start in; empty means unconstrained
    #[serde(default)]
    pub start_ranges: Vec<DateRange>,

    /// Windows the event may end in; empty means unconstrained
    #[serde(default)]
    pub end_ranges: Vec<DateRange>,

    /// Individually picked days on which the event may not run
    #[serde(default)]
    pub blocked_dates: Vec<String>,
}

/// The complete plan as edited in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPlan {
    pub horizon: Horizon,
    #[serde(default)]
    pub crops: Vec<Crop>,
    #[serde(default)]
    pub lands: Vec<FormLand>,
    #[serde(default)]
    pub workers: Vec<FormWorker>,
    #[serde(default)]
    pub resources: Vec<FormResource>,
    #[serde(default)]
    pub events: Vec<FormEvent>,
    #[serde(default)]
    pub crop_area_bounds: Vec<CropAreaBound>,
    #[serde(default)]
    pub fixed_areas: Vec<FixedArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<ObjectiveConfig>,
}

impl FormPlan {
    /// An empty plan over `horizon`.
    pub fn new(horizon: Horizon) -> Self {
        Self {
            horizon,
            crops: Vec::new(),
            lands: Vec::new(),
            workers: Vec::new(),
            resources: Vec::new(),
            events: Vec::new(),
            crop_area_bounds: Vec::new(),
            fixed_areas: Vec::new(),
            objective: None,
        }
    }

    /// Returns a copy anchored to a different horizon.
    ///
    /// Stored ranges are untouched; open ends follow the new horizon the next
    /// time the plan is converted.
    #[must_use]
    pub fn with_horizon(&self, horizon: Horizon) -> Self {
        Self {
            horizon,
            ..self.clone()
        }
    }

    /// Parses a plan from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a plan document from disk.
    ///
    /// # Errors
    ///
    /// * `PlanError::FileSystem` - the file cannot be read
    /// * `PlanError::Serialization` - the contents are not a valid plan
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| PlanError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }
}
