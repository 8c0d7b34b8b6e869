//! Referential sanitizer.
//!
//! Drops plan entries whose references no longer resolve, so that schema
//! validation runs on a referentially closed graph. Every removal is logged
//! and returned as a [`Removal`]; nothing disappears silently.

use std::{collections::HashSet, fmt};

use log::{info, warn};
use serde::Serialize;

use crate::models::OptimizationPlan;

/// One entry dropped by the sanitizer and the reference that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Removal {
    /// Event whose crop does not exist
    #[serde(rename_all = "camelCase")]
    EventMissingCrop { event_id: String, crop_id: String },
    /// Event whose predecessor does not exist (or was itself removed)
    #[serde(rename_all = "camelCase")]
    EventMissingPredecessor {
        event_id: String,
        preceding_event_id: String,
    },
    /// Crop-area bound for a crop that does not exist
    #[serde(rename_all = "camelCase")]
    CropAreaBoundMissingCrop { crop_id: String },
    /// Fixed area whose crop and/or land does not exist
    #[serde(rename_all = "camelCase")]
    FixedAreaMissingReference {
        crop_id: String,
        land_id: String,
        crop_missing: bool,
        land_missing: bool,
    },
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Removal::EventMissingCrop { event_id, crop_id } => write!(
                f,
                "Removed event '{event_id}': crop '{crop_id}' does not exist"
            ),
            Removal::EventMissingPredecessor {
                event_id,
                preceding_event_id,
            } => write!(
                f,
                "Removed event '{event_id}': preceding event '{preceding_event_id}' does not exist"
            ),
            Removal::CropAreaBoundMissingCrop { crop_id } => write!(
                f,
                "Removed crop area bound: crop '{crop_id}' does not exist"
            ),
            Removal::FixedAreaMissingReference {
                crop_id,
                land_id,
                crop_missing,
                land_missing,
            } => match (crop_missing, land_missing) {
                (true, true) => write!(
                    f,
                    "Removed fixed area: crop '{crop_id}' and land '{land_id}' do not exist"
                ),
                (true, false) => write!(
                    f,
                    "Removed fixed area on land '{land_id}': crop '{crop_id}' does not exist"
                ),
                _ => write!(
                    f,
                    "Removed fixed area for crop '{crop_id}': land '{land_id}' does not exist"
                ),
            },
        }
    }
}

/// A sanitized copy of a plan and what was removed from it, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    pub plan: OptimizationPlan,
    pub removals: Vec<Removal>,
}

impl Sanitized {
    /// True when nothing had to be removed.
    pub fn is_clean(&self) -> bool {
        self.removals.is_empty()
    }
}

/// Removes entries with dangling references.
///
/// 1. Events whose crop does not exist.
/// 2. Events whose predecessor does not resolve to a surviving event,
///    repeated until a pass removes nothing, so chains collapse fully.
/// 3. Crop-area bounds with a missing crop, and fixed areas with a missing
///    crop or land.
///
/// A predecessor that exists but belongs to another crop is kept here; the
/// validator reports it.
///
/// Running the sanitizer on its own output removes nothing.
pub fn sanitize(plan: &OptimizationPlan) -> Sanitized {
    let mut removals = Vec::new();
    let mut sanitized = plan.clone();

    let crop_ids: HashSet<&str> = plan.crops.iter().map(|c| c.id.as_str()).collect();
    sanitized.events.retain(|event| {
        if crop_ids.contains(event.crop_id.as_str()) {
            return true;
        }
        record(
            &mut removals,
            Removal::EventMissingCrop {
                event_id: event.id.clone(),
                crop_id: event.crop_id.clone(),
            },
        );
        false
    });

    let mut pass = 0;
    loop {
        pass += 1;
        let event_ids: HashSet<String> = sanitized.events.iter().map(|e| e.id.clone()).collect();
        let before = sanitized.events.len();
        sanitized.events.retain(|event| match &event.preceding_event_id {
            Some(pred) if !event_ids.contains(pred) => {
                record(
                    &mut removals,
                    Removal::EventMissingPredecessor {
                        event_id: event.id.clone(),
                        preceding_event_id: pred.clone(),
                    },
                );
                false
            }
            _ => true,
        });
        if sanitized.events.len() == before {
            break;
        }
        info!(
            "Predecessor pass {pass} removed {} event(s)",
            before - sanitized.events.len()
        );
    }

    let land_ids: HashSet<&str> = plan.lands.iter().map(|l| l.id.as_str()).collect();
    sanitized.crop_area_bounds.retain(|bound| {
        if crop_ids.contains(bound.crop_id.as_str()) {
            return true;
        }
        record(
            &mut removals,
            Removal::CropAreaBoundMissingCrop {
                crop_id: bound.crop_id.clone(),
            },
        );
        false
    });

    sanitized.fixed_areas.retain(|fixed| {
        let crop_missing = !crop_ids.contains(fixed.crop_id.as_str());
        let land_missing = !land_ids.contains(fixed.land_id.as_str());
        if !crop_missing && !land_missing {
            return true;
        }
        record(
            &mut removals,
            Removal::FixedAreaMissingReference {
                crop_id: fixed.crop_id.clone(),
                land_id: fixed.land_id.clone(),
                crop_missing,
                land_missing,
            },
        );
        false
    });

    Sanitized {
        plan: sanitized,
        removals,
    }
}

fn record(removals: &mut Vec<Removal>, removal: Removal) {
    warn!("{removal}");
    removals.push(removal);
}
