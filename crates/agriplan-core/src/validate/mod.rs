//! Schema validation of a day-indexed plan.
//!
//! Validation is a single pure pass from plan to issue list; a plan is valid
//! exactly when the list is empty. It runs after [`crate::sanitize`] and
//! re-checks the references the sanitizer repairs, but reports instead of
//! dropping: issues are meant for the form layer, removals for logs.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::{
    models::{Area, Event, OptimizationPlan},
    path::FieldPath,
};


/// Machine-readable category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    EmptyHorizon,
    MissingEntities,
    EmptyId,
    DuplicateId,
    DayOutOfRange,
    UnsortedDays,
    EmptyCondition,
    UnknownCrop,
    UnknownLand,
    UnknownResource,
    UnknownPredecessor,
    PredecessorCropMismatch,
    PredecessorCycle,
    LagOrder,
    InvalidArea,
    AreaBoundOrder,
    UnknownObjectiveStage,
    DuplicateObjectiveStage,
}

/// A structural problem found in a plan, attached to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub path: FieldPath,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validates a plan, returning every issue found.
///
/// # Examples
///
/// ```rust
/// use agriplan_core::{models::OptimizationPlan, validate::validate};
///
/// let issues = validate(&OptimizationPlan::default());
/// // No horizon days, no crops, no events, no lands.
/// assert_eq!(issues.len(), 4);
/// ```
pub fn validate(plan: &OptimizationPlan) -> Vec<ValidationIssue> {
    let mut validator = Validator {
        plan,
        issues: Vec::new(),
    };
    validator.horizon();
    validator.required_collections();
    validator.ids();
    validator.day_indices();
    validator.events();
    validator.areas();
    validator.objective();
    validator.issues
}

/// Convenience wrapper: `true` when [`validate`] finds nothing.
pub fn is_valid(plan: &OptimizationPlan) -> bool {
    validate(plan).is_empty()
}

struct Validator<'a> {
    plan: &'a OptimizationPlan,
    issues: Vec<ValidationIssue>,
}

impl<'a> Validator<'a> {
    fn push(&mut self, code: IssueCode, path: FieldPath, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            code,
            path,
            message: message.into(),
        });
    }

    fn horizon(&mut self) {
        if self.plan.horizon.num_days < 1 {
            self.push(
                IssueCode::EmptyHorizon,
                FieldPath::root().key("horizon").key("numDays"),
                "Horizon must span at least one day",
            );
        }
    }

    fn required_collections(&mut self) {
        let plan = self.plan;
        for (key, len, noun) in [
            ("crops", plan.crops.len(), "crop"),
            ("events", plan.events.len(), "event"),
            ("lands", plan.lands.len(), "land"),
        ] {
            if len == 0 {
                self.push(
                    IssueCode::MissingEntities,
                    FieldPath::root().key(key),
                    format!("At least one {noun} is required"),
                );
            }
        }
    }

    fn ids(&mut self) {
        let plan = self.plan;
        let collections: [(&str, Vec<&str>); 5] = [
            ("crops", plan.crops.iter().map(|c| c.id.as_str()).collect()),
            ("events", plan.events.iter().map(|e| e.id.as_str()).collect()),
            ("lands", plan.lands.iter().map(|l| l.id.as_str()).collect()),
            ("workers", plan.workers.iter().map(|w| w.id.as_str()).collect()),
            ("resources", plan.resources.iter().map(|r| r.id.as_str()).collect()),
        ];

        for (key, ids) in collections {
            let mut seen = HashSet::new();
            for (i, id) in ids.into_iter().enumerate() {
                let path = FieldPath::root().key(key).index(i).key("id");
                if id.trim().is_empty() {
                    self.push(IssueCode::EmptyId, path, "Id must not be empty");
                } else if !seen.insert(id) {
                    self.push(
                        IssueCode::DuplicateId,
                        path,
                        format!("Duplicate id '{id}' in {key}"),
                    );
                }
            }
        }
    }

    fn day_indices(&mut self) {
        let plan = self.plan;
        for (i, land) in plan.lands.iter().enumerate() {
            let path = FieldPath::root().key("lands").index(i).key("blockedDays");
            self.day_list(&land.blocked_days, path);
        }
        for (i, worker) in plan.workers.iter().enumerate() {
            let path = FieldPath::root().key("workers").index(i).key("blockedDays");
            self.day_list(&worker.blocked_days, path);
        }
        for (i, resource) in plan.resources.iter().enumerate() {
            let path = FieldPath::root().key("resources").index(i).key("blockedDays");
            self.day_list(&resource.blocked_days, path);
        }
        for (i, event) in plan.events.iter().enumerate() {
            let base = FieldPath::root().key("events").index(i);
            self.day_list(&event.blocked_days, base.clone().key("blockedDays"));
            for (key, cond) in [("startCond", &event.start_cond), ("endCond", &event.end_cond)] {
                let Some(days) = cond else { continue };
                let path = base.clone().key(key);
                if days.is_empty() {
                    self.push(
                        IssueCode::EmptyCondition,
                        path,
                        "Condition allows no day; omit it to leave the event unconstrained",
                    );
                } else {
                    self.day_list(days, path);
                }
            }
        }
    }

    fn day_list(&mut self, days: &[u32], path: FieldPath) {
        let num_days = self.plan.horizon.num_days;
        for (j, day) in days.iter().enumerate() {
            if *day >= num_days {
                self.push(
                    IssueCode::DayOutOfRange,
                    path.clone().index(j),
                    format!(
                        "Day {day} is outside the horizon (0 to {})",
                        num_days.saturating_sub(1)
                    ),
                );
            }
        }
        if days.windows(2).any(|w| w[0] >= w[1]) {
            self.push(
                IssueCode::UnsortedDays,
                path,
                "Days must be sorted ascending without duplicates",
            );
        }
    }

    fn events(&mut self) {
        let plan = self.plan;
        let crop_ids: HashSet<&str> = plan.crops.iter().map(|c| c.id.as_str()).collect();
        let resource_ids: HashSet<&str> = plan.resources.iter().map(|r| r.id.as_str()).collect();
        let by_id: HashMap<&str, &Event> =
            plan.events.iter().map(|e| (e.id.as_str(), e)).collect();

        for (i, event) in plan.events.iter().enumerate() {
            let base = FieldPath::root().key("events").index(i);

            if !crop_ids.contains(event.crop_id.as_str()) {
                self.push(
                    IssueCode::UnknownCrop,
                    base.clone().key("cropId"),
                    format!(
                        "Event '{}' references unknown crop '{}'",
                        event.id, event.crop_id
                    ),
                );
            }

            for (j, resource) in event.required_resources.iter().enumerate() {
                if !resource_ids.contains(resource.as_str()) {
                    self.push(
                        IssueCode::UnknownResource,
                        base.clone().key("requiredResources").index(j),
                        format!(
                            "Event '{}' requires unknown resource '{resource}'",
                            event.id
                        ),
                    );
                }
            }

            if let Some(pred_id) = &event.preceding_event_id {
                let path = base.clone().key("precedingEventId");
                match by_id.get(pred_id.as_str()) {
                    None => self.push(
                        IssueCode::UnknownPredecessor,
                        path,
                        format!(
                            "Event '{}' follows unknown event '{pred_id}'",
                            event.id
                        ),
                    ),
                    Some(pred) if pred.crop_id != event.crop_id => self.push(
                        IssueCode::PredecessorCropMismatch,
                        path,
                        format!(
                            "Event '{}' (crop '{}') follows event '{pred_id}' of crop '{}'",
                            event.id, event.crop_id, pred.crop_id
                        ),
                    ),
                    Some(_) => {
                        if follows_itself(event, &by_id) {
                            self.push(
                                IssueCode::PredecessorCycle,
                                path,
                                format!("Event '{}' is part of a predecessor cycle", event.id),
                            );
                        }
                    }
                }
            }

            if let Some(lag) = event.lag {
                if let (Some(min), Some(max)) = (lag.min, lag.max) {
                    if min > max {
                        self.push(
                            IssueCode::LagOrder,
                            base.key("lag"),
                            format!("Lag minimum {min} exceeds maximum {max}"),
                        );
                    }
                }
            }
        }
    }

    fn areas(&mut self) {
        let plan = self.plan;
        let crop_ids: HashSet<&str> = plan.crops.iter().map(|c| c.id.as_str()).collect();
        let land_ids: HashSet<&str> = plan.lands.iter().map(|l| l.id.as_str()).collect();

        for (i, land) in plan.lands.iter().enumerate() {
            self.area_value(&land.area, FieldPath::root().key("lands").index(i).key("area"));
        }

        for (i, bound) in plan.crop_area_bounds.iter().enumerate() {
            let base = FieldPath::root().key("cropAreaBounds").index(i);
            if !crop_ids.contains(bound.crop_id.as_str()) {
                self.push(
                    IssueCode::UnknownCrop,
                    base.clone().key("cropId"),
                    format!("Area bound references unknown crop '{}'", bound.crop_id),
                );
            }
            if let Some(min) = &bound.min_area {
                self.area_value(min, base.clone().key("minArea"));
            }
            if let Some(max) = &bound.max_area {
                self.area_value(max, base.clone().key("maxArea"));
            }
            if let (Some(min), Some(max)) = (&bound.min_area, &bound.max_area) {
                if min.compare(max) == Some(Ordering::Greater) {
                    self.push(
                        IssueCode::AreaBoundOrder,
                        base,
                        format!("Minimum area {min} exceeds maximum area {max}"),
                    );
                }
            }
        }

        for (i, fixed) in plan.fixed_areas.iter().enumerate() {
            let base = FieldPath::root().key("fixedAreas").index(i);
            if !crop_ids.contains(fixed.crop_id.as_str()) {
                self.push(
                    IssueCode::UnknownCrop,
                    base.clone().key("cropId"),
                    format!("Fixed area references unknown crop '{}'", fixed.crop_id),
                );
            }
            if !land_ids.contains(fixed.land_id.as_str()) {
                self.push(
                    IssueCode::UnknownLand,
                    base.clone().key("landId"),
                    format!("Fixed area references unknown land '{}'", fixed.land_id),
                );
            }
            self.area_value(&fixed.area, base.key("area"));
        }
    }

    fn area_value(&mut self, area: &Area, path: FieldPath) {
        if !area.value.is_finite() || area.value < 0.0 {
            self.push(
                IssueCode::InvalidArea,
                path,
                format!("Area {} must be a finite, non-negative number", area.value),
            );
        }
    }

    fn objective(&mut self) {
        let plan = self.plan;
        let Some(objective) = &plan.objective else {
            return;
        };
        let base = FieldPath::root().key("objective");

        let mut stages = BTreeSet::new();
        for (i, stage) in objective.stages.iter().enumerate() {
            if !stages.insert(stage.as_str()) {
                self.push(
                    IssueCode::DuplicateObjectiveStage,
                    base.clone().key("stages").index(i),
                    format!("Stage '{stage}' is listed more than once"),
                );
            }
        }

        for (key, overrides) in [("tolerance", &objective.tolerance), ("weights", &objective.weights)] {
            for stage in overrides.keys() {
                if !stages.contains(stage.as_str()) {
                    self.push(
                        IssueCode::UnknownObjectiveStage,
                        base.clone().key(key).key(stage.as_str()),
                        format!("'{stage}' is not one of the declared stages"),
                    );
                }
            }
        }
    }
}

/// Whether following predecessors from `event` leads back to it.
fn follows_itself(event: &Event, by_id: &HashMap<&str, &Event>) -> bool {
    let mut visited = HashSet::new();
    let mut current = event.preceding_event_id.as_deref();
    while let Some(id) = current {
        if id == event.id {
            return true;
        }
        if !visited.insert(id) {
            // A cycle that does not pass through `event`.
            return false;
        }
        current = by_id.get(id).and_then(|e| e.preceding_event_id.as_deref());
    }
    false
}
