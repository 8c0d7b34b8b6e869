//! Whole-plan translation between the form and submission shapes.

use log::debug;

use super::{
    dates::convert_dates_at,
    ranges::{collapse_indices_to_ranges, expand_ranges_at},
    ConversionWarning, WarningKind,
};
use crate::{
    error::Result,
    horizon::{DateRange, Horizon},
    models::{
        Area, AreaUnit, CropAreaBound, Event, FixedArea, FormEvent, FormLand, FormPlan,
        FormResource, FormWorker, Land, OptimizationPlan, PlanHorizon, Resource, Worker,
    },
    path::FieldPath,
};

/// Knobs for [`form_to_submission`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Unit every area is expressed in on the wire; `None` keeps input units
    pub area_unit: Option<AreaUnit>,
    /// Keep constraints whose ranges all fell outside the horizon as empty
    /// lists (rejected later by validation) instead of dropping them
    pub strict_constraints: bool,
}

/// A converted plan together with the warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Translated {
    pub plan: OptimizationPlan,
    pub warnings: Vec<ConversionWarning>,
}

/// Converts a form plan into the day-indexed submission shape.
///
/// Blocked ranges become `blockedDays`; event start/end ranges become
/// `startCond`/`endCond`; picked event dates become the event's
/// `blockedDays`. Warning paths name the form field they came from, e.g.
/// `events[2].startRanges[0]`.
///
/// An event with no start (or end) ranges is unconstrained on that side.
/// When ranges were given but none of them reaches into the horizon, the
/// constraint would silently widen to "unconstrained"; this is reported as a
/// `VALIDATION_ERROR` warning, and with
/// [`ConversionOptions::strict_constraints`] the constraint is kept as an
/// empty list instead.
pub fn form_to_submission(form: &FormPlan, options: &ConversionOptions) -> Translated {
    let horizon = &form.horizon;
    let mut warnings = Vec::new();
    let area = |a: &Area| options.area_unit.map_or(*a, |unit| a.to_unit(unit));

    let lands = form
        .lands
        .iter()
        .enumerate()
        .map(|(i, land)| Land {
            id: land.id.clone(),
            name: land.name.clone(),
            area: area(&land.area),
            blocked_days: blocked_days(
                &land.blocked_ranges,
                horizon,
                &FieldPath::root().key("lands").index(i).key("blockedRanges"),
                &mut warnings,
            ),
        })
        .collect();

    let workers = form
        .workers
        .iter()
        .enumerate()
        .map(|(i, worker)| Worker {
            id: worker.id.clone(),
            name: worker.name.clone(),
            capacity: worker.capacity,
            blocked_days: blocked_days(
                &worker.blocked_ranges,
                horizon,
                &FieldPath::root().key("workers").index(i).key("blockedRanges"),
                &mut warnings,
            ),
        })
        .collect();

    let resources = form
        .resources
        .iter()
        .enumerate()
        .map(|(i, resource)| Resource {
            id: resource.id.clone(),
            name: resource.name.clone(),
            category: resource.category.clone(),
            capacity: resource.capacity,
            blocked_days: blocked_days(
                &resource.blocked_ranges,
                horizon,
                &FieldPath::root().key("resources").index(i).key("blockedRanges"),
                &mut warnings,
            ),
        })
        .collect();

    let events = form
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| convert_event(event, i, horizon, options, &mut warnings))
        .collect();

    let crop_area_bounds = form
        .crop_area_bounds
        .iter()
        .map(|bound| CropAreaBound {
            crop_id: bound.crop_id.clone(),
            min_area: bound.min_area.as_ref().map(area),
            max_area: bound.max_area.as_ref().map(area),
        })
        .collect();

    let fixed_areas = form
        .fixed_areas
        .iter()
        .map(|fixed| FixedArea {
            land_id: fixed.land_id.clone(),
            crop_id: fixed.crop_id.clone(),
            area: area(&fixed.area),
        })
        .collect();

    debug!(
        "Converted form plan over {} days with {} warning(s)",
        horizon.total_days(),
        warnings.len()
    );

    Translated {
        plan: OptimizationPlan {
            horizon: PlanHorizon {
                num_days: horizon.total_days(),
            },
            crops: form.crops.clone(),
            lands,
            workers,
            resources,
            events,
            crop_area_bounds,
            fixed_areas,
            objective: form.objective.clone(),
        },
        warnings,
    }
}

fn blocked_days(
    ranges: &[DateRange],
    horizon: &Horizon,
    path: &FieldPath,
    warnings: &mut Vec<ConversionWarning>,
) -> Vec<u32> {
    let expansion = expand_ranges_at(ranges, horizon, path);
    warnings.extend(expansion.warnings);
    expansion.indices
}

fn convert_event(
    event: &FormEvent,
    position: usize,
    horizon: &Horizon,
    options: &ConversionOptions,
    warnings: &mut Vec<ConversionWarning>,
) -> Event {
    let base = FieldPath::root().key("events").index(position);
    let start_cond = condition(
        &event.start_ranges,
        horizon,
        &base.clone().key("startRanges"),
        options,
        warnings,
    );
    let end_cond = condition(
        &event.end_ranges,
        horizon,
        &base.clone().key("endRanges"),
        options,
        warnings,
    );
    let blocked = convert_dates_at(&event.blocked_dates, horizon, &base.key("blockedDates"));
    warnings.extend(blocked.warnings);

    Event {
        id: event.id.clone(),
        crop_id: event.crop_id.clone(),
        name: event.name.clone(),
        preceding_event_id: event
            .preceding_event_id
            .clone()
            .filter(|id| !id.trim().is_empty()),
        lag: event.lag,
        required_workers: event.required_workers,
        required_resources: event.required_resources.clone(),
        uses_land: event.uses_land,
        start_cond,
        end_cond,
        blocked_days: blocked.indices.unwrap_or_default(),
    }
}

fn condition(
    ranges: &[DateRange],
    horizon: &Horizon,
    path: &FieldPath,
    options: &ConversionOptions,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<Vec<u32>> {
    if ranges.is_empty() {
        return None;
    }
    let expansion = expand_ranges_at(ranges, horizon, path);
    warnings.extend(expansion.warnings);
    if !expansion.indices.is_empty() {
        return Some(expansion.indices);
    }

    if options.strict_constraints {
        warnings.push(ConversionWarning::new(
            WarningKind::ValidationError,
            path.clone(),
            "None of the ranges overlap the horizon; the constraint allows no day",
        ));
        Some(Vec::new())
    } else {
        warnings.push(ConversionWarning::new(
            WarningKind::ValidationError,
            path.clone(),
            "None of the ranges overlap the horizon; the constraint was dropped",
        ));
        None
    }
}

/// Rebuilds the form shape from a submission plan, for display or editing.
///
/// Index sets are collapsed into maximal date ranges, so adjacent ranges the
/// user entered separately come back merged. Event blocked days come back as
/// individual dates.
pub fn submission_to_form(plan: &OptimizationPlan, horizon: &Horizon) -> Result<FormPlan> {
    let start = horizon.start_date();
    let ranges = |days: &[u32]| collapse_indices_to_ranges(days, start);
    let optional_ranges = |cond: &Option<Vec<u32>>| match cond {
        Some(days) => collapse_indices_to_ranges(days, start),
        None => Ok(Vec::new()),
    };

    let lands = plan
        .lands
        .iter()
        .map(|land| -> Result<FormLand> {
            Ok(FormLand {
                id: land.id.clone(),
                name: land.name.clone(),
                area: land.area,
                blocked_ranges: ranges(&land.blocked_days)?,
            })
        })
        .collect::<Result<_>>()?;

    let workers = plan
        .workers
        .iter()
        .map(|worker| -> Result<FormWorker> {
            Ok(FormWorker {
                id: worker.id.clone(),
                name: worker.name.clone(),
                capacity: worker.capacity,
                blocked_ranges: ranges(&worker.blocked_days)?,
            })
        })
        .collect::<Result<_>>()?;

    let resources = plan
        .resources
        .iter()
        .map(|resource| -> Result<FormResource> {
            Ok(FormResource {
                id: resource.id.clone(),
                name: resource.name.clone(),
                category: resource.category.clone(),
                capacity: resource.capacity,
                blocked_ranges: ranges(&resource.blocked_days)?,
            })
        })
        .collect::<Result<_>>()?;

    let events = plan
        .events
        .iter()
        .map(|event| -> Result<FormEvent> {
            let blocked_dates = event
                .blocked_days
                .iter()
                .map(|day| horizon.date_at(*day).map(|d| d.to_string()))
                .collect::<Result<_>>()?;
            Ok(FormEvent {
                id: event.id.clone(),
                crop_id: event.crop_id.clone(),
                name: event.name.clone(),
                preceding_event_id: event.preceding_event_id.clone(),
                lag: event.lag,
                required_workers: event.required_workers,
                required_resources: event.required_resources.clone(),
                uses_land: event.uses_land,
                start_ranges: optional_ranges(&event.start_cond)?,
                end_ranges: optional_ranges(&event.end_cond)?,
                blocked_dates,
            })
        })
        .collect::<Result<_>>()?;

    Ok(FormPlan {
        horizon: *horizon,
        crops: plan.crops.clone(),
        lands,
        workers,
        resources,
        events,
        crop_area_bounds: plan.crop_area_bounds.clone(),
        fixed_areas: plan.fixed_areas.clone(),
        objective: plan.objective.clone(),
    })
}
