use agriplan_core::{
    horizon::{recalculate_horizon, DateRange},
    models::{Area, AreaUnit, Crop, FormEvent, FormLand, FormPlan, FormWorker},
    CalendarDate,
};

/// Horizons exercised by the table-driven checks: month boundaries, a leap
/// February, a year end and a single day.
pub const HORIZONS: &[(&str, &str)] = &[
    ("2024-03-01", "2024-03-31"),
    ("2024-02-15", "2024-03-15"),
    ("2023-02-01", "2023-03-31"),
    ("2023-12-20", "2024-01-10"),
    ("2025-01-01", "2025-12-31"),
    ("2025-06-30", "2025-06-30"),
];

pub fn date(s: &str) -> CalendarDate {
    s.parse().expect("valid test date")
}

/// A two-crop spring plan that converts without warnings and validates.
pub fn spring_plan() -> FormPlan {
    let horizon = recalculate_horizon("2025-03-01", "2025-05-31").expect("valid horizon");
    let mut plan = FormPlan::new(horizon);

    for (id, name) in [("tomato", "Tomato"), ("onion", "Onion")] {
        plan.crops.push(Crop {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        });
    }
    plan.lands.push(FormLand {
        id: "north".to_string(),
        name: "North field".to_string(),
        area: Area::new(40.0, AreaUnit::Are),
        blocked_ranges: vec![DateRange::between(date("2025-04-28"), date("2025-05-06"))],
    });
    plan.workers.push(FormWorker {
        id: "hana".to_string(),
        name: "Hana".to_string(),
        capacity: Some(2),
        blocked_ranges: vec![DateRange::day(date("2025-03-21"))],
    });
    plan.events.push(FormEvent {
        id: "tomato-sow".to_string(),
        crop_id: "tomato".to_string(),
        name: "Sowing".to_string(),
        start_ranges: vec![DateRange::between(date("2025-03-01"), date("2025-03-10"))],
        ..Default::default()
    });
    plan.events.push(FormEvent {
        id: "tomato-plant".to_string(),
        crop_id: "tomato".to_string(),
        name: "Transplanting".to_string(),
        preceding_event_id: Some("tomato-sow".to_string()),
        uses_land: true,
        blocked_dates: vec!["2025-04-29".to_string(), "2025-04-30".to_string()],
        ..Default::default()
    });
    plan.events.push(FormEvent {
        id: "onion-plant".to_string(),
        crop_id: "onion".to_string(),
        name: "Planting".to_string(),
        uses_land: true,
        end_ranges: vec![DateRange::new(Some(date("2025-05-20")), None)],
        ..Default::default()
    });
    plan
}
