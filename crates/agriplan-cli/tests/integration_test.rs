//! Integration tests comparing CLI output with the core Display
//! implementations it renders.

use std::{fs, process::Command};

use agriplan_core::{
    decan::DecanScale,
    display::DecanTable,
    horizon::{recalculate_horizon, DateRange},
    models::{Area, AreaUnit, Crop, FormEvent, FormLand, FormPlan},
    CalendarDate, PlannerBuilder,
};
use tempfile::TempDir;

fn date(s: &str) -> CalendarDate {
    s.parse().expect("valid test date")
}

/// Helper function to write a plan with one clipped range and one dangling
/// event to a temporary file
fn create_test_plan() -> (FormPlan, TempDir) {
    let mut plan = FormPlan::new(recalculate_horizon("2024-02-15", "2024-04-15").unwrap());
    plan.crops.push(Crop {
        id: "pea".to_string(),
        name: "Pea".to_string(),
        ..Default::default()
    });
    plan.lands.push(FormLand {
        id: "east".to_string(),
        name: "East".to_string(),
        area: Area::new(2500.0, AreaUnit::SquareMeter),
        blocked_ranges: vec![DateRange::new(None, Some(date("2024-02-20")))],
    });
    plan.events.push(FormEvent {
        id: "pea-sow".to_string(),
        crop_id: "pea".to_string(),
        name: "Sowing".to_string(),
        end_ranges: vec![DateRange::between(date("2024-04-10"), date("2024-04-30"))],
        ..Default::default()
    });
    plan.events.push(FormEvent {
        id: "bean-sow".to_string(),
        crop_id: "bean".to_string(),
        name: "Sowing".to_string(),
        ..Default::default()
    });

    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let json = serde_json::to_string_pretty(&plan).expect("Failed to serialize plan");
    fs::write(temp_dir.path().join("plan.json"), json).expect("Failed to write plan");
    (plan, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_agriplan"))
        .arg("--no-color")
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn plan_arg(dir: &TempDir) -> String {
    dir.path().join("plan.json").to_string_lossy().into_owned()
}

#[test]
fn test_check_output_matches_report_display() {
    let (plan, temp_dir) = create_test_plan();
    let report = PlannerBuilder::new().build().unwrap().check(&plan);

    let cli_output = run_cli_command(&["check", &plan_arg(&temp_dir)]);
    assert_eq!(cli_output, report.to_string());
    assert!(cli_output.contains("**RANGE_CLIPPED** `events[0].endRanges[0]`"));
    assert!(cli_output.contains("Removed event 'bean-sow'"));
}

#[test]
fn test_check_with_overrides_matches_report_display() {
    let (plan, temp_dir) = create_test_plan();
    let report = PlannerBuilder::new()
        .with_horizon("2024-03-01", "2024-03-31")
        .with_area_unit(Some(AreaUnit::Are))
        .build()
        .unwrap()
        .check(&plan);

    let cli_output = run_cli_command(&[
        "check",
        "--start",
        "2024-03-01",
        "--end",
        "2024-03-31",
        "--area-unit",
        "a",
        &plan_arg(&temp_dir),
    ]);
    assert_eq!(cli_output, report.to_string());
}

#[test]
fn test_submit_output_matches_prepared_plan() {
    let (plan, temp_dir) = create_test_plan();
    let submission = PlannerBuilder::new()
        .build()
        .unwrap()
        .prepare_submission(&plan)
        .unwrap();

    let cli_output = run_cli_command(&["submit", &plan_arg(&temp_dir)]);
    let expected = submission.plan.to_json_pretty().unwrap();
    assert_eq!(cli_output.trim_end(), expected);
}

#[test]
fn test_decans_output_matches_table_display() {
    let horizon = recalculate_horizon("2024-02-15", "2024-04-15").unwrap();
    let scale = DecanScale::new(&horizon).unwrap();
    let expected = format!("# Decans: {horizon}\n\n{}", DecanTable(&scale));

    let cli_output = run_cli_command(&["decans", "--start", "2024-02-15", "--end", "2024-04-15"]);
    assert_eq!(cli_output, expected);
    // 2月 中旬 through 4月 中旬
    assert_eq!(scale.len(), 7);
}
