#[cfg(test)]
mod model_tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::{
        calendar::parse_date,
        error::PlanError,
        horizon::{recalculate_horizon, DateRange},
        models::{AreaUnit, FormPlan, OptimizationPlan},
    };

    const FORM_JSON: &str = r#"{
        "horizon": { "startDate": "2025-03-01", "endDate": "2025-03-31" },
        "crops": [{ "id": "c1", "name": "Cabbage" }],
        "lands": [{
            "id": "l1",
            "name": "North field",
            "area": { "value": 20, "unit": "a" },
            "blockedRanges": [{ "start": "2025-03-10", "end": null }]
        }],
        "events": [{
            "id": "e1",
            "cropId": "c1",
            "name": "Sowing",
            "startRanges": [{ "start": null, "end": "2025-03-05" }],
            "blockedDates": ["2025-03-03"]
        }]
    }"#;

    #[test]
    fn test_form_plan_parses_camel_case_document() {
        let plan = FormPlan::from_json(FORM_JSON).expect("form plan parses");
        assert_eq!(plan.horizon.total_days(), 31);
        assert_eq!(plan.crops[0].name, "Cabbage");
        assert_eq!(plan.lands[0].area.unit, AreaUnit::Are);
        assert_eq!(
            plan.lands[0].blocked_ranges,
            vec![DateRange::new(Some(parse_date("2025-03-10").unwrap()), None)]
        );
        assert_eq!(plan.events[0].crop_id, "c1");
        assert!(plan.events[0].end_ranges.is_empty());
        assert!(plan.workers.is_empty());
        assert!(plan.objective.is_none());
    }

    #[test]
    fn test_blank_preceding_event_id_reads_as_absent() {
        let json = FORM_JSON.replace(r#""name": "Sowing","#, r#""name": "Sowing", "precedingEventId": "  ","#);
        let plan = FormPlan::from_json(&json).expect("form plan parses");
        assert_eq!(plan.events[0].preceding_event_id, None);

        let json = FORM_JSON.replace(r#""name": "Sowing","#, r#""name": "Sowing", "precedingEventId": "e0","#);
        let plan = FormPlan::from_json(&json).expect("form plan parses");
        assert_eq!(plan.events[0].preceding_event_id.as_deref(), Some("e0"));
    }

    #[test]
    fn test_form_plan_rejects_invalid_dates() {
        let bad = FORM_JSON.replace("2025-03-05", "2025-02-30");
        assert!(matches!(
            FormPlan::from_json(&bad),
            Err(PlanError::Serialization { .. })
        ));
    }

    #[test]
    fn test_with_horizon_leaves_original_untouched() {
        let plan = FormPlan::from_json(FORM_JSON).unwrap();
        let moved = plan.with_horizon(recalculate_horizon("2025-04-01", "2025-04-10").unwrap());
        assert_eq!(plan.horizon.total_days(), 31);
        assert_eq!(moved.horizon.total_days(), 10);
        assert_eq!(moved.lands, plan.lands);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(FORM_JSON.as_bytes()).unwrap();
        let plan = FormPlan::load(file.path()).expect("plan loads");
        assert_eq!(plan.events.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        match FormPlan::load(&missing) {
            Err(PlanError::FileSystem { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected FileSystem error, got {other:?}"),
        }
    }

    #[test]
    fn test_submission_omits_absent_conditions() {
        let plan: OptimizationPlan = serde_json::from_str(
            r#"{
                "horizon": { "numDays": 10 },
                "events": [{ "id": "e1", "cropId": "c1", "name": "Sow", "startCond": [0, 1] }]
            }"#,
        )
        .unwrap();
        assert_eq!(plan.events[0].start_cond, Some(vec![0, 1]));
        assert_eq!(plan.events[0].end_cond, None);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["events"][0]["startCond"], serde_json::json!([0, 1]));
        assert!(json["events"][0].get("endCond").is_none());
        assert_eq!(json["horizon"]["numDays"], 10);
    }
}
