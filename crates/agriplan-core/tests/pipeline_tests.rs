mod common;

use agriplan_core::{
    calendar::day_diff,
    convert::{
        collapse_indices_to_ranges, convert_dates_to_indices, expand_ranges_to_indices,
        form_to_submission, submission_to_form, ConversionOptions,
    },
    decan::DecanScale,
    horizon::{date_to_day_index, day_index_to_date, recalculate_horizon, DateRange},
    models::FormEvent,
    sanitize::sanitize,
    PlannerBuilder, Removal, WarningKind,
};
use common::{date, spring_plan, HORIZONS};

#[test]
fn test_spring_plan_end_to_end() {
    let plan = spring_plan();
    let planner = PlannerBuilder::new().build().expect("Failed to create planner");
    let submission = planner
        .prepare_submission(&plan)
        .expect("Spring plan should validate");

    assert!(submission.warnings.is_empty());
    assert!(submission.removals.is_empty());

    let out = &submission.plan;
    assert_eq!(out.horizon.num_days, 92);
    assert_eq!(out.lands[0].blocked_days, (58..=66).collect::<Vec<u32>>());
    assert_eq!(out.workers[0].blocked_days, vec![20]);
    assert_eq!(out.events[0].start_cond, Some((0..=9).collect()));
    assert_eq!(out.events[1].blocked_days, vec![59, 60]);
    assert_eq!(out.events[2].end_cond, Some((80..=91).collect()));
    assert_eq!(out.events[2].start_cond, None);

    let json = serde_json::to_value(out).expect("Failed to serialize");
    assert_eq!(json["horizon"]["numDays"], 92);
    assert_eq!(json["events"][1]["precedingEventId"], "tomato-sow");
    assert!(json["events"][1].get("startCond").is_none());
    assert_eq!(json["lands"][0]["blockedDays"][0], 58);
}

#[test]
fn test_submission_round_trips_through_form_shape() {
    let plan = spring_plan();
    let options = ConversionOptions::default();
    let first = form_to_submission(&plan, &options);

    let rebuilt = submission_to_form(&first.plan, &plan.horizon).expect("Failed to rebuild");
    assert_eq!(
        rebuilt.lands[0].blocked_ranges,
        vec![DateRange::between(date("2025-04-28"), date("2025-05-06"))]
    );
    // Open end comes back closed at the horizon end.
    assert_eq!(
        rebuilt.events[2].end_ranges,
        vec![DateRange::between(date("2025-05-20"), date("2025-05-31"))]
    );

    let second = form_to_submission(&rebuilt, &options);
    assert_eq!(second.plan, first.plan);
}

#[test]
fn test_decan_scale_for_full_month() {
    let horizon = recalculate_horizon("2024-03-01", "2024-03-31").unwrap();
    let scale = DecanScale::new(&horizon).unwrap();

    let buckets: Vec<_> = scale
        .buckets()
        .iter()
        .map(|b| (b.start_day, b.end_day, b.label.as_str()))
        .collect();
    assert_eq!(
        buckets,
        vec![(0, 9, "3月 上旬"), (10, 19, "3月 中旬"), (20, 30, "3月 下旬")]
    );
    let ends: Vec<_> = scale.buckets().iter().map(|b| b.end_date.day()).collect();
    assert_eq!(ends, vec![10, 20, 31]);
}

#[test]
fn test_expand_clips_range_before_horizon() {
    let horizon = recalculate_horizon("2025-03-01", "2025-03-10").unwrap();
    let ranges = vec![
        DateRange::between(date("2025-02-25"), date("2025-03-01")),
        DateRange::between(date("2025-03-05"), date("2025-03-06")),
        DateRange::new(Some(date("2025-03-08")), None),
    ];

    let expansion = expand_ranges_to_indices(&ranges, &horizon);
    assert_eq!(expansion.indices, vec![0, 4, 5, 7, 8, 9]);
    assert!(expansion
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::RangeClipped));
}

#[test]
fn test_dangling_crop_removal_cascades() {
    let mut plan = spring_plan();
    plan.events.push(FormEvent {
        id: "pepper-sow".to_string(),
        crop_id: "pepper".to_string(),
        name: "Sowing".to_string(),
        ..Default::default()
    });
    plan.events.push(FormEvent {
        id: "pepper-plant".to_string(),
        crop_id: "tomato".to_string(),
        name: "Planting".to_string(),
        preceding_event_id: Some("pepper-sow".to_string()),
        ..Default::default()
    });

    let report = PlannerBuilder::new().build().unwrap().check(&plan);
    assert!(report.is_valid());
    assert_eq!(report.plan.events.len(), 3);
    assert_eq!(
        report.removals,
        vec![
            Removal::EventMissingCrop {
                event_id: "pepper-sow".to_string(),
                crop_id: "pepper".to_string(),
            },
            Removal::EventMissingPredecessor {
                event_id: "pepper-plant".to_string(),
                preceding_event_id: "pepper-sow".to_string(),
            },
        ]
    );
    let message = report.removals[0].to_string();
    assert!(message.contains("pepper-sow") && message.contains("pepper"));
}

#[test]
fn test_unparsable_date_list_is_a_warning() {
    for &(start, end) in HORIZONS {
        let horizon = recalculate_horizon(start, end).unwrap();
        let conversion = convert_dates_to_indices(&["not-a-date"], &horizon);
        assert_eq!(conversion.indices, None);
        assert_eq!(conversion.warnings.len(), 1);
        assert_eq!(conversion.warnings[0].kind, WarningKind::InvalidDate);
    }
}

#[test]
fn test_total_days_and_index_round_trip() {
    for &(start, end) in HORIZONS {
        let horizon = recalculate_horizon(start, end).unwrap();
        let diff = day_diff(horizon.start_date(), horizon.end_date());
        assert_eq!(i64::from(horizon.total_days()), diff + 1, "{start}..{end}");

        for index in 0..horizon.total_days() {
            let day = day_index_to_date(horizon.start_date(), i64::from(index)).unwrap();
            assert_eq!(date_to_day_index(horizon.start_date(), day), i64::from(index));
        }
    }
}

#[test]
fn test_expansion_stays_inside_horizon() {
    for &(start, end) in HORIZONS {
        let horizon = recalculate_horizon(start, end).unwrap();
        let ranges = vec![
            DateRange::between(date("1999-01-01"), date("2099-12-31")),
            DateRange::between(date("1999-01-01"), horizon.start_date()),
            DateRange::new(Some(horizon.end_date()), None),
            DateRange::between(date("2090-01-01"), date("2090-01-02")),
        ];

        let expansion = expand_ranges_to_indices(&ranges, &horizon);
        assert_eq!(expansion.indices.len() as u32, horizon.total_days());
        assert!(expansion
            .indices
            .iter()
            .all(|&i| i <= horizon.last_index()));
        assert!(expansion.indices.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_collapse_is_idempotent() {
    for &(start, end) in HORIZONS {
        let horizon = recalculate_horizon(start, end).unwrap();
        let ranges = vec![
            DateRange::between(horizon.start_date(), horizon.start_date()),
            DateRange::new(Some(horizon.end_date()), None),
            DateRange::between(date("2024-02-28"), date("2024-03-02")),
        ];
        let indices = expand_ranges_to_indices(&ranges, &horizon).indices;

        let once = collapse_indices_to_ranges(&indices, horizon.start_date()).unwrap();
        let again_indices = expand_ranges_to_indices(&once, &horizon).indices;
        assert_eq!(again_indices, indices);
        let twice = collapse_indices_to_ranges(&again_indices, horizon.start_date()).unwrap();
        assert_eq!(twice, once);
    }
}

#[test]
fn test_sanitizer_reaches_fixpoint() {
    let mut plan = spring_plan();
    plan.events.push(FormEvent {
        id: "orphan".to_string(),
        crop_id: "tomato".to_string(),
        name: "Orphan".to_string(),
        preceding_event_id: Some("nowhere".to_string()),
        ..Default::default()
    });
    let translated = form_to_submission(&plan, &ConversionOptions::default());

    let first = sanitize(&translated.plan);
    assert_eq!(first.removals.len(), 1);
    let second = sanitize(&first.plan);
    assert!(second.is_clean());
    assert_eq!(second.plan, first.plan);
}

#[test]
fn test_decan_buckets_tile_every_horizon() {
    for &(start, end) in HORIZONS {
        let horizon = recalculate_horizon(start, end).unwrap();
        let scale = DecanScale::new(&horizon).unwrap();
        let buckets = scale.buckets();

        assert_eq!(buckets[0].start_day, 0);
        assert_eq!(buckets[buckets.len() - 1].end_day, horizon.last_index());
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end_day + 1, pair[1].start_day);
        }
        for bucket in buckets {
            assert_eq!(bucket.start_date.month(), bucket.end_date.month());
            assert!(bucket.len() <= 11);
            for day in bucket.start_day..=bucket.end_day {
                assert_eq!(scale.bucket_of_day(day), Some(bucket.bucket_index));
            }
        }
    }
}
