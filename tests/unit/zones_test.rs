//! Unit tests for intensity zone analytics.

use runflow::metrics::{threshold_pace, IntensityZone, PlanZoneReport, ZoneBoundaries};
use runflow::plan::{ReferenceRace, RunningPlan};
use runflow::workouts::{interval_block, simple_block, StepKind, Workout, WorkoutStep};
use chrono::{TimeZone, Utc};

#[test]
fn test_boundaries_are_ordered_for_any_race() {
    let races = [
        (5.0, "20:00"),
        (5.0, "35:10"),
        (10.0, "45:00"),
        (21.0975, "1:45:00"),
        (42.195, "2:55:00"),
        (42.195, "4:30:00"),
        (15.0, "1:10:00"),
    ];

    for (distance, time) in races {
        let zones = ZoneBoundaries::from_reference(&ReferenceRace::new(distance, time));
        assert!(zones.is_available());
        assert!(zones.threshold_limit < zones.tempo_limit);
        assert!(zones.tempo_limit < zones.easy_limit);
    }
}

#[test]
fn test_threshold_pace_adjustments() {
    // 5 km in 20:00 = 240 s/km, slowed by 6%
    assert!((threshold_pace(5.0, "20:00") - 254.4).abs() < 1e-9);
    // 10 km in 45:00 = 270 s/km, slowed by 2%
    assert!((threshold_pace(10.0, "45:00") - 275.4).abs() < 1e-9);
    // Odd distances use the race pace directly
    assert!((threshold_pace(15.0, "75:00") - 300.0).abs() < 1e-9);
    assert_eq!(threshold_pace(0.0, "20:00"), 0.0);
    assert_eq!(threshold_pace(5.0, ""), 0.0);
}

#[test]
fn test_zone_lookup() {
    let zones = ZoneBoundaries::from_t_pace(300.0);
    assert_eq!(zones.get_zone(400.0), IntensityZone::Easy);
    assert_eq!(zones.get_zone(330.0), IntensityZone::Tempo);
    assert_eq!(zones.get_zone(300.0), IntensityZone::Threshold);
    assert_eq!(zones.get_zone(270.0), IntensityZone::Interval);
}

#[test]
fn test_recoveries_have_no_zone() {
    let zones = ZoneBoundaries::from_t_pace(300.0);
    let jog = WorkoutStep::time(StepKind::Recover, 2.0);
    assert_eq!(zones.classify(&jog), None);

    let warmup = WorkoutStep::distance(StepKind::Warmup, 2.0)
        .with_pace("4:00");
    assert_eq!(zones.classify(&warmup), Some(IntensityZone::Easy));
}

#[test]
fn test_plan_report() {
    let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
    let mut plan = RunningPlan::new(
        "Speed".to_string(),
        "5K".to_string(),
        "Intermediate".to_string(),
        2,
        start,
    );
    plan.set_reference_race(Some(ReferenceRace::new(5.0, "25:00")));

    let mut session = Workout::new_default(1);
    session.blocks = vec![simple_block(StepKind::Warmup), interval_block()];
    session.recompute_totals();
    plan.upsert_workout(0, session).unwrap();

    let report = PlanZoneReport::from_plan(&plan);
    assert_eq!(report.weekly.len(), 2);

    // 1 km warmup + 4 x 400 m; recoveries are not counted
    assert!((report.totals.total() - 2.6).abs() < 1e-9);
    assert!((report.totals.easy - 1.0).abs() < 1e-9);
    assert!((report.totals.quality() - 1.6).abs() < 1e-9);
    assert_eq!(report.weekly[1].total, 0.0);
}
