//! Integration tests for logging a planned workout end to end.

use chrono::{TimeZone, Utc};
use runflow::plan::RunningPlan;
use runflow::recording::{Feeling, RunLog, SegmentEdit, Stopwatch, WorkoutLogger};
use runflow::workouts::{interval_block, simple_block, RunType, StepKind, Workout};
use runflow::{AppState, Shoe};

fn state_with_plan() -> AppState {
    let start = Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap();
    let mut plan = RunningPlan::new(
        "Spring 10K".to_string(),
        "10K".to_string(),
        "Intermediate".to_string(),
        2,
        start,
    );

    let mut track = Workout::new(2, RunType::Interval, "Track".to_string());
    track.id = "w1".to_string();
    track.push_block(simple_block(StepKind::Warmup));
    track.push_block(interval_block());
    plan.upsert_workout(0, track).unwrap();

    let mut easy = Workout::new_default(4);
    easy.id = "w2".to_string();
    plan.upsert_workout(0, easy).unwrap();

    let mut long = Workout::new_default(6);
    long.id = "w1-copy".to_string();
    plan.upsert_workout(1, long).unwrap();

    let mut shoe = Shoe::new("Saucony", "Endorphin", 600.0, start);
    shoe.id = "s1".to_string();
    shoe.distance = 100.0;
    let mut spare = Shoe::new("Brooks", "Ghost", 800.0, start);
    spare.id = "s2".to_string();

    AppState {
        plan: Some(plan),
        logs: Vec::new(),
        shoes: vec![shoe, spare],
    }
}

#[test]
fn test_logged_workout_completes_plan_entry() {
    let mut state = state_with_plan();
    let workout = state
        .plan
        .as_ref()
        .and_then(|p| p.find_workout("w1"))
        .cloned()
        .unwrap();

    let default_shoe = state.default_shoe().map(|s| s.id.clone());
    let mut logger = WorkoutLogger::new(&workout, default_shoe.as_deref());
    logger
        .update_segment(0, SegmentEdit::Distance(1.2))
        .unwrap();
    logger.set_feeling(Feeling::Great);

    let now = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();
    state.save_run(logger.finish(now)).unwrap();

    let plan = state.plan.as_ref().unwrap();
    assert!(plan.find_workout("w1").unwrap().is_completed);
    assert!(!plan.find_workout("w2").unwrap().is_completed);
    assert!(!plan.find_workout("w1-copy").unwrap().is_completed);

    assert_eq!(state.logs.len(), 1);
    assert_eq!(state.logs[0].feeling, Feeling::Great);
}

#[test]
fn test_shoe_mileage_accumulates() {
    let mut state = state_with_plan();
    let now = Utc.with_ymd_and_hms(2024, 3, 7, 7, 0, 0).unwrap();

    let log = RunLog::manual(5.0, 1650, Feeling::Good, None, Some("s1".to_string()), now);
    state.save_run(log).unwrap();

    assert_eq!(state.shoes[0].distance, 105.0);
    assert_eq!(state.shoes[1].distance, 0.0);
    assert!(state.plan.as_ref().unwrap().all_workouts().all(|(_, w)| !w.is_completed));
}

#[test]
fn test_stopwatch_free_run() {
    let mut state = state_with_plan();
    let mut watch = Stopwatch::new();
    watch.start().unwrap();
    for _ in 0..1500 {
        watch.tick();
    }
    let seconds = watch.finish().unwrap();

    let now = Utc.with_ymd_and_hms(2024, 3, 8, 7, 0, 0).unwrap();
    let log = RunLog::manual(5.0, seconds, Feeling::Tired, Some(" ".to_string()), None, now);
    assert_eq!(log.pace, "5:00");
    assert_eq!(log.notes, None);

    state.save_run(log).unwrap();
    assert_eq!(state.totals().run_count, 1);
    assert_eq!(state.recent_distance(now, 7), 5.0);
}

#[test]
fn test_zero_distance_run_is_rejected() {
    let mut state = state_with_plan();
    let before = state.clone();
    let now = Utc.with_ymd_and_hms(2024, 3, 8, 7, 0, 0).unwrap();

    let log = RunLog::manual(0.0, 600, Feeling::Bad, None, Some("s1".to_string()), now);
    assert_eq!(log.pace, "0:00");
    assert!(state.save_run(log).is_err());
    assert_eq!(state, before);
}
