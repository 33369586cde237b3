//! Unit tests for the execution logger.

use runflow::recording::{
    expand_workout_to_segments, update_group_value, update_segment, DurationInput, LogError,
    SegmentEdit, WorkoutLogger,
};
use runflow::workouts::{interval_block, RunType, StepKind, Workout};
use chrono::{TimeZone, Utc};

fn interval_workout() -> Workout {
    let mut workout = Workout::new(2, RunType::Interval, "400s".to_string());
    workout.id = "w-400".to_string();
    workout.push_block(interval_block());
    workout
}

#[test]
fn test_repeat_block_expansion() {
    let workout = interval_workout();
    let block_id = workout.blocks[0].id.clone();
    let segments = expand_workout_to_segments(&workout);

    assert_eq!(segments.len(), 8);
    for (i, segment) in segments.iter().enumerate() {
        let expected = if i % 2 == 0 { StepKind::Run } else { StepKind::Recover };
        assert_eq!(segment.step_kind, expected);
        assert_eq!(segment.group_id.as_deref(), Some(block_id.as_str()));
    }

    for (set, segment) in segments.iter().step_by(2).enumerate() {
        assert!((segment.actual_distance - 0.4).abs() < 1e-9);
        assert_eq!(segment.actual_duration, 108.0);
        assert_eq!(segment.actual_pace, "4:30");
        assert_eq!(segment.label.as_deref(), Some(format!("set {}/4", set + 1).as_str()));
    }

    assert_eq!(segments[1].actual_duration, 90.0);
    assert_eq!(segments[1].label, None);
}

#[test]
fn test_zero_values_keep_previous_pace() {
    let mut segments = expand_workout_to_segments(&interval_workout());

    update_segment(&mut segments, 0, &SegmentEdit::Distance(0.0))
        .unwrap();
    assert_eq!(segments[0].actual_pace, "4:30");

    update_segment(&mut segments, 0, &SegmentEdit::Distance(0.5))
        .unwrap();
    update_segment(&mut segments, 0, &SegmentEdit::Duration(0.0))
        .unwrap();
    assert_eq!(segments[0].actual_pace, "3:36");

    update_segment(&mut segments, 0, &SegmentEdit::Duration(-10.0))
        .unwrap();
    assert_eq!(segments[0].actual_pace, "3:36");

    assert_eq!(
        update_segment(&mut segments, 99, &SegmentEdit::Distance(1.0)),
        Err(LogError::SegmentOutOfRange(99))
    );
}

#[test]
fn test_group_edit_leaves_recoveries() {
    let workout = interval_workout();
    let block_id = workout.blocks[0].id.clone();
    let mut segments = expand_workout_to_segments(&workout);

    let changed =
        update_group_value(&mut segments, &block_id, &SegmentEdit::Duration(100.0))
            .unwrap();
    assert_eq!(changed, 4);

    for segment in &segments {
        match segment.step_kind {
            StepKind::Run => {
                assert_eq!(segment.actual_duration, 100.0);
                assert_eq!(segment.actual_pace, "4:10");
            }
            _ => assert_eq!(segment.actual_duration, 90.0),
        }
    }

    let changed =
        update_group_value(&mut segments, &block_id, &SegmentEdit::Distance(0.0))
            .unwrap();
    assert_eq!(changed, 4);
    assert!(segments.iter().step_by(2).all(|s| s.actual_pace == "4:10"));

    assert!(matches!(
        update_group_value(&mut segments, "missing", &SegmentEdit::Distance(1.0)),
        Err(LogError::GroupNotFound(_))
    ));
}

#[test]
fn test_duration_input_modes() {
    assert_eq!(DurationInput::MinSec.parse("1:48"), Some(108.0));
    assert_eq!(DurationInput::Minutes.parse("1.5"), Some(90.0));
    assert_eq!(DurationInput::Seconds.parse("75"), Some(75.0));
    assert_eq!(DurationInput::Seconds.parse("  "), None);
    assert_eq!(DurationInput::MinSec.format(108.0), "1:48");
}

#[test]
fn test_logger_builds_linked_log() {
    let workout = interval_workout();
    let mut logger = WorkoutLogger::new(&workout, Some("shoe-1"));
    logger.cycle_duration_input();
    assert_eq!(logger.duration_input(), DurationInput::Seconds);
    logger.update_duration_text(0, "100").unwrap();
    logger.set_notes("windy");

    let summary = logger.summary();
    // 4 x 0.4 km run + 4 x 0.25 km jog
    assert!((summary.distance_km - 2.6).abs() < 1e-9);
    assert_eq!(summary.duration_sec, 100 + 3 * 108 + 4 * 90);

    let now = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();
    let log = logger.finish(now);
    assert_eq!(log.linked_workout_id(), Some("w-400"));
    assert_eq!(log.shoe_id.as_deref(), Some("shoe-1"));
    assert_eq!(log.notes.as_deref(), Some("windy"));
    assert_eq!(log.structured_data.as_ref().unwrap().segments.len(), 8);
    assert_eq!(log.date, now);
}
