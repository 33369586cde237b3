//! Unit tests for plan calendar queries.

use runflow::plan::{DaySlot, RunningPlan};
use runflow::workouts::{RunType, Workout};
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

fn monday_plan() -> RunningPlan {
    // Monday 2024-03-04, 07:00 UTC
    let start = Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap();
    RunningPlan::new(
        "Base".to_string(),
        "10K".to_string(),
        "Beginner".to_string(),
        3,
        start,
    )
}

fn workout(id: &str, day_offset: u8) -> Workout {
    let mut workout = Workout::new(day_offset, RunType::Easy, id.to_string());
    workout.id = id.to_string();
    workout
}

#[test]
fn test_wednesday_workout_is_today() {
    let mut plan = monday_plan();
    plan.weeks[0].workouts.push(workout("wed", 2));

    let wednesday = Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap();
    let today = plan.todays_workouts(&wednesday);
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].id, "wed");
}

#[test]
fn test_following_monday_looks_ahead() {
    let mut plan = monday_plan();
    plan.weeks[0].workouts.push(workout("wed", 2));
    let next_monday = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();

    assert!(plan.todays_workouts(&next_monday).is_empty());
    assert!(plan.next_workout(&next_monday).is_none());

    plan.weeks[1].workouts.push(workout("fri", 4));
    plan.weeks[1].workouts.push(workout("tue", 1));

    let next = plan.next_workout(&next_monday).unwrap();
    assert_eq!(next.workout.id, "tue");
    assert_eq!(next.week_index, 1);
    assert_eq!(next.date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
}

#[test]
fn test_focus_moves_on_when_today_is_done() {
    let mut plan = monday_plan();
    plan.weeks[0].workouts.push(workout("wed", 2));
    plan.weeks[0].workouts.push(workout("sat", 5));
    let wednesday = Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap();

    let focus = plan.today_focus(&wednesday);
    assert_eq!(focus.today.len(), 1);
    assert!(focus.next.is_none());

    plan.mark_completed("wed");
    let focus = plan.today_focus(&wednesday);
    assert_eq!(focus.next.map(|n| n.workout.id.as_str()), Some("sat"));
}

#[test]
fn test_before_and_after_plan() {
    let plan = monday_plan();
    let before = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();

    assert!(plan.todays_workouts(&before).is_empty());
    assert!(plan.todays_workouts(&after).is_empty());
    assert!(plan.next_workout(&after).is_none());
}

#[test]
fn test_day_slot_in_local_time() {
    let plan = monday_plan();
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();

    let slot = plan.day_slot(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(), &tz);
    assert_eq!(
        slot,
        Some(DaySlot {
            week_index: 1,
            day_offset: 3
        })
    );
    assert_eq!(plan.day_slot(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(), &tz), None);
    assert_eq!(plan.day_slot(NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(), &tz), None);
}
