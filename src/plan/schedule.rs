//! Calendar queries over a plan.
//!
//! Week `i` of a plan covers the seven days starting `7 * i` days after
//! `created_at`. All queries take "now" as a parameter; nothing here reads
//! the system clock.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

use crate::plan::types::RunningPlan;
use crate::workouts::types::Workout;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A workout resolved to a calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledWorkout<'a> {
    /// 0-based week index
    pub week_index: usize,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// The planned workout
    pub workout: &'a Workout,
}

/// Position of a calendar date inside a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    /// 0-based week index
    pub week_index: usize,
    /// 0 = Monday .. 6 = Sunday
    pub day_offset: u8,
}

/// What the dashboard shows for a given moment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodayFocus<'a> {
    /// Sessions scheduled today
    pub today: Vec<&'a Workout>,
    /// Next session, looked up only when today is empty or fully done
    pub next: Option<ScheduledWorkout<'a>>,
}

/// Monday = 0 .. Sunday = 6.
pub fn day_offset_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

impl RunningPlan {
    /// Plan start date in the caller's time zone.
    pub fn start_date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }

    /// Week index containing `now`; negative before the plan starts.
    pub fn week_index_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let elapsed = now.naive_utc() - self.created_at.naive_utc();
        let days = elapsed.num_milliseconds().div_euclid(MILLIS_PER_DAY);
        days.div_euclid(7)
    }

    /// Calendar date of a session in the given week.
    pub fn workout_date<Tz: TimeZone>(
        &self,
        week_index: usize,
        day_offset: u8,
        tz: &Tz,
    ) -> NaiveDate {
        self.start_date_in(tz) + Duration::days(week_index as i64 * 7 + day_offset as i64)
    }

    /// Workouts scheduled for the day containing `now`.
    pub fn todays_workouts<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<&Workout> {
        let week_index = self.week_index_at(now);
        if week_index < 0 || week_index as usize >= self.weeks.len() {
            return Vec::new();
        }

        self.workouts_on(week_index as usize, day_offset_of(now.date_naive()))
    }

    /// First workout dated strictly after today, scanning from the current week.
    pub fn next_workout<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<ScheduledWorkout<'_>> {
        let tz = now.timezone();
        let today = now.date_naive();
        let first_week = self.week_index_at(now).max(0) as usize;

        for week_index in first_week..self.weeks.len() {
            let mut workouts: Vec<&Workout> = self.weeks[week_index].workouts.iter().collect();
            workouts.sort_by_key(|w| w.day_offset);

            for workout in workouts {
                let date = self.workout_date(week_index, workout.day_offset, &tz);
                if date > today {
                    return Some(ScheduledWorkout {
                        week_index,
                        date,
                        workout,
                    });
                }
            }
        }

        None
    }

    /// Today's sessions, plus the next one when today has nothing left to do.
    pub fn today_focus<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TodayFocus<'_> {
        let today = self.todays_workouts(now);
        let all_done = !today.is_empty() && today.iter().all(|w| w.is_completed);

        let next = if today.is_empty() || all_done {
            self.next_workout(now)
        } else {
            None
        };

        TodayFocus { today, next }
    }

    /// Map a calendar date to its week/day slot, using Monday-based weeks
    /// anchored on the Monday of the plan's start week.
    pub fn day_slot<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Option<DaySlot> {
        let start = self.start_date_in(tz);
        let plan_monday = start - Duration::days(day_offset_of(start) as i64);
        let date_monday = date - Duration::days(day_offset_of(date) as i64);

        if date < plan_monday {
            return None;
        }

        let week_index = ((date_monday - plan_monday).num_days() / 7) as usize;
        if week_index >= self.weeks.len() {
            return None;
        }

        Some(DaySlot {
            week_index,
            day_offset: day_offset_of(date),
        })
    }
}
