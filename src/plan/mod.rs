//! Training plans: weeks of workouts, calendar queries and generation.

pub mod generator;
pub mod schedule;
pub mod types;

pub use generator::{
    DraftWeek, DraftWorkout, GenerationError, PlanDraft, PlanGenerator, PlanRequest,
};
pub use schedule::{day_offset_of, DaySlot, ScheduledWorkout, TodayFocus};
pub use types::{PlanError, ReferenceRace, RunningPlan, WeekPlan};
