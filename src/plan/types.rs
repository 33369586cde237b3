//! Training plan type definitions.
//!
//! A [`RunningPlan`] owns its weeks, which own their workouts. Edits go
//! through explicit index/id paths and mutate the plan in place; callers that
//! need the previous version keep a clone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workouts::types::{new_id, Workout, WorkoutBlock, WorkoutStep};

/// One week of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    /// 1-based week number
    pub week_number: u32,
    /// Workouts; several may share a day offset
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

impl WeekPlan {
    /// Create an empty week.
    pub fn new(week_number: u32) -> Self {
        Self {
            week_number,
            workouts: Vec::new(),
        }
    }

    /// Chart label, e.g. `W3`.
    pub fn label(&self) -> String {
        format!("W{}", self.week_number)
    }
}

/// A past race used to calibrate pace zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRace {
    /// Race distance in km
    #[serde(default)]
    pub distance: f64,
    /// Finish time, "MM:SS" or "HH:MM:SS"
    #[serde(default)]
    pub time: String,
}

impl ReferenceRace {
    /// Create a reference race.
    pub fn new(distance: f64, time: &str) -> Self {
        Self {
            distance,
            time: time.to_string(),
        }
    }
}

/// A multi-week training plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningPlan {
    /// Unique identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// What the plan trains for
    #[serde(default)]
    pub goal: String,
    /// Runner level label
    #[serde(default)]
    pub level: String,
    /// Number of weeks
    #[serde(default)]
    pub total_weeks: u32,
    /// Start of week 1
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Weeks indexed by position
    #[serde(default)]
    pub weeks: Vec<WeekPlan>,
    /// Calibration for zone analytics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_race: Option<ReferenceRace>,
}

impl RunningPlan {
    /// Create a plan with `total_weeks` empty weeks.
    pub fn new(
        name: String,
        goal: String,
        level: String,
        total_weeks: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            name,
            goal,
            level,
            total_weeks,
            created_at,
            weeks: (1..=total_weeks).map(WeekPlan::new).collect(),
            reference_race: None,
        }
    }

    /// Get a week by 0-based index.
    pub fn week(&self, week_idx: usize) -> Result<&WeekPlan, PlanError> {
        self.weeks
            .get(week_idx)
            .ok_or(PlanError::WeekOutOfRange(week_idx))
    }

    fn week_mut(&mut self, week_idx: usize) -> Result<&mut WeekPlan, PlanError> {
        self.weeks
            .get_mut(week_idx)
            .ok_or(PlanError::WeekOutOfRange(week_idx))
    }

    /// Workouts scheduled on a given day of a week.
    pub fn workouts_on(&self, week_idx: usize, day_offset: u8) -> Vec<&Workout> {
        self.weeks
            .get(week_idx)
            .map(|week| {
                week.workouts
                    .iter()
                    .filter(|w| w.day_offset == day_offset)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterate every workout with its week index, in week then stored order.
    pub fn all_workouts(&self) -> impl Iterator<Item = (usize, &Workout)> {
        self.weeks
            .iter()
            .enumerate()
            .flat_map(|(idx, week)| week.workouts.iter().map(move |w| (idx, w)))
    }

    /// First workout with the given id, searched week by week.
    pub fn find_workout(&self, workout_id: &str) -> Option<&Workout> {
        self.all_workouts()
            .map(|(_, w)| w)
            .find(|w| w.id == workout_id)
    }

    fn find_workout_mut(&mut self, workout_id: &str) -> Option<&mut Workout> {
        self.weeks
            .iter_mut()
            .flat_map(|week| week.workouts.iter_mut())
            .find(|w| w.id == workout_id)
    }

    /// Mark the first workout with this id completed. Returns whether one matched.
    pub fn mark_completed(&mut self, workout_id: &str) -> bool {
        match self.find_workout_mut(workout_id) {
            Some(workout) => {
                workout.is_completed = true;
                true
            }
            None => false,
        }
    }

    /// Flip the completion flag of a workout. Returns the new state.
    pub fn toggle_completion(&mut self, workout_id: &str) -> Result<bool, PlanError> {
        let workout = self
            .find_workout_mut(workout_id)
            .ok_or_else(|| PlanError::WorkoutNotFound(workout_id.to_string()))?;
        workout.is_completed = !workout.is_completed;
        Ok(workout.is_completed)
    }

    /// Save an edited workout into a week, replacing by id or appending.
    pub fn upsert_workout(
        &mut self,
        week_idx: usize,
        mut workout: Workout,
    ) -> Result<(), PlanError> {
        workout.recompute_totals();
        let week = self.week_mut(week_idx)?;
        match week.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => *existing = workout,
            None => week.workouts.push(workout),
        }
        Ok(())
    }

    /// Remove a workout from a week.
    pub fn remove_workout(
        &mut self,
        week_idx: usize,
        workout_id: &str,
    ) -> Result<Workout, PlanError> {
        let week = self.week_mut(week_idx)?;
        let position = week.workouts
            .iter()
            .position(|w| w.id == workout_id)
            .ok_or_else(|| PlanError::WorkoutNotFound(workout_id.to_string()))?;
        Ok(week.workouts.remove(position))
    }

    /// Edit a workout in place, then refresh its totals.
    pub fn update_workout<F>(
        &mut self,
        week_idx: usize,
        workout_id: &str,
        mutator: F,
    ) -> Result<(), PlanError>
    where
        F: FnOnce(&mut Workout),
    {
        let workout = self
            .week_mut(week_idx)?
            .workouts
            .iter_mut()
            .find(|w| w.id == workout_id)
            .ok_or_else(|| PlanError::WorkoutNotFound(workout_id.to_string()))?;
        mutator(workout);
        workout.recompute_totals();
        Ok(())
    }

    /// Edit one block of a workout in place.
    pub fn update_block<F>(
        &mut self,
        week_idx: usize,
        workout_id: &str,
        block_id: &str,
        mutator: F,
    ) -> Result<(), PlanError>
    where
        F: FnOnce(&mut WorkoutBlock),
    {
        let mut found = false;
        self.update_workout(week_idx, workout_id, |workout| {
            if let Some(block) = workout.block_mut(block_id) {
                mutator(block);
                found = true;
            }
        })?;

        if found {
            Ok(())
        } else {
            Err(PlanError::BlockNotFound(block_id.to_string()))
        }
    }

    /// Edit one step of a workout in place.
    pub fn update_step<F>(
        &mut self,
        week_idx: usize,
        workout_id: &str,
        block_id: &str,
        step_id: &str,
        mutator: F,
    ) -> Result<(), PlanError>
    where
        F: FnOnce(&mut WorkoutStep),
    {
        let mut step_found = false;
        self.update_block(week_idx, workout_id, block_id, |block| {
            if let Some(step) = block.step_mut(step_id) {
                mutator(step);
                step_found = true;
            }
        })?;

        if step_found {
            Ok(())
        } else {
            Err(PlanError::StepNotFound(step_id.to_string()))
        }
    }

    /// Replace or clear the reference race.
    pub fn set_reference_race(&mut self, race: Option<ReferenceRace>) {
        self.reference_race = race;
    }
}

/// Plan editing errors.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Week index out of range: {0}")]
    WeekOutOfRange(usize),

    #[error("Workout not found: {0}")]
    WorkoutNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Step not found: {0}")]
    StepNotFound(String),
}
