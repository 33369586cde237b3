//! Plan generation boundary.
//!
//! Drafting a plan is delegated to an external generative service behind the
//! [`PlanGenerator`] trait. This module owns the request shape, the prompt the
//! service receives, and the conversion of the service's JSON draft into a
//! complete [`RunningPlan`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::plan::types::RunningPlan;
use crate::workouts::types::{new_id, RunType, Workout};

/// Parameters for drafting a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Free-text goal, e.g. "first half marathon"
    pub goal: String,
    /// Runner level label
    pub level: String,
    /// Number of weeks
    pub weeks: u32,
    /// Running days per week (1-7)
    pub days_per_week: u8,
}

impl PlanRequest {
    /// Create a new request.
    pub fn new(goal: &str, level: &str, weeks: u32, days_per_week: u8) -> Self {
        Self {
            goal: goal.to_string(),
            level: level.to_string(),
            weeks,
            days_per_week,
        }
    }

    /// Check the request before calling out.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.goal.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "Goal must not be empty".to_string(),
            ));
        }
        if self.weeks == 0 {
            return Err(GenerationError::InvalidRequest(
                "Plan needs at least one week".to_string(),
            ));
        }
        if !(1..=7).contains(&self.days_per_week) {
            return Err(GenerationError::InvalidRequest(
                "Days per week must be between 1 and 7".to_string(),
            ));
        }
        Ok(())
    }

    /// Instructions sent to the generative service.
    pub fn prompt(&self) -> String {
        format!(
            "Create a detailed {}-week running plan for a {} level runner.\n\
             The goal is: {}.\n\
             The runner wants to run {} days per week.\n\
             For rest days, set distance and duration to 0 and type to 'rest'.\n\
             Ensure the plan progresses logically in intensity/volume.",
            self.weeks, self.level, self.goal, self.days_per_week
        )
    }
}

/// Workout as drafted by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftWorkout {
    #[serde(default)]
    pub day_offset: u8,
    #[serde(default, alias = "type")]
    pub kind: RunType,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub duration_min: f64,
    #[serde(default)]
    pub description: String,
}

/// Week as drafted by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftWeek {
    pub week_number: u32,
    #[serde(default)]
    pub workouts: Vec<DraftWorkout>,
}

/// The service's JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDraft {
    pub name: String,
    #[serde(default)]
    pub weeks: Vec<DraftWeek>,
}

impl PlanDraft {
    /// Parse the service's response text.
    pub fn from_json(text: &str) -> Result<Self, GenerationError> {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        serde_json::from_str(text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))
    }

    /// Turn the draft into a plan: ids assigned, nothing completed, start = `now`.
    ///
    /// Weeks are placed by week number; gaps and missing trailing weeks are
    /// filled with empty weeks so the plan always has `request.weeks` entries.
    pub fn into_plan(
        self,
        request: &PlanRequest,
        now: DateTime<Utc>,
    ) -> Result<RunningPlan, GenerationError> {
        if self.weeks.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "Draft contains no weeks".to_string(),
            ));
        }

        let mut plan = RunningPlan::new(
            self.name,
            request.goal.clone(),
            request.level.clone(),
            request.weeks,
            now,
        );

        for draft_week in self.weeks {
            let Some(index) = (draft_week.week_number as usize).checked_sub(1) else {
                tracing::warn!("Dropping draft week numbered 0");
                continue;
            };
            let Some(week) = plan.weeks.get_mut(index) else {
                tracing::warn!(
                    "Dropping draft week {} beyond requested {} weeks",
                    draft_week.week_number,
                    request.weeks
                );
                continue;
            };

            week.workouts = draft_week
                .workouts
                .into_iter()
                .filter(|w| w.day_offset <= 6)
                .map(draft_into_workout)
                .collect();
        }

        tracing::info!("Generated plan '{}' with {} weeks", plan.name, plan.total_weeks);
        Ok(plan)
    }
}

fn draft_into_workout(draft: DraftWorkout) -> Workout {
    Workout {
        id: new_id(),
        day_offset: draft.day_offset,
        kind: draft.kind,
        title: draft.kind.display_name().to_string(),
        description: draft.description,
        is_completed: false,
        distance_km: draft.distance_km.max(0.0),
        duration_min: draft.duration_min.max(0.0),
        blocks: Vec::new(),
    }
}

/// An external service that drafts plans.
pub trait PlanGenerator {
    /// Produce a complete plan or fail without side effects.
    fn generate(&self, request: &PlanRequest) -> Result<RunningPlan, GenerationError>;
}

/// Plan generation failures.
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API key not found")]
    MissingApiKey,

    #[error("Service unavailable: {0}")]
    Transport(String),

    #[error("No response from service")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
