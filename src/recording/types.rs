//! Recording types for logged runs.
//!
//! A [`RunLog`] is one completed activity. Structured runs carry the
//! [`LogSegment`]s expanded from the planned workout, in execution order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::pace::pace_from;
use crate::workouts::types::{new_id, RestType, StepKind};

/// Pace recorded when no pace can be computed.
pub const ZERO_PACE: &str = "0:00";

/// How the run felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Great,
    #[default]
    Good,
    Tired,
    Bad,
}

impl Feeling {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Feeling::Great => "Great",
            Feeling::Good => "Good",
            Feeling::Tired => "Tired",
            Feeling::Bad => "Bad",
        }
    }
}

/// One executed portion of a structured workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSegment {
    /// Kind of the originating step
    #[serde(alias = "stepType")]
    pub step_kind: StepKind,
    /// Kilometres
    #[serde(default)]
    pub actual_distance: f64,
    /// Seconds
    #[serde(default)]
    pub actual_duration: f64,
    /// "M:SS" per km
    #[serde(default)]
    pub actual_pace: String,
    /// Copied from the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_type: Option<RestType>,
    /// Human annotation such as "set 2/4"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Shared by segments expanded from one repeat block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl LogSegment {
    /// Create an ungrouped segment, pacing it from distance and duration.
    pub fn new(step_kind: StepKind, actual_distance: f64, actual_duration: f64) -> Self {
        Self {
            step_kind,
            actual_distance,
            actual_duration,
            actual_pace: pace_from(actual_distance, actual_duration)
                .unwrap_or_else(|| ZERO_PACE.to_string()),
            rest_type: None,
            label: None,
            group_id: None,
        }
    }

    /// Set the group id.
    pub fn in_group(mut self, group_id: &str) -> Self {
        self.group_id = Some(group_id.to_string());
        self
    }

    /// Whether this segment counts toward the average running pace.
    pub fn is_run_like(&self) -> bool {
        self.step_kind.is_run_like()
    }
}

/// Segment detail attached to a log of a planned workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredLogData {
    /// Planned workout this log executes
    pub linked_workout_id: String,
    /// Segments in execution order
    #[serde(default)]
    pub segments: Vec<LogSegment>,
    /// Average pace over running segments
    #[serde(default)]
    pub avg_pace: String,
}

/// One completed activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLog {
    /// Unique identifier
    pub id: String,
    /// When the run happened
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Total distance (km)
    #[serde(default)]
    pub distance_km: f64,
    /// Total duration (seconds)
    #[serde(default)]
    pub duration_sec: u32,
    /// Average pace "M:SS"
    #[serde(default)]
    pub pace: String,
    /// Perceived effort
    #[serde(default)]
    pub feeling: Feeling,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Shoe worn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoe_id: Option<String>,
    /// Segment detail for planned workouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredLogData>,
}

impl RunLog {
    /// Log a free run entered by hand or timed with the stopwatch.
    pub fn manual(
        distance_km: f64,
        duration_sec: u32,
        feeling: Feeling,
        notes: Option<String>,
        shoe_id: Option<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            date,
            distance_km,
            duration_sec,
            pace: pace_from(distance_km, duration_sec as f64)
                .unwrap_or_else(|| ZERO_PACE.to_string()),
            feeling,
            notes: notes.filter(|n| !n.trim().is_empty()),
            shoe_id: shoe_id.filter(|s| !s.is_empty()),
            structured_data: None,
        }
    }

    /// Check the log can be saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.distance_km.is_finite() && self.distance_km > 0.0) {
            return Err(ValidationError::NonPositiveDistance(self.distance_km));
        }
        Ok(())
    }

    /// Planned workout this log completes, if any.
    pub fn linked_workout_id(&self) -> Option<&str> {
        self.structured_data
            .as_ref()
            .map(|data| data.linked_workout_id.as_str())
    }

    /// Duration in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_sec as f64 / 3600.0
    }
}

/// Rejected user input.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("Shoe brand is required")]
    MissingBrand,

    #[error("Shoe model is required")]
    MissingModel,
}

/// Execution logger errors.
#[derive(Debug, Error, PartialEq)]
pub enum LogError {
    #[error("Segment index out of range: {0}")]
    SegmentOutOfRange(usize),

    #[error("Group not found: {0}")]
    GroupNotFound(String),
}
