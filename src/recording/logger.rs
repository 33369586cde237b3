//! Execution logger for planned workouts.
//!
//! A planned workout is expanded into a flat list of [`LogSegment`]s with
//! actual values defaulted from the plan. The runner then corrects individual
//! segments or whole repeat groups, and the logger folds the result into a
//! [`RunLog`].

use chrono::{DateTime, Utc};

use crate::metrics::pace::{pace_from, round_to, seconds_to_pace};
use crate::recording::grouping::{group_contiguous, SegmentGroup};
use crate::recording::types::{
    Feeling, LogError, LogSegment, RunLog, StructuredLogData, ZERO_PACE,
};
use crate::workouts::types::{new_id, Workout};

/// Expand a workout into segments in execution order.
///
/// Repeat blocks are unrolled; every segment of a repeat block carries the
/// block id as its group id, and effort steps are labelled "set i/N".
pub fn expand_workout_to_segments(workout: &Workout) -> Vec<LogSegment> {
    let mut segments = Vec::new();

    for block in &workout.blocks {
        let reps = block.repetitions();
        let group_id = block.is_repeat().then(|| block.id.clone());

        for rep in 1..=reps {
            for step in &block.steps {
                let label = (block.is_repeat() && step.kind.is_set_effort())
                    .then(|| format!("set {}/{}", rep, reps));

                segments.push(LogSegment {
                    step_kind: step.kind,
                    actual_distance: round_to(step.planned_distance_km(), 3),
                    actual_duration: (step.planned_duration_min() * 60.0)
                        .round(),
                    actual_pace: seconds_to_pace(step.pace_seconds_per_km()),
                    rest_type: step.rest_type,
                    label,
                    group_id: group_id.clone(),
                });
            }
        }
    }

    segments
}

/// A single-field correction to a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentEdit {
    /// Kilometres
    Distance(f64),
    /// Seconds
    Duration(f64),
    /// "M:SS" per km, stored as typed
    Pace(String),
    /// Annotation
    Label(Option<String>),
}

impl SegmentEdit {
    /// Apply to one segment. Distance and duration edits re-pace the segment
    /// when both values are positive; otherwise the previous pace stays.
    pub fn apply(&self, segment: &mut LogSegment) {
        match self {
            SegmentEdit::Distance(km) => {
                segment.actual_distance = *km;
                refresh_pace(segment);
            }
            SegmentEdit::Duration(seconds) => {
                segment.actual_duration = *seconds;
                refresh_pace(segment);
            }
            SegmentEdit::Pace(pace) => segment.actual_pace = pace.clone(),
            SegmentEdit::Label(label) => segment.label = label.clone(),
        }
    }
}

fn refresh_pace(segment: &mut LogSegment) {
    if let Some(pace) = pace_from(segment.actual_distance, segment.actual_duration) {
        segment.actual_pace = pace;
    }
}

/// Edit the segment at `index`.
pub fn update_segment(
    segments: &mut [LogSegment],
    index: usize,
    edit: &SegmentEdit,
) -> Result<(), LogError> {
    let segment = segments
        .get_mut(index)
        .ok_or(LogError::SegmentOutOfRange(index))?;
    edit.apply(segment);
    Ok(())
}

/// Edit every segment of a group at once. Returns how many segments changed.
///
/// When the group contains any non-recover segment, its recover segments are
/// left alone so editing the set average never overwrites recoveries.
pub fn update_group_value(
    segments: &mut [LogSegment],
    group_id: &str,
    edit: &SegmentEdit,
) -> Result<usize, LogError> {
    let in_group = |s: &LogSegment| s.group_id.as_deref() == Some(group_id);

    if !segments.iter().any(|s| in_group(s)) {
        return Err(LogError::GroupNotFound(group_id.to_string()));
    }

    let has_efforts = segments
        .iter()
        .any(|s| in_group(s) && !s.step_kind.is_recover());

    let mut updated = 0;
    for segment in segments.iter_mut() {
        if segment.group_id.as_deref() != Some(group_id)
            || (has_efforts && segment.step_kind.is_recover())
        {
            continue;
        }
        edit.apply(segment);
        updated += 1;
    }

    Ok(updated)
}

/// Totals written to the run log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSummary {
    /// Sum of segment distances, 2 decimals
    pub distance_km: f64,
    /// Sum of segment durations
    pub duration_sec: u32,
    /// Pace over running segments, "0:00" without running distance
    pub avg_pace: String,
}

/// Fold segments into log totals.
pub fn summarize(segments: &[LogSegment]) -> LogSummary {
    let distance: f64 = segments.iter().map(|s| s.actual_distance).sum();
    let duration: f64 = segments.iter().map(|s| s.actual_duration).sum();

    let (run_distance, run_duration) = segments
        .iter()
        .filter(|s| s.is_run_like())
        .fold((0.0, 0.0), |(d, t), s| (d + s.actual_distance, t + s.actual_duration));

    let avg_pace = if run_distance > 0.0 {
        pace_from(run_distance, run_duration)
            .unwrap_or_else(|| ZERO_PACE.to_string())
    } else {
        ZERO_PACE.to_string()
    };

    LogSummary {
        distance_km: round_to(distance, 2),
        duration_sec: duration.max(0.0).round() as u32,
        avg_pace,
    }
}

/// How durations are typed into the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationInput {
    /// "M:SS"
    #[default]
    MinSec,
    /// Decimal minutes
    Minutes,
    /// Whole seconds
    Seconds,
}

impl DurationInput {
    /// Next input mode.
    pub fn cycled(self) -> Self {
        match self {
            DurationInput::MinSec => DurationInput::Seconds,
            DurationInput::Seconds => DurationInput::Minutes,
            DurationInput::Minutes => DurationInput::MinSec,
        }
    }

    /// Text shown in the input for a duration in seconds.
    pub fn format(self, seconds: f64) -> String {
        match self {
            DurationInput::MinSec => seconds_to_pace(seconds),
            DurationInput::Minutes => format!("{:.2}", seconds / 60.0),
            DurationInput::Seconds => format!("{}", seconds.max(0.0).round() as u64),
        }
    }

    /// Seconds for typed text, or `None` while the text is incomplete.
    pub fn parse(self, text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match self {
            DurationInput::MinSec => {
                let parts: Vec<&str> = text.split(':').collect();
                match parts.as_slice() {
                    [minutes, seconds] => {
                        Some(whole_number(minutes) * 60.0 + whole_number(seconds))
                    }
                    [whole] => Some(whole_number(whole)),
                    _ => None,
                }
            }
            DurationInput::Minutes => Some(decimal_number(text) * 60.0),
            DurationInput::Seconds => Some(decimal_number(text)),
        }
    }
}

/// Digits typed into a duration field; anything else counts as 0.
fn whole_number(text: &str) -> f64 {
    text.trim().parse::<u64>().map(|n| n as f64).unwrap_or(0.0)
}

/// Non-negative finite number, or 0.
fn decimal_number(text: &str) -> f64 {
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.min(f64::MAX / 60.0))
        .unwrap_or(0.0)
}

/// Logging session for one planned workout.
#[derive(Debug, Clone)]
pub struct WorkoutLogger {
    workout_id: String,
    segments: Vec<LogSegment>,
    feeling: Feeling,
    notes: String,
    shoe_id: Option<String>,
    duration_input: DurationInput,
}

impl WorkoutLogger {
    /// Start logging a workout, optionally preselecting a shoe.
    pub fn new(workout: &Workout, default_shoe: Option<&str>) -> Self {
        let segments = expand_workout_to_segments(workout);
        tracing::debug!(
            "Logging workout {} with {} segments",
            workout.id,
            segments.len()
        );

        Self {
            workout_id: workout.id.clone(),
            segments,
            feeling: Feeling::default(),
            notes: String::new(),
            shoe_id: default_shoe.map(str::to_string),
            duration_input: DurationInput::default(),
        }
    }

    /// Segments in execution order.
    pub fn segments(&self) -> &[LogSegment] {
        &self.segments
    }

    /// Display groups of the current segments.
    pub fn groups(&self) -> Vec<SegmentGroup<'_>> {
        group_contiguous(&self.segments)
    }

    /// Edit one segment.
    pub fn update_segment(&mut self, index: usize, edit: SegmentEdit) -> Result<(), LogError> {
        update_segment(&mut self.segments, index, &edit)
    }

    /// Edit a whole group.
    pub fn update_group(&mut self, group_id: &str, edit: SegmentEdit) -> Result<usize, LogError> {
        update_group_value(&mut self.segments, group_id, &edit)
    }

    /// Edit a duration from typed text in the current input mode.
    ///
    /// Incomplete text is ignored.
    pub fn update_duration_text(&mut self, index: usize, text: &str) -> Result<(), LogError> {
        match self.duration_input.parse(text) {
            Some(seconds) => self.update_segment(index, SegmentEdit::Duration(seconds)),
            None => Ok(()),
        }
    }

    /// Current duration input mode.
    pub fn duration_input(&self) -> DurationInput {
        self.duration_input
    }

    /// Switch the duration input mode.
    pub fn cycle_duration_input(&mut self) {
        self.duration_input = self.duration_input.cycled();
    }

    /// Set the perceived effort.
    pub fn set_feeling(&mut self, feeling: Feeling) {
        self.feeling = feeling;
    }

    /// Set the notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    /// Select or clear the shoe.
    pub fn set_shoe(&mut self, shoe_id: Option<&str>) {
        self.shoe_id = shoe_id.map(str::to_string);
    }

    /// Current totals.
    pub fn summary(&self) -> LogSummary {
        summarize(&self.segments)
    }

    /// Build the run log. Validation happens when the log is saved.
    pub fn finish(self, now: DateTime<Utc>) -> RunLog {
        let summary = summarize(&self.segments);
        tracing::debug!(
            "Finished logging workout {}: {} km in {} s",
            self.workout_id,
            summary.distance_km,
            summary.duration_sec
        );

        RunLog {
            id: new_id(),
            date: now,
            distance_km: summary.distance_km,
            duration_sec: summary.duration_sec,
            pace: summary.avg_pace.clone(),
            feeling: self.feeling,
            notes: Some(self.notes).filter(|n| !n.trim().is_empty()),
            shoe_id: self.shoe_id.filter(|s| !s.is_empty()),
            structured_data: Some(StructuredLogData {
                linked_workout_id: self.workout_id,
                segments: self.segments,
                avg_pace: summary.avg_pace,
            }),
        }
    }
}
