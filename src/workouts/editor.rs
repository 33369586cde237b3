//! Editing operations on workout structure.
//!
//! Step toggles, display-unit editing, block builders and block/step list
//! manipulation. Every operation that changes the planned load refreshes the
//! workout's cached totals.

use crate::metrics::pace::{format_display_value, format_pace_display, from_display, to_display};
use crate::workouts::types::{
    BlockKind, DisplayUnit, RestType, StepKind, TargetType, Workout, WorkoutBlock, WorkoutError,
    WorkoutStep,
};

/// Default value after switching a step to a time target (minutes).
const DEFAULT_TIME_TARGET_MIN: f64 = 5.0;

/// Default value after switching a step to a distance target (km).
const DEFAULT_DISTANCE_TARGET_KM: f64 = 1.0;

/// Switch a step between distance and time targets.
///
/// This resets the value instead of converting it: a faithful conversion
/// would need a pace the step may not have.
pub fn toggle_target_type(step: &mut WorkoutStep) {
    match step.target_type {
        TargetType::Distance => {
            step.target_type = TargetType::Time;
            step.target_value = DEFAULT_TIME_TARGET_MIN;
            step.display_unit = Some(DisplayUnit::Min);
        }
        TargetType::Time => {
            step.target_type = TargetType::Distance;
            step.target_value = DEFAULT_DISTANCE_TARGET_KM;
            step.display_unit = Some(DisplayUnit::Km);
        }
    }
}

/// Cycle km <-> m or min <-> sec. The stored value is untouched.
pub fn toggle_display_unit(step: &mut WorkoutStep) {
    let current = crate::metrics::pace::effective_unit(step.target_type, step.display_unit);
    step.display_unit = Some(current.toggled());
}

/// The number an editor shows for this step in its current unit.
pub fn display_value(step: &WorkoutStep) -> f64 {
    to_display(step.target_value, step.target_type, step.display_unit)
}

/// Store a value typed in `unit` (or the step's current unit) as canonical km/min.
pub fn set_value_from_display(step: &mut WorkoutStep, value: f64, unit: Option<DisplayUnit>) {
    let unit = crate::metrics::pace::effective_unit(step.target_type, unit.or(step.display_unit));
    step.target_value = from_display(value, step.target_type, Some(unit));
    step.display_unit = Some(unit);
}

/// Step used when adding to an existing block.
pub fn default_step(kind: StepKind) -> WorkoutStep {
    match kind {
        StepKind::Recover => {
            WorkoutStep::time(StepKind::Recover, 2.0)
                .with_rest_type(RestType::Jog)
        }
        StepKind::Run => WorkoutStep::distance(StepKind::Run, 1.0).with_pace("05:00"),
        other => WorkoutStep::distance(other, 1.0),
    }
}

/// A single block with sensible defaults for its kind.
pub fn simple_block(kind: StepKind) -> WorkoutBlock {
    let step = match kind {
        StepKind::Warmup | StepKind::Cooldown => WorkoutStep::distance(kind, 1.0),
        StepKind::Recover => {
            WorkoutStep::time(StepKind::Recover, 2.0)
                .with_rest_type(RestType::Jog)
        }
        StepKind::Run => WorkoutStep::distance(StepKind::Run, 5.0).with_pace("06:00"),
        other => WorkoutStep::distance(other, 5.0),
    };
    WorkoutBlock::single(step)
}

/// Classic 4 x 400 m @ 4:30 with 90 s jog recoveries.
pub fn interval_block() -> WorkoutBlock {
    WorkoutBlock::repeat(
        4,
        vec![
            WorkoutStep::distance(StepKind::Run, 0.4)
                .with_pace("04:30")
                .with_unit(DisplayUnit::M),
            WorkoutStep::time(StepKind::Recover, 1.5)
                .with_unit(DisplayUnit::Sec)
                .with_rest_type(RestType::Jog),
        ],
    )
}

/// One-line summary of a block, e.g. `4×400m@4'30''/90s jg`.
pub fn block_preview(block: &WorkoutBlock) -> String {
    let Some(first) = block.steps.first() else {
        return String::new();
    };

    let target = |step: &WorkoutStep| {
        let value = format_display_value(step.target_value, step.target_type, step.display_unit);
        match step.target_pace.as_deref() {
            Some(pace) if !pace.is_empty() => format!("{}@{}", value, format_pace_display(pace)),
            _ => value,
        }
    };

    match block.kind {
        BlockKind::Single => target(first),
        BlockKind::Repeat => {
            let effort = block
                .steps
                .iter()
                .find(|s| s.kind.is_set_effort())
                .unwrap_or(first);
            let recovery = block
                .steps
                .iter()
                .find(|s| matches!(s.kind, StepKind::Recover | StepKind::Rest));

            let mut text = format!("{}×{}", block.repetitions(), target(effort));
            if let Some(recovery) = recovery {
                let suffix = match (recovery.kind, recovery.rest_type) {
                    (StepKind::Recover, Some(RestType::Rest)) | (StepKind::Rest, _) => "rest",
                    _ => "jg",
                };
                text.push_str(&format!(
                    "/{} {}",
                    format_display_value(
                        recovery.target_value,
                        recovery.target_type,
                        recovery.display_unit
                    ),
                    suffix
                ));
            }
            text
        }
    }
}

impl Workout {
    /// Append a block and refresh totals.
    pub fn push_block(&mut self, block: WorkoutBlock) {
        self.blocks.push(block);
        self.recompute_totals();
    }

    /// Remove the block at `index`.
    pub fn remove_block(&mut self, index: usize) -> Result<WorkoutBlock, WorkoutError> {
        if index >= self.blocks.len() {
            return Err(WorkoutError::BlockNotFound(index.to_string()));
        }
        let removed = self.blocks.remove(index);
        self.recompute_totals();
        Ok(removed)
    }

    /// Move a block to a new position (drag and drop).
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), WorkoutError> {
        if from >= self.blocks.len() {
            return Err(WorkoutError::BlockNotFound(from.to_string()));
        }
        let block = self.blocks.remove(from);
        let to = to.min(self.blocks.len());
        self.blocks.insert(to, block);
        Ok(())
    }

    /// Add a step to the block at `block_index`.
    pub fn add_step(&mut self, block_index: usize, step: WorkoutStep) -> Result<(), WorkoutError> {
        let block = self
            .blocks
            .get_mut(block_index)
            .ok_or_else(|| WorkoutError::BlockNotFound(block_index.to_string()))?;
        block.steps.push(step);
        self.recompute_totals();
        Ok(())
    }

    /// Remove a step. A block never becomes empty; remove the block instead.
    pub fn remove_step(
        &mut self,
        block_index: usize,
        step_index: usize,
    ) -> Result<WorkoutStep, WorkoutError> {
        let block = self
            .blocks
            .get_mut(block_index)
            .ok_or_else(|| WorkoutError::BlockNotFound(block_index.to_string()))?;
        if step_index >= block.steps.len() {
            return Err(WorkoutError::StepNotFound(step_index.to_string()));
        }
        if block.steps.len() == 1 {
            return Err(WorkoutError::EmptyBlock);
        }
        let removed = block.steps.remove(step_index);
        self.recompute_totals();
        Ok(removed)
    }

    /// Change the repeat count of a block. Single blocks stay at 1.
    pub fn set_repeats(&mut self, block_index: usize, repeats: u32) -> Result<(), WorkoutError> {
        let block = self
            .blocks
            .get_mut(block_index)
            .ok_or_else(|| WorkoutError::BlockNotFound(block_index.to_string()))?;
        block.repeats = match block.kind {
            BlockKind::Single => 1,
            BlockKind::Repeat => repeats.max(1),
        };
        self.recompute_totals();
        Ok(())
    }
}
