//! Workout module for structured running sessions.

pub mod editor;
pub mod types;

pub use editor::{
    block_preview, default_step, display_value, interval_block, set_value_from_display,
    simple_block, toggle_display_unit, toggle_target_type,
};
pub use types::{
    new_id, BlockKind, DisplayUnit, PlannedTotals, RestType, RunType, StepKind, TargetType,
    Workout, WorkoutBlock, WorkoutError, WorkoutStep,
};
