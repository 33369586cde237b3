//! Recording module for logged runs.

pub mod grouping;
pub mod history;
pub mod logger;
pub mod stopwatch;
pub mod types;

pub use grouping::{group_contiguous, GroupAverages, SegmentGroup, SetLabel};
pub use history::{distance_within, newest_first, recent_trend, HistoryTotals, TrendPoint};
pub use logger::{
    expand_workout_to_segments, summarize, update_group_value, update_segment, DurationInput,
    LogSummary, SegmentEdit, WorkoutLogger,
};
pub use stopwatch::{Stopwatch, StopwatchError, StopwatchStatus};
pub use types::{
    Feeling, LogError, LogSegment, RunLog, StructuredLogData, ValidationError, ZERO_PACE,
};
