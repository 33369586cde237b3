//! RunFlow - Running Training Companion
//!
//! Plans multi-week running programs, breaks workouts into structured blocks
//! and steps, logs executed runs segment by segment, tracks shoe mileage and
//! derives pace-zone analytics from a reference race.

pub mod app;
pub mod gear;
pub mod metrics;
pub mod plan;
pub mod recording;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use app::AppState;
pub use gear::Shoe;
pub use plan::RunningPlan;
pub use recording::{RunLog, WorkoutLogger};
pub use storage::Database;
pub use workouts::Workout;
