//! Workout types and enums.
//!
//! A [`Workout`] is one day's planned session made of [`WorkoutBlock`]s, each
//! holding ordered [`WorkoutStep`]s. Target values are always stored in
//! canonical units: kilometres for distance targets and minutes for time
//! targets. The display unit is a presentation preference only.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::pace::{pace_to_seconds, round_to, FALLBACK_PACE_SECONDS_PER_KM};

/// Generate a fresh opaque identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Kind of effort a step asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Easy running before the main set
    Warmup,
    /// Steady running
    Run,
    /// Comfortably hard sustained effort
    Tempo,
    /// Fast repetition
    Interval,
    /// Recovery between efforts (jog or standing)
    Recover,
    /// Full stop
    Rest,
    /// Easy running after the main set
    Cooldown,
}

impl StepKind {
    /// Kinds that count as running when summarising a log or classifying zones.
    pub fn is_run_like(self) -> bool {
        match self {
            StepKind::Run
            | StepKind::Interval
            | StepKind::Tempo
            | StepKind::Warmup
            | StepKind::Cooldown => true,
            StepKind::Recover | StepKind::Rest => false,
        }
    }

    /// Kinds that get a "set i/N" label inside a repeat block.
    pub fn is_set_effort(self) -> bool {
        match self {
            StepKind::Run | StepKind::Interval | StepKind::Tempo => true,
            StepKind::Warmup | StepKind::Cooldown | StepKind::Recover | StepKind::Rest => false,
        }
    }

    /// Whether this is a recovery step.
    pub fn is_recover(self) -> bool {
        matches!(self, StepKind::Recover)
    }

    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            StepKind::Warmup => "Warm-up",
            StepKind::Run => "Run",
            StepKind::Tempo => "Tempo",
            StepKind::Interval => "Interval",
            StepKind::Recover => "Recover",
            StepKind::Rest => "Rest",
            StepKind::Cooldown => "Cool-down",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which field of a step is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Target value is kilometres
    Distance,
    /// Target value is minutes
    Time,
}

impl TargetType {
    /// Canonical display unit for this target type.
    pub fn default_unit(self) -> DisplayUnit {
        match self {
            TargetType::Distance => DisplayUnit::Km,
            TargetType::Time => DisplayUnit::Min,
        }
    }

    /// The other target type.
    pub fn toggled(self) -> Self {
        match self {
            TargetType::Distance => TargetType::Time,
            TargetType::Time => TargetType::Distance,
        }
    }
}

/// Presentation unit for a step target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Km,
    M,
    Min,
    Sec,
}

impl DisplayUnit {
    /// Whether this unit can display a value of the given target type.
    pub fn is_compatible_with(self, target_type: TargetType) -> bool {
        match self {
            DisplayUnit::Km | DisplayUnit::M => target_type == TargetType::Distance,
            DisplayUnit::Min | DisplayUnit::Sec => target_type == TargetType::Time,
        }
    }

    /// Alternate unit for the same target type (km <-> m, min <-> sec).
    pub fn toggled(self) -> Self {
        match self {
            DisplayUnit::Km => DisplayUnit::M,
            DisplayUnit::M => DisplayUnit::Km,
            DisplayUnit::Min => DisplayUnit::Sec,
            DisplayUnit::Sec => DisplayUnit::Min,
        }
    }
}

/// Whether a recovery is jogged or static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestType {
    Jog,
    Rest,
}

/// Repetition semantics of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Steps run once
    Single,
    /// Steps run `repeats` times in order
    Repeat,
}

/// Kind of planned session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    #[default]
    #[serde(alias = "轻松跑")]
    Easy,
    #[serde(alias = "节奏跑")]
    Tempo,
    #[serde(alias = "间歇跑")]
    Interval,
    #[serde(alias = "长距离")]
    Long,
    #[serde(alias = "恢复跑")]
    Recovery,
    /// No training scheduled
    #[serde(alias = "休息日")]
    Rest,
}

impl RunType {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            RunType::Easy => "Easy Run",
            RunType::Tempo => "Tempo Run",
            RunType::Interval => "Intervals",
            RunType::Long => "Long Run",
            RunType::Recovery => "Recovery Run",
            RunType::Rest => "Rest Day",
        }
    }

    /// Whether this is the "no training" sentinel.
    pub fn is_rest(&self) -> bool {
        matches!(self, RunType::Rest)
    }
}

impl std::fmt::Display for RunType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One atomic planned target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStep {
    /// Unique identifier
    pub id: String,
    /// Kind of effort
    #[serde(alias = "type")]
    pub kind: StepKind,
    /// Which field is authoritative
    pub target_type: TargetType,
    /// Kilometres for distance targets, minutes for time targets (0 = unset)
    #[serde(default)]
    pub target_value: f64,
    /// Presentation preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_unit: Option<DisplayUnit>,
    /// Expected pace, "M:SS" per km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pace: Option<String>,
    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Jog or static recovery (recover steps only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_type: Option<RestType>,
}

impl WorkoutStep {
    /// Create a step with the canonical display unit and no pace.
    pub fn new(kind: StepKind, target_type: TargetType, target_value: f64) -> Self {
        Self {
            id: new_id(),
            kind,
            target_type,
            target_value,
            display_unit: Some(target_type.default_unit()),
            target_pace: None,
            description: None,
            rest_type: None,
        }
    }

    /// Distance step in kilometres.
    pub fn distance(kind: StepKind, km: f64) -> Self {
        Self::new(kind, TargetType::Distance, km)
    }

    /// Time step in minutes.
    pub fn time(kind: StepKind, minutes: f64) -> Self {
        Self::new(kind, TargetType::Time, minutes)
    }

    /// Set the target pace.
    pub fn with_pace(mut self, pace: &str) -> Self {
        self.target_pace = Some(pace.to_string());
        self
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: DisplayUnit) -> Self {
        self.display_unit = Some(unit);
        self
    }

    /// Set the recovery type.
    pub fn with_rest_type(mut self, rest_type: RestType) -> Self {
        self.rest_type = Some(rest_type);
        self
    }

    /// Target pace in seconds per km, or the 6:00 fallback when absent or unparsable.
    pub fn pace_seconds_per_km(&self) -> f64 {
        let parsed = self
            .target_pace
            .as_deref()
            .map(pace_to_seconds)
            .unwrap_or(0.0);

        if parsed > 0.0 {
            parsed
        } else {
            FALLBACK_PACE_SECONDS_PER_KM
        }
    }

    /// Parsed target pace in seconds per km, without fallback.
    pub fn explicit_pace_seconds(&self) -> Option<f64> {
        self.target_pace
            .as_deref()
            .map(pace_to_seconds)
            .filter(|p| *p > 0.0)
    }

    /// Planned distance of one execution of this step (km).
    pub fn planned_distance_km(&self) -> f64 {
        match self.target_type {
            TargetType::Distance => self.target_value,
            TargetType::Time => self.target_value * 60.0 / self.pace_seconds_per_km(),
        }
    }

    /// Planned duration of one execution of this step (minutes).
    pub fn planned_duration_min(&self) -> f64 {
        match self.target_type {
            TargetType::Time => self.target_value,
            TargetType::Distance => self.target_value * self.pace_seconds_per_km() / 60.0,
        }
    }
}

/// A unit of repetition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutBlock {
    /// Unique identifier
    pub id: String,
    /// Single or repeat
    #[serde(alias = "type")]
    pub kind: BlockKind,
    /// Number of repetitions (1 for single blocks)
    #[serde(default = "default_repeats")]
    pub repeats: u32,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<WorkoutStep>,
}

fn default_repeats() -> u32 {
    1
}

impl WorkoutBlock {
    /// A single block holding one step.
    pub fn single(step: WorkoutStep) -> Self {
        Self {
            id: new_id(),
            kind: BlockKind::Single,
            repeats: 1,
            steps: vec![step],
        }
    }

    /// A repeat block.
    pub fn repeat(repeats: u32, steps: Vec<WorkoutStep>) -> Self {
        Self {
            id: new_id(),
            kind: BlockKind::Repeat,
            repeats: repeats.max(1),
            steps,
        }
    }

    /// How many times the steps execute.
    pub fn repetitions(&self) -> u32 {
        match self.kind {
            BlockKind::Single => 1,
            BlockKind::Repeat => self.repeats.max(1),
        }
    }

    /// Whether this block repeats.
    pub fn is_repeat(&self) -> bool {
        self.kind == BlockKind::Repeat
    }

    /// Planned distance across all repetitions (km).
    pub fn planned_distance_km(&self) -> f64 {
        let per_rep: f64 = self.steps
            .iter()
            .map(WorkoutStep::planned_distance_km)
            .sum();
        per_rep * self.repetitions() as f64
    }

    /// Planned duration across all repetitions (minutes).
    pub fn planned_duration_min(&self) -> f64 {
        let per_rep: f64 = self.steps
            .iter()
            .map(WorkoutStep::planned_duration_min)
            .sum();
        per_rep * self.repetitions() as f64
    }

    /// Find a step by id.
    pub fn step_mut(&mut self, step_id: &str) -> Option<&mut WorkoutStep> {
        self.steps.iter_mut().find(|s| s.id == step_id)
    }
}

/// Exact planned totals of a structured workout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlannedTotals {
    /// Kilometres
    pub distance_km: f64,
    /// Minutes
    pub duration_min: f64,
}

/// One day's planned session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Unique identifier
    pub id: String,
    /// 0 = Monday .. 6 = Sunday within the owning week
    #[serde(default)]
    pub day_offset: u8,
    /// Session type
    #[serde(default, alias = "type")]
    pub kind: RunType,
    /// Short title
    #[serde(default)]
    pub title: String,
    /// Coaching note
    #[serde(default)]
    pub description: String,
    /// Set by logging or manual toggle
    #[serde(default)]
    pub is_completed: bool,
    /// Cached total distance (km)
    #[serde(default)]
    pub distance_km: f64,
    /// Cached total duration (minutes)
    #[serde(default)]
    pub duration_min: f64,
    /// Structure; empty for a free run
    #[serde(default)]
    pub blocks: Vec<WorkoutBlock>,
}

impl Workout {
    /// Create an unstructured workout.
    pub fn new(day_offset: u8, kind: RunType, title: String) -> Self {
        Self {
            id: new_id(),
            day_offset,
            kind,
            title,
            description: String::new(),
            is_completed: false,
            distance_km: 0.0,
            duration_min: 0.0,
            blocks: Vec::new(),
        }
    }

    /// Easy 5 km at 6:00 /km, the starting point when adding a workout to a day.
    pub fn new_default(day_offset: u8) -> Self {
        let mut workout = Self::new(day_offset, RunType::Easy, "New workout".to_string());
        workout.description = "Keep it relaxed".to_string();
        workout.blocks = vec![WorkoutBlock::single(
            WorkoutStep::distance(StepKind::Run, 5.0).with_pace("06:00"),
        )];
        workout.recompute_totals();
        workout
    }

    /// Whether the workout has block structure.
    pub fn is_structured(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Exact totals over all blocks and repetitions.
    pub fn planned_totals(&self) -> PlannedTotals {
        self.blocks
            .iter()
            .fold(PlannedTotals::default(), |acc, block| PlannedTotals {
                distance_km: acc.distance_km + block.planned_distance_km(),
                duration_min: acc.duration_min + block.planned_duration_min(),
            })
    }

    /// Refresh the cached `distance_km` / `duration_min` from the blocks.
    ///
    /// Free runs keep their manually entered totals.
    pub fn recompute_totals(&mut self) {
        if !self.is_structured() {
            return;
        }

        let totals = self.planned_totals();
        self.distance_km = round_to(totals.distance_km, 1);
        self.duration_min = totals.duration_min.round();
    }

    /// Find a block by id.
    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut WorkoutBlock> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }
}

/// Errors related to workout editing.
#[derive(Debug, Error, PartialEq)]
pub enum WorkoutError {
    /// Block index or id does not exist
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Step index or id does not exist
    #[error("Step not found: {0}")]
    StepNotFound(String),

    /// Removing the step would leave the block empty
    #[error("Block must keep at least one step")]
    EmptyBlock,
}
