//! Pace-based intensity zones.
//!
//! A reference race is converted to a threshold pace with a distance-specific
//! correction factor, and three pace limits split running into four zones.
//! Planned steps are then classified and their distance aggregated per week
//! and per zone.

use serde::{Deserialize, Serialize};

use crate::metrics::pace::{pace_to_seconds, round_to};
use crate::plan::types::{ReferenceRace, RunningPlan, WeekPlan};
use crate::workouts::types::{StepKind, Workout, WorkoutStep};

const HALF_MARATHON_KM: f64 = 21.0975;
const MARATHON_KM: f64 = 42.195;

/// Distances within this many km of a half or full marathon count as one.
const LONG_RACE_TOLERANCE_KM: f64 = 1.0;

/// Marathon pace (sec/km) separating the two marathon correction factors.
const FAST_MARATHON_PACE: f64 = 270.0;

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to `#rrggbb` for chart renderers.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Training intensity zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityZone {
    /// Slower than the easy limit
    Easy,
    /// Marathon / tempo effort
    Tempo,
    /// Lactate threshold
    Threshold,
    /// Faster than threshold
    Interval,
}

impl IntensityZone {
    /// All zones, easiest first.
    pub const ALL: [IntensityZone; 4] = [
        IntensityZone::Easy,
        IntensityZone::Tempo,
        IntensityZone::Threshold,
        IntensityZone::Interval,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            IntensityZone::Easy => "Easy",
            IntensityZone::Tempo => "Marathon/Tempo",
            IntensityZone::Threshold => "Threshold",
            IntensityZone::Interval => "Anaerobic/Interval",
        }
    }

    /// Chart color.
    pub fn color(&self) -> Color {
        match self {
            IntensityZone::Easy => ZONE_COLORS[0],
            IntensityZone::Tempo => ZONE_COLORS[1],
            IntensityZone::Threshold => ZONE_COLORS[2],
            IntensityZone::Interval => ZONE_COLORS[3],
        }
    }

    /// Everything above easy counts as quality volume.
    pub fn is_quality(&self) -> bool {
        !matches!(self, IntensityZone::Easy)
    }
}

/// Threshold pace (sec/km) implied by a race result, or 0 without usable data.
pub fn threshold_pace(distance_km: f64, time: &str) -> f64 {
    let total_seconds = pace_to_seconds(time);
    if total_seconds <= 0.0 || distance_km <= 0.0 {
        return 0.0;
    }

    let input_pace = total_seconds / distance_km;

    if (distance_km - 5.0).abs() < f64::EPSILON {
        input_pace * 1.06
    } else if (distance_km - 10.0).abs() < f64::EPSILON {
        input_pace * 1.02
    } else if (distance_km - HALF_MARATHON_KM).abs() < LONG_RACE_TOLERANCE_KM {
        input_pace / 1.06
    } else if (distance_km - MARATHON_KM).abs() < LONG_RACE_TOLERANCE_KM {
        if input_pace < FAST_MARATHON_PACE {
            input_pace / 1.08
        } else {
            input_pace / 1.15
        }
    } else {
        input_pace
    }
}

/// Pace limits between the four zones, in sec/km (smaller is faster).
///
/// All fields are 0 when no reference race is available.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneBoundaries {
    /// Threshold pace
    pub t_pace: f64,
    /// Interval / threshold boundary (94% of T-pace)
    pub threshold_limit: f64,
    /// Threshold / tempo boundary (105% of T-pace)
    pub tempo_limit: f64,
    /// Tempo / easy boundary (120% of T-pace)
    pub easy_limit: f64,
}

impl ZoneBoundaries {
    /// Derive limits from a threshold pace.
    pub fn from_t_pace(t_pace: f64) -> Self {
        if t_pace <= 0.0 || !t_pace.is_finite() {
            return Self::default();
        }

        Self {
            t_pace,
            threshold_limit: t_pace * 0.94,
            tempo_limit: t_pace * 1.05,
            easy_limit: t_pace * 1.20,
        }
    }

    /// Derive limits from a reference race.
    pub fn from_reference(race: &ReferenceRace) -> Self {
        Self::from_t_pace(threshold_pace(race.distance, &race.time))
    }

    /// Whether pace-based classification is possible.
    pub fn is_available(&self) -> bool {
        self.t_pace > 0.0
    }

    /// Zone for a pace in sec/km.
    pub fn get_zone(&self, pace_seconds: f64) -> IntensityZone {
        if pace_seconds > self.easy_limit {
            IntensityZone::Easy
        } else if pace_seconds > self.tempo_limit {
            IntensityZone::Tempo
        } else if pace_seconds > self.threshold_limit {
            IntensityZone::Threshold
        } else {
            IntensityZone::Interval
        }
    }

    /// Classify a planned step. Non-running steps have no zone.
    pub fn classify(&self, step: &WorkoutStep) -> Option<IntensityZone> {
        if !step.kind.is_run_like() {
            return None;
        }

        let zone = match (step.kind, step.explicit_pace_seconds()) {
            (StepKind::Warmup | StepKind::Cooldown, _) => IntensityZone::Easy,
            (_, Some(pace)) if self.is_available() => self.get_zone(pace),
            (StepKind::Interval, _) => IntensityZone::Interval,
            (StepKind::Tempo, _) => IntensityZone::Tempo,
            _ => IntensityZone::Easy,
        };
        Some(zone)
    }
}

/// Kilometres accumulated per zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneTotals {
    pub easy: f64,
    pub tempo: f64,
    pub threshold: f64,
    pub interval: f64,
}

impl ZoneTotals {
    /// Add distance to a zone.
    pub fn add(&mut self, zone: IntensityZone, km: f64) {
        match zone {
            IntensityZone::Easy => self.easy += km,
            IntensityZone::Tempo => self.tempo += km,
            IntensityZone::Threshold => self.threshold += km,
            IntensityZone::Interval => self.interval += km,
        }
    }

    /// Distance in a zone.
    pub fn get(&self, zone: IntensityZone) -> f64 {
        match zone {
            IntensityZone::Easy => self.easy,
            IntensityZone::Tempo => self.tempo,
            IntensityZone::Threshold => self.threshold,
            IntensityZone::Interval => self.interval,
        }
    }

    /// Distance across all zones.
    pub fn total(&self) -> f64 {
        self.easy + self.tempo + self.threshold + self.interval
    }

    /// Distance above easy.
    pub fn quality(&self) -> f64 {
        self.tempo + self.threshold + self.interval
    }

    /// Share of the total in a zone (0-100).
    pub fn percent(&self, zone: IntensityZone) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        self.get(zone) / total * 100.0
    }

    /// Non-empty zones for a pie chart.
    pub fn breakdown(&self) -> Vec<(IntensityZone, f64)> {
        IntensityZone::ALL
            .iter()
            .map(|zone| (*zone, self.get(*zone)))
            .filter(|(_, km)| *km > 0.0)
            .collect()
    }
}

/// Easy vs quality volume for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyLoad {
    /// Chart label, e.g. `W1`
    pub label: String,
    /// Easy km (1 decimal)
    pub easy: f64,
    /// Tempo + threshold + interval km (1 decimal)
    pub quality: f64,
    /// Easy + quality km (1 decimal)
    pub total: f64,
}

/// Zone analytics for a whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanZoneReport {
    /// Limits used for classification
    pub boundaries: ZoneBoundaries,
    /// One entry per week, in plan order
    pub weekly: Vec<WeeklyLoad>,
    /// Per-zone totals across the plan
    pub totals: ZoneTotals,
}

impl PlanZoneReport {
    /// Analyse a plan against its own reference race (if any).
    pub fn from_plan(plan: &RunningPlan) -> Self {
        let boundaries = plan.reference_race
            .as_ref()
            .map(ZoneBoundaries::from_reference)
            .unwrap_or_default();
        Self::with_boundaries(plan, boundaries)
    }

    /// Analyse a plan against explicit limits.
    pub fn with_boundaries(plan: &RunningPlan, boundaries: ZoneBoundaries) -> Self {
        let mut totals = ZoneTotals::default();
        let weekly = plan.weeks
            .iter()
            .map(|week| {
                let week_totals = week_zone_totals(week, &boundaries);
                totals.easy += week_totals.easy;
                totals.tempo += week_totals.tempo;
                totals.threshold += week_totals.threshold;
                totals.interval += week_totals.interval;

                WeeklyLoad {
                    label: week.label(),
                    easy: round_to(week_totals.easy, 1),
                    quality: round_to(week_totals.quality(), 1),
                    total: round_to(week_totals.total(), 1),
                }
            })
            .collect();

        Self {
            boundaries,
            weekly,
            totals,
        }
    }

    /// Largest weekly total.
    pub fn peak_week(&self) -> f64 {
        self.weekly.iter().map(|w| w.total).fold(0.0, f64::max)
    }

    /// Mean weekly volume.
    pub fn average_week(&self) -> f64 {
        if self.weekly.is_empty() {
            return 0.0;
        }
        self.totals.total() / self.weekly.len() as f64
    }
}

/// Zone distances of one week.
pub fn week_zone_totals(week: &WeekPlan, boundaries: &ZoneBoundaries) -> ZoneTotals {
    let mut totals = ZoneTotals::default();
    for workout in &week.workouts {
        add_workout(&mut totals, workout, boundaries);
    }
    totals
}

fn add_workout(totals: &mut ZoneTotals, workout: &Workout, boundaries: &ZoneBoundaries) {
    // Free runs have no step detail and count as easy volume
    if !workout.is_structured() {
        totals.add(IntensityZone::Easy, workout.distance_km);
        return;
    }

    for block in &workout.blocks {
        let reps = block.repetitions() as f64;
        for step in &block.steps {
            if let Some(zone) = boundaries.classify(step) {
                totals.add(zone, step.planned_distance_km() * reps);
            }
        }
    }
}

/// Zone chart colors (easy, tempo, threshold, interval)
pub const ZONE_COLORS: [Color; 4] = [
    Color::new(74, 222, 128),  // Easy: Green
    Color::new(59, 130, 246),  // Tempo: Blue
    Color::new(249, 115, 22),  // Threshold: Orange
    Color::new(239, 68, 68),   // Interval: Red
];
