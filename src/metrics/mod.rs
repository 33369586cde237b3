//! Metrics module for pace arithmetic and intensity zones.

pub mod pace;
pub mod zones;

pub use pace::{
    format_display_value, format_elapsed, format_pace_display, pace_from, pace_to_seconds,
    round_to, seconds_to_pace, FALLBACK_PACE_SECONDS_PER_KM,
};
pub use zones::{
    threshold_pace, IntensityZone, PlanZoneReport, WeeklyLoad, ZoneBoundaries, ZoneTotals,
};
