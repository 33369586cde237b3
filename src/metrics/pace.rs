//! Pace and unit arithmetic.
//!
//! Distances are stored in kilometres and planned durations in minutes.
//! Paces are `"M:SS"` strings (minutes:seconds per kilometre). Parsing is
//! lenient: anything that does not look like a pace degrades to zero.

use crate::workouts::types::{DisplayUnit, TargetType};

/// Pace assumed for a step that carries no usable target pace (6:00 /km).
pub const FALLBACK_PACE_SECONDS_PER_KM: f64 = 360.0;

/// Parse `"M:SS"` or `"H:MM:SS"` into seconds.
///
/// Returns 0 for empty or malformed input.
pub fn pace_to_seconds(pace: &str) -> f64 {
    let pace = pace.trim();
    if pace.is_empty() {
        return 0.0;
    }

    let parts: Option<Vec<f64>> = pace
        .split(':')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect();

    let Some(parts) = parts else {
        return 0.0;
    };

    if parts.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return 0.0;
    }

    match parts.as_slice() {
        [minutes, seconds] => minutes * 60.0 + seconds,
        [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
        _ => 0.0,
    }
}

/// Format seconds as `"M:SS"`.
///
/// The total is rounded to the nearest second before splitting so the
/// seconds field never reads `60`. Non-finite or negative input formats as `"0:00"`.
pub fn seconds_to_pace(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Pace string for a distance/duration pair, or `None` when either side is not positive.
pub fn pace_from(distance_km: f64, duration_sec: f64) -> Option<String> {
    if distance_km > 0.0
        && duration_sec > 0.0
        && distance_km.is_finite()
        && duration_sec.is_finite()
    {
        Some(seconds_to_pace(duration_sec / distance_km))
    } else {
        None
    }
}

/// Display unit to use for a target type, falling back to the canonical unit
/// when the stored preference does not belong to that target type.
pub fn effective_unit(target_type: TargetType, unit: Option<DisplayUnit>) -> DisplayUnit {
    match unit {
        Some(unit) if unit.is_compatible_with(target_type) => unit,
        _ => target_type.default_unit(),
    }
}

/// Convert a canonical value (km or minutes) to the number shown in `unit`.
///
/// Metres and seconds are rounded to whole numbers.
pub fn to_display(value: f64, target_type: TargetType, unit: Option<DisplayUnit>) -> f64 {
    match effective_unit(target_type, unit) {
        DisplayUnit::M => (value * 1000.0).round(),
        DisplayUnit::Sec => (value * 60.0).round(),
        DisplayUnit::Km | DisplayUnit::Min => value,
    }
}

/// Convert a number typed in `unit` back to canonical km or minutes.
pub fn from_display(value: f64, target_type: TargetType, unit: Option<DisplayUnit>) -> f64 {
    match effective_unit(target_type, unit) {
        DisplayUnit::M => value / 1000.0,
        DisplayUnit::Sec => value / 60.0,
        DisplayUnit::Km | DisplayUnit::Min => value,
    }
}

/// Format a canonical target value with its unit suffix, e.g. `"400m"`, `"5km"`, `"90s"`.
pub fn format_display_value(
    value: f64,
    target_type: TargetType,
    unit: Option<DisplayUnit>,
) -> String {
    let unit = effective_unit(target_type, unit);
    let shown = to_display(value, target_type, Some(unit));
    match unit {
        DisplayUnit::Km => format!("{}km", shown),
        DisplayUnit::M => format!("{}m", shown as i64),
        DisplayUnit::Min => format!("{}min", shown),
        DisplayUnit::Sec => format!("{}s", shown as i64),
    }
}

/// Compact pace notation used on workout cards: `"4:30"` becomes `"4'30''"`.
pub fn format_pace_display(pace: &str) -> String {
    let mut parts = pace.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(minutes), Some(seconds), None) => match minutes.trim().parse::<u32>() {
            Ok(minutes) => format!("{}'{}''", minutes, seconds.trim()),
            Err(_) => pace.to_string(),
        },
        _ => pace.to_string(),
    }
}

/// Stopwatch notation: `"MM:SS"` below an hour, `"H:MM:SS"` above.
pub fn format_elapsed(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
