//! Unit tests for pace and unit arithmetic.

use runflow::metrics::pace::{from_display, pace_to_seconds, seconds_to_pace};
use runflow::metrics::{format_display_value, format_elapsed, format_pace_display, pace_from};
use runflow::workouts::{DisplayUnit, TargetType};

#[test]
fn test_metre_display_round_trip() {
    for km in [0.2, 0.4, 0.8, 1.0, 1.609, 5.0, 12.345] {
        let shown = format_display_value(km, TargetType::Distance, Some(DisplayUnit::M));
        let metres: f64 = shown.trim_end_matches('m').parse().unwrap();
        let back = from_display(metres, TargetType::Distance, Some(DisplayUnit::M));
        assert!((back - km).abs() <= 1e-3, "{} -> {} -> {}", km, shown, back);
    }
}

#[test]
fn test_pace_string_idempotence() {
    for minutes in 2..12 {
        for seconds in (0..60).step_by(7) {
            let pace = format!("{}:{:02}", minutes, seconds);
            assert_eq!(seconds_to_pace(pace_to_seconds(&pace)), pace);
        }
    }
}

#[test]
fn test_malformed_paces_degrade_to_zero() {
    assert_eq!(pace_to_seconds(""), 0.0);
    assert_eq!(pace_to_seconds("abc"), 0.0);
    assert_eq!(pace_to_seconds("4:xx"), 0.0);
    assert_eq!(pace_to_seconds("1:2:3:4"), 0.0);
}

#[test]
fn test_no_pace_without_distance_or_time() {
    assert_eq!(pace_from(0.0, 300.0), None);
    assert_eq!(pace_from(1.0, 0.0), None);
    assert_eq!(pace_from(-1.0, 300.0), None);
    assert_eq!(pace_from(1.0, 300.0), Some("5:00".to_string()));
}

#[test]
fn test_display_formats() {
    assert_eq!(format_display_value(1.5, TargetType::Time, Some(DisplayUnit::Sec)), "90s");
    assert_eq!(format_display_value(5.0, TargetType::Distance, None), "5km");
    assert_eq!(format_pace_display("4:30"), "4'30''");
    assert_eq!(format_elapsed(59), "00:59");
    assert_eq!(format_elapsed(3725), "1:02:05");
}
