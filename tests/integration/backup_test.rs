//! Integration tests for backup export and import.

use chrono::{TimeZone, Utc};
use runflow::recording::{Feeling, RunLog};
use runflow::storage::backup::{export_to_dir, read_backup};
use runflow::storage::{BackupData, BackupError};
use runflow::{AppState, RunningPlan, Shoe};

fn populated_state() -> AppState {
    let start = Utc.with_ymd_and_hms(2024, 3, 4, 7, 0, 0).unwrap();
    AppState {
        plan: Some(RunningPlan::new(
            "Base".to_string(),
            "Half".to_string(),
            "Advanced".to_string(),
            4,
            start,
        )),
        logs: vec![
            RunLog::manual(8.0, 2640, Feeling::Good, Some("hills".to_string()), None, start),
            RunLog::manual(12.0, 4200, Feeling::Tired, None, None, start),
        ],
        shoes: vec![Shoe::new("On", "Cloudmonster", 700.0, start)],
    }
}

#[test]
fn test_export_then_import_into_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 21, 5, 0).unwrap();
    let state = populated_state();

    let path = export_to_dir(&state, dir.path(), "runflow_backup", now)
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str(),
        Some("runflow_backup_20240601_2105.json")
    );

    let backup = read_backup(&path).unwrap();
    assert_eq!(backup.version, 1);
    assert_eq!(backup.timestamp, now);

    let mut restored = AppState::default();
    restored.import_backup(backup);
    assert_eq!(restored, state);
}

#[test]
fn test_logs_only_backup_keeps_plan_and_shoes() {
    let mut state = populated_state();
    let plan = state.plan.clone();
    let shoes = state.shoes.clone();

    let backup = BackupData::from_json(r#"{"version": 1, "timestamp": 1717275900000, "logs": []}"#)
        .unwrap();
    state.import_backup(backup);

    assert!(state.logs.is_empty());
    assert_eq!(state.plan, plan);
    assert_eq!(state.shoes, shoes);
}

#[test]
fn test_original_app_backup_imports() {
    let json = r#"{
        "version": 1,
        "timestamp": 1717275900000,
        "plan": null,
        "logs": [{
            "id": "l1",
            "date": 1717200000000,
            "distanceKm": 10,
            "durationSec": 3000,
            "pace": "5:00",
            "feeling": "good",
            "structuredData": {
                "linkedWorkoutId": "w9",
                "segments": [
                    {"stepType": "run", "actualDistance": 10, "actualDuration": 3000, "actualPace": "5:00"}
                ],
                "avgPace": "5:00"
            }
        }],
        "shoes": [{
            "id": "s1",
            "brand": "Hoka",
            "model": "Mach 6",
            "distance": 320.5,
            "maxDistance": 800,
            "isActive": true,
            "purchaseDate": 1704067200000
        }]
    }"#;

    let mut state = AppState::default();
    state.import_backup(BackupData::from_json(json).unwrap());

    assert!(state.plan.is_none());
    assert_eq!(state.logs[0].linked_workout_id(), Some("w9"));
    assert_eq!(state.shoes[0].display_name(), "Hoka Mach 6");
    assert!((state.shoes[0].wear_percent() - 40.0625).abs() < 1e-9);
}

#[test]
fn test_unreadable_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(read_backup(&path), Err(BackupError::InvalidJson(_))));
    assert!(matches!(
        read_backup(&dir.path().join("missing.json")),
        Err(BackupError::IoError(_))
    ));
}
