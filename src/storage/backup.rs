//! Backup export and import.
//!
//! A backup is a single JSON document holding any of the three state slots.
//! Partial backups are legal: absent (or null) fields leave the current
//! state untouched on import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app::AppState;
use crate::gear::Shoe;
use crate::plan::RunningPlan;
use crate::recording::RunLog;

/// Version written into new backups.
pub const BACKUP_VERSION: u32 = 1;

/// Backup payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Export time
    #[serde(default = "epoch", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Current plan; `null` in an export without a plan
    #[serde(default)]
    pub plan: Option<RunningPlan>,
    /// Run logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<RunLog>>,
    /// Shoes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoes: Option<Vec<Shoe>>,
}

fn default_version() -> u32 {
    BACKUP_VERSION
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl BackupData {
    /// Snapshot the full state.
    pub fn from_state(state: &AppState, now: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_VERSION,
            timestamp: now,
            plan: state.plan.clone(),
            logs: Some(state.logs.clone()),
            shoes: Some(state.shoes.clone()),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, BackupError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BackupError::SerializeError(e.to_string()))
    }

    /// Parse a backup document. Anything but a JSON object is rejected.
    pub fn from_json(text: &str) -> Result<Self, BackupError> {
        let value: serde_json::Value =
            serde_json::from_str(text)
                .map_err(|e| BackupError::InvalidJson(e.to_string()))?;

        if !value.is_object() {
            return Err(BackupError::InvalidFormat(
                "Backup must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| BackupError::InvalidFormat(e.to_string()))
    }

    /// Whether the backup carries anything to import.
    pub fn is_empty(&self) -> bool {
        self.plan.is_none() && self.logs.is_none() && self.shoes.is_none()
    }
}

/// Backup file name, e.g. `runflow_backup_20240304_0730.json`.
pub fn backup_file_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.json", prefix, now.format("%Y%m%d_%H%M"))
}

/// Write a backup of `state` into `dir`. Returns the file path.
pub fn export_to_dir(
    state: &AppState,
    dir: &Path,
    prefix: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, BackupError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| BackupError::IoError(e.to_string()))?;

    let path = dir.join(backup_file_name(prefix, now));
    let json = BackupData::from_state(state, now).to_json()?;
    std::fs::write(&path, json)
        .map_err(|e| BackupError::IoError(e.to_string()))?;

    tracing::info!("Exported backup to {}", path.display());
    Ok(path)
}

/// Read a backup file.
pub fn read_backup(path: &Path) -> Result<BackupData, BackupError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| BackupError::IoError(e.to_string()))?;
    BackupData::from_json(&text)
}

/// Backup errors.
#[derive(Debug, Error, PartialEq)]
pub enum BackupError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid backup format: {0}")]
    InvalidFormat(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
