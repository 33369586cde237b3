//! Application state and its mutation entry points.
//!
//! `AppState` owns the current plan, the run log collection and the shoe
//! collection. Every change to persisted data goes through a method here;
//! callers persist the result with [`crate::storage::Database::save_state`].

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::gear::Shoe;
use crate::plan::{GenerationError, RunningPlan, TodayFocus};
use crate::recording::{distance_within, HistoryTotals, RunLog, ValidationError};
use crate::storage::backup::BackupData;

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Current plan, if any
    #[serde(default)]
    pub plan: Option<RunningPlan>,
    /// All logged runs
    #[serde(default)]
    pub logs: Vec<RunLog>,
    /// All shoes
    #[serde(default)]
    pub shoes: Vec<Shoe>,
}

/// What an import changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOutcome {
    pub plan: bool,
    pub logs: bool,
    pub shoes: bool,
}

impl AppState {
    /// Record a finished run.
    ///
    /// Appends the log, adds its distance to the referenced shoe and marks
    /// the linked plan workout completed. Nothing changes if the log fails
    /// validation.
    pub fn save_run(&mut self, log: RunLog) -> Result<(), ValidationError> {
        log.validate()?;

        if let Some(shoe_id) = log.shoe_id.as_deref() {
            match self.shoes.iter_mut().find(|s| s.id == shoe_id) {
                Some(shoe) => shoe.add_distance(log.distance_km),
                None => tracing::warn!("Run references unknown shoe {}", shoe_id),
            }
        }

        if let (Some(plan), Some(workout_id)) = (self.plan.as_mut(), log.linked_workout_id()) {
            if plan.mark_completed(workout_id) {
                tracing::debug!("Marked workout {} completed", workout_id);
            }
        }

        tracing::info!(
            "Saved run: {:.2} km in {} s ({})",
            log.distance_km,
            log.duration_sec,
            log.pace
        );
        self.logs.push(log);
        Ok(())
    }

    /// Add a shoe or replace the one with the same id.
    pub fn save_shoe(&mut self, shoe: Shoe) -> Result<(), ValidationError> {
        shoe.validate()?;

        tracing::info!("Saved shoe {}", shoe.display_name());
        match self.shoes.iter_mut().find(|s| s.id == shoe.id) {
            Some(existing) => *existing = shoe,
            None => self.shoes.push(shoe),
        }
        Ok(())
    }

    /// Remove a shoe. Returns whether one was removed.
    pub fn delete_shoe(&mut self, shoe_id: &str) -> bool {
        let before = self.shoes.len();
        self.shoes.retain(|s| s.id != shoe_id);
        let removed = self.shoes.len() != before;
        if removed {
            tracing::info!("Deleted shoe {}", shoe_id);
        }
        removed
    }

    /// Replace the current plan.
    pub fn update_plan(&mut self, plan: RunningPlan) {
        tracing::info!("Plan updated: {} ({} weeks)", plan.name, plan.weeks.len());
        self.plan = Some(plan);
    }

    /// Drop the current plan. Confirmation is the caller's job.
    pub fn delete_plan(&mut self) -> Option<RunningPlan> {
        let removed = self.plan.take();
        if removed.is_some() {
            tracing::info!("Plan deleted");
        }
        removed
    }

    /// Clear everything. Confirmation is the caller's job.
    pub fn reset_all(&mut self) {
        *self = Self::default();
        tracing::info!("All data reset");
    }

    /// Commit a generated plan. A failed generation leaves the current plan
    /// untouched and hands the error back.
    pub fn apply_generated(
        &mut self,
        result: Result<RunningPlan, GenerationError>,
    ) -> Result<(), GenerationError> {
        match result {
            Ok(plan) => {
                self.update_plan(plan);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Plan generation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Apply a backup. Only the fields present in the backup are replaced.
    pub fn import_backup(&mut self, backup: BackupData) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();

        if let Some(plan) = backup.plan {
            self.plan = Some(plan);
            outcome.plan = true;
        }
        if let Some(logs) = backup.logs {
            self.logs = logs;
            outcome.logs = true;
        }
        if let Some(shoes) = backup.shoes {
            self.shoes = shoes;
            outcome.shoes = true;
        }

        tracing::info!(
            "Imported backup v{}: plan={}, logs={}, shoes={}",
            backup.version,
            outcome.plan,
            outcome.logs,
            outcome.shoes
        );
        outcome
    }

    /// Shoes still in rotation.
    pub fn active_shoes(&self) -> impl Iterator<Item = &Shoe> {
        self.shoes.iter().filter(|s| s.is_active)
    }

    /// Shoe preselected when logging a run.
    pub fn default_shoe(&self) -> Option<&Shoe> {
        self.active_shoes().next()
    }

    /// Today's plan sessions, empty without a plan.
    pub fn today_focus<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TodayFocus<'_> {
        match &self.plan {
            Some(plan) => plan.today_focus(now),
            None => TodayFocus::default(),
        }
    }

    /// Distance run in the last `days` days.
    pub fn recent_distance(&self, now: DateTime<Utc>, days: u32) -> f64 {
        distance_within(&self.logs, now, days)
    }

    /// Lifetime totals.
    pub fn totals(&self) -> HistoryTotals {
        HistoryTotals::from_logs(&self.logs)
    }
}
