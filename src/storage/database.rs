//! Database operations using rusqlite.
//!
//! Each slot holds one JSON document. Slots are written whole; there is no
//! partial update of a collection.

use crate::app::AppState;
use crate::gear::Shoe;
use crate::plan::RunningPlan;
use crate::recording::RunLog;
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A persisted state slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The current plan
    Plan,
    /// All run logs
    Logs,
    /// All shoes
    Shoes,
}

impl Slot {
    /// Every slot.
    pub const ALL: [Slot; 3] = [Slot::Plan, Slot::Logs, Slot::Shoes];

    /// Key in the slots table.
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Plan => "plan",
            Slot::Logs => "logs",
            Slot::Shoes => "shoes",
        }
    }
}

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path)
                .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Check current version
        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            // Initial schema
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            // Record version
            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Slot Operations ==========

    /// Read and decode a slot, `None` when it was never written.
    pub fn read_slot<T: DeserializeOwned>(&self, slot: Slot) -> Result<Option<T>, DatabaseError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT json FROM slots WHERE name = ?1",
                params![slot.name()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        json.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| DatabaseError::DeserializationError(format!("{}: {}", slot.name(), e)))
        })
        .transpose()
    }

    /// Encode and replace a slot.
    pub fn write_slot<T: Serialize + ?Sized>(
        &self,
        slot: Slot,
        value: &T,
    ) -> Result<(), DatabaseError> {
        write_slot_json(&self.conn, slot, value)
    }

    /// Remove a slot.
    pub fn delete_slot(&self, slot: Slot) -> Result<(), DatabaseError> {
        delete_slot_row(&self.conn, slot)
    }

    /// Store the current plan, or clear it.
    pub fn save_plan(&self, plan: Option<&RunningPlan>) -> Result<(), DatabaseError> {
        match plan {
            Some(plan) => self.write_slot(Slot::Plan, plan),
            None => self.clear_plan(),
        }
    }

    /// Remove the stored plan.
    pub fn clear_plan(&self) -> Result<(), DatabaseError> {
        self.delete_slot(Slot::Plan)
    }

    /// Store the whole log collection.
    pub fn save_logs(&self, logs: &[RunLog]) -> Result<(), DatabaseError> {
        self.write_slot(Slot::Logs, logs)
    }

    /// Store the whole shoe collection.
    pub fn save_shoes(&self, shoes: &[Shoe]) -> Result<(), DatabaseError> {
        self.write_slot(Slot::Shoes, shoes)
    }

    /// Load all three slots. Missing slots load as empty.
    pub fn load_state(&self) -> Result<AppState, DatabaseError> {
        Ok(AppState {
            plan: self.read_slot(Slot::Plan)?,
            logs: self.read_slot(Slot::Logs)?.unwrap_or_default(),
            shoes: self.read_slot(Slot::Shoes)?.unwrap_or_default(),
        })
    }

    /// Store all three slots atomically.
    pub fn save_state(&mut self, state: &AppState) -> Result<(), DatabaseError> {
        let tx = self.conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        match &state.plan {
            Some(plan) => write_slot_json(&tx, Slot::Plan, plan)?,
            None => delete_slot_row(&tx, Slot::Plan)?,
        }
        write_slot_json(&tx, Slot::Logs, &state.logs)?;
        write_slot_json(&tx, Slot::Shoes, &state.shoes)?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::debug!(
            "Saved state: plan={}, {} logs, {} shoes",
            state.plan.is_some(),
            state.logs.len(),
            state.shoes.len()
        );
        Ok(())
    }

    /// Remove every slot atomically.
    pub fn reset(&mut self) -> Result<(), DatabaseError> {
        let tx = self.conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        for slot in Slot::ALL {
            delete_slot_row(&tx, slot)?;
        }

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!("Database reset");
        Ok(())
    }
}

fn write_slot_json<T: Serialize + ?Sized>(
    conn: &Connection,
    slot: Slot,
    value: &T,
) -> Result<(), DatabaseError> {
    let json = serde_json::to_string(value)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

    conn.execute(
        "INSERT INTO slots (name, json, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET json = excluded.json, updated_at = excluded.updated_at",
        params![slot.name(), json, Utc::now().to_rfc3339()],
    )
    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(())
}

fn delete_slot_row(conn: &Connection, slot: Slot) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM slots WHERE name = ?1", params![slot.name()])
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
