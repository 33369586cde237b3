//! Database schema definitions for RunFlow.
//!
//! State is kept as three independent JSON slots: the current plan, the full
//! log collection and the full shoe collection.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- State slots table
CREATE TABLE IF NOT EXISTS slots (
    name TEXT PRIMARY KEY CHECK (name IN ('plan', 'logs', 'shoes')),
    json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Schema version table
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
