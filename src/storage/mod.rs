//! Storage module for configuration, persisted state and backups.

pub mod backup;
pub mod config;
pub mod database;
pub mod schema;

pub use backup::{backup_file_name, BackupData, BackupError, BACKUP_VERSION};
pub use config::{load_config, save_config, AppConfig, ConfigError};
pub use database::{Database, DatabaseError, Slot};
