//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings for hosts (CLI, embedders).
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `log_level` is always a normalized, supported level.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTEKEEPER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "NOTEKEEPER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NOTEKEEPER_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "notekeeper.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "notekeeper-logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing the local key-value store.
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults
    /// under the system temp directory.
    ///
    /// # Errors
    /// - `NOTEKEEPER_LOG_LEVEL` names an unsupported level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
