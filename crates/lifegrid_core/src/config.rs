//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults; resolution never fails.
//! - The log directory is always absolute, as `init_logging` requires.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "LIFEGRID_DB_PATH";
pub const LOG_DIR_ENV: &str = "LIFEGRID_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "LIFEGRID_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "lifegrid.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "lifegrid-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let db_path = value(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_dir = value(LOG_DIR_ENV)
            .map(PathBuf::from)
            .filter(|path| path.is_absolute())
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        let log_level = value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        Self {
            db_path,
            log_dir,
            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
