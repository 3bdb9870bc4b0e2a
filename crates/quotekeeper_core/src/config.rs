//! Application configuration loaded from environment variables.
//!
//! # Responsibility
//! - Externalize the storage location and logging settings that the
//!   original deployment hard-coded.
//!
//! # Invariants
//! - Configuration changes where data lives, never the schema or the
//!   operation semantics.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_DB_FILE: &str = "quotekeeper.db";

/// Runtime settings for one process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files; `None` disables file
    /// logging.
    pub log_dir: Option<PathBuf>,
    /// Log level passed to logging init (`trace|debug|info|warn|error`).
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// - `QUOTEKEEPER_DB_PATH`: database file (default `quotekeeper.db`)
    /// - `QUOTEKEEPER_LOG_DIR`: log directory (default: file logging off)
    /// - `QUOTEKEEPER_LOG_LEVEL`: log level (default per build mode)
    pub fn from_env() -> Self {
        Self {
            db_path: env::var_os("QUOTEKEEPER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            log_dir: env::var_os("QUOTEKEEPER_LOG_DIR").map(PathBuf::from),
            log_level: env::var("QUOTEKEEPER_LOG_LEVEL")
                .unwrap_or_else(|_| default_log_level().to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
