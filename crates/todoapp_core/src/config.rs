//! Process configuration resolved from environment variables.
//!
//! | variable            | default                          |
//! |---------------------|----------------------------------|
//! | `TODOAPP_DB_PATH`   | `<temp>/todoapp.sqlite3`         |
//! | `TODOAPP_LOG_LEVEL` | `debug` (debug) / `info` (release) |
//! | `TODOAPP_LOG_DIR`   | `<temp>/todoapp-logs`            |
//!
//! Blank values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TODOAPP_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TODOAPP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TODOAPP_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "todoapp.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "todoapp-logs";

/// Rolling-file logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory receiving log files.
    pub log_dir: PathBuf,
}

/// Top-level application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let db_path = value(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let level = value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = value(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));

        Self {
            db_path,
            logging: LoggingConfig { level, log_dir },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn explicit_values_override_defaults() {
        let env = HashMap::from([
            (DB_PATH_ENV, "/var/lib/todoapp/app.db"),
            (LOG_LEVEL_ENV, " warn "),
            (LOG_DIR_ENV, "/var/log/todoapp"),
        ]);
        let config = AppConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/var/lib/todoapp/app.db"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.log_dir, PathBuf::from("/var/log/todoapp"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| Some("   ".to_string()));

        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("todoapp.sqlite3")
        );
        assert_eq!(config.logging.level, default_log_level());
        assert!(config.logging.log_dir.ends_with("todoapp-logs"));
    }
}
