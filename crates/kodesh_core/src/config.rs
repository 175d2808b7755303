//! Runtime configuration shared by every front end.
//!
//! # Invariants
//! - `log_level` is always one of trace|debug|info|warn|error once built.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "kodesh_tracker.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "database path cannot be empty"),
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyDbPath => None,
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl TrackerConfig {
    /// Builds a validated config; `None` fields fall back to defaults.
    pub fn new(
        db_path: Option<PathBuf>,
        log_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let db_path = db_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        if db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }

        let log_level = match log_level {
            Some(level) => normalize_level(level)?,
            None => default_log_level(),
        };

        let log_dir = log_dir.filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = &log_dir {
            if !dir.is_absolute() {
                return Err(LoggingError::RelativeLogDir(dir.clone()).into());
            }
        }

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Starts file logging when a directory is configured.
    ///
    /// Returns whether logging is now active.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => crate::logging::init_logging(self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}
