//! Logging configuration consumed by the logger
//!
//! Loading this structure from disk or the environment belongs to the
//! application; the logger only reads a snapshot of it.

use super::error::{LoggerError, Result};
use super::formatter::RecordFormatter;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_FORMAT: &str = "%(asctime)s - %(name)s - %(levelname)s - %(message)s";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_FILE_PREFIX: &str = "masterbot";
pub const DEFAULT_RETENTION_DAYS: u32 = 10;

/// Application run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    #[default]
    Production,
    Development,
}

impl fmt::Display for LogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMode::Production => write!(f, "production"),
            LogMode::Development => write!(f, "development"),
        }
    }
}

impl FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(LogMode::Production),
            "development" => Ok(LogMode::Development),
            _ => Err(format!("Invalid mode: '{}'", s)),
        }
    }
}

/// Logging parameters, captured by each logger at construction time.
///
/// # Examples
///
/// ```
/// use masterbot_logger::{LogLevel, LogMode, LoggingConfig};
///
/// let config = LoggingConfig::new("logs")
///     .with_mode(LogMode::Development)
///     .with_console_level(LogLevel::Debug)
///     .with_retention_days(30);
///
/// assert!(config.is_development());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub mode: LogMode,
    pub log_dir: PathBuf,
    pub retention_days: u32,
    pub console_level: LogLevel,
    pub file_level: LogLevel,
    pub format: String,
    pub date_format: String,
    /// File name prefix: files are named `<prefix>_<YYYY-MM-DD>.log`
    pub file_prefix: String,
    /// ANSI colors on the console sink, whether or not a terminal is attached
    pub console_colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::Production,
            log_dir: PathBuf::from("logs"),
            retention_days: DEFAULT_RETENTION_DAYS,
            console_level: LogLevel::Info,
            file_level: LogLevel::Debug,
            format: DEFAULT_FORMAT.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            console_colors: true,
        }
    }
}

impl LoggingConfig {
    /// Default configuration writing into `log_dir`
    #[must_use]
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_mode(mut self, mode: LogMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console_level(mut self, level: LogLevel) -> Self {
        self.console_level = level;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_level(mut self, level: LogLevel) -> Self {
        self.file_level = level;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_console_colors(mut self, use_colors: bool) -> Self {
        self.console_colors = use_colors;
        self
    }

    pub fn is_development(&self) -> bool {
        self.mode == LogMode::Development
    }

    pub fn is_production(&self) -> bool {
        self.mode == LogMode::Production
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Check that the templates compile and the file prefix is usable
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        RecordFormatter::plain(&self.format, &self.date_format)?;

        if self.file_prefix.is_empty() {
            return Err(LoggerError::config("file_prefix", "prefix must not be empty"));
        }
        if self
            .file_prefix
            .chars()
            .any(|c| std::path::is_separator(c) || matches!(c, '*' | '?' | '[' | ']'))
        {
            return Err(LoggerError::config(
                "file_prefix",
                format!("'{}' contains path separators or glob characters", self.file_prefix),
            ));
        }
        Ok(())
    }
}
