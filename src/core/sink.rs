//! Threshold-filtered output destination

use super::{appender::Appender, error::Result, log_entry::LogEntry, log_level::LogLevel};
use std::path::Path;

/// An appender paired with its own minimum level.
///
/// Records below the threshold are dropped by this sink only; the other
/// sinks of the same logger still see them.
pub struct Sink {
    appender: Box<dyn Appender>,
    min_level: LogLevel,
}

impl Sink {
    pub fn new(appender: Box<dyn Appender>, min_level: LogLevel) -> Self {
        Self {
            appender,
            min_level,
        }
    }

    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn name(&self) -> &str {
        self.appender.name()
    }

    pub fn location(&self) -> Option<&Path> {
        self.appender.location()
    }

    /// Write the entry if it passes the threshold.
    ///
    /// Returns `Ok(false)` when the entry was filtered out.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<bool> {
        if !self.accepts(entry.level) {
            return Ok(false);
        }
        self.appender.append(entry)?;
        self.appender.flush()?;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.appender.flush()
    }
}
