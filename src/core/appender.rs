//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};
use std::path::Path;

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// File currently written to, for appenders backed by one
    fn location(&self) -> Option<&Path> {
        None
    }
}
