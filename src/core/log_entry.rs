//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::Write as _;
use std::sync::Arc;

// Thread-local cache for the thread label to avoid repeated allocations
thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread name (or id for unnamed threads), computing it on first access
fn get_thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                match current.name() {
                    Some(name) => name.to_string(),
                    None => format!("{:?}", current.id()),
                }
            })
            .clone()
    })
}

/// A single log record, created per call and consumed by the sinks.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub name: Arc<str>,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub thread_name: String,
    pub process_id: u32,
    /// Multi-line error report attached by exception logging
    pub exception: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a single record always renders as a single line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, name: Arc<str>, message: String) -> Self {
        Self {
            level,
            name,
            message: Self::sanitize_message(&message),
            timestamp: Local::now(),
            thread_name: get_thread_name(),
            process_id: std::process::id(),
            exception: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_exception(mut self, exception: String) -> Self {
        self.exception = Some(exception);
        self
    }
}

/// Render an error and its `source()` chain as a multi-line report.
///
/// A backtrace is appended when one was captured (`RUST_BACKTRACE` set).
/// `None` yields a single placeholder line.
pub fn render_error_chain(error: Option<&(dyn Error + 'static)>) -> String {
    let Some(error) = error else {
        return "Traceback: no active error".to_string();
    };

    let mut out = String::from("Traceback (most recent error last):");
    let _ = write!(out, "\n  Error: {}", error);
    let mut source = error.source();
    let mut depth = 0;
    while let Some(cause) = source {
        let _ = write!(out, "\n  Caused by [{}]: {}", depth, cause);
        depth += 1;
        source = cause.source();
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(out, "\n  Backtrace:\n{}", backtrace);
    }
    out
}
