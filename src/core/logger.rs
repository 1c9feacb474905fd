//! Daily rotating logger
//!
//! One logger per logical name. Each logger owns a console sink and a file
//! sink with independent thresholds; the logger itself lets every level
//! through. The file sink writes to `<log_dir>/<prefix>_<YYYY-MM-DD>.log` and
//! retention cleanup runs once, while the logger is being built.

use super::{
    config::LoggingConfig,
    error::{LoggerError, Result},
    formatter::RecordFormatter,
    log_entry::{render_error_chain, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    retention::{CleanupReport, RetentionPolicy},
    sink::Sink,
};
use crate::appenders::{ConsoleAppender, DailyFileAppender};
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct DailyRotatingLogger {
    name: Arc<str>,
    config: LoggingConfig,
    sinks: Mutex<Vec<Sink>>,
    /// Metrics for observability (dropped count, total logged, etc.)
    metrics: LoggerMetrics,
}

impl DailyRotatingLogger {
    /// Build a logger writing colored output to stderr and today's file
    ///
    /// # Errors
    ///
    /// Fails when the configuration templates are invalid or the log
    /// directory or file cannot be created.
    pub fn new(name: &str, config: LoggingConfig) -> Result<Self> {
        Self::builder(name, config).build()
    }

    #[must_use]
    pub fn builder(name: &str, config: LoggingConfig) -> LoggerBuilder {
        LoggerBuilder::new(name, config)
    }

    fn from_builder(builder: LoggerBuilder) -> Result<Self> {
        let LoggerBuilder {
            name,
            config,
            console_writer,
            today,
        } = builder;

        config.validate()?;

        let console_formatter = if config.console_colors {
            RecordFormatter::colored(&config.format, &config.date_format)?
        } else {
            RecordFormatter::plain(&config.format, &config.date_format)?
        };
        let file_formatter = RecordFormatter::plain(&config.format, &config.date_format)?;

        let console = match console_writer {
            Some(writer) => ConsoleAppender::with_writer(console_formatter, writer),
            None => ConsoleAppender::new(console_formatter),
        };
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let file = DailyFileAppender::for_date(
            &config.log_dir,
            &config.file_prefix,
            file_formatter,
            today,
        )?;

        let sinks = vec![
            Sink::new(Box::new(console), config.console_level),
            Sink::new(Box::new(file), config.file_level),
        ];

        let logger = Self {
            name: Arc::from(name),
            config,
            sinks: Mutex::new(sinks),
            metrics: LoggerMetrics::new(),
        };

        logger.cleanup_old_logs(today);
        Ok(logger)
    }

    /// Delete files past retention and report the outcome through this logger.
    ///
    /// Runs automatically at construction only; a long-lived logger does not
    /// prune files on its own afterwards.
    pub fn cleanup_old_logs(&self, today: NaiveDate) -> CleanupReport {
        let report = RetentionPolicy::new(self.config.retention_days).cleanup(
            &self.config.log_dir,
            &self.config.file_prefix,
            today,
        );
        self.report_cleanup(&report);
        report
    }

    fn report_cleanup(&self, report: &CleanupReport) {
        for path in &report.removed {
            self.debug(format!("Removed old log file: {}", display_name(path)));
        }
        for issue in &report.issues {
            self.warning(format!(
                "Could not process log file {}: {}",
                display_name(&issue.path),
                issue.reason
            ));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    pub fn is_development(&self) -> bool {
        self.config.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }

    /// Path of the file the file sink currently writes to
    pub fn current_log_file(&self) -> Option<PathBuf> {
        self.sinks
            .lock()
            .iter()
            .find_map(|sink| sink.location().map(Path::to_path_buf))
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry::new(level, Arc::clone(&self.name), message.into());
        self.log_entry(&entry);
    }

    /// Log pre-built format arguments.
    ///
    /// A `Display` implementation that reports an error drops this one
    /// record with a diagnostic on stderr instead of panicking.
    pub fn log_args(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        match format_message(args) {
            Ok(message) => self.log(level, message),
            Err(e) => self.report_format_failure(level, &e),
        }
    }

    /// Dispatch an already built entry to every sink
    pub fn log_entry(&self, entry: &LogEntry) {
        let mut sinks = self.sinks.lock();
        Self::process_sync(&mut sinks, entry, &self.metrics);
    }

    /// Deliver an entry to each sink with per-sink panic isolation
    ///
    /// A failing or panicking sink never prevents the other sink from
    /// receiving the entry.
    fn process_sync(sinks: &mut [Sink], entry: &LogEntry, metrics: &LoggerMetrics) -> bool {
        let mut has_error = false;
        let mut delivered = false;

        for sink in sinks.iter_mut() {
            let emit_result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.emit(entry)));

            match emit_result {
                Ok(Ok(true)) => delivered = true,
                Ok(Ok(false)) => {
                    metrics.record_filtered();
                }
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        panic_msg
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else if delivered {
            metrics.record_logged();
        }

        has_error
    }

    fn report_format_failure(&self, level: LogLevel, error: &LoggerError) {
        self.metrics.record_dropped();
        eprintln!(
            "[LOGGER ERROR] Dropped {} record from '{}': {}",
            level, self.name, error
        );
    }

    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    /// Log at ERROR with a traceback block describing `error`.
    ///
    /// The block lists the error and each `source()` below it. Passing `None`
    /// still logs the message, with a placeholder block.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use masterbot_logger::{DailyRotatingLogger, LoggingConfig};
    ///
    /// let logger = DailyRotatingLogger::new("bot", LoggingConfig::new("logs")).unwrap();
    /// if let Err(e) = std::fs::read_to_string("missing.json") {
    ///     logger.exception("Failed to load state", Some(&e));
    /// }
    /// ```
    pub fn exception(&self, message: impl Into<String>, error: Option<&(dyn Error + 'static)>) {
        let entry = LogEntry::new(LogLevel::Error, Arc::clone(&self.name), message.into())
            .with_exception(render_error_chain(error));
        self.log_entry(&entry);
    }

    /// [`exception`](Self::exception) taking format arguments
    pub fn exception_args(&self, error: Option<&(dyn Error + 'static)>, args: fmt::Arguments<'_>) {
        match format_message(args) {
            Ok(message) => self.exception(message, error),
            Err(e) => self.report_format_failure(LogLevel::Error, &e),
        }
    }
}

impl fmt::Debug for DailyRotatingLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyRotatingLogger")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn format_message(args: fmt::Arguments<'_>) -> Result<String> {
    let mut message = String::new();
    fmt::write(&mut message, args).map_err(|_| {
        LoggerError::formatter("message", "Display implementation returned an error")
    })?;
    Ok(message)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Builder for constructing a [`DailyRotatingLogger`]
///
/// # Example
/// ```no_run
/// use masterbot_logger::prelude::*;
///
/// let logger = DailyRotatingLogger::builder("bot.scheduler", LoggingConfig::new("logs"))
///     .console_writer(std::io::stdout())
///     .build()
///     .unwrap();
/// logger.info("Scheduler ready");
/// ```
pub struct LoggerBuilder {
    name: String,
    config: LoggingConfig,
    console_writer: Option<Box<dyn Write + Send + Sync>>,
    today: Option<NaiveDate>,
}

impl LoggerBuilder {
    pub fn new(name: &str, config: LoggingConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
            console_writer: None,
            today: None,
        }
    }

    /// Send console output somewhere other than stderr
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: impl Write + Send + Sync + 'static) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    /// Treat `date` as the current day for file naming and cleanup
    #[must_use = "builder methods return a new value"]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Build the logger, opening its file and running retention cleanup
    ///
    /// # Errors
    ///
    /// See [`DailyRotatingLogger::new`].
    pub fn build(self) -> Result<DailyRotatingLogger> {
        DailyRotatingLogger::from_builder(self)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new("root", LoggingConfig::default())
    }
}

/// A writer that discards everything; handy for silencing the console sink
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
