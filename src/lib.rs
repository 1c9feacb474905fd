//! # MasterBot Logger
//!
//! Leveled logging to a colored console and to date-named log files.
//!
//! ## Features
//!
//! - **Two sinks per logger**: console and file, each with its own minimum level
//! - **Daily files**: `<log_dir>/masterbot_YYYY-MM-DD.log`, switched when the date changes
//! - **Retention**: files older than `retention_days` are pruned when a logger is built
//! - **Registry**: one logger per logical name, built lazily and shared
//!
//! ```no_run
//! use masterbot_logger::{info, registry, LoggingConfig};
//!
//! registry::init(LoggingConfig::new("logs")).unwrap();
//! let logger = registry::get_logger("bot.core").unwrap();
//! info!(logger, "Bot started with {} handlers", 12);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub use crate::core::registry;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, DailyFileAppender};
    pub use crate::core::{
        Appender, CleanupReport, DailyRotatingLogger, LogEntry, LogLevel, LogMode, LoggerBuilder,
        LoggerError, LoggerMetrics, LoggerRegistry, LoggingConfig, NullWriter, RecordFormatter,
        Result, RetentionPolicy,
    };
    pub use crate::core::registry::get_logger;
}

pub use appenders::{ConsoleAppender, DailyFileAppender};
pub use core::{
    Appender, CleanupIssue, CleanupReport, ConsoleWriterFactory, DailyRotatingLogger, LogEntry,
    LogLevel, LogMode, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, LoggingConfig,
    NullWriter, RecordFormatter, Result, RetentionPolicy, Sink,
};
pub use core::registry::get_logger;
