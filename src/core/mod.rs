//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod retention;
pub mod sink;

pub use appender::Appender;
pub use config::{LogMode, LoggingConfig};
pub use error::{LoggerError, Result};
pub use formatter::RecordFormatter;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{DailyRotatingLogger, LoggerBuilder, NullWriter};
pub use metrics::LoggerMetrics;
pub use registry::{ConsoleWriterFactory, LoggerRegistry};
pub use retention::{CleanupIssue, CleanupReport, RetentionPolicy};
pub use sink::Sink;
