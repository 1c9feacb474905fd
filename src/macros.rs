//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. A `Display`
//! implementation that fails drops that one record instead of panicking.
//!
//! # Examples
//!
//! ```no_run
//! use masterbot_logger::prelude::*;
//! use masterbot_logger::info;
//!
//! let logger = DailyRotatingLogger::new("bot", LoggingConfig::new("logs")).unwrap();
//!
//! // Basic logging
//! info!(logger, "Bot started");
//!
//! // With format arguments
//! let chat_id = 42;
//! info!(logger, "Joined chat {}", chat_id);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use masterbot_logger::prelude::*;
/// # let logger = DailyRotatingLogger::new("bot", LoggingConfig::new("logs")).unwrap();
/// use masterbot_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_args($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```no_run
/// # use masterbot_logger::prelude::*;
/// # let logger = DailyRotatingLogger::new("bot", LoggingConfig::new("logs")).unwrap();
/// use masterbot_logger::warning;
/// warning!(logger, "Rate limited, retry {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error value with its cause chain at ERROR level.
///
/// # Examples
///
/// ```no_run
/// # use masterbot_logger::prelude::*;
/// # let logger = DailyRotatingLogger::new("bot", LoggingConfig::new("logs")).unwrap();
/// use masterbot_logger::exception;
/// if let Err(e) = std::fs::read_to_string("state.json") {
///     exception!(logger, e, "Failed to restore state from {}", "state.json");
/// }
/// ```
#[macro_export]
macro_rules! exception {
    ($logger:expr, $err:expr, $($arg:tt)+) => {
        $logger.exception_args(Some(&$err), format_args!($($arg)+))
    };
}
