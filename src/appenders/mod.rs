//! Appender implementations

pub mod console;
pub mod daily_file;

pub use console::ConsoleAppender;
pub use daily_file::DailyFileAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
