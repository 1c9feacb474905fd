//! Named logger registry
//!
//! A registry hands out one [`DailyRotatingLogger`] per logical name, building
//! it on first request. Lookup-or-insert runs under a single mutex, so two
//! threads asking for the same new name get the same instance and only one
//! file handle is ever opened for it.

use super::config::LoggingConfig;
use super::error::{LoggerError, Result};
use super::logger::DailyRotatingLogger;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, OnceLock};

/// Produces the console writer for each newly built logger
pub type ConsoleWriterFactory = Arc<dyn Fn() -> Box<dyn Write + Send + Sync> + Send + Sync>;

pub struct LoggerRegistry {
    config: LoggingConfig,
    loggers: Mutex<HashMap<String, Arc<DailyRotatingLogger>>>,
    console_writer: Option<ConsoleWriterFactory>,
}

impl LoggerRegistry {
    /// Registry whose loggers print to stderr
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            loggers: Mutex::new(HashMap::new()),
            console_writer: None,
        }
    }

    /// Registry whose loggers print to writers made by `factory`
    pub fn with_console_writer(config: LoggingConfig, factory: ConsoleWriterFactory) -> Self {
        Self {
            console_writer: Some(factory),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Return the logger for `name`, building it on first use.
    ///
    /// # Errors
    ///
    /// Construction errors are returned and nothing is cached, so a later
    /// call retries.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use masterbot_logger::{LoggerRegistry, LoggingConfig};
    /// use std::sync::Arc;
    ///
    /// let registry = LoggerRegistry::new(LoggingConfig::new("logs"));
    /// let a = registry.get_logger("bot.handlers").unwrap();
    /// let b = registry.get_logger("bot.handlers").unwrap();
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn get_logger(&self, name: &str) -> Result<Arc<DailyRotatingLogger>> {
        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(name) {
            return Ok(Arc::clone(logger));
        }

        let mut builder = DailyRotatingLogger::builder(name, self.config.clone());
        if let Some(ref factory) = self.console_writer {
            builder = builder.console_writer(factory());
        }
        let logger = Arc::new(builder.build()?);
        loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Names of all cached loggers, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Flush every cached logger, returning the first error
    pub fn flush_all(&self) -> Result<()> {
        let loggers: Vec<Arc<DailyRotatingLogger>> = self.loggers.lock().values().cloned().collect();
        let mut first_error = None;
        for logger in loggers {
            if let Err(e) = logger.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush logger '{}': {}", logger.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Flush and release every cached logger.
    ///
    /// File handles close once callers drop their own handles too. A later
    /// `get_logger` builds a fresh instance (and runs cleanup again).
    pub fn shutdown(&self) {
        let drained: Vec<(String, Arc<DailyRotatingLogger>)> = self.loggers.lock().drain().collect();
        for (name, logger) in drained {
            if let Err(e) = logger.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush logger '{}' during shutdown: {}", name, e);
            }
        }
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("config", &self.config)
            .field("loggers", &self.names())
            .finish_non_exhaustive()
    }
}

static GLOBAL_REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// Returns [`LoggerError::InvalidConfiguration`] for a bad config and
/// [`LoggerError::AlreadyInitialized`] on a second call.
pub fn init(config: LoggingConfig) -> Result<&'static LoggerRegistry> {
    config.validate()?;
    let mut installed = false;
    let registry = GLOBAL_REGISTRY.get_or_init(|| {
        installed = true;
        LoggerRegistry::new(config)
    });
    if installed {
        Ok(registry)
    } else {
        Err(LoggerError::AlreadyInitialized)
    }
}

/// The process-wide registry, if [`init`] has run
pub fn global() -> Option<&'static LoggerRegistry> {
    GLOBAL_REGISTRY.get()
}

/// Logger for `name` from the process-wide registry.
///
/// # Errors
///
/// Returns [`LoggerError::NotInitialized`] before [`init`], otherwise any
/// construction error.
pub fn get_logger(name: &str) -> Result<Arc<DailyRotatingLogger>> {
    global()
        .ok_or(LoggerError::NotInitialized)?
        .get_logger(name)
}

/// Flush and release the loggers of the process-wide registry
pub fn shutdown() {
    if let Some(registry) = global() {
        registry.shutdown();
    }
}
