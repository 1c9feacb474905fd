//! Date-named file appender
//!
//! Records go to `<dir>/<prefix>_<YYYY-MM-DD>.log`. The date in the name is
//! the local calendar date of the records in the file: when a record arrives
//! whose date is later than the open file's, the appender switches to the
//! file for the new date.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::formatter::RecordFormatter;
use crate::core::log_entry::LogEntry;
use chrono::{Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const LOG_FILE_EXTENSION: &str = "log";
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// File name for the given prefix and date, e.g. `masterbot_2025-01-08.log`
#[must_use]
pub fn log_file_name(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        date.format(FILE_DATE_FORMAT),
        LOG_FILE_EXTENSION
    )
}

/// Glob matching every file produced for `prefix`
#[must_use]
pub fn log_file_glob(prefix: &str) -> String {
    format!("{}_*.{}", glob::Pattern::escape(prefix), LOG_FILE_EXTENSION)
}

/// Extract the date embedded in a log file name.
///
/// # Errors
///
/// Returns a description of the problem when the name does not carry a
/// `YYYY-MM-DD` date between `<prefix>_` and `.log`.
pub fn date_from_file_name(prefix: &str, file_name: &str) -> std::result::Result<NaiveDate, String> {
    let stem = file_name
        .strip_suffix(LOG_FILE_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .ok_or_else(|| format!("'{}' has no .{} extension", file_name, LOG_FILE_EXTENSION))?;
    let date_part = stem
        .strip_prefix(prefix)
        .and_then(|s| s.strip_prefix('_'))
        .ok_or_else(|| format!("'{}' does not start with '{}_'", file_name, prefix))?;

    NaiveDate::parse_from_str(date_part, FILE_DATE_FORMAT)
        .map_err(|e| format!("'{}' is not a date: {}", date_part, e))
}

pub struct DailyFileAppender {
    dir: PathBuf,
    prefix: String,
    formatter: RecordFormatter,
    writer: Option<BufWriter<File>>,
    current_date: NaiveDate,
    current_path: PathBuf,
}

impl DailyFileAppender {
    /// Open today's file in `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file opened
    pub fn new(dir: impl AsRef<Path>, prefix: &str, formatter: RecordFormatter) -> Result<Self> {
        Self::for_date(dir, prefix, formatter, Local::now().date_naive())
    }

    /// Open the file for an explicit date
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file opened
    pub fn for_date(
        dir: impl AsRef<Path>,
        prefix: &str,
        formatter: RecordFormatter,
        date: NaiveDate,
    ) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let current_path = dir.join(log_file_name(prefix, date));
        let writer = Some(Self::open(&current_path)?);

        Ok(Self {
            dir,
            prefix: prefix.to_string(),
            formatter,
            writer,
            current_date: date,
            current_path,
        })
    }

    fn open(path: &Path) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
            })?;
        Ok(BufWriter::new(file))
    }

    /// Path of the file currently written to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.current_path
    }

    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn should_rotate(&self, entry: &LogEntry) -> bool {
        entry.timestamp.date_naive() > self.current_date
    }

    /// Close the current file and open the one for `date`
    fn rotate(&mut self, date: NaiveDate) -> Result<()> {
        let next_path = self.dir.join(log_file_name(&self.prefix, date));
        let next_writer = Self::open(&next_path)?;

        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                eprintln!(
                    "[LOGGER WARNING] Failed to flush {} before switching files: {}",
                    self.current_path.display(),
                    e
                );
            }
        }

        self.writer = Some(next_writer);
        self.current_date = date;
        self.current_path = next_path;
        Ok(())
    }
}

impl Appender for DailyFileAppender {
    fn name(&self) -> &str {
        "file"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if self.should_rotate(entry) {
            if let Err(e) = self.rotate(entry.timestamp.date_naive()) {
                // Keep the previous day's file rather than losing the record
                eprintln!(
                    "[LOGGER WARNING] Daily file switch failed: {}. Continuing with {}",
                    e,
                    self.current_path.display()
                );
            }
        }

        let mut formatted = self.formatter.format(entry);
        formatted.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(formatted.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.current_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.current_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.current_path)
    }
}

impl Drop for DailyFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn formatter() -> RecordFormatter {
        RecordFormatter::plain("%(levelname)s %(message)s", "%H:%M:%S").unwrap()
    }

    fn entry_on(date: NaiveDate, message: &str) -> LogEntry {
        let timestamp = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap();
        LogEntry::new(LogLevel::Info, Arc::from("t"), message.to_string()).with_timestamp(timestamp)
    }

    #[test]
    fn test_file_naming() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        assert_eq!(log_file_name("masterbot", date), "masterbot_2025-01-08.log");
        assert_eq!(log_file_glob("masterbot"), "masterbot_*.log");
    }

    #[test]
    fn test_date_from_file_name() {
        assert_eq!(
            date_from_file_name("masterbot", "masterbot_2024-12-31.log"),
            Ok(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
        );
        assert!(date_from_file_name("masterbot", "masterbot_notadate.log").is_err());
        assert!(date_from_file_name("masterbot", "masterbot_2024-13-01.log").is_err());
        assert!(date_from_file_name("masterbot", "other_2024-12-31.log").is_err());
        assert!(date_from_file_name("masterbot", "masterbot_2024-12-31.txt").is_err());
    }

    #[test]
    fn test_creates_directory_and_todays_file() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let appender = DailyFileAppender::new(&log_dir, "masterbot", formatter()).unwrap();

        let expected = log_dir.join(log_file_name("masterbot", Local::now().date_naive()));
        assert_eq!(appender.path(), expected);
        assert!(expected.exists());
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        {
            let mut appender = DailyFileAppender::for_date(dir.path(), "masterbot", formatter(), date).unwrap();
            appender.append(&entry_on(date, "first")).unwrap();
        }
        {
            let mut appender = DailyFileAppender::for_date(dir.path(), "masterbot", formatter(), date).unwrap();
            appender.append(&entry_on(date, "second")).unwrap();
        }

        let content = fs::read_to_string(dir.path().join("masterbot_2025-03-01.log")).unwrap();
        assert_eq!(content, "INFO first\nINFO second\n");
    }

    #[test]
    fn test_switches_file_when_day_changes() {
        let dir = tempdir().unwrap();
        let day1 = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let day2 = day1 + Duration::days(1);

        let mut appender = DailyFileAppender::for_date(dir.path(), "masterbot", formatter(), day1).unwrap();
        appender.append(&entry_on(day1, "before midnight")).unwrap();
        appender.append(&entry_on(day2, "after midnight")).unwrap();
        // A late record from the previous day stays in the open file
        appender.append(&entry_on(day1, "straggler")).unwrap();
        appender.flush().unwrap();

        assert_eq!(appender.current_date(), day2);
        assert_eq!(appender.location(), Some(dir.path().join("masterbot_2025-03-02.log").as_path()));

        let first = fs::read_to_string(dir.path().join("masterbot_2025-03-01.log")).unwrap();
        let second = fs::read_to_string(dir.path().join("masterbot_2025-03-02.log")).unwrap();
        assert_eq!(first, "INFO before midnight\n");
        assert_eq!(second, "INFO after midnight\nINFO straggler\n");
    }
}
