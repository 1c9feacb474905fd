//! Retention cleanup for date-named log files
//!
//! Cleanup is best effort: a file whose name carries no valid date is left
//! alone, and a failed deletion is reported rather than raised. The caller
//! decides how to surface the report (the logger writes it through its own
//! sinks).

use crate::appenders::daily_file::{date_from_file_name, log_file_glob};
use chrono::{Days, NaiveDate};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file the cleanup pass could not evaluate or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupIssue {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub issues: Vec<CleanupIssue>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Deletes log files older than a number of days.
///
/// # Examples
///
/// ```
/// use masterbot_logger::core::retention::RetentionPolicy;
/// use chrono::NaiveDate;
///
/// let policy = RetentionPolicy::new(10);
/// let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
/// assert_eq!(policy.cutoff(today), NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    retention_days: u32,
}

impl RetentionPolicy {
    pub fn new(retention_days: u32) -> Self {
        Self { retention_days }
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Oldest date that is still kept
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.retention_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Whether a file dated `file_date` is past retention
    pub fn is_expired(&self, file_date: NaiveDate, today: NaiveDate) -> bool {
        file_date < self.cutoff(today)
    }

    /// Remove every `<prefix>_<date>.log` in `dir` dated before the cutoff
    pub fn cleanup(&self, dir: &Path, prefix: &str, today: NaiveDate) -> CleanupReport {
        self.cleanup_with(dir, prefix, today, |path| fs::remove_file(path))
    }

    /// [`cleanup`](Self::cleanup) with the deletion step supplied by the caller
    pub(crate) fn cleanup_with(
        &self,
        dir: &Path,
        prefix: &str,
        today: NaiveDate,
        mut remove: impl FnMut(&Path) -> io::Result<()>,
    ) -> CleanupReport {
        let mut report = CleanupReport::default();

        if !dir.exists() {
            return report;
        }

        let pattern = match glob::Pattern::new(&log_file_glob(prefix)) {
            Ok(pattern) => pattern,
            Err(e) => {
                report.issues.push(CleanupIssue {
                    path: dir.to_path_buf(),
                    reason: format!("invalid file pattern: {}", e),
                });
                return report;
            }
        };

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                report.issues.push(CleanupIssue {
                    path: dir.to_path_buf(),
                    reason: format!("cannot list directory: {}", e),
                });
                return report;
            }
        };

        let mut candidates: Vec<(PathBuf, String)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                pattern.matches(&name).then(|| (entry.path(), name))
            })
            .collect();
        candidates.sort();

        for (path, name) in candidates {
            let file_date = match date_from_file_name(prefix, &name) {
                Ok(date) => date,
                Err(reason) => {
                    report.issues.push(CleanupIssue { path, reason });
                    continue;
                }
            };

            if !self.is_expired(file_date, today) {
                continue;
            }

            match remove(&path) {
                Ok(()) => report.removed.push(path),
                Err(e) => report.issues.push(CleanupIssue {
                    path,
                    reason: format!("failed to delete: {}", e),
                }),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "line\n").unwrap();
        path
    }

    fn dated(dir: &Path, date: NaiveDate) -> PathBuf {
        touch(dir, &format!("masterbot_{}.log", date.format("%Y-%m-%d")))
    }

    #[test]
    fn test_boundary_is_kept() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let kept_today = dated(dir.path(), today);
        let kept_5 = dated(dir.path(), today - Duration::days(5));
        let kept_10 = dated(dir.path(), today - Duration::days(10));
        let removed_11 = dated(dir.path(), today - Duration::days(11));

        let report = RetentionPolicy::new(10).cleanup(dir.path(), "masterbot", today);

        assert_eq!(report.removed, vec![removed_11.clone()]);
        assert!(report.is_clean());
        assert!(kept_today.exists());
        assert!(kept_5.exists());
        assert!(kept_10.exists());
        assert!(!removed_11.exists());
    }

    #[test]
    fn test_malformed_names_are_reported_and_kept() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let malformed = touch(dir.path(), "masterbot_notadate.log");
        let old = dated(dir.path(), today - Duration::days(30));

        let report = RetentionPolicy::new(10).cleanup(dir.path(), "masterbot", today);

        assert!(malformed.exists());
        assert!(!old.exists());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, malformed);
        assert_eq!(report.removed, vec![old]);
    }

    #[test]
    fn test_failed_deletion_is_reported_and_pass_continues() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let stuck = dated(dir.path(), today - Duration::days(20));
        let old = dated(dir.path(), today - Duration::days(30));

        let report = RetentionPolicy::new(10).cleanup_with(dir.path(), "masterbot", today, |path| {
            if path == stuck.as_path() {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
            } else {
                fs::remove_file(path)
            }
        });

        assert!(stuck.exists());
        assert!(!old.exists());
        assert_eq!(report.removed, vec![old]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, stuck);
        assert!(report.issues[0].reason.starts_with("failed to delete"));
        assert!(report.issues[0].reason.contains("read-only volume"));
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let other_prefix = touch(dir.path(), "worker_2020-01-01.log");
        let other_ext = touch(dir.path(), "masterbot_2020-01-01.txt");
        fs::create_dir(dir.path().join("masterbot_2020-01-02.log")).unwrap();

        let report = RetentionPolicy::new(0).cleanup(dir.path(), "masterbot", today);

        assert_eq!(report, CleanupReport::default());
        assert!(other_prefix.exists());
        assert!(other_ext.exists());
    }

    #[test]
    fn test_zero_retention_keeps_only_today() {
        let dir = tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let kept = dated(dir.path(), today);
        let removed = dated(dir.path(), today - Duration::days(1));

        let report = RetentionPolicy::new(0).cleanup(dir.path(), "masterbot", today);
        assert_eq!(report.removed, vec![removed]);
        assert!(kept.exists());
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let dir = tempdir().unwrap();
        let report = RetentionPolicy::new(10).cleanup(
            &dir.path().join("absent"),
            "masterbot",
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        );
        assert_eq!(report, CleanupReport::default());
    }

    #[test]
    fn test_huge_retention_never_underflows() {
        let policy = RetentionPolicy::new(u32::MAX);
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(!policy.is_expired(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), today));
    }
}
