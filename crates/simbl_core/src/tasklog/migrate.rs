//! One-way move of embedded task logs into `log.ndjson`.
//!
//! # Invariants
//! - `tasks.md` is backed up before anything is written.
//! - A task whose log section cannot be fully read is never rewritten.
//! - Once `logVersion: 2` is stored, migration is a no-op.

use super::embedded::{inspect_embedded, EmbeddedLog, LOG_SECTION_MARKER};
use super::file_log::{self, FileLogEntry};
use crate::document::{parse_bytes, serialize_document, DocumentError};
use crate::markdown::normalize_line_endings;
use crate::model::task::Task;
use crate::store::config::{ConfigError, ConfigStore, YamlConfigStore, LOG_VERSION_CENTRALIZED};
use crate::store::SimblPaths;
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub type MigrationResult<T> = Result<T, MigrationError>;

/// Outcome counters of one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub tasks_migrated: usize,
    pub entries_migrated: usize,
    /// Per-task problems that did not stop the run.
    pub errors: Vec<String>,
    pub backup_path: Option<PathBuf>,
}

/// Failures that abort a migration run.
#[derive(Debug)]
pub enum MigrationError {
    Config(ConfigError),
    Backup(io::Error),
    Read(io::Error),
    Parse(DocumentError),
    Write(io::Error),
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "migration could not read config: {err}"),
            Self::Backup(err) => write!(f, "migration backup failed: {err}"),
            Self::Read(err) => write!(f, "migration could not read tasks file: {err}"),
            Self::Parse(err) => write!(f, "migration could not parse tasks file: {err}"),
            Self::Write(err) => write!(f, "migration could not write tasks file: {err}"),
        }
    }
}

impl Error for MigrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Backup(err) | Self::Read(err) | Self::Write(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ConfigError> for MigrationError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DocumentError> for MigrationError {
    fn from(value: DocumentError) -> Self {
        Self::Parse(value)
    }
}

/// What migrating a single task would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLogMigration {
    /// No log section, or a marker with no entries under it.
    Untouched,
    /// Records to append, in stored order, and the content without its log.
    Migrate {
        records: Vec<FileLogEntry>,
        stripped: String,
    },
    /// Log section present but not fully understood.
    Rejected(String),
}

/// Plans the migration of one task without touching it.
pub fn plan_task_migration(task: &Task) -> TaskLogMigration {
    match inspect_embedded(&task.content) {
        EmbeddedLog::Absent => TaskLogMigration::Untouched,
        EmbeddedLog::Parsed { entries, .. } if entries.is_empty() => TaskLogMigration::Untouched,
        EmbeddedLog::Parsed { body, entries } => TaskLogMigration::Migrate {
            records: entries
                .into_iter()
                .map(|entry| FileLogEntry::new(task.id.as_str(), entry.timestamp, entry.message))
                .collect(),
            stripped: body,
        },
        EmbeddedLog::Unrecognized { lines, .. } => TaskLogMigration::Rejected(format!(
            "Task {}: {} unrecognized log line(s), left unchanged",
            task.id,
            lines.len()
        )),
    }
}

/// Migration over one `.simbl` directory.
pub struct LogMigrator<C: ConfigStore> {
    paths: SimblPaths,
    config: C,
}

impl LogMigrator<YamlConfigStore> {
    /// Migrator backed by `<simbl_dir>/config.yaml`.
    pub fn for_dir(simbl_dir: &Path) -> Self {
        Self::new(simbl_dir, YamlConfigStore::new(simbl_dir))
    }
}

impl<C: ConfigStore> LogMigrator<C> {
    pub fn new(simbl_dir: &Path, config: C) -> Self {
        Self {
            paths: SimblPaths::new(simbl_dir),
            config,
        }
    }

    /// True when the flag is unset and `tasks.md` contains a log marker.
    pub fn needs_migration(&self) -> MigrationResult<bool> {
        if self.config.load()?.is_log_centralized() {
            return Ok(false);
        }
        let bytes = match fs::read(&self.paths.tasks) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(MigrationError::Read(err)),
        };
        let text = String::from_utf8_lossy(&bytes);
        Ok(normalize_line_endings(&text).contains(LOG_SECTION_MARKER))
    }

    /// Moves every embedded log into `log.ndjson` and sets the flag.
    pub fn migrate(&self) -> MigrationResult<MigrationReport> {
        let mut config = self.config.load()?;
        let mut report = MigrationReport::default();
        if config.is_log_centralized() {
            return Ok(report);
        }

        if self.paths.tasks.exists() {
            report.backup_path = Some(self.backup()?);

            let bytes = fs::read(&self.paths.tasks).map_err(MigrationError::Read)?;
            let mut document = parse_bytes(&bytes)?;
            let mut modified = false;

            for task in document.all_tasks_mut() {
                match plan_task_migration(task) {
                    TaskLogMigration::Untouched => {}
                    TaskLogMigration::Rejected(reason) => {
                        warn!("event=log_migrate_task module=tasklog status=skip reason=unrecognized_lines");
                        report.errors.push(format!(
                            "{reason}; logVersion is still set to {LOG_VERSION_CENTRALIZED}, so this section must be moved by hand"
                        ));
                    }
                    TaskLogMigration::Migrate { records, stripped } => {
                        if let Err(err) = file_log::append_many(&self.paths.root, &records) {
                            warn!("event=log_migrate_task module=tasklog status=error reason=append_failed");
                            report
                                .errors
                                .push(format!("Task {}: failed to write log entries: {err}", task.id));
                            continue;
                        }
                        task.content = stripped;
                        report.entries_migrated += records.len();
                        report.tasks_migrated += 1;
                        modified = true;
                    }
                }
            }

            if modified {
                fs::write(&self.paths.tasks, serialize_document(&document))
                    .map_err(MigrationError::Write)?;
            }
        }

        config.log_version = Some(LOG_VERSION_CENTRALIZED);
        if let Err(err) = self.config.save(&config) {
            warn!("event=log_migrate module=tasklog status=error reason=config_save_failed");
            report
                .errors
                .push(format!("Failed to record log version in config: {err}"));
        }

        info!(
            "event=log_migrate module=tasklog status=ok tasks={} entries={} errors={}",
            report.tasks_migrated,
            report.entries_migrated,
            report.errors.len()
        );
        Ok(report)
    }

    fn backup(&self) -> MigrationResult<PathBuf> {
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
        let mut name = self.paths.tasks.as_os_str().to_os_string();
        name.push(format!(".backup.{stamp}"));
        let backup_path = PathBuf::from(name);
        fs::copy(&self.paths.tasks, &backup_path).map_err(MigrationError::Backup)?;
        Ok(backup_path)
    }
}

/// `LogMigrator::for_dir(simbl_dir).needs_migration()`.
pub fn needs_migration(simbl_dir: &Path) -> MigrationResult<bool> {
    LogMigrator::for_dir(simbl_dir).needs_migration()
}

/// `LogMigrator::for_dir(simbl_dir).migrate()`.
pub fn migrate(simbl_dir: &Path) -> MigrationResult<MigrationReport> {
    LogMigrator::for_dir(simbl_dir).migrate()
}

#[cfg(test)]
mod tests {
    use super::{plan_task_migration, TaskLogMigration};
    use crate::model::task::{Section, Task};
    use chrono::{TimeZone, Utc};

    fn task_with(content: &str) -> Task {
        Task::new("task-4", "", vec![], content, Section::Backlog)
    }

    #[test]
    fn plan_keeps_file_order_and_stamps_task_id() {
        let task = task_with(
            "Body\n***\n\ntask-log\n\n- 2025-01-02T00:00:00Z | newer\n- 2025-01-01T00:00:00Z | older",
        );
        let TaskLogMigration::Migrate { records, stripped } = plan_task_migration(&task) else {
            panic!("expected a migration plan");
        };
        assert_eq!(stripped, "Body");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.task_id == "task-4"));
        assert_eq!(records[0].message, "newer");
        assert_eq!(
            records[1].timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn plan_rejects_unknown_log_lines() {
        let task = task_with("***\n\ntask-log\n\nsomething else");
        assert!(matches!(
            plan_task_migration(&task),
            TaskLogMigration::Rejected(_)
        ));
        assert_eq!(
            plan_task_migration(&task_with("no log")),
            TaskLogMigration::Untouched
        );
    }

    #[test]
    fn plan_leaves_marker_without_entries_alone() {
        for content in ["Body\n\n***\n\ntask-log\n", "Body\n\n***\n\ntask-log\n\n\n"] {
            assert_eq!(
                plan_task_migration(&task_with(content)),
                TaskLogMigration::Untouched
            );
        }
    }
}
