//! Centralized append-only log: `<simbl dir>/log.ndjson`.
//!
//! # Invariants
//! - One JSON object per line, keys `taskId`, `timestamp`, `message`.
//! - Appends are single writes on an `O_APPEND` handle; no rewrite.
//! - Readers skip any line that does not decode as a full record.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "log.ndjson";

pub type FileLogResult<T> = Result<T, FileLogError>;

/// One centralized log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLogEntry {
    pub task_id: String,
    #[serde(with = "millis_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl FileLogEntry {
    pub fn new(
        task_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            timestamp,
            message: message.into(),
        }
    }
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ` on write; any RFC 3339 instant on read.
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Errors from writing or reading the centralized log.
#[derive(Debug)]
pub enum FileLogError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl Display for FileLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "task log io error: {err}"),
            Self::Serialize(err) => write!(f, "task log encode error: {err}"),
        }
    }
}

impl Error for FileLogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<io::Error> for FileLogError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FileLogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

pub fn log_path(simbl_dir: &Path) -> PathBuf {
    simbl_dir.join(LOG_FILE_NAME)
}

/// Appends one record as a single line.
pub fn append(simbl_dir: &Path, entry: &FileLogEntry) -> FileLogResult<()> {
    append_many(simbl_dir, std::slice::from_ref(entry))
}

/// Appends records in order with one write call. Empty input is a no-op and
/// does not create the file.
pub fn append_many(simbl_dir: &Path, entries: &[FileLogEntry]) -> FileLogResult<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut buffer = String::new();
    for entry in entries {
        buffer.push_str(&serde_json::to_string(entry)?);
        buffer.push('\n');
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(simbl_dir))?;
    file.write_all(buffer.as_bytes())?;
    Ok(())
}

/// Every decodable record in file order. A missing file reads as empty.
pub fn read_all(simbl_dir: &Path) -> FileLogResult<Vec<FileLogEntry>> {
    let bytes = match fs::read(log_path(simbl_dir)) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let text = String::from_utf8_lossy(&bytes);

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match serde_json::from_str::<FileLogEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(
            "event=task_log_read module=tasklog status=ok entries={} skipped={skipped}",
            entries.len()
        );
    }
    Ok(entries)
}

/// Records for `task_id`, newest first. Equal timestamps keep file order.
pub fn for_task(simbl_dir: &Path, task_id: &str) -> FileLogResult<Vec<FileLogEntry>> {
    let mut entries: Vec<FileLogEntry> = read_all(simbl_dir)?
        .into_iter()
        .filter(|entry| entry.task_id == task_id)
        .collect();
    entries.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::{append, for_task, log_path, read_all, FileLogEntry};
    use chrono::{TimeZone, Utc};
    use std::fs;

    #[test]
    fn append_writes_camel_case_line_with_millis() {
        let dir = tempfile::tempdir().unwrap();
        let entry = FileLogEntry::new(
            "task-1",
            Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap(),
            "Task created",
        );
        append(dir.path(), &entry).unwrap();

        let raw = fs::read_to_string(log_path(dir.path())).unwrap();
        assert_eq!(
            raw,
            "{\"taskId\":\"task-1\",\"timestamp\":\"2025-03-04T05:06:07.000Z\",\"message\":\"Task created\"}\n"
        );
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_all(dir.path()).unwrap().is_empty());
        assert!(for_task(dir.path(), "task-1").unwrap().is_empty());
    }

    #[test]
    fn for_task_filters_exact_id_and_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let older = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        append(dir.path(), &FileLogEntry::new("task-1", older, "a")).unwrap();
        append(dir.path(), &FileLogEntry::new("task-10", newer, "b")).unwrap();
        append(dir.path(), &FileLogEntry::new("task-1", newer, "c")).unwrap();

        let messages: Vec<String> = for_task(dir.path(), "task-1")
            .unwrap()
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(messages, vec!["c", "a"]);
    }
}
