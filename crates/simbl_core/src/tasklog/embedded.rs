//! Legacy per-task log embedded at the end of task content.
//!
//! Layout inside `Task.content`:
//!
//! ```text
//! user content
//! ***
//!
//! task-log
//!
//! - 2025-12-17T14:32:00Z | newest message
//! - 2025-12-17T14:30:00Z | older message
//! ```

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const LOG_SECTION_MARKER: &str = "***\n\ntask-log\n";
pub const DEFAULT_BATCH_WINDOW_MINUTES: u32 = 30;

const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\n)\*\*\*\n\ntask-log\n").expect("valid log marker regex"));
static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^- (\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z) \| (.+)$")
        .expect("valid log entry regex")
});

/// One embedded entry, second precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }

    /// `- YYYY-MM-DDTHH:MM:SSZ | message`
    pub fn to_line(&self) -> String {
        format!(
            "- {} | {}",
            self.timestamp.format(ENTRY_TIMESTAMP_FORMAT),
            self.message
        )
    }

    fn from_line(line: &str) -> Option<Self> {
        let caps = ENTRY_RE.captures(line)?;
        let timestamp = NaiveDateTime::parse_from_str(&caps[1], ENTRY_TIMESTAMP_FORMAT)
            .ok()?
            .and_utc();
        Some(Self::new(timestamp, &caps[2]))
    }
}

/// What the content holds under (or instead of) a log section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedLog {
    /// No marker.
    Absent,
    /// Marker found and every non-blank line below it is an entry.
    Parsed { body: String, entries: Vec<LogEntry> },
    /// Marker found but some lines below it are not entries.
    Unrecognized { body: String, lines: Vec<String> },
}

struct MarkerSplit<'a> {
    body: &'a str,
    log: String,
}

/// Splits at the first marker. A trailing newline is added before searching
/// so a marker at the very end of trimmed content still matches.
fn split_at_marker(content: &str) -> Option<MarkerSplit<'_>> {
    if content.is_empty() {
        return None;
    }
    let padded = format!("{content}\n");
    let found = MARKER_RE.find(&padded)?;
    let start = found.start().min(content.len());
    Some(MarkerSplit {
        body: content[..start].trim_end(),
        log: padded[found.end()..].to_string(),
    })
}

fn non_blank_lines(log: &str) -> impl Iterator<Item = &str> {
    log.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Entries below the marker, in stored order (newest first).
/// Lines that are not entries are skipped.
pub fn parse_embedded(content: &str) -> Vec<LogEntry> {
    match split_at_marker(content) {
        Some(split) => non_blank_lines(&split.log)
            .filter_map(LogEntry::from_line)
            .collect(),
        None => Vec::new(),
    }
}

/// Content with the log section removed; unchanged when there is none.
pub fn strip_embedded(content: &str) -> String {
    match split_at_marker(content) {
        Some(split) => split.body.to_string(),
        None => content.to_string(),
    }
}

pub fn has_embedded_log(content: &str) -> bool {
    split_at_marker(content).is_some()
}

/// Classifies the log section for migration.
pub fn inspect_embedded(content: &str) -> EmbeddedLog {
    let Some(split) = split_at_marker(content) else {
        return EmbeddedLog::Absent;
    };

    let mut entries = Vec::new();
    let mut unrecognized = Vec::new();
    for line in non_blank_lines(&split.log) {
        match LogEntry::from_line(line) {
            Some(entry) => entries.push(entry),
            None => unrecognized.push(line.to_string()),
        }
    }

    let body = split.body.to_string();
    if unrecognized.is_empty() {
        EmbeddedLog::Parsed { body, entries }
    } else {
        EmbeddedLog::Unrecognized {
            body,
            lines: unrecognized,
        }
    }
}

fn compose(body: &str, entries: &[LogEntry]) -> String {
    let lines = entries
        .iter()
        .map(LogEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n");
    let body = body.trim_end();
    if body.is_empty() {
        format!("{LOG_SECTION_MARKER}\n{lines}")
    } else {
        format!("{body}\n{LOG_SECTION_MARKER}\n{lines}")
    }
}

/// Prepends an entry, creating the log section when missing.
pub fn append_embedded(content: &str, message: &str, timestamp: DateTime<Utc>) -> String {
    let mut entries = vec![LogEntry::new(timestamp, message)];
    entries.extend(parse_embedded(content));
    compose(&strip_embedded(content), &entries)
}

/// Refreshes the newest entry instead of adding one when it carries the same
/// message and is less than `window_minutes` old.
pub fn append_or_batch_embedded(
    content: &str,
    message: &str,
    window_minutes: u32,
    timestamp: DateTime<Utc>,
) -> String {
    let mut entries = parse_embedded(content);
    let batch = entries.first().is_some_and(|recent| {
        recent.message == message
            && timestamp - recent.timestamp < Duration::minutes(i64::from(window_minutes))
    });
    if !batch {
        return append_embedded(content, message, timestamp);
    }

    entries[0].timestamp = timestamp;
    compose(&strip_embedded(content), &entries)
}
