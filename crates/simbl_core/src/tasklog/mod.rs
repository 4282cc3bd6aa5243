//! Task event logs.
//!
//! # Responsibility
//! - Read and write the legacy log embedded in task content.
//! - Append to and read the centralized `log.ndjson` file.
//! - Migrate the former into the latter exactly once per directory.
//!
//! # Invariants
//! - The centralized log is append-only; nothing in this crate rewrites it.
//! - Timestamps are UTC. Embedded entries keep seconds, file entries keep
//!   milliseconds.

pub mod embedded;
pub mod file_log;
pub mod migrate;

pub use embedded::{
    append_embedded, append_or_batch_embedded, has_embedded_log, inspect_embedded,
    parse_embedded, strip_embedded, EmbeddedLog, LogEntry, DEFAULT_BATCH_WINDOW_MINUTES,
    LOG_SECTION_MARKER,
};
pub use file_log::{FileLogEntry, FileLogError, FileLogResult, LOG_FILE_NAME};
pub use migrate::{
    plan_task_migration, LogMigrator, MigrationError, MigrationReport, MigrationResult,
    TaskLogMigration,
};
