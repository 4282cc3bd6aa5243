//! Core domain logic for SIMBL, a task tracker stored as constrained Markdown.
//! This crate owns the document format, tag semantics and log storage.

pub mod document;
pub mod graph;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod service;
pub mod store;
pub mod tasklog;

pub use document::{parse_bytes, parse_document, serialize_document, DocumentError};
pub use graph::{find_all_cycles, would_create_cycle};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::criteria::{parse_acceptance_criteria, update_task_content, AcceptanceCriterion};
pub use model::tags::{classify_tag, derive_status, fold_tags, TagKind};
pub use model::task::{ReservedTags, Section, SimblFile, Task, TaskStatus};
pub use service::doctor::{validate_document, Issue, IssueLevel};
pub use service::task_service::{NewTask, TaskService, TaskServiceError, UpdateTask};
pub use store::{init_simbl_dir, FileTaskStore, ProjectConfig, SimblPaths, StoreError};
pub use tasklog::{FileLogEntry, LogEntry, MigrationReport};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
