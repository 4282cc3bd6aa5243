//! Read-only structural checks over a task document.
//!
//! # Responsibility
//! - Report section, id, tag and relationship problems as `Issue`s.
//!
//! # Invariants
//! - Never mutates anything; parse failures become an issue, not an error.

use crate::document::parse_document;
use crate::graph::find_all_cycles;
use crate::markdown::{normalize_line_endings, tokenize, BlockKind};
use crate::model::ids::is_valid_task_id;
use crate::model::tags::is_priority_tag;
use crate::model::task::Task;
use crate::store::config::{ConfigStore, YamlConfigStore};
use crate::store::{SimblPaths, StoreResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// One doctor finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub level: IssueLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl Issue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            message: message.into(),
            task_id: None,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            message: message.into(),
            task_id: None,
        }
    }

    fn for_task(mut self, task_id: &str) -> Self {
        self.task_id = Some(task_id.to_string());
        self
    }
}

pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|issue| issue.level == IssueLevel::Error)
}

/// Validates document text against the `<prefix>-N` id scheme.
pub fn validate_document(text: &str, prefix: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    let text = normalize_line_endings(text);
    let doc = tokenize(&text);
    let sections: Vec<String> = doc
        .blocks()
        .iter()
        .filter_map(|block| match &block.kind {
            BlockKind::Heading { depth: 1, text } => Some(text.to_lowercase()),
            _ => None,
        })
        .collect();

    if !sections.iter().any(|text| text == "backlog") {
        issues.push(Issue::error("Missing required H1 heading \"# Backlog\""));
    }
    if !sections.iter().any(|text| text == "done") {
        issues.push(Issue::error("Missing required H1 heading \"# Done\""));
    }
    for text in sections
        .iter()
        .filter(|text| text.as_str() != "backlog" && text.as_str() != "done")
    {
        issues.push(Issue::error(format!(
            "Unexpected H1 heading \"# {text}\" - only \"Backlog\" and \"Done\" are allowed"
        )));
    }

    let file = match parse_document(&text) {
        Ok(file) => file,
        Err(err) => {
            issues.push(Issue::error(format!("Failed to parse tasks file: {err}")));
            return issues;
        }
    };
    let tasks: Vec<Task> = file.all_tasks().cloned().collect();
    let known: HashSet<&str> = tasks.iter().map(|task| task.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for task in &tasks {
        let id = task.id.as_str();
        if !is_valid_task_id(id, prefix) {
            issues.push(
                Issue::warning(format!(
                    "Task ID \"{id}\" doesn't match expected format \"{prefix}-N\""
                ))
                .for_task(id),
            );
        }
        if !seen.insert(id) {
            issues.push(Issue::error(format!("Duplicate task ID \"{id}\"")).for_task(id));
        }

        let priorities: Vec<&str> = task
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| is_priority_tag(tag))
            .collect();
        if priorities.len() > 1 {
            issues.push(
                Issue::error(format!(
                    "Task has multiple priority tags: {}",
                    priorities.join(", ")
                ))
                .for_task(id),
            );
        }

        if let Some(parent) = task.reserved.parent_id.as_deref() {
            if !known.contains(parent) {
                issues.push(
                    Issue::warning(format!("Parent task \"{parent}\" not found")).for_task(id),
                );
            }
        }
        for dependency in &task.reserved.depends_on {
            if !known.contains(dependency.as_str()) {
                issues.push(
                    Issue::warning(format!("Dependency task \"{dependency}\" not found"))
                        .for_task(id),
                );
            }
        }
    }

    for cycle in find_all_cycles(&tasks) {
        issues.push(Issue::error(format!(
            "Circular dependency detected: {}",
            cycle.join(" -> ")
        )));
    }

    issues
}

/// Runs `validate_document` on `<simbl_dir>/tasks.md` with the configured
/// prefix.
pub fn diagnose(simbl_dir: &Path) -> StoreResult<Vec<Issue>> {
    let config = YamlConfigStore::new(simbl_dir).load()?;
    let bytes = fs::read(SimblPaths::new(simbl_dir).tasks)?;
    let text = String::from_utf8_lossy(&bytes);
    let issues = validate_document(&text, &config.prefix);
    info!(
        "event=doctor module=service status=ok issues={} errors={}",
        issues.len(),
        issues
            .iter()
            .filter(|issue| issue.level == IssueLevel::Error)
            .count()
    );
    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::{has_errors, validate_document, IssueLevel};

    #[test]
    fn clean_document_has_no_issues() {
        let issues = validate_document(
            "# Backlog\n\n## task-1 One\n\n[p1][depends-on-task-2]\n\n# Done\n\n## task-2 Two\n",
            "task",
        );
        assert!(issues.is_empty(), "{issues:?}");
        assert!(!has_errors(&issues));
    }

    #[test]
    fn missing_and_unexpected_sections_are_errors() {
        let messages: Vec<String> = validate_document("# Backlog\n\n# Ideas\n", "task")
            .into_iter()
            .map(|issue| issue.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Missing required H1 heading \"# Done\"".to_string(),
                "Unexpected H1 heading \"# ideas\" - only \"Backlog\" and \"Done\" are allowed"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn parse_failure_stops_further_checks() {
        let issues = validate_document("# Backlog\n\n##\n\n# Done\n", "task");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("Failed to parse tasks file: "));
        assert_eq!(issues[0].level, IssueLevel::Error);
    }
}
