//! Task and document records.
//!
//! # Responsibility
//! - Define `Task`, `Section`, `TaskStatus`, `ReservedTags` and `SimblFile`.
//! - Provide lookup helpers spanning both sections.
//!
//! # Invariants
//! - Status is a pure function of section + reserved flags.
//! - Backlog tasks always precede Done tasks in iteration order.

use crate::model::tags::{derive_status, fold_tags};
use serde::{Deserialize, Serialize};

/// Top-level document grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Backlog,
    Done,
}

impl Section {
    /// Heading text written for this section.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Done => "Done",
        }
    }

    /// Case-insensitive match of a depth-1 heading text.
    pub fn from_heading(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase();
        match normalized.as_str() {
            "backlog" => Some(Self::Backlog),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Derived workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Backlog,
    InProgress,
    Done,
    Canceled,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }
}

/// Machine-interpreted view of a task's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedTags {
    /// 1-9 from `[p1]`..`[p9]`; last occurrence wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// From `[project:<name>]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// From `[child-of-<id>]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// From every `[depends-on-<id>]`, in tag order, duplicates kept.
    pub depends_on: Vec<String>,
    pub in_progress: bool,
    pub canceled: bool,
    pub refined: bool,
}

/// One trackable work unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id, e.g. `task-1`.
    pub id: String,
    /// Heading text after the id. May be empty.
    pub title: String,
    /// Raw tags in document order.
    pub tags: Vec<String>,
    pub reserved: ReservedTags,
    pub status: TaskStatus,
    /// Raw markdown body below the tag line.
    pub content: String,
    pub section: Section,
}

impl Task {
    /// Creates a task and derives reserved tags and status from `tags`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        tags: Vec<String>,
        content: impl Into<String>,
        section: Section,
    ) -> Self {
        let reserved = fold_tags(&tags);
        let status = derive_status(section, &reserved);
        Self {
            id: id.into(),
            title: title.into(),
            tags,
            reserved,
            status,
            content: content.into(),
            section,
        }
    }

    /// Recomputes `reserved` and `status` after a tag or section change.
    pub fn refresh(&mut self) {
        self.reserved = fold_tags(&self.tags);
        self.status = derive_status(self.section, &self.reserved);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }
}

/// Whole `tasks.md` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimblFile {
    pub backlog: Vec<Task>,
    pub done: Vec<Task>,
    /// Content before the first section heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
}

impl SimblFile {
    pub fn section(&self, section: Section) -> &[Task] {
        match section {
            Section::Backlog => &self.backlog,
            Section::Done => &self.done,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Task> {
        match section {
            Section::Backlog => &mut self.backlog,
            Section::Done => &mut self.done,
        }
    }

    /// Backlog tasks then Done tasks.
    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.backlog.iter().chain(self.done.iter())
    }

    pub fn all_tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.backlog.iter_mut().chain(self.done.iter_mut())
    }

    /// First task with `id`, searching Backlog before Done.
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.all_tasks().find(|task| task.id == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.all_tasks_mut().find(|task| task.id == id)
    }

    pub fn task_ids(&self) -> Vec<String> {
        self.all_tasks().map(|task| task.id.clone()).collect()
    }

    /// Removes the task with `id` from `section` and returns it.
    pub fn take_task(&mut self, section: Section, id: &str) -> Option<Task> {
        let tasks = self.section_mut(section);
        let index = tasks.iter().position(|task| task.id == id)?;
        Some(tasks.remove(index))
    }
}
