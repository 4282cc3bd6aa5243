//! Task mutation service.
//!
//! # Responsibility
//! - Apply task edits to the loaded document and persist it.
//! - Route every edge-creating edit through the cycle check.
//! - Record one centralized log event per applied change.
//!
//! # Invariants
//! - A rejected edit leaves the stored document untouched.
//! - `reserved` and `status` are re-derived after every tag or section change.
//! - Events are appended only after the document save succeeded.

use crate::graph::would_create_cycle;
use crate::model::criteria::{
    parse_acceptance_criteria, update_task_content, AcceptanceCriterion,
};
use crate::model::ids::next_task_id;
use crate::model::tags::{
    child_of_tag, depends_on_tag, is_priority_tag, normalize_tag_input, priority_tag,
    project_tag, CHILD_OF_PREFIX, PROJECT_PREFIX, TAG_CANCELED, TAG_IN_PROGRESS,
};
use crate::model::task::{Section, SimblFile, Task};
use crate::store::config::{ConfigStore, YamlConfigStore};
use crate::store::{FileTaskStore, StoreError, TaskStore};
use crate::tasklog::file_log::FileLogEntry;
use chrono::Utc;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

static HEADING_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]").expect("valid heading prefix regex"));

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Title is empty after trimming.
    InvalidTitle,
    /// Tag is empty after bracket stripping.
    InvalidTag(String),
    /// Priority outside 1..=9.
    InvalidPriority(u8),
    /// Highest existing id suffix is already `u64::MAX`.
    IdsExhausted(String),
    /// Update request carries no field.
    EmptyUpdate,
    /// Criterion text is empty or spans several lines.
    InvalidCriterion(String),
    /// Add request carries no criterion.
    NoCriteria,
    /// 1-based criterion index outside the task's checklist.
    CriterionIndex {
        task_id: String,
        index: usize,
        count: usize,
    },
    TaskNotFound(String),
    ParentNotFound(String),
    DependencyNotFound(String),
    /// Task would relate to itself.
    SelfReference(String),
    /// Edge `task_id -> target_id` would close a cycle.
    CycleDetected { task_id: String, target_id: String },
    DependencyExists { task_id: String, dependency_id: String },
    NoParent(String),
    NoDependency { task_id: String, dependency_id: String },
    AlreadyDone(String),
    NotInBacklog(String),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "task title must not be empty"),
            Self::InvalidTag(value) => write!(f, "invalid tag: `{value}`"),
            Self::InvalidPriority(value) => write!(f, "priority must be 1-9, got {value}"),
            Self::IdsExhausted(prefix) => {
                write!(f, "no `{prefix}-N` id left above the highest existing suffix")
            }
            Self::EmptyUpdate => write!(f, "provide a title, content or text to append"),
            Self::InvalidCriterion(value) => {
                write!(f, "acceptance criterion must be one non-empty line, got `{value}`")
            }
            Self::NoCriteria => write!(f, "at least one acceptance criterion is required"),
            Self::CriterionIndex {
                task_id,
                index,
                count,
            } => write!(
                f,
                "invalid criterion index {index}: task \"{task_id}\" has {count} criteria"
            ),
            Self::TaskNotFound(id) => write!(f, "task \"{id}\" not found"),
            Self::ParentNotFound(id) => write!(f, "parent task \"{id}\" not found"),
            Self::DependencyNotFound(id) => write!(f, "dependency task \"{id}\" not found"),
            Self::SelfReference(id) => write!(f, "task \"{id}\" cannot relate to itself"),
            Self::CycleDetected { task_id, target_id } => write!(
                f,
                "linking \"{task_id}\" to \"{target_id}\" would create a circular dependency"
            ),
            Self::DependencyExists {
                task_id,
                dependency_id,
            } => write!(f, "task \"{task_id}\" already depends on \"{dependency_id}\""),
            Self::NoParent(id) => write!(f, "task \"{id}\" has no parent"),
            Self::NoDependency {
                task_id,
                dependency_id,
            } => write!(f, "task \"{task_id}\" doesn't depend on \"{dependency_id}\""),
            Self::AlreadyDone(id) => write!(f, "task \"{id}\" is already done"),
            Self::NotInBacklog(id) => write!(f, "task \"{id}\" not found in backlog"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for TaskServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Input for `add_task`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    /// Raw tags in order, brackets optional.
    pub tags: Vec<String>,
    pub priority: Option<u8>,
    pub project: Option<String>,
    /// Markdown placed under `### Description`.
    pub content: Option<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Input for `update_task`. At least one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTask {
    pub title: Option<String>,
    /// Replaces the whole body.
    pub content: Option<String>,
    /// Added after the body, separated by a blank line.
    pub append: Option<String>,
}

/// Shifts markdown headings down two levels, capped at `######`, so user
/// text never opens a section or a task.
pub fn normalize_headings(content: &str) -> String {
    HEADING_PREFIX_RE
        .replace_all(content, |caps: &Captures<'_>| {
            let level = (caps[1].len() + 2).min(6);
            format!("{} ", "#".repeat(level))
        })
        .into_owned()
}

/// Task service facade over a task store.
pub struct TaskService<S: TaskStore> {
    store: S,
    prefix: String,
}

impl TaskService<FileTaskStore> {
    /// Opens the service over a `.simbl` directory, reading the id prefix
    /// from its config.
    pub fn open(simbl_dir: &Path) -> Result<Self, TaskServiceError> {
        let config = YamlConfigStore::new(simbl_dir)
            .load()
            .map_err(StoreError::from)?;
        Ok(Self::new(FileTaskStore::new(simbl_dir), config.prefix))
    }
}

impl<S: TaskStore> TaskService<S> {
    /// Creates a service using the provided store and id prefix.
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the current document.
    pub fn load(&self) -> Result<SimblFile, TaskServiceError> {
        Ok(self.store.load()?)
    }

    /// Next free id across `tasks.md` and the archive.
    pub fn next_id(&self) -> Result<String, TaskServiceError> {
        let file = self.store.load()?;
        let archive = self.store.load_archive()?;
        self.next_id_in(&file, &archive)
    }

    fn next_id_in(
        &self,
        file: &SimblFile,
        archive: &SimblFile,
    ) -> Result<String, TaskServiceError> {
        let ids: Vec<&str> = file
            .all_tasks()
            .chain(archive.all_tasks())
            .map(|task| task.id.as_str())
            .collect();
        next_task_id(&self.prefix, &ids)
            .ok_or_else(|| TaskServiceError::IdsExhausted(self.prefix.clone()))
    }

    /// Creates a backlog task at the end of the backlog.
    pub fn add_task(&self, input: NewTask) -> Result<Task, TaskServiceError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(TaskServiceError::InvalidTitle);
        }

        let mut tags = Vec::with_capacity(input.tags.len() + 2);
        for raw in &input.tags {
            let tag = normalize_tag_input(raw);
            if tag.is_empty() {
                return Err(TaskServiceError::InvalidTag(raw.clone()));
            }
            tags.push(tag);
        }
        if let Some(priority) = input.priority {
            if !(1..=9).contains(&priority) {
                return Err(TaskServiceError::InvalidPriority(priority));
            }
            tags.retain(|tag| !is_priority_tag(tag));
            tags.insert(0, priority_tag(priority));
        }
        if let Some(project) = input.project.as_deref().map(str::trim) {
            if project.is_empty() {
                return Err(TaskServiceError::InvalidTag(PROJECT_PREFIX.to_string()));
            }
            tags.retain(|tag| !tag.starts_with(PROJECT_PREFIX));
            tags.push(project_tag(project));
        }

        let content = match input.content.as_deref().map(str::trim) {
            Some(body) if !body.is_empty() => {
                format!("### Description\n\n{}", normalize_headings(body))
            }
            _ => String::new(),
        };

        let mut file = self.store.load()?;
        let archive = self.store.load_archive()?;
        let id = self.next_id_in(&file, &archive)?;
        let task = Task::new(id, title, tags, content, Section::Backlog);
        file.backlog.push(task.clone());

        self.commit(&file, &task.id, &["Task created".to_string()])?;
        info!("event=task_add module=service status=ok");
        Ok(task)
    }

    /// Adds one tag. A priority tag replaces the current priority.
    /// Adding a tag the task already has changes nothing.
    pub fn add_tag(&self, task_id: &str, tag: &str) -> Result<Task, TaskServiceError> {
        let tag = normalize_tag_input(tag);
        if tag.is_empty() {
            return Err(TaskServiceError::InvalidTag(tag));
        }

        let mut file = self.store.load()?;
        let task = find_mut(&mut file, task_id)?;
        if task.has_tag(&tag) {
            return Ok(task.clone());
        }

        let mut replaced = None;
        if is_priority_tag(&tag) {
            if let Some(current) = task.tags.iter().find(|t| is_priority_tag(t)).cloned() {
                task.tags.retain(|t| t != &current);
                replaced = Some(current);
            }
        }
        task.tags.push(tag.clone());
        task.refresh();
        let updated = task.clone();

        let message = match replaced {
            Some(old) => format!("Priority changed from [{old}] to [{tag}]"),
            None => format!("Added tag [{tag}]"),
        };
        self.commit(&file, task_id, &[message])?;
        Ok(updated)
    }

    /// Removes every occurrence of a tag. A missing tag changes nothing.
    pub fn remove_tag(&self, task_id: &str, tag: &str) -> Result<Task, TaskServiceError> {
        let tag = normalize_tag_input(tag);
        let mut file = self.store.load()?;
        let task = find_mut(&mut file, task_id)?;
        if !task.has_tag(&tag) {
            return Ok(task.clone());
        }

        task.tags.retain(|t| t != &tag);
        task.refresh();
        let updated = task.clone();

        self.commit(&file, task_id, &[format!("Removed tag [{tag}]")])?;
        Ok(updated)
    }

    /// Sets `child-of-<parent>`, replacing any existing parent.
    pub fn set_parent(&self, task_id: &str, parent_id: &str) -> Result<Task, TaskServiceError> {
        let mut file = self.store.load()?;
        ensure_exists(&file, task_id)?;
        if file.find_task(parent_id).is_none() {
            return Err(TaskServiceError::ParentNotFound(parent_id.to_string()));
        }
        if task_id == parent_id {
            return Err(TaskServiceError::SelfReference(task_id.to_string()));
        }
        if would_create_cycle(task_id, parent_id, file.all_tasks()) {
            warn!("event=task_relate module=service status=error reason=cycle edge=parent");
            return Err(TaskServiceError::CycleDetected {
                task_id: task_id.to_string(),
                target_id: parent_id.to_string(),
            });
        }

        let task = find_mut(&mut file, task_id)?;
        task.tags.retain(|tag| !tag.starts_with(CHILD_OF_PREFIX));
        task.tags.push(child_of_tag(parent_id));
        task.refresh();
        let updated = task.clone();

        self.commit(&file, task_id, &[format!("Parent set to {parent_id}")])?;
        Ok(updated)
    }

    /// Adds `depends-on-<dependency>`.
    pub fn add_dependency(
        &self,
        task_id: &str,
        dependency_id: &str,
    ) -> Result<Task, TaskServiceError> {
        let mut file = self.store.load()?;
        let current = file
            .find_task(task_id)
            .ok_or_else(|| TaskServiceError::TaskNotFound(task_id.to_string()))?;
        if file.find_task(dependency_id).is_none() {
            return Err(TaskServiceError::DependencyNotFound(
                dependency_id.to_string(),
            ));
        }
        if task_id == dependency_id {
            return Err(TaskServiceError::SelfReference(task_id.to_string()));
        }
        if current.reserved.depends_on.iter().any(|id| id == dependency_id) {
            return Err(TaskServiceError::DependencyExists {
                task_id: task_id.to_string(),
                dependency_id: dependency_id.to_string(),
            });
        }
        if would_create_cycle(task_id, dependency_id, file.all_tasks()) {
            warn!("event=task_relate module=service status=error reason=cycle edge=depends_on");
            return Err(TaskServiceError::CycleDetected {
                task_id: task_id.to_string(),
                target_id: dependency_id.to_string(),
            });
        }

        let task = find_mut(&mut file, task_id)?;
        task.tags.push(depends_on_tag(dependency_id));
        task.refresh();
        let updated = task.clone();

        self.commit(
            &file,
            task_id,
            &[format!("Dependency added on {dependency_id}")],
        )?;
        Ok(updated)
    }

    /// Drops every `child-of-*` tag.
    pub fn remove_parent(&self, task_id: &str) -> Result<Task, TaskServiceError> {
        let mut file = self.store.load()?;
        let task = find_mut(&mut file, task_id)?;
        let Some(parent) = task.reserved.parent_id.clone() else {
            return Err(TaskServiceError::NoParent(task_id.to_string()));
        };

        task.tags.retain(|tag| !tag.starts_with(CHILD_OF_PREFIX));
        task.refresh();
        let updated = task.clone();

        self.commit(&file, task_id, &[format!("Parent {parent} removed")])?;
        Ok(updated)
    }

    /// Drops `depends-on-<dependency>`.
    pub fn remove_dependency(
        &self,
        task_id: &str,
        dependency_id: &str,
    ) -> Result<Task, TaskServiceError> {
        let mut file = self.store.load()?;
        let task = find_mut(&mut file, task_id)?;
        if !task.reserved.depends_on.iter().any(|id| id == dependency_id) {
            return Err(TaskServiceError::NoDependency {
                task_id: task_id.to_string(),
                dependency_id: dependency_id.to_string(),
            });
        }

        let tag = depends_on_tag(dependency_id);
        task.tags.retain(|current| current != &tag);
        task.refresh();
        let updated = task.clone();

        self.commit(
            &file,
            task_id,
            &[format!("Dependency on {dependency_id} removed")],
        )?;
        Ok(updated)
    }

    /// Moves a backlog task to the top of Done.
    pub fn mark_done(&self, task_id: &str) -> Result<Task, TaskServiceError> {
        self.close(task_id, false)
    }

    /// Marks a backlog task `canceled` and moves it to the top of Done.
    pub fn cancel(&self, task_id: &str) -> Result<Task, TaskServiceError> {
        self.close(task_id, true)
    }

    fn close(&self, task_id: &str, canceled: bool) -> Result<Task, TaskServiceError> {
        let mut file = self.store.load()?;
        let Some(mut task) = file.take_task(Section::Backlog, task_id) else {
            if file.section(Section::Done).iter().any(|task| task.id == task_id) {
                return Err(TaskServiceError::AlreadyDone(task_id.to_string()));
            }
            return Err(TaskServiceError::NotInBacklog(task_id.to_string()));
        };

        task.tags.retain(|tag| tag != TAG_IN_PROGRESS);
        if canceled && !task.has_tag(TAG_CANCELED) {
            task.tags.push(TAG_CANCELED.to_string());
        }
        task.section = Section::Done;
        task.refresh();
        file.done.insert(0, task.clone());

        let message = if canceled {
            "Marked as canceled"
        } else {
            "Moved to Done"
        };
        self.commit(&file, task_id, &[message.to_string()])?;
        info!(
            "event=task_close module=service status=ok state={}",
            task.status.as_str()
        );
        Ok(task)
    }

    /// Updates title and/or body.
    pub fn update_task(&self, task_id: &str, update: UpdateTask) -> Result<Task, TaskServiceError> {
        if update.title.is_none() && update.content.is_none() && update.append.is_none() {
            return Err(TaskServiceError::EmptyUpdate);
        }
        let title = match update.title.as_deref().map(str::trim) {
            Some("") => return Err(TaskServiceError::InvalidTitle),
            other => other,
        };

        let mut file = self.store.load()?;
        let task = find_mut(&mut file, task_id)?;
        let mut messages = Vec::new();

        if let Some(title) = title {
            task.title = title.to_string();
            messages.push("Title updated".to_string());
        }
        let mut content_changed = false;
        if let Some(content) = update.content.as_deref() {
            task.content = normalize_headings(content.trim());
            content_changed = true;
        }
        if let Some(extra) = update.append.as_deref().map(str::trim) {
            let extra = normalize_headings(extra);
            if task.content.is_empty() {
                task.content = extra;
            } else {
                task.content = format!("{}\n\n{extra}", task.content);
            }
            content_changed = true;
        }
        if content_changed {
            messages.push("Content updated".to_string());
        }
        let updated = task.clone();

        self.commit(&file, task_id, &messages)?;
        Ok(updated)
    }

    /// Moves the named Done tasks to the top of the archive's Done section,
    /// keeping their relative order. Returns the archived tasks.
    pub fn archive_done(&self, task_ids: &[&str]) -> Result<Vec<Task>, TaskServiceError> {
        let mut file = self.store.load()?;
        let selected: HashSet<&str> = task_ids.iter().copied().collect();
        for id in &selected {
            if !file.done.iter().any(|task| task.id == *id) {
                return Err(TaskServiceError::TaskNotFound((*id).to_string()));
            }
        }
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        let (archived, kept): (Vec<Task>, Vec<Task>) = std::mem::take(&mut file.done)
            .into_iter()
            .partition(|task| selected.contains(task.id.as_str()));
        file.done = kept;

        let mut archive = self.store.load_archive()?;
        let mut merged = archived.clone();
        merged.append(&mut archive.done);
        archive.done = merged;

        self.store.save_archive(&archive)?;
        self.store.save(&file)?;
        info!(
            "event=task_archive module=service status=ok archived={}",
            archived.len()
        );
        Ok(archived)
    }

    /// Acceptance criteria of a task, numbered from 1.
    pub fn criteria(
        &self,
        task_id: &str,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        let file = self.store.load()?;
        criteria_of(&file, task_id)
    }

    /// Appends unchecked criteria, creating the checklist when missing.
    pub fn add_criteria(
        &self,
        task_id: &str,
        texts: &[&str],
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        if texts.is_empty() {
            return Err(TaskServiceError::NoCriteria);
        }
        let texts = texts
            .iter()
            .map(|text| criterion_text(text))
            .collect::<Result<Vec<_>, _>>()?;

        let file = self.store.load()?;
        let mut criteria = criteria_of(&file, task_id)?;
        let added = texts.len();
        for text in texts {
            criteria.push(AcceptanceCriterion::new(criteria.len() + 1, text, false));
        }

        let message = if added == 1 {
            "Added 1 acceptance criterion".to_string()
        } else {
            format!("Added {added} acceptance criteria")
        };
        self.rewrite_criteria(file, task_id, &criteria, message)
    }

    /// Checks criterion `index` (1-based). Already met changes nothing.
    pub fn mark_criterion_met(
        &self,
        task_id: &str,
        index: usize,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        self.set_criterion_met(task_id, index, true)
    }

    /// Unchecks criterion `index` (1-based). Already unmet changes nothing.
    pub fn mark_criterion_unmet(
        &self,
        task_id: &str,
        index: usize,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        self.set_criterion_met(task_id, index, false)
    }

    fn set_criterion_met(
        &self,
        task_id: &str,
        index: usize,
        met: bool,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        let file = self.store.load()?;
        let mut criteria = criteria_of(&file, task_id)?;
        let position = criterion_position(task_id, index, criteria.len())?;
        if criteria[position].met == met {
            return Ok(criteria);
        }

        criteria[position].met = met;
        let message = if met {
            format!("Criterion #{index} marked as met")
        } else {
            format!("Criterion #{index} marked as not met")
        };
        self.rewrite_criteria(file, task_id, &criteria, message)
    }

    /// Replaces the text of criterion `index` (1-based), keeping its state.
    pub fn update_criterion(
        &self,
        task_id: &str,
        index: usize,
        text: &str,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        let text = criterion_text(text)?;
        let file = self.store.load()?;
        let mut criteria = criteria_of(&file, task_id)?;
        let position = criterion_position(task_id, index, criteria.len())?;

        criteria[position].text = text;
        self.rewrite_criteria(file, task_id, &criteria, format!("Criterion #{index} updated"))
    }

    /// Removes criterion `index` (1-based); later criteria move up.
    pub fn delete_criterion(
        &self,
        task_id: &str,
        index: usize,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        let file = self.store.load()?;
        let mut criteria = criteria_of(&file, task_id)?;
        let position = criterion_position(task_id, index, criteria.len())?;

        criteria.remove(position);
        self.rewrite_criteria(file, task_id, &criteria, format!("Criterion #{index} deleted"))
    }

    fn rewrite_criteria(
        &self,
        mut file: SimblFile,
        task_id: &str,
        criteria: &[AcceptanceCriterion],
        message: String,
    ) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
        let task = find_mut(&mut file, task_id)?;
        task.content = update_task_content(&task.content, criteria);
        let stored = parse_acceptance_criteria(&task.content);

        self.commit(&file, task_id, &[message])?;
        Ok(stored)
    }

    fn commit(
        &self,
        file: &SimblFile,
        task_id: &str,
        messages: &[String],
    ) -> Result<(), TaskServiceError> {
        self.store.save(file)?;

        let now = Utc::now();
        let events: Vec<FileLogEntry> = messages
            .iter()
            .map(|message| FileLogEntry::new(task_id, now, message.as_str()))
            .collect();
        if self.store.append_events(&events).is_err() {
            warn!(
                "event=task_log_append module=service status=error events={}",
                events.len()
            );
        }
        Ok(())
    }
}

fn ensure_exists(file: &SimblFile, task_id: &str) -> Result<(), TaskServiceError> {
    match file.find_task(task_id) {
        Some(_) => Ok(()),
        None => Err(TaskServiceError::TaskNotFound(task_id.to_string())),
    }
}

fn criteria_of(
    file: &SimblFile,
    task_id: &str,
) -> Result<Vec<AcceptanceCriterion>, TaskServiceError> {
    file.find_task(task_id)
        .map(|task| parse_acceptance_criteria(&task.content))
        .ok_or_else(|| TaskServiceError::TaskNotFound(task_id.to_string()))
}

/// Zero-based position of 1-based `index`.
fn criterion_position(
    task_id: &str,
    index: usize,
    count: usize,
) -> Result<usize, TaskServiceError> {
    if index == 0 || index > count {
        return Err(TaskServiceError::CriterionIndex {
            task_id: task_id.to_string(),
            index,
            count,
        });
    }
    Ok(index - 1)
}

fn criterion_text(raw: &str) -> Result<String, TaskServiceError> {
    let text = raw.trim();
    if text.is_empty() || text.contains(['\n', '\r']) {
        return Err(TaskServiceError::InvalidCriterion(raw.to_string()));
    }
    Ok(text.to_string())
}

fn find_mut<'a>(file: &'a mut SimblFile, task_id: &str) -> Result<&'a mut Task, TaskServiceError> {
    file.find_task_mut(task_id)
        .ok_or_else(|| TaskServiceError::TaskNotFound(task_id.to_string()))
}
