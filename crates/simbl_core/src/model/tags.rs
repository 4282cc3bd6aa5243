//! Reserved tag semantics.
//!
//! # Responsibility
//! - Classify raw tag strings into reserved kinds.
//! - Fold a tag list into `ReservedTags` and derive `TaskStatus`.
//! - Read and write the `[t1][t2]` tag line.
//!
//! # Invariants
//! - Folding never rejects input: the last priority wins, every dependency is
//!   kept, boolean flags are OR'd.
//! - Status precedence: canceled > done section > in-progress > backlog.

use crate::model::task::{ReservedTags, Section, TaskStatus};
use once_cell::sync::Lazy;
use regex::Regex;

pub const TAG_IN_PROGRESS: &str = "in-progress";
pub const TAG_CANCELED: &str = "canceled";
pub const TAG_REFINED: &str = "refined";
pub const CHILD_OF_PREFIX: &str = "child-of-";
pub const DEPENDS_ON_PREFIX: &str = "depends-on-";
pub const PROJECT_PREFIX: &str = "project:";

static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^p([1-9])$").expect("valid priority regex"));
static PROJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^project:(.+)$").expect("valid project regex"));
static CHILD_OF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^child-of-(.+)$").expect("valid child-of regex"));
static DEPENDS_ON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^depends-on-(.+)$").expect("valid depends-on regex"));
static TAG_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid tag token regex"));

/// Classified meaning of one raw tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Priority(u8),
    Project(String),
    ChildOf(String),
    DependsOn(String),
    InProgress,
    Canceled,
    Refined,
    Custom(String),
}

/// Classifies one tag using the fixed reserved patterns.
pub fn classify_tag(tag: &str) -> TagKind {
    if let Some(caps) = PRIORITY_RE.captures(tag) {
        if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()) {
            return TagKind::Priority(value);
        }
    }
    if let Some(caps) = PROJECT_RE.captures(tag) {
        return TagKind::Project(caps[1].to_string());
    }
    if let Some(caps) = CHILD_OF_RE.captures(tag) {
        return TagKind::ChildOf(caps[1].to_string());
    }
    if let Some(caps) = DEPENDS_ON_RE.captures(tag) {
        return TagKind::DependsOn(caps[1].to_string());
    }

    match tag {
        TAG_IN_PROGRESS => TagKind::InProgress,
        TAG_CANCELED => TagKind::Canceled,
        TAG_REFINED => TagKind::Refined,
        other => TagKind::Custom(other.to_string()),
    }
}

/// Folds tags, in order, into reserved tag state.
///
/// A later priority or parent overwrites an earlier one. Tag replacement
/// call sites rely on this when they strip and re-append.
pub fn fold_tags<S: AsRef<str>>(tags: &[S]) -> ReservedTags {
    let mut reserved = ReservedTags::default();
    for tag in tags {
        match classify_tag(tag.as_ref()) {
            TagKind::Priority(value) => reserved.priority = Some(value),
            TagKind::Project(name) => reserved.project = Some(name),
            TagKind::ChildOf(id) => reserved.parent_id = Some(id),
            TagKind::DependsOn(id) => reserved.depends_on.push(id),
            TagKind::InProgress => reserved.in_progress = true,
            TagKind::Canceled => reserved.canceled = true,
            TagKind::Refined => reserved.refined = true,
            TagKind::Custom(_) => {}
        }
    }
    reserved
}

/// Derives workflow status from section and reserved flags.
pub fn derive_status(section: Section, reserved: &ReservedTags) -> TaskStatus {
    if reserved.canceled {
        return TaskStatus::Canceled;
    }
    if section == Section::Done {
        return TaskStatus::Done;
    }
    if reserved.in_progress {
        return TaskStatus::InProgress;
    }
    TaskStatus::Backlog
}

pub fn is_priority_tag(tag: &str) -> bool {
    PRIORITY_RE.is_match(tag)
}

/// Extracts `[...]` tokens from a tag line. Duplicates are kept.
pub fn parse_tag_line(line: &str) -> Vec<String> {
    TAG_TOKEN_RE
        .captures_iter(line)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Formats tags as `[t1][t2]`. Empty input yields an empty string.
pub fn format_tag_line<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| format!("[{}]", tag.as_ref()))
        .collect::<String>()
}

/// Strips one leading `[` and one trailing `]` from user tag input.
pub fn normalize_tag_input(tag: &str) -> String {
    let trimmed = tag.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);
    trimmed.to_string()
}

pub fn priority_tag(priority: u8) -> String {
    format!("p{priority}")
}

pub fn child_of_tag(parent_id: &str) -> String {
    format!("{CHILD_OF_PREFIX}{parent_id}")
}

pub fn depends_on_tag(dependency_id: &str) -> String {
    format!("{DEPENDS_ON_PREFIX}{dependency_id}")
}

pub fn project_tag(project: &str) -> String {
    format!("{PROJECT_PREFIX}{project}")
}

#[cfg(test)]
mod tests {
    use super::{
        classify_tag, derive_status, fold_tags, format_tag_line, normalize_tag_input,
        parse_tag_line, TagKind,
    };
    use crate::model::task::{ReservedTags, Section, TaskStatus};

    #[test]
    fn classify_recognizes_reserved_patterns() {
        assert_eq!(classify_tag("p1"), TagKind::Priority(1));
        assert_eq!(classify_tag("p9"), TagKind::Priority(9));
        assert_eq!(classify_tag("p0"), TagKind::Custom("p0".to_string()));
        assert_eq!(classify_tag("p10"), TagKind::Custom("p10".to_string()));
        assert_eq!(
            classify_tag("project:auth"),
            TagKind::Project("auth".to_string())
        );
        assert_eq!(
            classify_tag("child-of-task-3"),
            TagKind::ChildOf("task-3".to_string())
        );
        assert_eq!(
            classify_tag("depends-on-task-4"),
            TagKind::DependsOn("task-4".to_string())
        );
        assert_eq!(classify_tag("in-progress"), TagKind::InProgress);
        assert_eq!(classify_tag("canceled"), TagKind::Canceled);
        assert_eq!(classify_tag("refined"), TagKind::Refined);
        assert_eq!(
            classify_tag("project:"),
            TagKind::Custom("project:".to_string())
        );
    }

    #[test]
    fn fold_last_priority_wins() {
        assert_eq!(fold_tags(&["p2", "p1"]).priority, Some(1));
        assert_eq!(fold_tags(&["p1", "design", "p7"]).priority, Some(7));
    }

    #[test]
    fn fold_keeps_duplicate_dependencies_and_ors_flags() {
        let reserved = fold_tags(&[
            "in-progress",
            "depends-on-a",
            "in-progress",
            "depends-on-a",
            "child-of-x",
            "child-of-y",
        ]);
        assert!(reserved.in_progress);
        assert_eq!(reserved.depends_on, vec!["a", "a"]);
        assert_eq!(reserved.parent_id.as_deref(), Some("y"));
    }

    #[test]
    fn status_precedence_table() {
        let canceled = ReservedTags {
            canceled: true,
            ..ReservedTags::default()
        };
        let in_progress = ReservedTags {
            in_progress: true,
            ..ReservedTags::default()
        };
        let empty = ReservedTags::default();

        assert_eq!(derive_status(Section::Done, &canceled), TaskStatus::Canceled);
        assert_eq!(
            derive_status(Section::Backlog, &canceled),
            TaskStatus::Canceled
        );
        assert_eq!(
            derive_status(Section::Backlog, &in_progress),
            TaskStatus::InProgress
        );
        assert_eq!(derive_status(Section::Done, &in_progress), TaskStatus::Done);
        assert_eq!(derive_status(Section::Done, &empty), TaskStatus::Done);
        assert_eq!(derive_status(Section::Backlog, &empty), TaskStatus::Backlog);
    }

    #[test]
    fn tag_line_parse_and_format() {
        let tags = parse_tag_line("[p1][design] [project:auth][p1]");
        assert_eq!(tags, vec!["p1", "design", "project:auth", "p1"]);
        assert_eq!(format_tag_line(&tags), "[p1][design][project:auth][p1]");
        assert_eq!(format_tag_line::<String>(&[]), "");
    }

    #[test]
    fn normalize_tag_input_strips_one_bracket_pair() {
        assert_eq!(normalize_tag_input("[p1]"), "p1");
        assert_eq!(normalize_tag_input(" design "), "design");
    }
}
