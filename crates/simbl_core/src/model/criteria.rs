//! Acceptance criteria checklist kept inside task content.
//!
//! Layout inside `Task.content`:
//!
//! ```text
//! ##### Acceptance Criteria
//!
//! - [ ] not met yet
//! - [x] met
//! ```
//!
//! # Invariants
//! - Only the first `#####`/`######` "Acceptance Criteria" heading is used.
//! - The section ends at the next heading or thematic break line.
//! - Text outside the section is never changed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CRITERIA_HEADING: &str = "##### Acceptance Criteria";

const CRITERIA_HEADINGS: [&str; 2] = ["##### Acceptance Criteria", "###### Acceptance Criteria"];

static CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \[([ xX])\] (.+)$").expect("valid checkbox regex"));

/// One checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceCriterion {
    /// 1-based position in the checklist.
    pub index: usize,
    pub text: String,
    pub met: bool,
}

impl AcceptanceCriterion {
    pub fn new(index: usize, text: impl Into<String>, met: bool) -> Self {
        Self {
            index,
            text: text.into(),
            met,
        }
    }

    fn to_line(&self) -> String {
        let mark = if self.met { "x" } else { " " };
        format!("- [{mark}] {}", self.text)
    }
}

/// Line range `[heading, end)` of the criteria section.
fn find_section(lines: &[&str]) -> Option<(usize, usize)> {
    let start = lines
        .iter()
        .position(|line| CRITERIA_HEADINGS.contains(&line.trim()))?;
    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| {
            let line = line.trim();
            line.starts_with('#') || matches!(line, "***" | "---" | "___")
        })
        .map_or(lines.len(), |(index, _)| index);
    Some((start, end))
}

/// Checklist items under the criteria heading, numbered from 1.
/// Lines that are not `- [ ] ..`/`- [x] ..` items are ignored.
pub fn parse_acceptance_criteria(content: &str) -> Vec<AcceptanceCriterion> {
    let lines: Vec<&str> = content.split('\n').collect();
    let Some((start, end)) = find_section(&lines) else {
        return Vec::new();
    };

    lines[start + 1..end]
        .iter()
        .filter_map(|line| CHECKBOX_RE.captures(line))
        .enumerate()
        .map(|(position, caps)| {
            AcceptanceCriterion::new(position + 1, &caps[2], caps[1].eq_ignore_ascii_case("x"))
        })
        .collect()
}

/// Heading plus checklist; empty for no criteria.
pub fn format_acceptance_criteria(criteria: &[AcceptanceCriterion]) -> String {
    if criteria.is_empty() {
        return String::new();
    }
    let mut lines = vec![CRITERIA_HEADING.to_string(), String::new()];
    lines.extend(criteria.iter().map(AcceptanceCriterion::to_line));
    lines.join("\n")
}

/// Replaces the criteria section, appending one when missing. An empty list
/// removes the section.
pub fn update_task_content(content: &str, criteria: &[AcceptanceCriterion]) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let checklist = format_acceptance_criteria(criteria);

    let Some((start, end)) = find_section(&lines) else {
        if criteria.is_empty() {
            return content.to_string();
        }
        let body = content.trim_end();
        if body.is_empty() {
            return checklist;
        }
        return format!("{body}\n\n{checklist}");
    };

    let before = trim_blank_lines(&lines[..start]).join("\n");
    let after = trim_blank_lines(&lines[end..]).join("\n");
    [before, checklist, after]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn trim_blank_lines<'a, 'b>(mut lines: &'b [&'a str]) -> &'b [&'a str] {
    while let Some((first, rest)) = lines.split_first() {
        if !first.trim().is_empty() {
            break;
        }
        lines = rest;
    }
    while let Some((last, rest)) = lines.split_last() {
        if !last.trim().is_empty() {
            break;
        }
        lines = rest;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{
        format_acceptance_criteria, parse_acceptance_criteria, update_task_content,
        AcceptanceCriterion,
    };

    #[test]
    fn parse_reads_checkboxes_under_heading_only() {
        let content = "- [ ] outside\n\n##### Acceptance Criteria\n\n- [ ] first\n- [X] second\nnote\n- [x]\n\n### Next\n\n- [ ] after";
        let criteria = parse_acceptance_criteria(content);
        assert_eq!(
            criteria,
            vec![
                AcceptanceCriterion::new(1, "first", false),
                AcceptanceCriterion::new(2, "second", true),
            ]
        );
        assert!(parse_acceptance_criteria("no checklist").is_empty());
    }

    #[test]
    fn h6_heading_is_accepted_and_break_ends_section() {
        let content = "###### Acceptance Criteria\n- [x] done\n***\n- [ ] not a criterion";
        assert_eq!(
            parse_acceptance_criteria(content),
            vec![AcceptanceCriterion::new(1, "done", true)]
        );
    }

    #[test]
    fn update_appends_section_when_missing() {
        let criteria = vec![AcceptanceCriterion::new(1, "works", false)];
        assert_eq!(
            update_task_content("### Description\n\nBody\n\n", &criteria),
            "### Description\n\nBody\n\n##### Acceptance Criteria\n\n- [ ] works"
        );
        assert_eq!(
            update_task_content("", &criteria),
            format_acceptance_criteria(&criteria)
        );
        assert_eq!(update_task_content("Body", &[]), "Body");
    }

    #[test]
    fn update_replaces_section_in_place() {
        let content = "Intro\n\n##### Acceptance Criteria\n\n- [ ] old\n\n#### Notes\n\nkeep";
        let criteria = vec![
            AcceptanceCriterion::new(1, "old", true),
            AcceptanceCriterion::new(2, "new", false),
        ];
        assert_eq!(
            update_task_content(content, &criteria),
            "Intro\n\n##### Acceptance Criteria\n\n- [x] old\n- [ ] new\n\n#### Notes\n\nkeep"
        );
        assert_eq!(
            update_task_content(content, &[]),
            "Intro\n\n#### Notes\n\nkeep"
        );
    }
}
