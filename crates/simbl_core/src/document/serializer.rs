use crate::model::tags::format_tag_line;
use crate::model::task::{Section, SimblFile, Task};
use std::borrow::Cow;

/// Writes the canonical document layout.
///
/// Blocks are separated by one blank line; the output ends with exactly one
/// newline.
pub fn serialize_document(file: &SimblFile) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(preamble) = file.preamble.as_deref().filter(|value| !value.is_empty()) {
        lines.push(preamble.to_string());
        lines.push(String::new());
    }

    for section in [Section::Backlog, Section::Done] {
        lines.push(format!("# {}", section.heading()));
        lines.push(String::new());
        for task in file.section(section) {
            push_task(&mut lines, task);
        }
    }

    let mut output = lines.join("\n").trim_end().to_string();
    output.push('\n');
    output
}

fn push_task(lines: &mut Vec<String>, task: &Task) {
    if task.title.is_empty() {
        lines.push(format!("## {}", task.id));
    } else {
        lines.push(format!("## {} {}", task.id, task.title));
    }
    lines.push(String::new());

    if !task.tags.is_empty() {
        lines.push(format_tag_line(&task.tags));
        lines.push(String::new());
    }

    if !task.content.is_empty() {
        if task.tags.is_empty() {
            lines.push(escape_tag_lookalike(&task.content).into_owned());
        } else {
            lines.push(task.content.clone());
        }
        lines.push(String::new());
    }
}

/// Backslash-escapes a leading `[` so untagged content is not read back as a
/// tag line. Indented code (4+ spaces) is left alone.
fn escape_tag_lookalike(content: &str) -> Cow<'_, str> {
    let rest = content.trim_start_matches(' ');
    let indent = content.len() - rest.len();
    if indent < 4 && rest.starts_with('[') {
        Cow::Owned(format!("{}\\{rest}", &content[..indent]))
    } else {
        Cow::Borrowed(content)
    }
}
