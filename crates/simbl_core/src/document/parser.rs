use super::{DocumentError, DocumentResult};
use crate::markdown::{normalize_line_endings, tokenize, BlockDocument, BlockKind};
use crate::model::tags::parse_tag_line;
use crate::model::task::{Section, SimblFile, Task};
use log::debug;

/// Parses raw bytes, rejecting non-UTF-8 input as a corrupt document.
pub fn parse_bytes(bytes: &[u8]) -> DocumentResult<SimblFile> {
    let text = std::str::from_utf8(bytes)?;
    parse_document(text)
}

/// Parses a task document.
///
/// - `# Backlog` / `# Done` (any case) open a section; other depth-1
///   headings close it.
/// - `## <id> <title>` inside a section starts a task.
/// - A paragraph starting with `[` right after the task heading is the tag
///   line.
/// - Everything up to the next depth-1/2 heading is the task content.
/// - CRLF input is read as LF; content never carries `\r`.
pub fn parse_document(text: &str) -> DocumentResult<SimblFile> {
    let text = normalize_line_endings(text);
    let doc = tokenize(&text);
    let blocks = doc.blocks();
    let mut file = SimblFile::default();

    let first_h1 = blocks
        .iter()
        .position(|block| block.heading_depth() == Some(1));
    if let Some(index) = first_h1.filter(|index| *index > 0) {
        let preamble = doc.render(0..index);
        if !preamble.is_empty() {
            file.preamble = Some(preamble);
        }
    }

    let mut section: Option<Section> = None;
    let mut index = 0;
    while index < blocks.len() {
        let block = &blocks[index];
        match &block.kind {
            BlockKind::Heading { depth: 1, text } => {
                section = Section::from_heading(text);
                if section.is_none() {
                    debug!("event=document_parse module=document status=skip reason=unknown_section");
                }
                index += 1;
            }
            BlockKind::Heading { depth: 2, text } => {
                let Some(current) = section else {
                    index += 1;
                    continue;
                };
                let (id, title) = split_task_heading(text);
                if id.is_empty() {
                    return Err(DocumentError::EmptyTaskId {
                        byte_offset: block.span.start,
                    });
                }

                let (tags, content_start) = match blocks.get(index + 1) {
                    Some(next) => match &next.kind {
                        BlockKind::Paragraph { text } if text.trim_start().starts_with('[') => {
                            (parse_tag_line(text), index + 2)
                        }
                        _ => (Vec::new(), index + 1),
                    },
                    None => (Vec::new(), index + 1),
                };

                let content_end = next_heading_index(&doc, content_start, 2);
                let content = doc.render(content_start..content_end);

                file.section_mut(current)
                    .push(Task::new(id, title, tags, content, current));
                index = content_end;
            }
            _ => index += 1,
        }
    }

    Ok(file)
}

/// Splits `"task-1 Optional title"` on the first whitespace.
fn split_task_heading(text: &str) -> (String, String) {
    let trimmed = text.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((id, title)) => (id.to_string(), title.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

fn next_heading_index(doc: &BlockDocument<'_>, start: usize, max_depth: u8) -> usize {
    let blocks = doc.blocks();
    blocks
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, block)| {
            block
                .heading_depth()
                .is_some_and(|depth| depth <= max_depth)
        })
        .map_or(blocks.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::{parse_bytes, parse_document, split_task_heading};
    use crate::document::DocumentError;
    use crate::model::task::{Section, TaskStatus};

    #[test]
    fn split_heading_on_first_whitespace() {
        assert_eq!(
            split_task_heading("task-1  Fix the  thing "),
            ("task-1".to_string(), "Fix the  thing".to_string())
        );
        assert_eq!(
            split_task_heading("task-2"),
            ("task-2".to_string(), String::new())
        );
    }

    #[test]
    fn parse_reads_sections_tags_and_content() {
        let text = "Intro text\n\n# Backlog\n\n## task-1 First\n\n[p2][in-progress]\n\n### Description\n\nBody\n\n# done\n\n## task-2\n\nclosed\n";
        let file = parse_document(text).unwrap();

        assert_eq!(file.preamble.as_deref(), Some("Intro text"));
        assert_eq!(file.backlog.len(), 1);
        assert_eq!(file.done.len(), 1);

        let first = &file.backlog[0];
        assert_eq!(first.id, "task-1");
        assert_eq!(first.title, "First");
        assert_eq!(first.tags, vec!["p2", "in-progress"]);
        assert_eq!(first.content, "### Description\n\nBody");
        assert_eq!(first.status, TaskStatus::InProgress);

        let second = &file.done[0];
        assert_eq!(second.id, "task-2");
        assert!(second.tags.is_empty());
        assert_eq!(second.content, "closed");
        assert_eq!(second.section, Section::Done);
    }

    #[test]
    fn paragraph_not_starting_with_bracket_is_content() {
        let file = parse_document("# Backlog\n\n## task-1\n\nplain [p1]\n").unwrap();
        assert!(file.backlog[0].tags.is_empty());
        assert_eq!(file.backlog[0].content, "plain [p1]");
    }

    #[test]
    fn tasks_under_unknown_section_are_not_read() {
        let file = parse_document("# Backlog\n\n## task-1\n\n# Ideas\n\n## idea-1\n").unwrap();
        assert_eq!(file.task_ids(), vec!["task-1"]);
    }

    #[test]
    fn empty_task_id_aborts_parse() {
        let err = parse_document("# Backlog\n\n##\n\n## task-1\n").unwrap_err();
        assert!(matches!(err, DocumentError::EmptyTaskId { .. }));
    }

    #[test]
    fn crlf_document_reads_like_lf() {
        let crlf = "# Backlog\r\n\r\n## task-1 First\r\n\r\n[p1]\r\n\r\nLine one\r\n\r\n- a\r\n- b\r\n\r\n# Done\r\n";
        let file = parse_document(crlf).unwrap();
        assert_eq!(file, parse_document(&crlf.replace("\r\n", "\n")).unwrap());
        assert_eq!(file.backlog[0].content, "Line one\n\n- a\n- b");
    }

    #[test]
    fn invalid_utf8_aborts_parse() {
        let err = parse_bytes(b"# Backlog\n\n## task-1 \xff\xfe\n").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidUtf8(_)));
    }
}
