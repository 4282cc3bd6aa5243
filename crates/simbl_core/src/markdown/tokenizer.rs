//! Top-level block scanner over `pulldown-cmark` offset events.

use pulldown_cmark::{Event, Options, Parser, Tag};
use std::borrow::Cow;
use std::ops::Range;

/// Block classification used by the task document grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// ATX or setext heading. `text` is the raw inline source, trimmed.
    Heading { depth: u8, text: String },
    /// Paragraph. `text` is the raw paragraph source, trimmed.
    Paragraph { text: String },
    /// `***`, `---` or `___` line.
    ThematicBreak,
    /// Lists, code, quotes, html and anything else kept as-is.
    Other,
}

/// One top-level block plus its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub span: Range<usize>,
}

impl Block {
    fn new(kind: BlockKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Returns heading depth when this block is a heading.
    pub fn heading_depth(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { depth, .. } => Some(depth),
            _ => None,
        }
    }
}

/// Tokenized document borrowing its source text.
#[derive(Debug, Clone)]
pub struct BlockDocument<'src> {
    source: &'src str,
    blocks: Vec<Block>,
}

impl<'src> BlockDocument<'src> {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Re-emits blocks `range` verbatim, including any text between them.
    ///
    /// Leading blank lines and trailing whitespace are dropped; an empty
    /// range renders as an empty string.
    pub fn render(&self, range: Range<usize>) -> String {
        let slice = match self.blocks.get(range) {
            Some(slice) if !slice.is_empty() => slice,
            _ => return String::new(),
        };
        let start = slice[0].span.start;
        let end = slice[slice.len() - 1].span.end.min(self.source.len());
        self.source[start..end]
            .trim_start_matches(['\n', '\r'])
            .trim_end()
            .to_string()
    }
}

struct PendingHeading {
    depth: u8,
    span: Range<usize>,
    inline: Option<Range<usize>>,
}

impl PendingHeading {
    fn extend(&mut self, range: Range<usize>) {
        self.inline = Some(match self.inline.take() {
            Some(current) => current.start.min(range.start)..current.end.max(range.end),
            None => range,
        });
    }

    fn finish(self, source: &str) -> Block {
        let text = self
            .inline
            .and_then(|range| source.get(range))
            .map(|value| value.trim().to_string())
            .unwrap_or_default();
        Block::new(
            BlockKind::Heading {
                depth: self.depth,
                text,
            },
            self.span,
        )
    }
}

/// Rewrites `\r\n` and lone `\r` line endings to `\n`. Borrows when the
/// text has none.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Splits `source` into top-level blocks.
///
/// Only CommonMark core syntax is enabled; tables, footnotes and other
/// extensions stay opaque text.
pub fn tokenize(source: &str) -> BlockDocument<'_> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut heading: Option<PendingHeading> = None;

    for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    match tag {
                        Tag::Heading { level, .. } => {
                            heading = Some(PendingHeading {
                                depth: level as u8,
                                span: range,
                                inline: None,
                            });
                        }
                        Tag::Paragraph => {
                            let text = source[range.clone()].trim().to_string();
                            blocks.push(Block::new(BlockKind::Paragraph { text }, range));
                        }
                        _ => blocks.push(Block::new(BlockKind::Other, range)),
                    }
                } else if let Some(pending) = heading.as_mut() {
                    pending.extend(range);
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(pending) = heading.take() {
                        blocks.push(pending.finish(source));
                    }
                }
            }
            Event::Rule if depth == 0 => {
                blocks.push(Block::new(BlockKind::ThematicBreak, range));
            }
            _ => {
                if depth == 0 {
                    blocks.push(Block::new(BlockKind::Other, range));
                } else if let Some(pending) = heading.as_mut() {
                    pending.extend(range);
                }
            }
        }
    }

    BlockDocument { source, blocks }
}
