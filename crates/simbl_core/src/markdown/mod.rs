//! Markdown block tokenizer.
//!
//! # Responsibility
//! - Split raw markdown into the top-level blocks the task document cares
//!   about: headings, paragraphs, thematic breaks, and opaque everything-else.
//! - Re-emit any contiguous run of blocks verbatim from the source text.
//!
//! # Invariants
//! - Blocks are ordered by source position and never overlap.
//! - Rendering never reformats markup; it slices the original source.

pub mod tokenizer;

pub use tokenizer::{normalize_line_endings, tokenize, Block, BlockDocument, BlockKind};
