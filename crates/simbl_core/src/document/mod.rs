//! `tasks.md` document parsing and serialization.
//!
//! # Responsibility
//! - Interpret tokenized markdown blocks as a `SimblFile`.
//! - Write a `SimblFile` back in the canonical layout.
//!
//! # Invariants
//! - Parsing is all-or-nothing: a failure never yields a partial document.
//! - `parse(serialize(f))` preserves ids, per-section order, tags and content
//!   modulo whitespace normalization.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::Utf8Error;

mod parser;
mod serializer;

pub use parser::{parse_bytes, parse_document};
pub use serializer::serialize_document;

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that abort a document parse.
#[derive(Debug)]
pub enum DocumentError {
    /// Source bytes are not UTF-8 text.
    InvalidUtf8(Utf8Error),
    /// A task heading (`## `) inside a section carries no id.
    EmptyTaskId { byte_offset: usize },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUtf8(err) => write!(f, "task document is not valid UTF-8: {err}"),
            Self::EmptyTaskId { byte_offset } => {
                write!(f, "task heading without id at byte offset {byte_offset}")
            }
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUtf8(err) => Some(err),
            Self::EmptyTaskId { .. } => None,
        }
    }
}

impl From<Utf8Error> for DocumentError {
    fn from(value: Utf8Error) -> Self {
        Self::InvalidUtf8(value)
    }
}
