//! Relationship graph over parent and dependency tags.
//!
//! # Responsibility
//! - Answer "would this new edge close a cycle" before an edit is committed.
//! - Enumerate existing cycles for the doctor report.
//!
//! # Invariants
//! - Edges run task -> `parent_id` and task -> each `depends_on` entry.
//! - Dangling targets are leaves, never errors.
//! - Traversal is iterative; deep chains cannot overflow the call stack.

mod cycles;

pub use cycles::{find_all_cycles, would_create_cycle};
