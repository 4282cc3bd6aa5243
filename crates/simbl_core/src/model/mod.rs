//! Task document domain model.
//!
//! # Responsibility
//! - Define the records parsed from and serialized to `tasks.md`.
//! - Own tag semantics: reserved tag classification, folding, and status
//!   derivation.
//! - Read and rewrite the acceptance criteria checklist in task content.
//!
//! # Invariants
//! - `Task::reserved` and `Task::status` are always derived from `tags` and
//!   `section`; callers change tags and call `Task::refresh()`.
//! - Task ids are unique across both sections (reported, not enforced).

pub mod criteria;
pub mod ids;
pub mod tags;
pub mod task;
