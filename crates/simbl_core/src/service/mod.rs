//! Use-case services over the task store.
//!
//! # Responsibility
//! - Orchestrate document edits and their logged events.
//! - Report document health without mutating it.

pub mod doctor;
pub mod task_service;
