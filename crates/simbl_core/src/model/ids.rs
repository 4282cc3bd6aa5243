//! Task id helpers: `<prefix>-<n>` numbering.

use once_cell::sync::Lazy;
use regex::Regex;

static ID_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(\d+)$").expect("valid id number regex"));

/// Numeric suffix of an id, e.g. `task-42` -> 42.
pub fn extract_id_number(id: &str) -> Option<u64> {
    ID_NUMBER_RE
        .captures(id)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}

/// Next id after the highest numeric suffix in `existing`, whatever its prefix.
/// `None` once the highest suffix is `u64::MAX`.
pub fn next_task_id<S: AsRef<str>>(prefix: &str, existing: &[S]) -> Option<String> {
    let max = existing
        .iter()
        .filter_map(|id| extract_id_number(id.as_ref()))
        .max()
        .unwrap_or(0);
    max.checked_add(1).map(|next| format!("{prefix}-{next}"))
}

/// Whether `id` is exactly `<prefix>-<digits>`.
pub fn is_valid_task_id(id: &str, prefix: &str) -> bool {
    match id.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('-')) {
        Some(number) => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_id_number, is_valid_task_id, next_task_id};

    #[test]
    fn next_id_uses_highest_suffix() {
        assert_eq!(
            next_task_id("task", &["task-1", "task-7", "abc-3"]).as_deref(),
            Some("task-8")
        );
        assert_eq!(next_task_id::<&str>("smb", &[]).as_deref(), Some("smb-1"));
        assert_eq!(extract_id_number("no-number-here"), None);
    }

    #[test]
    fn next_id_is_none_at_largest_suffix() {
        assert_eq!(next_task_id("task", &["task-1", "task-18446744073709551615"]), None);
        assert_eq!(
            next_task_id("task", &["task-18446744073709551614"]).as_deref(),
            Some("task-18446744073709551615")
        );
        // Too large for u64, so it does not count as a number.
        assert_eq!(extract_id_number("task-18446744073709551616"), None);
    }

    #[test]
    fn valid_id_requires_prefix_and_digits() {
        assert!(is_valid_task_id("task-12", "task"));
        assert!(!is_valid_task_id("task-", "task"));
        assert!(!is_valid_task_id("task-1a", "task"));
        assert!(!is_valid_task_id("smb-1", "task"));
    }
}
