use simbl_core::{
    fold_tags, parse_document, serialize_document, Section, SimblFile, Task, TaskStatus,
};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn sample_file() -> SimblFile {
    SimblFile {
        backlog: vec![
            Task::new(
                "task-1",
                "Parse the document",
                tags(&["p2", "in-progress"]),
                "### Description\n\nSome *rich* text with a [link][ref].\n\n[ref]: https://example.com\n\n```rust\nfn main() {}\n```",
                Section::Backlog,
            ),
            Task::new(
                "task-3",
                "",
                tags(&["depends-on-task-1", "depends-on-task-1", "project:core"]),
                "",
                Section::Backlog,
            ),
        ],
        done: vec![Task::new(
            "task-2",
            "Ship it",
            tags(&["canceled"]),
            "- one\n- two\n\n> quoted",
            Section::Done,
        )],
        preamble: Some("Project notes live here.".to_string()),
    }
}

#[test]
fn parse_of_serialize_preserves_tasks_order_tags_and_content() {
    let file = sample_file();
    let reparsed = parse_document(&serialize_document(&file)).unwrap();
    assert_eq!(reparsed, file);
}

#[test]
fn serialize_is_stable_after_one_pass() {
    let text = "Preamble\n\n\n# backlog\n\n## task-1   Spaced   title  \n[p1]\n\nBody line\n\n\n\n# DONE\n";
    let once = serialize_document(&parse_document(text).unwrap());
    let twice = serialize_document(&parse_document(&once).unwrap());
    assert_eq!(once, twice);
    assert!(once.ends_with("# Done\n"));
    assert!(once.contains("## task-1 Spaced   title\n\n[p1]\n\nBody line\n\n# Done"));
}

#[test]
fn tag_fold_and_status_scenario() {
    let file = parse_document("# Backlog\n\n## task-1\n\n[p2][in-progress]\n\n# Done\n").unwrap();
    let task = file.find_task("task-1").unwrap();

    assert_eq!(task.reserved.priority, Some(2));
    assert!(task.reserved.in_progress);
    assert!(!task.reserved.canceled);
    assert!(task.reserved.depends_on.is_empty());
    assert_eq!(task.status, TaskStatus::InProgress);

    assert_eq!(fold_tags(&["p2", "p1"]).priority, Some(1));
    assert!(fold_tags(&["in-progress", "in-progress"]).in_progress);
}

#[test]
fn done_section_tasks_derive_done_or_canceled() {
    let file =
        parse_document("# Backlog\n\n# Done\n\n## task-4\n\n[in-progress]\n\n## task-5\n\n[canceled]\n")
            .unwrap();
    assert_eq!(file.find_task("task-4").unwrap().status, TaskStatus::Done);
    assert_eq!(file.find_task("task-5").unwrap().status, TaskStatus::Canceled);
}

#[test]
fn duplicate_ids_parse_and_lookup_returns_backlog_first() {
    let file = parse_document("# Backlog\n\n## task-1 A\n\n# Done\n\n## task-1 B\n").unwrap();
    assert_eq!(file.task_ids(), vec!["task-1", "task-1"]);
    assert_eq!(file.find_task("task-1").unwrap().title, "A");
}
