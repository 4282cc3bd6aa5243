use crate::model::task::Task;
use std::collections::{HashMap, HashSet};

/// Later duplicates shadow earlier ones.
fn index_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> HashMap<&'a str, &'a Task> {
    tasks
        .into_iter()
        .map(|task| (task.id.as_str(), task))
        .collect()
}

/// Returns true when a path from `to` reaches `from` along parent and
/// dependency edges, i.e. adding `from -> to` would close a cycle.
///
/// The caller rejects `from == to` before asking.
pub fn would_create_cycle<'a>(
    from: &str,
    to: &str,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> bool {
    let by_id = index_tasks(tasks);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![to];

    while let Some(current) = stack.pop() {
        if current == from {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        let Some(task) = by_id.get(current) else {
            continue;
        };
        // Pushed in reverse so the parent is explored first.
        for dependency in task.reserved.depends_on.iter().rev() {
            stack.push(dependency.as_str());
        }
        if let Some(parent) = task.reserved.parent_id.as_deref() {
            stack.push(parent);
        }
    }
    false
}

struct Frame<'a> {
    id: &'a str,
    edges: std::vec::IntoIter<&'a str>,
}

fn outgoing<'a>(task: Option<&&'a Task>) -> std::vec::IntoIter<&'a str> {
    let Some(task) = task else {
        return Vec::new().into_iter();
    };
    let mut edges: Vec<&'a str> = task
        .reserved
        .depends_on
        .iter()
        .map(String::as_str)
        .collect();
    if let Some(parent) = task.reserved.parent_id.as_deref() {
        edges.push(parent);
    }
    edges.into_iter()
}

/// Lists every cycle found by a depth-first walk in task order.
///
/// Each cycle is reported as the path from the repeated node back to itself,
/// e.g. `["task-1", "task-2", "task-1"]`. Dependencies are followed before
/// the parent edge.
pub fn find_all_cycles(tasks: &[Task]) -> Vec<Vec<String>> {
    let by_id = index_tasks(tasks);
    let mut cycles = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();

    for root in tasks {
        let root_id = root.id.as_str();
        if visited.contains(root_id) {
            continue;
        }
        visited.insert(root_id);
        on_stack.insert(root_id);
        let mut frames = vec![Frame {
            id: root_id,
            edges: outgoing(by_id.get(root_id)),
        }];

        while let Some(frame) = frames.last_mut() {
            let Some(next) = frame.edges.next() else {
                on_stack.remove(frame.id);
                frames.pop();
                continue;
            };

            if on_stack.contains(next) {
                let start = frames
                    .iter()
                    .position(|entry| entry.id == next)
                    .unwrap_or(0);
                let mut cycle: Vec<String> = frames[start..]
                    .iter()
                    .map(|entry| entry.id.to_string())
                    .collect();
                cycle.push(next.to_string());
                cycles.push(cycle);
                continue;
            }
            if !visited.insert(next) {
                continue;
            }
            on_stack.insert(next);
            frames.push(Frame {
                id: next,
                edges: outgoing(by_id.get(next)),
            });
        }
    }

    cycles
}
