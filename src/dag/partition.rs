// src/dag/partition.rs

//! Split of the task list into canvas tasks and pool tasks.

use std::collections::HashSet;

use crate::model::{Dependency, Task};

/// Result of [`partition`].
///
/// Both lists keep the relative order of the input task list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Tasks that are an endpoint of at least one dependency.
    pub connected: Vec<Task>,
    /// Tasks with no dependency in either direction.
    pub isolated: Vec<Task>,
}

impl Partition {
    pub fn is_connected(&self, id: &str) -> bool {
        self.connected.iter().any(|t| t.id == id)
    }

    pub fn is_isolated(&self, id: &str) -> bool {
        self.isolated.iter().any(|t| t.id == id)
    }
}

/// Partition `tasks` by whether they take part in any dependency.
///
/// Pure; callers recompute it from the full snapshot on every change
/// rather than patching a previous result.
pub fn partition(tasks: &[Task], dependencies: &[Dependency]) -> Partition {
    let mut connected_ids: HashSet<&str> = HashSet::with_capacity(dependencies.len() * 2);
    for dep in dependencies {
        connected_ids.insert(dep.task_id.as_str());
        connected_ids.insert(dep.depends_on_task_id.as_str());
    }

    let (connected, isolated): (Vec<Task>, Vec<Task>) = tasks
        .iter()
        .cloned()
        .partition(|task| connected_ids.contains(task.id.as_str()));

    Partition {
        connected,
        isolated,
    }
}
