// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use crate::model::{Dependency, TaskId};

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Direct prerequisites: tasks that must complete before this one.
    deps: Vec<TaskId>,
    /// Direct dependents: tasks blocked on this one.
    dependents: Vec<TaskId>,
}

/// Adjacency view over a dependency list, keyed by task id.
///
/// Only ids that appear in at least one dependency are present. No
/// acyclicity checks happen here; see [`DagGraph::would_create_cycle`].
#[derive(Debug, Clone, Default)]
pub struct DagGraph {
    nodes: HashMap<TaskId, DagNode>,
}

impl DagGraph {
    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        let mut nodes: HashMap<TaskId, DagNode> = HashMap::new();

        for dep in dependencies {
            nodes
                .entry(dep.task_id.clone())
                .or_default()
                .deps
                .push(dep.depends_on_task_id.clone());
            nodes
                .entry(dep.depends_on_task_id.clone())
                .or_default()
                .dependents
                .push(dep.task_id.clone());
        }

        Self { nodes }
    }

    /// Return all task ids referenced by some dependency.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Immediate prerequisites of a task.
    pub fn dependencies_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task.
    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Whether adding `candidate` would close a cycle.
    ///
    /// The new edge runs prerequisite -> dependent, so a cycle appears iff
    /// the dependent can already reach the prerequisite through its
    /// dependents.
    pub fn would_create_cycle(&self, candidate: &Dependency) -> bool {
        if candidate.is_self_loop() {
            return true;
        }

        let mut stack: Vec<&str> = vec![candidate.task_id.as_str()];
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some(id) = stack.pop() {
            if id == candidate.depends_on_task_id {
                return true;
            }
            if !visited.insert(id) {
                continue;
            }
            stack.extend(self.dependents_of(id).iter().map(|s| s.as_str()));
        }

        false
    }
}
