// src/dag/canvas.rs

use tracing::warn;

use crate::model::{Dependency, EdgeId, TaskId};

/// An edge as drawn on the canvas: prerequisite -> dependent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasEdge {
    pub id: EdgeId,
    /// The prerequisite (`depends_on_task_id`).
    pub source: TaskId,
    /// The blocked task (`task_id`).
    pub target: TaskId,
}

impl CanvasEdge {
    pub fn from_dependency(dep: &Dependency) -> Self {
        Self {
            id: dep.edge_id(),
            source: dep.depends_on_task_id.clone(),
            target: dep.task_id.clone(),
        }
    }
}

/// Build the canvas edges for a dependency list.
///
/// Self-loops are dropped: the task is still a single connected node, but
/// no edge is drawn for it.
pub fn canvas_edges(dependencies: &[Dependency]) -> Vec<CanvasEdge> {
    dependencies
        .iter()
        .filter(|dep| {
            if dep.is_self_loop() {
                warn!(task = %dep.task_id, "dropping self-dependency edge from canvas");
                false
            } else {
                true
            }
        })
        .map(CanvasEdge::from_dependency)
        .collect()
}
