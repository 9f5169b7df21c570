// src/engine/mutation.rs

//! Gestures to dependency mutations.
//!
//! The mapper does not deduplicate: firing a create for a pair that already
//! exists is fine, the backend rejects it.

use std::fmt;

use tracing::{debug, warn};

use crate::dag::Partition;
use crate::engine::DropTarget;
use crate::model::{Dependency, EdgeId, Task, TaskId};
use crate::types::EmptyCanvasDrop;

/// A request for the dependency backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationIntent {
    CreateDependency(Dependency),
    DeleteDependency(Dependency),
}

impl MutationIntent {
    pub fn dependency(&self) -> &Dependency {
        match self {
            MutationIntent::CreateDependency(dep) | MutationIntent::DeleteDependency(dep) => dep,
        }
    }
}

impl fmt::Display for MutationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationIntent::CreateDependency(dep) => write!(f, "create dependency {dep}"),
            MutationIntent::DeleteDependency(dep) => write!(f, "delete dependency {dep}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MutationMapper {
    empty_canvas_drop: EmptyCanvasDrop,
}

impl MutationMapper {
    pub fn new(empty_canvas_drop: EmptyCanvasDrop) -> Self {
        Self { empty_canvas_drop }
    }

    /// Edge drawn from `source` to `target`: the target becomes blocked on
    /// the source.
    pub fn connect(&self, source: Option<&str>, target: Option<&str>) -> Option<MutationIntent> {
        match (source, target) {
            (Some(source), Some(target)) => Some(MutationIntent::CreateDependency(
                Dependency::new(target, source),
            )),
            _ => {
                debug!(?source, ?target, "connect gesture without both endpoints; ignoring");
                None
            }
        }
    }

    /// Edges removed on the canvas. Ids that do not decode are skipped.
    pub fn remove_edges(&self, ids: &[EdgeId]) -> Vec<MutationIntent> {
        ids.iter().filter_map(|id| self.delete_edge(id)).collect()
    }

    pub fn delete_edge(&self, id: &EdgeId) -> Option<MutationIntent> {
        match id.decode() {
            Ok(dep) => Some(MutationIntent::DeleteDependency(dep)),
            Err(e) => {
                warn!(edge = %id, error = %e, "cannot map edge back to a dependency");
                None
            }
        }
    }

    /// A pool entry released over `over`.
    ///
    /// Only a task from `partition.isolated` can be dragged, and only a task
    /// from `partition.connected` is a valid drop node.
    pub fn pool_drop(
        &self,
        task: &TaskId,
        over: &DropTarget,
        partition: &Partition,
    ) -> Option<MutationIntent> {
        if !partition.is_isolated(task) {
            debug!(task = %task, "drag source is not a pool task; ignoring");
            return None;
        }
        match over {
            DropTarget::Node(node) if partition.is_connected(node) => {
                Some(MutationIntent::CreateDependency(Dependency::new(task.clone(), node.clone())))
            }
            DropTarget::Node(node) => {
                debug!(task = %task, node = %node, "drop target is not a canvas task; ignoring");
                None
            }
            DropTarget::PoolItem(_) => {
                debug!(task = %task, "pool entry dropped back onto the pool; ignoring");
                None
            }
            DropTarget::EmptyCanvas => self.empty_canvas_drop(task, &partition.connected),
        }
    }

    fn empty_canvas_drop(&self, task: &TaskId, connected: &[Task]) -> Option<MutationIntent> {
        match self.empty_canvas_drop {
            EmptyCanvasDrop::Ignore => {
                debug!(task = %task, "pool entry dropped on empty canvas; ignoring");
                None
            }
            EmptyCanvasDrop::AttachToFirst => {
                let anchor = connected.first()?;
                warn!(
                    task = %task,
                    anchor = %anchor.id,
                    "attaching dropped task to the first canvas task; this dependency was not drawn by the user"
                );
                Some(MutationIntent::CreateDependency(Dependency::new(
                    task.clone(),
                    anchor.id.clone(),
                )))
            }
        }
    }
}

/// Confirmation step for deleting an edge via its delete button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteDialog {
    pending: Option<EdgeId>,
}

impl DeleteDialog {
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&EdgeId> {
        self.pending.as_ref()
    }

    /// Open (or retarget) the dialog for `edge`.
    pub fn request(&mut self, edge: EdgeId) {
        self.pending = Some(edge);
    }

    /// Close the dialog and hand back the edge to delete.
    pub fn confirm(&mut self) -> Option<EdgeId> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
