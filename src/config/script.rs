// src/config/script.rs

//! Gesture scripts: a recorded sequence of user actions replayed through
//! the runtime.
//!
//! ```toml
//! [[step]]
//! wait_ms = 150
//! action = { type = "connect", source = "T0", target = "T1" }
//!
//! [[step]]
//! action = { type = "pool_drop", task = "T4", node = "T1" }
//!
//! [[step]]
//! action = { type = "layout_now" }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::engine::{DropTarget, Gesture, ViewEvent};
use crate::errors::Result;
use crate::model::{Dependency, Position};

#[derive(Debug, Clone, Deserialize)]
pub struct GestureScript {
    #[serde(default)]
    pub step: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    /// Pause before the action is sent.
    #[serde(default)]
    pub wait_ms: u64,
    pub action: ScriptAction,
}

impl ScriptStep {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Draw an edge from `source` to `target`.
    Connect {
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        target: Option<String>,
    },
    /// Remove the edge for "`task_id` depends on `depends_on`" directly.
    RemoveEdge { task_id: String, depends_on: String },
    /// Press the delete button on an edge.
    RequestDelete { task_id: String, depends_on: String },
    ConfirmDelete,
    CancelDelete,
    /// Drop a pool entry over `node`, over another pool entry, or on empty
    /// canvas when neither is given.
    PoolDrop {
        task: String,
        #[serde(default)]
        node: Option<String>,
        #[serde(default)]
        pool_item: Option<String>,
    },
    Drag { id: String, x: f64, y: f64 },
    ToggleAutoLayout,
    LayoutNow,
    AddTask,
    Connectivity { connected: bool },
}

impl ScriptAction {
    pub fn into_event(self) -> ViewEvent {
        match self {
            ScriptAction::Connect { source, target } => {
                ViewEvent::Gesture(Gesture::Connect { source, target })
            }
            ScriptAction::RemoveEdge {
                task_id,
                depends_on,
            } => ViewEvent::Gesture(Gesture::RemoveEdges(vec![
                Dependency::new(task_id, depends_on).edge_id(),
            ])),
            ScriptAction::RequestDelete {
                task_id,
                depends_on,
            } => ViewEvent::Gesture(Gesture::RequestEdgeDelete(
                Dependency::new(task_id, depends_on).edge_id(),
            )),
            ScriptAction::ConfirmDelete => ViewEvent::Gesture(Gesture::ConfirmDelete),
            ScriptAction::CancelDelete => ViewEvent::Gesture(Gesture::CancelDelete),
            ScriptAction::PoolDrop {
                task,
                node,
                pool_item,
            } => {
                let over = match (node, pool_item) {
                    (Some(node), _) => DropTarget::Node(node),
                    (None, Some(item)) => DropTarget::PoolItem(item),
                    (None, None) => DropTarget::EmptyCanvas,
                };
                ViewEvent::Gesture(Gesture::PoolDrop { task, over })
            }
            ScriptAction::Drag { id, x, y } => ViewEvent::Gesture(Gesture::NodeDragged {
                id,
                position: Position::new(x, y),
            }),
            ScriptAction::ToggleAutoLayout => ViewEvent::AutoLayoutToggled,
            ScriptAction::LayoutNow => ViewEvent::LayoutNowRequested,
            ScriptAction::AddTask => ViewEvent::AddTaskRequested,
            ScriptAction::Connectivity { connected } => ViewEvent::ConnectivityChanged(connected),
        }
    }
}

pub fn load_script(path: impl AsRef<Path>) -> Result<GestureScript> {
    let contents = fs::read_to_string(path.as_ref())?;
    let script: GestureScript = toml::from_str(&contents)?;
    Ok(script)
}
