// src/engine/frame.rs

use crate::dag::CanvasEdge;
use crate::layout::LayoutPhase;
use crate::model::{EdgeId, Position};
use crate::view::{NodeCard, PoolView, Progress, ReadinessSummary};

/// Everything one render pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasFrame {
    /// Canvas nodes in placement order (oldest task first).
    pub nodes: Vec<NodeCard>,
    pub edges: Vec<CanvasEdge>,
    pub pool: PoolView,
    pub progress: Progress,
    pub readiness: ReadinessSummary,
    /// Live update channel state.
    pub connected: bool,
    pub auto_layout_enabled: bool,
    pub layout_phase: LayoutPhase,
    /// Edge awaiting delete confirmation, if the dialog is open.
    pub delete_dialog: Option<EdgeId>,
}

impl CanvasFrame {
    pub fn node(&self, id: &str) -> Option<&NodeCard> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.node(id).map(|n| n.position)
    }
}
