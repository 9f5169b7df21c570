// src/engine/session.rs

//! State owned by one mounted canvas view.

use std::collections::HashMap;

use tracing::debug;

use crate::dag::{CanvasEdge, Partition, canvas_edges, partition};
use crate::engine::{CanvasFrame, SessionOptions};
use crate::layout::{
    GridParams, LayoutEngine, LayoutOptions, LayoutTrigger, RenderCounts, TriggerDecision,
    grid_layout,
};
use crate::model::{BoardSnapshot, Dependency, EdgeId, Position, Task, TaskId};
use crate::view::{NodeCard, PoolView, Progress, ReadinessSummary};

/// Snapshot, derived graph and positions of one canvas view.
///
/// Positions are resolved per render pass as: session override (last
/// auto-layout run or a hand drag) if present, else the grid position with
/// persisted coordinates applied.
#[derive(Debug)]
pub struct ViewSession {
    snapshot: BoardSnapshot,
    partition: Partition,
    edges: Vec<CanvasEdge>,
    overrides: HashMap<TaskId, Position>,
    trigger: LayoutTrigger,
    connected: bool,
    grid: GridParams,
    layout: LayoutOptions,
}

impl ViewSession {
    pub fn new(options: &SessionOptions) -> Self {
        Self {
            snapshot: BoardSnapshot::default(),
            partition: Partition::default(),
            edges: Vec::new(),
            overrides: HashMap::new(),
            trigger: LayoutTrigger::new(options.auto_layout, options.initial_settle),
            connected: false,
            grid: options.grid,
            layout: options.layout,
        }
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn trigger_mut(&mut self) -> &mut LayoutTrigger {
        &mut self.trigger
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn counts(&self) -> RenderCounts {
        RenderCounts {
            nodes: self.partition.connected.len(),
            edges: self.edges.len(),
            dependencies: self.snapshot.dependencies.len(),
        }
    }

    /// Replace the whole snapshot and evaluate the layout trigger.
    pub fn apply_snapshot(&mut self, snapshot: BoardSnapshot) -> TriggerDecision {
        self.snapshot = snapshot;
        self.recompute();
        self.trigger.on_render(self.counts())
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> TriggerDecision {
        let dependencies = std::mem::take(&mut self.snapshot.dependencies);
        self.apply_snapshot(BoardSnapshot::new(tasks, dependencies))
    }

    pub fn replace_dependencies(&mut self, dependencies: Vec<Dependency>) -> TriggerDecision {
        let tasks = std::mem::take(&mut self.snapshot.tasks);
        self.apply_snapshot(BoardSnapshot::new(tasks, dependencies))
    }

    /// Flip the auto-layout toggle and re-evaluate the trigger against the
    /// current snapshot.
    pub fn toggle_auto_layout(&mut self) -> TriggerDecision {
        let enabled = !self.trigger.is_enabled();
        self.trigger.set_enabled(enabled);
        debug!(enabled, "auto-layout toggled");
        self.trigger.on_render(self.counts())
    }

    /// Re-derive the partition and edges from the snapshot.
    fn recompute(&mut self) {
        self.partition = partition(&self.snapshot.tasks, &self.snapshot.dependencies);
        self.edges = canvas_edges(&self.snapshot.dependencies);

        let partition = &self.partition;
        self.overrides.retain(|id, _| partition.is_connected(id));

        debug!(
            connected = self.partition.connected.len(),
            isolated = self.partition.isolated.len(),
            edges = self.edges.len(),
            "snapshot partitioned"
        );
    }

    /// Positions of all canvas nodes for this render pass.
    pub fn node_positions(&self) -> Vec<(TaskId, Position)> {
        grid_layout(&self.partition.connected, &self.grid)
            .into_iter()
            .map(|(id, grid_pos)| {
                let pos = self.overrides.get(&id).copied().unwrap_or(grid_pos);
                (id, pos)
            })
            .collect()
    }

    /// Run the layout engine over the current canvas and replace every
    /// position with its result. Returns the number of nodes laid out.
    pub fn run_auto_layout(&mut self, engine: &dyn LayoutEngine) -> usize {
        let nodes: Vec<TaskId> = grid_layout(&self.partition.connected, &self.grid)
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        self.overrides = engine.layout(&nodes, &self.edges, &self.layout);
        debug!(nodes = nodes.len(), "auto-layout applied");
        nodes.len()
    }

    /// Move a canvas node by hand. Unknown or pooled ids are ignored.
    pub fn drag_node(&mut self, id: &str, position: Position) -> bool {
        if !self.partition.is_connected(id) {
            debug!(task = %id, "drag of a task that is not on the canvas; ignoring");
            return false;
        }
        self.overrides.insert(id.to_string(), position);
        true
    }

    pub fn frame(&self, delete_dialog: Option<&EdgeId>) -> CanvasFrame {
        let nodes = self
            .node_positions()
            .into_iter()
            .filter_map(|(id, pos)| {
                self.partition
                    .connected
                    .iter()
                    .find(|t| t.id == id)
                    .map(|task| NodeCard::new(task, pos))
            })
            .collect();

        CanvasFrame {
            nodes,
            edges: self.edges.clone(),
            pool: PoolView::from_isolated(&self.partition.isolated),
            progress: Progress::from_tasks(&self.snapshot.tasks),
            readiness: ReadinessSummary::from_tasks(&self.snapshot.tasks),
            connected: self.connected,
            auto_layout_enabled: self.trigger.is_enabled(),
            layout_phase: self.trigger.phase(),
            delete_dialog: delete_dialog.cloned(),
        }
    }
}
