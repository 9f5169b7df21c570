// src/engine/mod.rs

//! View engine for the dependency canvas.
//!
//! This module ties together:
//! - the per-view session (snapshot, partition, positions, layout trigger)
//! - the mutation mapper (gestures -> dependency create/delete intents)
//! - the main runtime event loop that reacts to:
//!   - snapshots and live dependency updates
//!   - user gestures and toolbar actions
//!   - settle / fit-view timers
//!   - failed mutations
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::time::Duration;

use crate::layout::{FitViewOptions, GridParams, LayoutOptions};
use crate::model::{BoardSnapshot, Dependency, EdgeId, Position, Task, TaskId};
use crate::surface::{Notification, TaskFormRequest};
use crate::types::EmptyCanvasDrop;

pub mod core;
pub mod event_handlers;
pub mod frame;
pub mod mutation;
pub mod runtime;
pub mod session;

pub use core::CoreRuntime;
pub use event_handlers::CoreStep;
pub use frame::CanvasFrame;
pub use mutation::{DeleteDialog, MutationIntent, MutationMapper};
pub use runtime::Runtime;
pub use session::ViewSession;

/// What a pooled task was released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A node on the canvas.
    Node(TaskId),
    /// Another entry of the pool list.
    PoolItem(TaskId),
    /// Canvas background, no node under the pointer.
    EmptyCanvas,
}

/// Direct manipulation by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Edge drawn from `source`'s outbound handle to `target`'s inbound
    /// handle. Either end may be missing when the drag was released
    /// nowhere.
    Connect {
        source: Option<TaskId>,
        target: Option<TaskId>,
    },
    /// Edges removed directly on the canvas (no confirmation).
    RemoveEdges(Vec<EdgeId>),
    /// Delete button on an edge: opens the confirmation dialog.
    RequestEdgeDelete(EdgeId),
    ConfirmDelete,
    CancelDelete,
    /// A pool entry dragged onto the canvas area.
    PoolDrop { task: TaskId, over: DropTarget },
    /// A canvas node moved by hand.
    NodeDragged { id: TaskId, position: Position },
}

/// Events flowing into the runtime from the data source, the user and
/// timers.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// A full, consistent snapshot from the backend.
    SnapshotArrived(BoardSnapshot),
    /// New task list; dependencies unchanged.
    TasksUpdated(Vec<Task>),
    /// New dependency list from the live channel; tasks unchanged.
    DependenciesUpdated(Vec<Dependency>),
    /// The live update channel connected or dropped.
    ConnectivityChanged(bool),
    Gesture(Gesture),
    /// Toolbar toggle for automatic layout.
    AutoLayoutToggled,
    /// Toolbar "layout now".
    LayoutNowRequested,
    /// Toolbar "add task".
    AddTaskRequested,
    /// The settle delay scheduled under `token` has passed.
    SettleElapsed { token: u64 },
    /// A delayed fit-view is due.
    FitViewDue(FitViewOptions),
    /// The backend rejected or failed to apply an intent.
    MutationFailed {
        intent: MutationIntent,
        reason: String,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// Draw this frame.
    Render(CanvasFrame),
    /// Post `SettleElapsed { token }` after `delay`.
    ScheduleSettle { token: u64, delay: Duration },
    /// Fit the viewport to all nodes once `delay` has passed.
    FitView {
        delay: Duration,
        options: FitViewOptions,
    },
    /// Send this intent to the dependency backend.
    Mutate(MutationIntent),
    Notify(Notification),
    OpenTaskForm(TaskFormRequest),
    RequestExit,
}

/// Per-view settings, usually built from the `[view]` section of the
/// board file.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub project_id: String,
    /// Initial state of the auto-layout toggle.
    pub auto_layout: bool,
    pub empty_canvas_drop: EmptyCanvasDrop,
    pub grid: GridParams,
    pub layout: LayoutOptions,
    /// Wait before the first automatic layout.
    pub initial_settle: Duration,
    /// Wait between applying a layout and fitting the viewport.
    pub fit_delay: Duration,
    pub fit: FitViewOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            project_id: "default".to_string(),
            auto_layout: true,
            empty_canvas_drop: EmptyCanvasDrop::default(),
            grid: GridParams::default(),
            layout: LayoutOptions::default(),
            initial_settle: Duration::from_millis(100),
            fit_delay: Duration::from_millis(50),
            fit: FitViewOptions::default(),
        }
    }
}
