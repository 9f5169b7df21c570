// src/surface/console.rs

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::engine::CanvasFrame;
use crate::layout::FitViewOptions;
use crate::surface::{Notification, TaskFormRequest, ViewSurface};

/// Surface used by the CLI: logs what would be drawn and remembers the
/// latest frame so it can be printed once the runtime exits.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSurface {
    last_frame: Arc<Mutex<Option<CanvasFrame>>>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the latest rendered frame.
    pub fn last_frame(&self) -> Arc<Mutex<Option<CanvasFrame>>> {
        Arc::clone(&self.last_frame)
    }
}

impl ViewSurface for ConsoleSurface {
    fn render(&mut self, frame: &CanvasFrame) {
        debug!(
            nodes = frame.nodes.len(),
            edges = frame.edges.len(),
            pool = frame.pool.tasks.len(),
            phase = ?frame.layout_phase,
            "render"
        );

        match self.last_frame.lock() {
            Ok(mut guard) => *guard = Some(frame.clone()),
            Err(_) => warn!("frame store lock poisoned; dropping frame"),
        }
    }

    fn fit_view(&mut self, options: FitViewOptions) {
        debug!(padding = options.padding, duration = ?options.duration, "fit view");
    }

    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::MutationFailed { intent, reason } => {
                eprintln!("could not {intent}: {reason}");
            }
        }
    }

    fn open_task_form(&mut self, request: &TaskFormRequest) {
        info!(project = %request.project_id, mode = ?request.mode, "task form requested");
    }
}

/// Human-readable dump of a frame.
pub fn print_frame(frame: &CanvasFrame) {
    println!("canvas ({} nodes, {} edges):", frame.nodes.len(), frame.edges.len());
    for node in &frame.nodes {
        println!(
            "  - {} \"{}\" at ({:.0}, {:.0})",
            node.id, node.title, node.position.x, node.position.y
        );
    }
    for edge in &frame.edges {
        println!("  {} -> {}", edge.source, edge.target);
    }

    println!(
        "pool ({} open, {} done):",
        frame.pool.todo_count, frame.pool.done_count
    );
    for task in &frame.pool.tasks {
        println!("  - {} \"{}\" [{}]", task.id, task.title, task.status);
    }

    println!(
        "progress: {}/{} ({}%)",
        frame.progress.completed,
        frame.progress.total,
        frame.progress.rounded_percent()
    );
    println!(
        "live updates: {}",
        if frame.connected { "connected" } else { "disconnected" }
    );
}
