// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`ViewEvent`]s and produces:
//! - an updated view session
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - drawing frames and fitting the viewport on the surface
//! - running timers and sending intents to the dependency backend
//!
//! The core is unit tested without any Tokio, channels or backend.

use crate::engine::event_handlers::{
    CoreStep, finish_render_pass, handle_fit_view_due, handle_gesture, handle_layout_now,
    handle_mutation_failed, handle_settle_elapsed,
};
use crate::engine::mutation::{DeleteDialog, MutationMapper};
use crate::engine::session::ViewSession;
use crate::engine::{CanvasFrame, SessionOptions, ViewCommand, ViewEvent};
use crate::layout::{LayeredLayout, LayoutEngine, TriggerDecision};
use crate::surface::{TaskFormMode, TaskFormRequest};

/// Pure core runtime state.
///
/// This owns:
/// - the view session (snapshot, partition, positions, layout trigger)
/// - the delete confirmation dialog
/// - the mutation mapper and the layout engine
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    session: ViewSession,
    dialog: DeleteDialog,
    mapper: MutationMapper,
    engine: Box<dyn LayoutEngine>,
    options: SessionOptions,
}

impl CoreRuntime {
    pub fn new(options: SessionOptions, engine: Box<dyn LayoutEngine>) -> Self {
        Self {
            session: ViewSession::new(&options),
            dialog: DeleteDialog::default(),
            mapper: MutationMapper::new(options.empty_canvas_drop),
            engine,
            options,
        }
    }

    /// Core with the built-in layered layout engine.
    pub fn with_layered_layout(options: SessionOptions) -> Self {
        Self::new(options, Box::new(LayeredLayout::new()))
    }

    pub fn session(&self) -> &ViewSession {
        &self.session
    }

    /// Current frame without handling an event (for tests and diagnostics).
    pub fn frame(&self) -> CanvasFrame {
        self.session.frame(self.dialog.pending())
    }

    /// Handle a single view event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: ViewEvent) -> CoreStep {
        match event {
            ViewEvent::SnapshotArrived(snapshot) => {
                let decision = self.session.apply_snapshot(snapshot);
                self.render_pass(decision)
            }
            ViewEvent::TasksUpdated(tasks) => {
                let decision = self.session.replace_tasks(tasks);
                self.render_pass(decision)
            }
            ViewEvent::DependenciesUpdated(dependencies) => {
                let decision = self.session.replace_dependencies(dependencies);
                self.render_pass(decision)
            }
            ViewEvent::AutoLayoutToggled => {
                let decision = self.session.toggle_auto_layout();
                self.render_pass(decision)
            }
            ViewEvent::ConnectivityChanged(connected) => {
                self.session.set_connected(connected);
                CoreStep::continue_with(vec![ViewCommand::Render(self.frame())])
            }
            ViewEvent::Gesture(gesture) => {
                handle_gesture(&mut self.session, &mut self.dialog, &self.mapper, gesture)
            }
            ViewEvent::LayoutNowRequested => handle_layout_now(
                &mut self.session,
                &self.dialog,
                self.engine.as_ref(),
                &self.options,
            ),
            ViewEvent::SettleElapsed { token } => handle_settle_elapsed(
                &mut self.session,
                &self.dialog,
                self.engine.as_ref(),
                &self.options,
                token,
            ),
            ViewEvent::FitViewDue(fit) => handle_fit_view_due(fit),
            ViewEvent::AddTaskRequested => {
                CoreStep::continue_with(vec![ViewCommand::OpenTaskForm(TaskFormRequest {
                    mode: TaskFormMode::Create,
                    project_id: self.options.project_id.clone(),
                })])
            }
            ViewEvent::MutationFailed { intent, reason } => handle_mutation_failed(intent, reason),
            ViewEvent::ShutdownRequested => CoreStep {
                commands: vec![ViewCommand::RequestExit],
                keep_running: false,
            },
        }
    }

    fn render_pass(&mut self, decision: TriggerDecision) -> CoreStep {
        finish_render_pass(
            &mut self.session,
            &self.dialog,
            self.engine.as_ref(),
            &self.options,
            decision,
        )
    }
}
