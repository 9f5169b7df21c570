// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info, warn};

use crate::engine::mutation::{DeleteDialog, MutationIntent, MutationMapper};
use crate::engine::session::ViewSession;
use crate::engine::{Gesture, SessionOptions, ViewCommand};
use crate::layout::{FitViewOptions, LayoutEngine, TriggerDecision};
use crate::surface::Notification;

/// Decision returned by the core after handling a single `ViewEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute (render, timers, mutations).
    pub commands: Vec<ViewCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn continue_with(commands: Vec<ViewCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Finish a render pass: act on the trigger decision, then draw.
///
/// A layout that fires is applied before the frame is built, so the frame
/// already carries the new positions; the fit-view follows it.
pub fn finish_render_pass(
    session: &mut ViewSession,
    dialog: &DeleteDialog,
    engine: &dyn LayoutEngine,
    options: &SessionOptions,
    decision: TriggerDecision,
) -> CoreStep {
    let mut commands = Vec::new();
    let mut laid_out = 0;

    match decision {
        TriggerDecision::Idle => {}
        TriggerDecision::ScheduleSettle { token, delay } => {
            commands.push(ViewCommand::ScheduleSettle { token, delay });
        }
        TriggerDecision::LayoutNow => {
            laid_out = session.run_auto_layout(engine);
        }
    }

    commands.insert(0, ViewCommand::Render(session.frame(dialog.pending())));
    if laid_out > 0 {
        commands.push(fit_view_command(options));
    }

    CoreStep::continue_with(commands)
}

/// Handle the settle timer of the initial layout.
pub fn handle_settle_elapsed(
    session: &mut ViewSession,
    dialog: &DeleteDialog,
    engine: &dyn LayoutEngine,
    options: &SessionOptions,
    token: u64,
) -> CoreStep {
    if !session.trigger_mut().on_settle_elapsed(token) {
        return CoreStep::continue_with(Vec::new());
    }

    info!(token, "applying initial auto-layout");
    apply_layout(session, dialog, engine, options)
}

/// Manual "layout now": always a full re-layout, whatever the toggle says.
pub fn handle_layout_now(
    session: &mut ViewSession,
    dialog: &DeleteDialog,
    engine: &dyn LayoutEngine,
    options: &SessionOptions,
) -> CoreStep {
    info!("manual auto-layout requested");
    apply_layout(session, dialog, engine, options)
}

fn apply_layout(
    session: &mut ViewSession,
    dialog: &DeleteDialog,
    engine: &dyn LayoutEngine,
    options: &SessionOptions,
) -> CoreStep {
    let laid_out = session.run_auto_layout(engine);

    let mut commands = vec![ViewCommand::Render(session.frame(dialog.pending()))];
    if laid_out > 0 {
        commands.push(fit_view_command(options));
    } else {
        debug!("no canvas nodes; skipping fit-view");
    }

    CoreStep::continue_with(commands)
}

fn fit_view_command(options: &SessionOptions) -> ViewCommand {
    ViewCommand::FitView {
        delay: options.fit_delay,
        options: options.fit,
    }
}

/// A delayed fit-view is due: fit now.
pub fn handle_fit_view_due(fit: FitViewOptions) -> CoreStep {
    CoreStep::continue_with(vec![ViewCommand::FitView {
        delay: std::time::Duration::ZERO,
        options: fit,
    }])
}

/// Handle a user gesture.
///
/// Gestures never change the snapshot directly; they produce intents and
/// the new state arrives from the backend later. Until then the frame
/// keeps showing the pre-mutation state.
pub fn handle_gesture(
    session: &mut ViewSession,
    dialog: &mut DeleteDialog,
    mapper: &MutationMapper,
    gesture: Gesture,
) -> CoreStep {
    let mut commands = Vec::new();
    let mut redraw = false;

    match gesture {
        Gesture::Connect { source, target } => {
            commands.extend(
                mapper
                    .connect(source.as_deref(), target.as_deref())
                    .map(ViewCommand::Mutate),
            );
        }
        Gesture::RemoveEdges(ids) => {
            commands.extend(mapper.remove_edges(&ids).into_iter().map(ViewCommand::Mutate));
        }
        Gesture::RequestEdgeDelete(edge) => {
            debug!(edge = %edge, "delete confirmation requested");
            dialog.request(edge);
            redraw = true;
        }
        Gesture::ConfirmDelete => {
            if let Some(edge) = dialog.confirm() {
                commands.extend(mapper.delete_edge(&edge).map(ViewCommand::Mutate));
            }
            redraw = true;
        }
        Gesture::CancelDelete => {
            dialog.cancel();
            redraw = true;
        }
        Gesture::PoolDrop { task, over } => {
            commands.extend(
                mapper
                    .pool_drop(&task, &over, session.partition())
                    .map(ViewCommand::Mutate),
            );
        }
        Gesture::NodeDragged { id, position } => {
            redraw = session.drag_node(&id, position);
        }
    }

    for command in &commands {
        if let ViewCommand::Mutate(intent) = command {
            info!(%intent, "dispatching dependency mutation");
        }
    }

    if redraw {
        commands.insert(0, ViewCommand::Render(session.frame(dialog.pending())));
    }

    CoreStep::continue_with(commands)
}

/// Handle a mutation the backend did not apply.
///
/// There is no retry and no rollback: the view never applied the change
/// locally, so it only has to tell the user.
pub fn handle_mutation_failed(intent: MutationIntent, reason: String) -> CoreStep {
    warn!(%intent, %reason, "dependency mutation failed");
    CoreStep::continue_with(vec![ViewCommand::Notify(Notification::MutationFailed {
        intent,
        reason,
    })])
}
