mod common;
use crate::common::builders::{BoardBuilder, TaskBuilder};
use crate::common::init_tracing;

use std::time::Duration;

use taskdag::engine::{
    CanvasFrame, CoreRuntime, CoreStep, DropTarget, Gesture, MutationIntent, SessionOptions,
    ViewCommand, ViewEvent,
};
use taskdag::layout::{FitViewOptions, LayoutPhase};
use taskdag::model::{BoardSnapshot, Dependency, Position};
use taskdag::surface::{Notification, TaskFormMode};
use taskdag::types::EmptyCanvasDrop;

fn options() -> SessionOptions {
    SessionOptions {
        project_id: "proj-1".to_string(),
        ..SessionOptions::default()
    }
}

/// T0 fans out to T1 and T2; T3 stays in the pool.
fn fan_out() -> BoardSnapshot {
    BoardBuilder::new()
        .tasks(4)
        .dep("T1", "T0")
        .dep("T2", "T0")
        .build()
}

fn frame_of(step: &CoreStep) -> &CanvasFrame {
    step.commands
        .iter()
        .find_map(|c| match c {
            ViewCommand::Render(frame) => Some(frame),
            _ => None,
        })
        .expect("step should render")
}

fn settle_token(step: &CoreStep) -> u64 {
    step.commands
        .iter()
        .find_map(|c| match c {
            ViewCommand::ScheduleSettle { token, .. } => Some(*token),
            _ => None,
        })
        .expect("step should schedule a settle")
}

/// Core that has received `fan_out()` and applied its initial layout.
fn laid_out_core() -> CoreRuntime {
    let mut core = CoreRuntime::with_layered_layout(options());
    let step = core.step(ViewEvent::SnapshotArrived(fan_out()));
    core.step(ViewEvent::SettleElapsed {
        token: settle_token(&step),
    });
    core
}

#[test]
fn snapshot_renders_grid_and_schedules_initial_layout() {
    init_tracing();

    let mut core = CoreRuntime::with_layered_layout(options());

    let step = core.step(ViewEvent::SnapshotArrived(fan_out()));

    assert!(step.keep_running);
    assert!(matches!(step.commands[0], ViewCommand::Render(_)));
    assert!(matches!(
        step.commands[1],
        ViewCommand::ScheduleSettle { delay, .. } if delay == Duration::from_millis(100)
    ));

    let frame = frame_of(&step);
    assert_eq!(frame.nodes.len(), 3);
    assert_eq!(frame.edges.len(), 2);
    assert_eq!(frame.position_of("T1"), Some(Position::new(340.0, 0.0)));
    assert_eq!(frame.pool.tasks.len(), 1);
    assert_eq!(frame.pool.tasks[0].id, "T3");
    assert_eq!(frame.progress.total, 4);
    assert!(matches!(frame.layout_phase, LayoutPhase::Settling { .. }));
}

#[test]
fn settle_applies_layered_positions_then_fits() {
    let mut core = CoreRuntime::with_layered_layout(options());
    let token = settle_token(&core.step(ViewEvent::SnapshotArrived(fan_out())));

    let step = core.step(ViewEvent::SettleElapsed { token });

    let frame = frame_of(&step);
    assert_eq!(frame.position_of("T0"), Some(Position::new(0.0, 65.0)));
    assert_eq!(frame.position_of("T1").map(|p| p.x), Some(340.0));
    assert_eq!(frame.position_of("T2").map(|p| p.x), Some(340.0));
    assert_eq!(frame.layout_phase, LayoutPhase::LayoutApplied);
    assert_eq!(
        step.commands[1],
        ViewCommand::FitView {
            delay: Duration::from_millis(50),
            options: FitViewOptions::default(),
        }
    );

    // A second delivery of the same timer is stale.
    let step = core.step(ViewEvent::SettleElapsed { token });
    assert!(step.commands.is_empty());
}

#[test]
fn new_dependency_relays_out_immediately() {
    let mut core = laid_out_core();
    let mut deps = core.session().snapshot().dependencies.clone();
    deps.push(Dependency::new("T3", "T1"));

    let step = core.step(ViewEvent::DependenciesUpdated(deps));

    let frame = frame_of(&step);
    assert_eq!(frame.nodes.len(), 4);
    // T3 hangs off T1, one rank further right.
    assert_eq!(frame.position_of("T3").map(|p| p.x), Some(680.0));
    assert!(matches!(step.commands.last(), Some(ViewCommand::FitView { .. })));
    assert!(frame.pool.is_empty());
}

#[test]
fn task_only_update_keeps_layout_positions() {
    let mut core = laid_out_core();
    let before = core.frame().position_of("T0");
    let mut tasks = core.session().snapshot().tasks.clone();
    tasks[0].title = "Renamed".to_string();

    let step = core.step(ViewEvent::TasksUpdated(tasks));

    assert_eq!(step.commands.len(), 1);
    let frame = frame_of(&step);
    assert_eq!(frame.position_of("T0"), before);
    assert_eq!(frame.node("T0").map(|n| n.title.as_str()), Some("Renamed"));
}

#[test]
fn connect_gesture_only_emits_an_intent() {
    let mut core = laid_out_core();

    let step = core.step(ViewEvent::Gesture(Gesture::Connect {
        source: Some("T1".into()),
        target: Some("T3".into()),
    }));

    assert_eq!(
        step.commands,
        vec![ViewCommand::Mutate(MutationIntent::CreateDependency(
            Dependency::new("T3", "T1")
        ))]
    );
    // The view keeps showing the snapshot until the backend answers.
    assert!(core.frame().pool.tasks.iter().any(|t| t.id == "T3"));
}

#[test]
fn delete_button_goes_through_confirmation() {
    let mut core = laid_out_core();
    let edge = Dependency::new("T1", "T0").edge_id();

    let step = core.step(ViewEvent::Gesture(Gesture::RequestEdgeDelete(edge.clone())));
    assert_eq!(step.commands.len(), 1);
    assert_eq!(frame_of(&step).delete_dialog, Some(edge.clone()));

    let step = core.step(ViewEvent::Gesture(Gesture::CancelDelete));
    assert_eq!(frame_of(&step).delete_dialog, None);
    assert_eq!(step.commands.len(), 1);

    core.step(ViewEvent::Gesture(Gesture::RequestEdgeDelete(edge.clone())));
    let step = core.step(ViewEvent::Gesture(Gesture::ConfirmDelete));
    assert_eq!(frame_of(&step).delete_dialog, None);
    assert_eq!(
        step.commands[1],
        ViewCommand::Mutate(MutationIntent::DeleteDependency(Dependency::new("T1", "T0")))
    );
}

#[test]
fn removing_edges_directly_skips_the_dialog() {
    let mut core = laid_out_core();
    let ids = vec![
        Dependency::new("T1", "T0").edge_id(),
        Dependency::new("T2", "T0").edge_id(),
    ];

    let step = core.step(ViewEvent::Gesture(Gesture::RemoveEdges(ids)));

    assert_eq!(step.commands.len(), 2);
    assert!(
        step.commands
            .iter()
            .all(|c| matches!(c, ViewCommand::Mutate(MutationIntent::DeleteDependency(_))))
    );
}

#[test]
fn pool_drops_follow_the_drop_target() {
    let mut core = laid_out_core();

    let step = core.step(ViewEvent::Gesture(Gesture::PoolDrop {
        task: "T3".into(),
        over: DropTarget::Node("T2".into()),
    }));
    assert_eq!(
        step.commands,
        vec![ViewCommand::Mutate(MutationIntent::CreateDependency(
            Dependency::new("T3", "T2")
        ))]
    );

    let step = core.step(ViewEvent::Gesture(Gesture::PoolDrop {
        task: "T3".into(),
        over: DropTarget::EmptyCanvas,
    }));
    assert!(step.commands.is_empty());
}

#[test]
fn pool_drops_from_outside_the_pool_do_nothing() {
    let mut core = CoreRuntime::with_layered_layout(SessionOptions {
        empty_canvas_drop: EmptyCanvasDrop::AttachToFirst,
        ..options()
    });
    core.step(ViewEvent::SnapshotArrived(
        BoardBuilder::new().tasks(5).dep("T1", "T0").build(),
    ));

    for (task, over) in [
        ("T1", DropTarget::Node("T0".into())),
        ("ghost", DropTarget::Node("T0".into())),
        ("T3", DropTarget::Node("T4".into())),
        ("ghost", DropTarget::EmptyCanvas),
    ] {
        let step = core.step(ViewEvent::Gesture(Gesture::PoolDrop {
            task: task.into(),
            over: over.clone(),
        }));
        assert!(step.commands.is_empty(), "{task} over {over:?}: {:?}", step.commands);
    }
}

#[test]
fn dragged_node_keeps_its_position_across_renders() {
    let mut core = laid_out_core();
    let spot = Position::new(-40.0, 900.0);

    let step = core.step(ViewEvent::Gesture(Gesture::NodeDragged {
        id: "T2".into(),
        position: spot,
    }));
    assert_eq!(frame_of(&step).position_of("T2"), Some(spot));

    let tasks = core.session().snapshot().tasks.clone();
    let step = core.step(ViewEvent::TasksUpdated(tasks));
    assert_eq!(frame_of(&step).position_of("T2"), Some(spot));

    // Dragging a pooled task does nothing.
    let step = core.step(ViewEvent::Gesture(Gesture::NodeDragged {
        id: "T3".into(),
        position: spot,
    }));
    assert!(step.commands.is_empty());
}

#[test]
fn toggling_off_while_settling_cancels_initial_layout() {
    let mut core = CoreRuntime::with_layered_layout(options());
    let token = settle_token(&core.step(ViewEvent::SnapshotArrived(fan_out())));

    let step = core.step(ViewEvent::AutoLayoutToggled);
    let frame = frame_of(&step);
    assert!(!frame.auto_layout_enabled);
    assert_eq!(frame.layout_phase, LayoutPhase::InitialLayoutPending);

    let step = core.step(ViewEvent::SettleElapsed { token });
    assert!(step.commands.is_empty());

    // Turning it back on re-arms.
    let step = core.step(ViewEvent::AutoLayoutToggled);
    settle_token(&step);
}

#[test]
fn disabled_auto_layout_still_allows_layout_now() {
    let mut core = CoreRuntime::with_layered_layout(SessionOptions {
        auto_layout: false,
        ..options()
    });

    let step = core.step(ViewEvent::SnapshotArrived(fan_out()));
    assert_eq!(step.commands.len(), 1);

    let step = core.step(ViewEvent::LayoutNowRequested);
    assert_eq!(frame_of(&step).position_of("T0"), Some(Position::new(0.0, 65.0)));
    assert!(matches!(step.commands[1], ViewCommand::FitView { .. }));
    assert_eq!(core.frame().layout_phase, LayoutPhase::InitialLayoutPending);
}

#[test]
fn layout_now_on_an_empty_canvas_skips_fit() {
    let mut core = CoreRuntime::with_layered_layout(options());
    core.step(ViewEvent::SnapshotArrived(BoardBuilder::new().tasks(2).build()));

    let step = core.step(ViewEvent::LayoutNowRequested);

    assert_eq!(step.commands.len(), 1);
    assert!(frame_of(&step).nodes.is_empty());
}

#[test]
fn isolated_tasks_never_schedule_layout() {
    let mut core = CoreRuntime::with_layered_layout(options());

    let step = core.step(ViewEvent::SnapshotArrived(
        BoardBuilder::new()
            .task(TaskBuilder::new("solo").build())
            .build(),
    ));

    assert_eq!(step.commands.len(), 1);
    assert_eq!(frame_of(&step).pool.todo_count, 1);
}

#[test]
fn toolbar_and_backend_events_map_to_surface_commands() {
    let mut core = laid_out_core();

    let step = core.step(ViewEvent::AddTaskRequested);
    assert!(matches!(
        &step.commands[0],
        ViewCommand::OpenTaskForm(req) if req.mode == TaskFormMode::Create && req.project_id == "proj-1"
    ));

    let intent = MutationIntent::CreateDependency(Dependency::new("T0", "T2"));
    let step = core.step(ViewEvent::MutationFailed {
        intent: intent.clone(),
        reason: "cycle".to_string(),
    });
    assert_eq!(
        step.commands,
        vec![ViewCommand::Notify(Notification::MutationFailed {
            intent,
            reason: "cycle".to_string(),
        })]
    );

    let step = core.step(ViewEvent::FitViewDue(FitViewOptions::default()));
    assert!(matches!(
        step.commands[0],
        ViewCommand::FitView { delay, .. } if delay.is_zero()
    ));

    let step = core.step(ViewEvent::ConnectivityChanged(false));
    assert!(!frame_of(&step).connected);

    let step = core.step(ViewEvent::ShutdownRequested);
    assert!(!step.keep_running);
    assert_eq!(step.commands, vec![ViewCommand::RequestExit]);
}
