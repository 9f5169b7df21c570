mod common;
use crate::common::init_tracing;

use std::time::Duration;

use taskdag::layout::{LayoutPhase, LayoutTrigger, RenderCounts, TriggerDecision};

const SETTLE: Duration = Duration::from_millis(100);

fn counts(nodes: usize, edges: usize, dependencies: usize) -> RenderCounts {
    RenderCounts {
        nodes,
        edges,
        dependencies,
    }
}

fn settle_token(decision: TriggerDecision) -> u64 {
    match decision {
        TriggerDecision::ScheduleSettle { token, delay } => {
            assert_eq!(delay, SETTLE);
            token
        }
        other => panic!("expected ScheduleSettle, got {other:?}"),
    }
}

/// Trigger that has already applied its initial layout over `deps`
/// dependencies.
fn applied(deps: usize) -> LayoutTrigger {
    let mut trigger = LayoutTrigger::new(true, SETTLE);
    let token = settle_token(trigger.on_render(counts(2, deps, deps)));
    assert!(trigger.on_settle_elapsed(token));
    trigger
}

#[test]
fn empty_graph_keeps_initial_layout_pending() {
    let mut trigger = LayoutTrigger::new(true, SETTLE);

    assert_eq!(trigger.on_render(counts(0, 0, 0)), TriggerDecision::Idle);
    assert_eq!(trigger.on_render(counts(3, 0, 0)), TriggerDecision::Idle);
    assert_eq!(trigger.phase(), LayoutPhase::InitialLayoutPending);
}

#[test]
fn first_graph_schedules_settle_then_applies() {
    init_tracing();

    let mut trigger = LayoutTrigger::new(true, SETTLE);

    let token = settle_token(trigger.on_render(counts(2, 1, 1)));
    assert_eq!(trigger.phase(), LayoutPhase::Settling { token });

    assert!(trigger.on_settle_elapsed(token));
    assert_eq!(trigger.phase(), LayoutPhase::LayoutApplied);

    // Only once.
    assert!(!trigger.on_settle_elapsed(token));
}

#[test]
fn render_while_settling_rearms_and_stales_old_token() {
    let mut trigger = LayoutTrigger::new(true, SETTLE);

    let first = settle_token(trigger.on_render(counts(2, 1, 1)));
    let second = settle_token(trigger.on_render(counts(3, 2, 2)));
    assert_ne!(first, second);

    assert!(!trigger.on_settle_elapsed(first));
    assert_eq!(trigger.phase(), LayoutPhase::Settling { token: second });
    assert!(trigger.on_settle_elapsed(second));
}

#[test]
fn graph_emptied_while_settling_cancels() {
    let mut trigger = LayoutTrigger::new(true, SETTLE);

    let token = settle_token(trigger.on_render(counts(2, 1, 1)));
    assert_eq!(trigger.on_render(counts(0, 0, 0)), TriggerDecision::Idle);

    assert_eq!(trigger.phase(), LayoutPhase::InitialLayoutPending);
    assert!(!trigger.on_settle_elapsed(token));
}

#[test]
fn dependency_count_change_fires_immediately_after_initial_layout() {
    let mut trigger = applied(1);

    assert_eq!(trigger.on_render(counts(2, 1, 1)), TriggerDecision::Idle);
    assert_eq!(trigger.on_render(counts(3, 2, 2)), TriggerDecision::LayoutNow);
    assert_eq!(trigger.on_render(counts(3, 2, 2)), TriggerDecision::Idle);
    assert_eq!(trigger.on_render(counts(2, 1, 1)), TriggerDecision::LayoutNow);
    assert_eq!(trigger.phase(), LayoutPhase::LayoutApplied);
}

#[test]
fn same_count_swap_goes_unnoticed() {
    let mut trigger = applied(2);

    // Different dependencies, same number of them.
    assert_eq!(trigger.on_render(counts(3, 2, 2)), TriggerDecision::Idle);
}

#[test]
fn disabled_trigger_never_fires() {
    let mut trigger = LayoutTrigger::new(false, SETTLE);

    assert_eq!(trigger.on_render(counts(2, 1, 1)), TriggerDecision::Idle);
    assert_eq!(trigger.on_render(counts(3, 2, 2)), TriggerDecision::Idle);
    assert_eq!(trigger.phase(), LayoutPhase::InitialLayoutPending);
}

#[test]
fn disabling_while_settling_drops_the_pending_layout() {
    let mut trigger = LayoutTrigger::new(true, SETTLE);
    let token = settle_token(trigger.on_render(counts(2, 1, 1)));

    trigger.set_enabled(false);

    assert!(!trigger.is_enabled());
    assert_eq!(trigger.phase(), LayoutPhase::InitialLayoutPending);
    assert!(!trigger.on_settle_elapsed(token));

    trigger.set_enabled(true);
    settle_token(trigger.on_render(counts(2, 1, 1)));
}

#[test]
fn disabled_after_apply_ignores_count_changes_but_tracks_them() {
    let mut trigger = applied(1);

    trigger.set_enabled(false);
    assert_eq!(trigger.on_render(counts(3, 2, 2)), TriggerDecision::Idle);

    // The count was recorded while disabled, so re-enabling does not fire.
    trigger.set_enabled(true);
    assert_eq!(trigger.on_render(counts(3, 2, 2)), TriggerDecision::Idle);
    assert_eq!(trigger.phase(), LayoutPhase::LayoutApplied);

    // Once back on, the next dependency change re-lays out again.
    assert_eq!(trigger.on_render(counts(4, 3, 3)), TriggerDecision::LayoutNow);
}
