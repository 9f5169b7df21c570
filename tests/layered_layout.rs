mod common;
use crate::common::init_tracing;

use taskdag::dag::canvas_edges;
use taskdag::layout::{LayeredLayout, LayoutEngine, LayoutOptions};
use taskdag::model::{Dependency, Position, TaskId};
use taskdag::types::LayoutDirection;

fn ids(names: &[&str]) -> Vec<TaskId> {
    names.iter().map(|s| s.to_string()).collect()
}

/// A -> B -> C on the canvas.
fn chain() -> (Vec<TaskId>, Vec<Dependency>) {
    (
        ids(&["A", "B", "C"]),
        vec![Dependency::new("B", "A"), Dependency::new("C", "B")],
    )
}

fn options(direction: LayoutDirection) -> LayoutOptions {
    LayoutOptions {
        direction,
        ..LayoutOptions::default()
    }
}

#[test]
fn chain_left_to_right_puts_prerequisites_left() {
    let (nodes, deps) = chain();
    let edges = canvas_edges(&deps);

    let pos = LayeredLayout::new().layout(&nodes, &edges, &options(LayoutDirection::LR));

    assert_eq!(pos["A"], Position::new(0.0, 0.0));
    assert_eq!(pos["B"], Position::new(340.0, 0.0));
    assert_eq!(pos["C"], Position::new(680.0, 0.0));
}

#[test]
fn chain_in_every_direction() {
    let (nodes, deps) = chain();
    let edges = canvas_edges(&deps);
    let engine = LayeredLayout::new();

    let rl = engine.layout(&nodes, &edges, &options(LayoutDirection::RL));
    assert!(rl["A"].x > rl["B"].x && rl["B"].x > rl["C"].x);

    let tb = engine.layout(&nodes, &edges, &options(LayoutDirection::TB));
    assert_eq!(tb["A"], Position::new(0.0, 0.0));
    assert_eq!(tb["C"], Position::new(0.0, 400.0));

    let bt = engine.layout(&nodes, &edges, &options(LayoutDirection::BT));
    assert!(bt["A"].y > bt["C"].y);
    assert_eq!(bt["C"].y, 0.0);
}

#[test]
fn fan_out_shares_a_rank_and_is_centred() {
    let nodes = ids(&["A", "B", "C"]);
    let deps = vec![Dependency::new("B", "A"), Dependency::new("C", "A")];
    let edges = canvas_edges(&deps);

    let pos = LayeredLayout::new().layout(&nodes, &edges, &options(LayoutDirection::LR));

    assert_eq!(pos["B"].x, 340.0);
    assert_eq!(pos["C"].x, 340.0);
    assert_ne!(pos["B"].y, pos["C"].y);
    // The single root sits between its two dependents.
    assert_eq!(pos["A"].y, (pos["B"].y + pos["C"].y) / 2.0);
}

#[test]
fn every_node_gets_a_position_even_without_edges() {
    let nodes = ids(&["A", "B"]);

    let pos = LayeredLayout::new().layout(&nodes, &[], &LayoutOptions::default());

    assert_eq!(pos.len(), 2);
    assert_ne!(pos["A"], pos["B"]);
}

#[test]
fn cycles_and_unknown_endpoints_do_not_break_layout() {
    init_tracing();

    let nodes = ids(&["A", "B"]);
    let deps = vec![
        Dependency::new("B", "A"),
        Dependency::new("A", "B"),
        Dependency::new("A", "ghost"),
    ];
    let edges = canvas_edges(&deps);

    let pos = LayeredLayout::new().layout(&nodes, &edges, &LayoutOptions::default());

    assert_eq!(pos.len(), 2);
    assert!(!pos.contains_key("ghost"));
}

#[test]
fn empty_input_yields_no_positions() {
    let pos = LayeredLayout::new().layout(&[], &[], &LayoutOptions::default());
    assert!(pos.is_empty());
}
