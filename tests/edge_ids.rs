mod common;
use crate::common::init_tracing;

use proptest::prelude::*;
use taskdag::dag::{CanvasEdge, canvas_edges};
use taskdag::errors::TaskDagError;
use taskdag::model::{Dependency, EdgeId};

#[test]
fn edge_points_from_prerequisite_to_dependent() {
    let dep = Dependency::new("build", "design");

    let edge = CanvasEdge::from_dependency(&dep);

    assert_eq!(edge.source, "design");
    assert_eq!(edge.target, "build");
    assert_eq!(edge.id.decode().unwrap(), dep);
}

#[test]
fn self_loops_are_not_drawn() {
    init_tracing();

    let deps = vec![Dependency::new("A", "A"), Dependency::new("B", "A")];

    let edges = canvas_edges(&deps);

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target, "B");
}

#[test]
fn ids_with_separator_and_escape_characters_round_trip() {
    let dep = Dependency::new(r"a>b\c", "->>");

    let id = dep.edge_id();

    assert!(id.as_str().starts_with("dep:"));
    assert_eq!(id.decode().unwrap(), dep);
}

#[test]
fn distinct_pairs_get_distinct_ids() {
    // Naive joining would map both of these to "a>b>c".
    let left = Dependency::new("a>b", "c");
    let right = Dependency::new("a", "b>c");

    assert_ne!(left.edge_id(), right.edge_id());
}

#[test]
fn malformed_ids_are_rejected() {
    let bad = [
        "A>B",
        "dep:A",
        "dep:A>B>C",
        "dep:>B",
        "dep:A>",
        r"dep:A>B\",
    ];

    for raw in bad {
        match EdgeId::from(raw).decode() {
            Err(TaskDagError::InvalidEdgeId(id)) => assert_eq!(id, raw),
            other => panic!("expected InvalidEdgeId for {raw:?}, got {other:?}"),
        }
    }
}

proptest! {
    #[test]
    fn any_non_empty_pair_round_trips(task in ".{1,12}", dep in ".{1,12}") {
        let pair = Dependency::new(task, dep);
        prop_assert_eq!(pair.edge_id().decode().unwrap(), pair);
    }
}
