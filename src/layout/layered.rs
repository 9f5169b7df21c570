// src/layout/layered.rs

//! Layered (Sugiyama-style) layout for the dependency canvas.
//!
//! Phases:
//! 1. rank assignment: longest path over a topological order,
//! 2. ordering within ranks: alternating barycenter sweeps,
//! 3. coordinates: ranks along the flow axis, each rank centred on the
//!    widest one along the cross axis, then remapped for the direction.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use crate::dag::CanvasEdge;
use crate::layout::{LayoutEngine, LayoutOptions};
use crate::model::{Position, TaskId};
use crate::types::LayoutDirection;

const ORDERING_SWEEPS: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredLayout;

impl LayeredLayout {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutEngine for LayeredLayout {
    fn layout(
        &self,
        nodes: &[TaskId],
        edges: &[CanvasEdge],
        options: &LayoutOptions,
    ) -> HashMap<TaskId, Position> {
        if nodes.is_empty() {
            return HashMap::new();
        }

        let graph = build_graph(nodes, edges);
        let ranks = assign_ranks(&graph);
        let layers = order_layers(&graph, &ranks);

        let mut out = HashMap::with_capacity(nodes.len());
        let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
        let last_rank = layers.len().saturating_sub(1);

        for (rank, layer) in layers.iter().enumerate() {
            let offset = (widest - layer.len()) as f64 / 2.0;
            for (slot, &idx) in layer.iter().enumerate() {
                let cross = offset + slot as f64;
                let position = place(rank, last_rank, cross, options);
                out.insert(graph[idx].clone(), position);
            }
        }

        debug!(
            nodes = nodes.len(),
            ranks = layers.len(),
            direction = ?options.direction,
            "layered layout computed"
        );

        out
    }
}

/// Graph of canvas nodes; edges outside the node set and self-loops are
/// skipped, duplicates collapse.
fn build_graph(nodes: &[TaskId], edges: &[CanvasEdge]) -> DiGraph<TaskId, ()> {
    let mut graph: DiGraph<TaskId, ()> = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

    for id in nodes {
        if !index.contains_key(id.as_str()) {
            let idx = graph.add_node(id.clone());
            index.insert(id.as_str(), idx);
        }
    }

    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    for edge in edges {
        let (Some(&from), Some(&to)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        else {
            continue;
        };
        if from == to || !seen.insert((from, to)) {
            continue;
        }
        graph.add_edge(from, to, ());
    }

    graph
}

fn assign_ranks(graph: &DiGraph<TaskId, ()>) -> Vec<usize> {
    let order: Vec<NodeIndex> = match toposort(graph, None) {
        Ok(order) => order,
        Err(cycle) => {
            warn!(
                task = %graph[cycle.node_id()],
                "cycle in dependency graph; ranking in insertion order"
            );
            graph.node_indices().collect()
        }
    };

    let mut rank = vec![0usize; graph.node_count()];
    for idx in order {
        for next in graph.neighbors_directed(idx, Direction::Outgoing) {
            let candidate = rank[idx.index()] + 1;
            if rank[next.index()] < candidate {
                rank[next.index()] = candidate;
            }
        }
    }
    rank
}

fn order_layers(graph: &DiGraph<TaskId, ()>, ranks: &[usize]) -> Vec<Vec<NodeIndex>> {
    let layer_count = ranks.iter().copied().max().map_or(0, |r| r + 1);
    let mut layers: Vec<Vec<NodeIndex>> = vec![Vec::new(); layer_count];
    for idx in graph.node_indices() {
        layers[ranks[idx.index()]].push(idx);
    }

    for sweep in 0..ORDERING_SWEEPS {
        if sweep % 2 == 0 {
            for i in 1..layer_count {
                let (before, after) = layers.split_at_mut(i);
                reorder(graph, &mut after[0], &before[i - 1], Direction::Incoming);
            }
        } else {
            for i in (0..layer_count.saturating_sub(1)).rev() {
                let (before, after) = layers.split_at_mut(i + 1);
                reorder(graph, &mut before[i], &after[0], Direction::Outgoing);
            }
        }
    }

    layers
}

/// Sort `layer` by the mean slot of its neighbours in `reference`.
///
/// Nodes without neighbours there keep their current slot as key, ties
/// fall back to the current slot, so the result is deterministic.
fn reorder(
    graph: &DiGraph<TaskId, ()>,
    layer: &mut Vec<NodeIndex>,
    reference: &[NodeIndex],
    towards: Direction,
) {
    let slot_of: HashMap<NodeIndex, usize> =
        reference.iter().enumerate().map(|(slot, &idx)| (idx, slot)).collect();

    let mut keyed: Vec<(f64, usize, NodeIndex)> = layer
        .iter()
        .enumerate()
        .map(|(current, &idx)| {
            let slots: Vec<usize> = graph
                .neighbors_directed(idx, towards)
                .filter_map(|n| slot_of.get(&n).copied())
                .collect();
            let key = if slots.is_empty() {
                current as f64
            } else {
                slots.iter().sum::<usize>() as f64 / slots.len() as f64
            };
            (key, current, idx)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    *layer = keyed.into_iter().map(|(_, _, idx)| idx).collect();
}

fn place(rank: usize, last_rank: usize, cross: f64, options: &LayoutOptions) -> Position {
    let horizontal_rank = options.node_width + options.rank_spacing;
    let horizontal_cross = options.node_width + options.node_spacing;
    let vertical_rank = options.node_height + options.rank_spacing;
    let vertical_cross = options.node_height + options.node_spacing;

    match options.direction {
        LayoutDirection::LR => Position::new(rank as f64 * horizontal_rank, cross * vertical_cross),
        LayoutDirection::RL => Position::new(
            (last_rank - rank) as f64 * horizontal_rank,
            cross * vertical_cross,
        ),
        LayoutDirection::TB => Position::new(cross * horizontal_cross, rank as f64 * vertical_rank),
        LayoutDirection::BT => Position::new(
            cross * horizontal_cross,
            (last_rank - rank) as f64 * vertical_rank,
        ),
    }
}
