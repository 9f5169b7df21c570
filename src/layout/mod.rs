// src/layout/mod.rs

//! Node placement for the canvas.
//!
//! - [`grid`] is the fallback placement used on every render pass: creation
//!   order on a fixed-width grid, with persisted coordinates winning per
//!   axis.
//! - [`layered`] is the hierarchical auto-layout engine, reached through the
//!   [`LayoutEngine`] trait so it can be swapped out.
//! - [`trigger`] decides when the auto-layout fires on its own.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use crate::dag::CanvasEdge;
use crate::model::{Position, TaskId};
use crate::types::LayoutDirection;

pub mod grid;
pub mod layered;
pub mod trigger;

pub use grid::{grid_layout, grid_positions};
pub use layered::LayeredLayout;
pub use trigger::{LayoutPhase, LayoutTrigger, RenderCounts, TriggerDecision};

/// Constants of the fallback grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Nodes per row before wrapping to the next one.
    pub row_capacity: usize,
    pub node_width: f64,
    pub node_height: f64,
    pub h_gap: f64,
    pub v_gap: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            row_capacity: 8,
            node_width: 220.0,
            node_height: 80.0,
            h_gap: 120.0,
            v_gap: 40.0,
        }
    }
}

/// Options handed to a [`LayoutEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub direction: LayoutDirection,
    /// Gap between neighbouring nodes in the same rank.
    pub node_spacing: f64,
    /// Gap between consecutive ranks.
    pub rank_spacing: f64,
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::LR,
            node_spacing: 50.0,
            rank_spacing: 120.0,
            node_width: 220.0,
            node_height: 80.0,
        }
    }
}

/// How the viewport re-fits after a layout has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitViewOptions {
    /// Fraction of the viewport kept free around the nodes.
    pub padding: f64,
    /// Length of the animated transition.
    pub duration: Duration,
}

impl Default for FitViewOptions {
    fn default() -> Self {
        Self {
            padding: 0.2,
            duration: Duration::from_millis(300),
        }
    }
}

/// A hierarchical layout routine.
///
/// Takes every canvas node and edge and returns a new position for every
/// node. Callers replace all positions with the result.
pub trait LayoutEngine: Send + Debug {
    fn layout(
        &self,
        nodes: &[TaskId],
        edges: &[CanvasEdge],
        options: &LayoutOptions,
    ) -> HashMap<TaskId, Position>;
}
