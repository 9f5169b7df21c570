// src/dag/mod.rs

//! Graph structure derived from the task and dependency lists.
//!
//! - [`partition`] splits tasks into canvas (connected) and pool (isolated).
//! - [`canvas`] turns dependencies into drawable edges.
//! - [`graph`] holds adjacency lists used for cycle checks.

pub mod canvas;
pub mod graph;
pub mod partition;

pub use canvas::{CanvasEdge, canvas_edges};
pub use graph::DagGraph;
pub use partition::{Partition, partition};
