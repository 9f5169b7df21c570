// src/view/mod.rs

//! Presentations derived from a snapshot, around the canvas itself.
//!
//! - [`pool`]: the sidebar of tasks without dependencies.
//! - [`card`]: what a canvas node shows.
//! - [`summary`]: progress and readiness counters.
//! - [`table`]: the flat table view of all tasks.

pub mod card;
pub mod pool;
pub mod summary;
pub mod table;

pub use card::{NodeCard, StatusAccent, description_preview};
pub use pool::PoolView;
pub use summary::{Progress, ReadinessSummary};
pub use table::TableView;
