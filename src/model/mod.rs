// src/model/mod.rs

//! Read-only snapshot types mirrored from the task backend.
//!
//! - [`task`] holds the task record and its canvas coordinates.
//! - [`dependency`] holds the "depends on" pair and its reversible edge id.
//! - [`readiness`] decodes the optional readiness value once, at load time.

pub mod dependency;
pub mod readiness;
pub mod task;

pub use dependency::{Dependency, EdgeId};
pub use readiness::{RawReadiness, Readiness};
pub use task::{BoardSnapshot, PersistedPosition, Position, Task, TaskId};
