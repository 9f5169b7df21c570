// src/backend/mod.rs

//! Pluggable dependency API abstraction.
//!
//! The runtime talks to a `DependencyBackend` instead of a concrete HTTP or
//! websocket client. This makes it easy to swap in a fake backend in tests.
//!
//! - [`InMemoryBackend`] keeps the dependency list in memory, validates
//!   mutations the way the task service does, and publishes the new list
//!   over the runtime channel as the live update.
//! - Tests can provide their own `DependencyBackend` that, for example,
//!   records intents or fails on purpose.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::model::Dependency;

pub mod memory;

pub use memory::InMemoryBackend;

/// Future returned by a mutation. It owns everything it needs so the
/// runtime can spawn it and keep handling events meanwhile.
pub type MutationFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// Trait abstracting how dependency mutations reach the task service.
pub trait DependencyBackend: Send {
    /// Ask the service to create `dependency`.
    ///
    /// Duplicates, self-dependencies and cycles are rejected here, not by
    /// the caller.
    fn create(&mut self, dependency: Dependency) -> MutationFuture;

    /// Ask the service to delete `dependency`. Deleting a pair that is
    /// already gone is not an error.
    fn delete(&mut self, dependency: Dependency) -> MutationFuture;

    /// Whether the live update channel is up.
    fn is_connected(&self) -> bool;
}
