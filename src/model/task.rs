// src/model/task.rs

use chrono::{DateTime, Utc};

use crate::model::dependency::Dependency;
use crate::model::readiness::Readiness;
use crate::types::TaskStatus;

/// Canonical task identifier type used throughout the crate.
pub type TaskId = String;

/// A point on the canvas (top-left corner of a node).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Coordinates saved by the backend. Each axis is optional on its own.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PersistedPosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Snapshot of one task record as delivered by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub position: PersistedPosition,
    pub created_at: DateTime<Utc>,
    /// An execution attempt is currently running for this task.
    pub has_in_progress_attempt: bool,
    /// The most recent execution attempt failed.
    pub last_attempt_failed: bool,
    /// `None` when readiness is not provided (orchestration disabled).
    pub readiness: Option<Readiness>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            position: PersistedPosition::default(),
            created_at,
            has_in_progress_attempt: false,
            last_attempt_failed: false,
            readiness: None,
        }
    }
}

/// One consistent pair of task and dependency lists.
///
/// Every render pass works against exactly one snapshot so that tasks from
/// one fetch are never combined with dependencies from another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub dependencies: Vec<Dependency>,
}

impl BoardSnapshot {
    pub fn new(tasks: Vec<Task>, dependencies: Vec<Dependency>) -> Self {
        Self {
            tasks,
            dependencies,
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
