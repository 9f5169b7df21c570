// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Workflow status of a task as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    InReview,
    Done,
    Cancelled,
}

impl TaskStatus {
    /// Column order used when flattening tasks for the table view.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::InReview => "inreview",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "inprogress" => Ok(TaskStatus::InProgress),
            "inreview" => Ok(TaskStatus::InReview),
            "done" => Ok(TaskStatus::Done),
            "cancelled" => Ok(TaskStatus::Cancelled),
            other => Err(format!(
                "invalid task status: {other} (expected todo, inprogress, inreview, done or cancelled)"
            )),
        }
    }
}

/// Flow direction handed to the hierarchical layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LayoutDirection {
    /// Left to right: prerequisites on the left.
    LR,
    RL,
    /// Top to bottom.
    TB,
    BT,
}

impl Default for LayoutDirection {
    fn default() -> Self {
        LayoutDirection::LR
    }
}

impl FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LR" => Ok(LayoutDirection::LR),
            "RL" => Ok(LayoutDirection::RL),
            "TB" | "TD" => Ok(LayoutDirection::TB),
            "BT" => Ok(LayoutDirection::BT),
            other => Err(format!(
                "invalid layout direction: {other} (expected LR, RL, TB or BT)"
            )),
        }
    }
}

/// What happens when a pooled task is dropped on empty canvas space.
///
/// - `Ignore`: nothing; the task stays in the pool until it is dropped on a
///   node (default).
/// - `AttachToFirst`: make the dropped task depend on the first connected
///   task so that it shows up on the canvas. This fabricates a dependency
///   the user never drew, so it is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyCanvasDrop {
    Ignore,
    AttachToFirst,
}

impl Default for EmptyCanvasDrop {
    fn default() -> Self {
        EmptyCanvasDrop::Ignore
    }
}

impl FromStr for EmptyCanvasDrop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(EmptyCanvasDrop::Ignore),
            "attach-to-first" => Ok(EmptyCanvasDrop::AttachToFirst),
            other => Err(format!(
                "invalid empty_canvas_drop: {other} (expected \"ignore\" or \"attach-to-first\")"
            )),
        }
    }
}
