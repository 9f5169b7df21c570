// src/view/card.rs

use crate::model::{Position, Readiness, Task, TaskId};
use crate::types::TaskStatus;

/// Characters of the description shown on a node before it is cut off.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// Left accent of a node, keyed off the task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAccent {
    Todo,
    InProgress,
    Done,
    Neutral,
}

impl From<TaskStatus> for StatusAccent {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => StatusAccent::Todo,
            TaskStatus::InProgress => StatusAccent::InProgress,
            TaskStatus::Done => StatusAccent::Done,
            TaskStatus::InReview | TaskStatus::Cancelled => StatusAccent::Neutral,
        }
    }
}

/// Everything a canvas node displays for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCard {
    pub id: TaskId,
    pub title: String,
    pub description_preview: Option<String>,
    pub accent: StatusAccent,
    pub readiness: Option<Readiness>,
    /// Number of tasks this one waits for; 0 unless blocked.
    pub blocking_count: usize,
    /// An attempt is running and no readiness says so already.
    pub show_spinner: bool,
    pub show_failure: bool,
    pub position: Position,
}

impl NodeCard {
    pub fn new(task: &Task, position: Position) -> Self {
        let blocking_count = task
            .readiness
            .as_ref()
            .map_or(0, |r| r.blocking_task_ids().len());

        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description_preview: task
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(description_preview),
            accent: task.status.into(),
            readiness: task.readiness.clone(),
            blocking_count,
            show_spinner: task.has_in_progress_attempt && task.readiness.is_none(),
            show_failure: task.last_attempt_failed,
            position,
        }
    }
}

/// Cut a description down to [`DESCRIPTION_PREVIEW_CHARS`] characters,
/// appending `...` when something was dropped.
pub fn description_preview(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
