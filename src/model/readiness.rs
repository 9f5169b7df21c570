// src/model/readiness.rs

//! Readiness of a task with respect to its dependencies.
//!
//! The backend sends readiness either as a bare string (`"ready"`,
//! `"in_progress"`, ...) or as an object carrying the blocking task ids
//! (`{ blocked = { blocking_task_ids = [...] } }`). That duality is resolved
//! here, once, so the rest of the crate only ever sees [`Readiness`].

use serde::Deserialize;
use tracing::warn;

use crate::model::task::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Blocked { blocking_task_ids: Vec<TaskId> },
    InProgress,
    Completed,
    Cancelled,
}

impl Readiness {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Readiness::Blocked { .. })
    }

    /// Ids of the tasks this one is waiting for (empty unless blocked).
    pub fn blocking_task_ids(&self) -> &[TaskId] {
        match self {
            Readiness::Blocked { blocking_task_ids } => blocking_task_ids,
            _ => &[],
        }
    }

    /// Decode the wire shape. Unknown tags yield `None` (no indicator).
    pub fn from_raw(raw: RawReadiness) -> Option<Self> {
        match raw {
            RawReadiness::Tag(tag) => match tag.trim().to_lowercase().as_str() {
                "ready" => Some(Readiness::Ready),
                "blocked" => Some(Readiness::Blocked {
                    blocking_task_ids: Vec::new(),
                }),
                "in_progress" | "inprogress" => Some(Readiness::InProgress),
                "completed" => Some(Readiness::Completed),
                "cancelled" => Some(Readiness::Cancelled),
                other => {
                    warn!(readiness = %other, "unknown readiness tag; ignoring");
                    None
                }
            },
            RawReadiness::Blocked { blocked } => Some(Readiness::Blocked {
                blocking_task_ids: blocked.blocking_task_ids,
            }),
        }
    }
}

/// Readiness exactly as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawReadiness {
    Tag(String),
    Blocked { blocked: BlockedDetail },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockedDetail {
    #[serde(default)]
    pub blocking_task_ids: Vec<TaskId>,
}
