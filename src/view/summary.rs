// src/view/summary.rs

use crate::model::{Readiness, Task};

/// Completion progress over the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            completed: tasks.iter().filter(|t| t.status.is_done()).count(),
            total: tasks.len(),
        }
    }

    /// 0 for an empty board.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn rounded_percent(&self) -> u32 {
        self.percent().round() as u32
    }
}

/// How many tasks sit in each readiness state.
///
/// All zero when no task carries readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadinessSummary {
    pub ready: usize,
    pub blocked: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl ReadinessSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = Self::default();
        for readiness in tasks.iter().filter_map(|t| t.readiness.as_ref()) {
            match readiness {
                Readiness::Ready => summary.ready += 1,
                Readiness::Blocked { .. } => summary.blocked += 1,
                Readiness::InProgress => summary.in_progress += 1,
                Readiness::Completed => summary.completed += 1,
                Readiness::Cancelled => {}
            }
        }
        summary
    }
}
