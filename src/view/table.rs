// src/view/table.rs

use std::cmp::Reverse;

use crate::model::Task;
use crate::types::TaskStatus;

/// Flat, newest-first listing of every task on the board.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// The board has no tasks at all.
    Empty,
    Rows(Vec<Task>),
}

impl TableView {
    /// Tasks are gathered status by status (`todo` through `cancelled`)
    /// and then stably sorted by creation time, newest first.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut rows: Vec<Task> = TaskStatus::ALL
            .iter()
            .flat_map(|status| tasks.iter().filter(move |t| t.status == *status))
            .cloned()
            .collect();

        if rows.is_empty() {
            return TableView::Empty;
        }

        rows.sort_by_key(|t| Reverse(t.created_at));
        TableView::Rows(rows)
    }

    pub fn rows(&self) -> &[Task] {
        match self {
            TableView::Empty => &[],
            TableView::Rows(rows) => rows,
        }
    }
}
