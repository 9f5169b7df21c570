// src/view/pool.rs

use std::cmp::{Ordering, Reverse};

use crate::model::Task;

/// The sidebar list of tasks that are not on the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolView {
    /// Open tasks first, done tasks last; newest first within each group.
    pub tasks: Vec<Task>,
    /// Tasks whose status is anything but `done`.
    pub todo_count: usize,
    pub done_count: usize,
}

impl PoolView {
    pub fn from_isolated(isolated: &[Task]) -> Self {
        let mut tasks = isolated.to_vec();
        tasks.sort_by(pool_order);

        let done_count = tasks.iter().filter(|t| t.status.is_done()).count();

        Self {
            todo_count: tasks.len() - done_count,
            done_count,
            tasks,
        }
    }

    /// Nothing left in the pool: every task sits on the canvas.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn pool_order(a: &Task, b: &Task) -> Ordering {
    a.status
        .is_done()
        .cmp(&b.status.is_done())
        .then_with(|| Reverse(a.created_at).cmp(&Reverse(b.created_at)))
}
