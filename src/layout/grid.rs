// src/layout/grid.rs

use std::collections::HashMap;

use crate::layout::GridParams;
use crate::model::{Position, Task, TaskId};

/// Place tasks on the fallback grid.
///
/// Tasks are ordered by creation time (oldest first, ties keep input
/// order) and laid out row by row, `row_capacity` per row. A persisted `x`
/// or `y` replaces the computed value for that axis only.
///
/// The result is in placement order.
pub fn grid_layout(tasks: &[Task], params: &GridParams) -> Vec<(TaskId, Position)> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| t.created_at);

    let row_capacity = params.row_capacity.max(1);

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            let column = (index % row_capacity) as f64;
            let row = (index / row_capacity) as f64;

            let x = task
                .position
                .x
                .unwrap_or(column * (params.node_width + params.h_gap));
            let y = task
                .position
                .y
                .unwrap_or(row * (params.node_height + params.v_gap));

            (task.id.clone(), Position::new(x, y))
        })
        .collect()
}

/// [`grid_layout`] keyed by task id.
pub fn grid_positions(tasks: &[Task], params: &GridParams) -> HashMap<TaskId, Position> {
    grid_layout(tasks, params).into_iter().collect()
}
