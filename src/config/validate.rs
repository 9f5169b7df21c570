// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{BoardFile, RawBoardFile};
use crate::errors::{Result, TaskDagError};

impl TryFrom<RawBoardFile> for BoardFile {
    type Error = crate::errors::TaskDagError;

    fn try_from(raw: RawBoardFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_board(&raw)?;
        Ok(BoardFile::new_unchecked(raw.view, raw.task))
    }
}

fn validate_raw_board(board: &RawBoardFile) -> Result<()> {
    validate_view(board)?;
    validate_task_dependencies(board)?;
    validate_dag(board)?;
    Ok(())
}

fn validate_view(board: &RawBoardFile) -> Result<()> {
    let view = &board.view;

    if view.grid.row_capacity == 0 {
        return Err(TaskDagError::ConfigError(
            "[view.grid].row_capacity must be >= 1 (got 0)".to_string(),
        ));
    }

    let sizes = [
        ("[view.grid].node_width", view.grid.node_width),
        ("[view.grid].node_height", view.grid.node_height),
        ("[view.grid].h_gap", view.grid.h_gap),
        ("[view.grid].v_gap", view.grid.v_gap),
        ("[view.layout].node_spacing", view.layout.node_spacing),
        ("[view.layout].rank_spacing", view.layout.rank_spacing),
    ];
    for (name, value) in sizes {
        if !value.is_finite() || value < 0.0 {
            return Err(TaskDagError::ConfigError(format!(
                "{name} must be a finite, non-negative number (got {value})"
            )));
        }
    }

    let padding = view.timing.fit_padding;
    if !(0.0..1.0).contains(&padding) {
        return Err(TaskDagError::ConfigError(format!(
            "[view.timing].fit_padding must be in [0, 1) (got {padding})"
        )));
    }

    Ok(())
}

fn validate_task_dependencies(board: &RawBoardFile) -> Result<()> {
    for (id, task) in board.task.iter() {
        let mut seen = HashSet::with_capacity(task.after.len());
        for dep in task.after.iter() {
            if !seen.insert(dep.as_str()) {
                return Err(TaskDagError::DuplicateDependency {
                    task_id: id.clone(),
                    depends_on_task_id: dep.clone(),
                });
            }
            if !board.task.contains_key(dep) {
                return Err(TaskDagError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    id, dep
                )));
            }
            if dep == id {
                return Err(TaskDagError::SelfDependency(id.clone()));
            }
        }
    }
    Ok(())
}

fn validate_dag(board: &RawBoardFile) -> Result<()> {
    // Edge direction: prerequisite -> dependent, i.e.
    //   [task.B]
    //   after = ["A"]
    // adds A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for id in board.task.keys() {
        graph.add_node(id.as_str());
    }

    for (id, task) in board.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(TaskDagError::DagCycle(format!(
            "cycle detected in board involving task '{}'",
            cycle.node_id()
        ))),
    }
}
