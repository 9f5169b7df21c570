// src/model/dependency.rs

use std::fmt;

use crate::errors::{Result, TaskDagError};
use crate::model::task::TaskId;

const EDGE_PREFIX: &str = "dep:";
const SEPARATOR: char = '>';
const ESCAPE: char = '\\';

/// `task_id` is blocked until `depends_on_task_id` completes.
///
/// On the canvas the edge points from the prerequisite
/// (`depends_on_task_id`) to the dependent (`task_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dependency {
    pub task_id: TaskId,
    pub depends_on_task_id: TaskId,
}

impl Dependency {
    pub fn new(task_id: impl Into<TaskId>, depends_on_task_id: impl Into<TaskId>) -> Self {
        Self {
            task_id: task_id.into(),
            depends_on_task_id: depends_on_task_id.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.task_id == self.depends_on_task_id
    }

    pub fn touches(&self, id: &str) -> bool {
        self.task_id == id || self.depends_on_task_id == id
    }

    pub fn edge_id(&self) -> EdgeId {
        EdgeId::encode(self)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.task_id, self.depends_on_task_id)
    }
}

/// Identifier of a rendered edge.
///
/// The id is a reversible encoding of the dependency pair:
/// `dep:<task_id>><depends_on_task_id>`, with `\` and `>` inside ids
/// escaped by a backslash. Any id string can round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn encode(dep: &Dependency) -> Self {
        let mut out = String::with_capacity(
            EDGE_PREFIX.len() + dep.task_id.len() + dep.depends_on_task_id.len() + 1,
        );
        out.push_str(EDGE_PREFIX);
        push_escaped(&mut out, &dep.task_id);
        out.push(SEPARATOR);
        push_escaped(&mut out, &dep.depends_on_task_id);
        Self(out)
    }

    /// Recover the dependency pair this id was built from.
    pub fn decode(&self) -> Result<Dependency> {
        let body = self
            .0
            .strip_prefix(EDGE_PREFIX)
            .ok_or_else(|| TaskDagError::InvalidEdgeId(self.0.clone()))?;

        let mut parts: Vec<String> = Vec::with_capacity(2);
        let mut current = String::new();
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(next) => current.push(next),
                    None => return Err(TaskDagError::InvalidEdgeId(self.0.clone())),
                },
                SEPARATOR => parts.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        parts.push(current);

        match <[String; 2]>::try_from(parts) {
            Ok([task_id, depends_on_task_id]) if !task_id.is_empty() && !depends_on_task_id.is_empty() => {
                Ok(Dependency {
                    task_id,
                    depends_on_task_id,
                })
            }
            _ => Err(TaskDagError::InvalidEdgeId(self.0.clone())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn push_escaped(out: &mut String, id: &str) {
    for c in id.chars() {
        if c == ESCAPE || c == SEPARATOR {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}
