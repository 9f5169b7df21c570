#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use taskdag::model::{BoardSnapshot, Dependency, Readiness, Task};
use taskdag::types::TaskStatus;

/// `2024-05-01T10:00:00Z` plus `minutes`.
pub fn minutes(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .expect("valid base timestamp")
        + Duration::minutes(minutes)
}

/// Plain todo task created `created` minutes after the base time.
pub fn task(id: &str, created: i64) -> Task {
    TaskBuilder::new(id).created(created).build()
}

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: Task::new(id, format!("Task {id}"), minutes(0)),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task.description = Some(description.to_string());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn created(mut self, created: i64) -> Self {
        self.task.created_at = minutes(created);
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.task.position.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.task.position.y = Some(y);
        self
    }

    pub fn readiness(mut self, readiness: Readiness) -> Self {
        self.task.readiness = Some(readiness);
        self
    }

    pub fn running(mut self) -> Self {
        self.task.has_in_progress_attempt = true;
        self
    }

    pub fn failed(mut self) -> Self {
        self.task.last_attempt_failed = true;
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for `BoardSnapshot`.
#[derive(Default)]
pub struct BoardBuilder {
    tasks: Vec<Task>,
    dependencies: Vec<Dependency>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// `n` todo tasks `T0..Tn`, created one minute apart.
    pub fn tasks(mut self, n: usize) -> Self {
        for i in 0..n {
            self.tasks.push(task(&format!("T{i}"), i as i64));
        }
        self
    }

    /// `task_id` depends on `depends_on`.
    pub fn dep(mut self, task_id: &str, depends_on: &str) -> Self {
        self.dependencies.push(Dependency::new(task_id, depends_on));
        self
    }

    pub fn build(self) -> BoardSnapshot {
        BoardSnapshot::new(self.tasks, self.dependencies)
    }
}
