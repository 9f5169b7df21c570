// src/config/model.rs

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::engine::SessionOptions;
use crate::layout::{FitViewOptions, GridParams, LayoutOptions};
use crate::model::{BoardSnapshot, Dependency, PersistedPosition, RawReadiness, Readiness, Task};
use crate::types::{EmptyCanvasDrop, LayoutDirection, TaskStatus};

/// Board file as read from TOML, before validation.
///
/// ```toml
/// [view]
/// project_id = "proj-1"
/// empty_canvas_drop = "ignore"
///
/// [view.layout]
/// direction = "LR"
///
/// [task.T1]
/// title = "Design"
/// created_at = "2024-05-01T10:00:00Z"
/// after = ["T0"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBoardFile {
    #[serde(default)]
    pub view: ViewSection,

    /// All tasks from `[task.<id>]`, keyed by task id.
    #[serde(default)]
    pub task: BTreeMap<String, TaskEntry>,
}

/// Validated board file. Build it with `BoardFile::try_from(raw)` or
/// [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct BoardFile {
    pub view: ViewSection,
    pub task: BTreeMap<String, TaskEntry>,
}

impl BoardFile {
    /// Assemble a board file without running validation.
    pub(crate) fn new_unchecked(view: ViewSection, task: BTreeMap<String, TaskEntry>) -> Self {
        Self { view, task }
    }

    /// Snapshot as the task service would send it.
    ///
    /// Tasks come out in id order; dependencies follow each task's `after`
    /// list in file order.
    pub fn snapshot(&self) -> BoardSnapshot {
        let tasks = self
            .task
            .iter()
            .map(|(id, entry)| entry.to_task(id))
            .collect();

        let dependencies = self
            .task
            .iter()
            .flat_map(|(id, entry)| {
                entry
                    .after
                    .iter()
                    .map(move |dep| Dependency::new(id.clone(), dep.clone()))
            })
            .collect();

        BoardSnapshot::new(tasks, dependencies)
    }

    pub fn session_options(&self) -> SessionOptions {
        self.view.session_options()
    }
}

/// `[view]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSection {
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// Initial state of the auto-layout toggle.
    #[serde(default = "default_true")]
    pub auto_layout: bool,

    /// What dropping a pool entry on empty canvas does.
    #[serde(default)]
    pub empty_canvas_drop: EmptyCanvasDrop,

    #[serde(default)]
    pub grid: GridSection,

    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub timing: TimingSection,
}

fn default_project_id() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            auto_layout: true,
            empty_canvas_drop: EmptyCanvasDrop::default(),
            grid: GridSection::default(),
            layout: LayoutSection::default(),
            timing: TimingSection::default(),
        }
    }
}

impl ViewSection {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            project_id: self.project_id.clone(),
            auto_layout: self.auto_layout,
            empty_canvas_drop: self.empty_canvas_drop,
            grid: self.grid.params(),
            layout: LayoutOptions {
                direction: self.layout.direction,
                node_spacing: self.layout.node_spacing,
                rank_spacing: self.layout.rank_spacing,
                node_width: self.grid.node_width,
                node_height: self.grid.node_height,
            },
            initial_settle: Duration::from_millis(self.timing.initial_settle_ms),
            fit_delay: Duration::from_millis(self.timing.fit_delay_ms),
            fit: FitViewOptions {
                padding: self.timing.fit_padding,
                duration: Duration::from_millis(self.timing.fit_duration_ms),
            },
        }
    }
}

/// `[view.grid]` section. Node sizes are shared with the auto-layout.
#[derive(Debug, Clone, Deserialize)]
pub struct GridSection {
    #[serde(default = "default_row_capacity")]
    pub row_capacity: usize,
    #[serde(default = "default_node_width")]
    pub node_width: f64,
    #[serde(default = "default_node_height")]
    pub node_height: f64,
    #[serde(default = "default_h_gap")]
    pub h_gap: f64,
    #[serde(default = "default_v_gap")]
    pub v_gap: f64,
}

fn default_row_capacity() -> usize {
    GridParams::default().row_capacity
}

fn default_node_width() -> f64 {
    GridParams::default().node_width
}

fn default_node_height() -> f64 {
    GridParams::default().node_height
}

fn default_h_gap() -> f64 {
    GridParams::default().h_gap
}

fn default_v_gap() -> f64 {
    GridParams::default().v_gap
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            row_capacity: default_row_capacity(),
            node_width: default_node_width(),
            node_height: default_node_height(),
            h_gap: default_h_gap(),
            v_gap: default_v_gap(),
        }
    }
}

impl GridSection {
    pub fn params(&self) -> GridParams {
        GridParams {
            row_capacity: self.row_capacity,
            node_width: self.node_width,
            node_height: self.node_height,
            h_gap: self.h_gap,
            v_gap: self.v_gap,
        }
    }
}

/// `[view.layout]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSection {
    #[serde(default)]
    pub direction: LayoutDirection,
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,
    #[serde(default = "default_rank_spacing")]
    pub rank_spacing: f64,
}

fn default_node_spacing() -> f64 {
    LayoutOptions::default().node_spacing
}

fn default_rank_spacing() -> f64 {
    LayoutOptions::default().rank_spacing
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::default(),
            node_spacing: default_node_spacing(),
            rank_spacing: default_rank_spacing(),
        }
    }
}

/// `[view.timing]` section, all durations in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingSection {
    #[serde(default = "default_initial_settle_ms")]
    pub initial_settle_ms: u64,
    #[serde(default = "default_fit_delay_ms")]
    pub fit_delay_ms: u64,
    #[serde(default = "default_fit_duration_ms")]
    pub fit_duration_ms: u64,
    /// Fraction of the viewport kept free around the nodes.
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
}

fn default_initial_settle_ms() -> u64 {
    100
}

fn default_fit_delay_ms() -> u64 {
    50
}

fn default_fit_duration_ms() -> u64 {
    300
}

fn default_fit_padding() -> f64 {
    0.2
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            initial_settle_ms: default_initial_settle_ms(),
            fit_delay_ms: default_fit_delay_ms(),
            fit_duration_ms: default_fit_duration_ms(),
            fit_padding: default_fit_padding(),
        }
    }
}

/// `[task.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskEntry {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    /// RFC 3339 timestamp; drives grid order and pool/table sorting.
    pub created_at: DateTime<Utc>,

    /// Dependency list: this task waits for all tasks listed here.
    #[serde(default)]
    pub after: Vec<String>,

    /// Persisted canvas coordinates, each optional.
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,

    #[serde(default)]
    pub has_in_progress_attempt: bool,

    #[serde(default)]
    pub last_attempt_failed: bool,

    #[serde(default)]
    pub readiness: Option<RawReadiness>,
}

impl TaskEntry {
    pub fn to_task(&self, id: &str) -> Task {
        let mut task = Task::new(id, self.title.clone(), self.created_at);
        task.description = self.description.clone();
        task.status = self.status;
        task.position = PersistedPosition {
            x: self.x,
            y: self.y,
        };
        task.has_in_progress_attempt = self.has_in_progress_attempt;
        task.last_attempt_failed = self.last_attempt_failed;
        task.readiness = self.readiness.clone().and_then(Readiness::from_raw);
        task
    }
}
