// src/surface/mod.rs

//! Where frames end up.
//!
//! The runtime draws through a [`ViewSurface`] instead of talking to any
//! particular UI. [`ConsoleSurface`] logs frames and keeps the latest one;
//! tests provide a recording implementation.

use crate::engine::{CanvasFrame, MutationIntent};
use crate::layout::FitViewOptions;

pub mod console;

pub use console::{ConsoleSurface, print_frame};

/// Message shown to the user outside the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    MutationFailed {
        intent: MutationIntent,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormMode {
    Create,
}

/// Request to open the external task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFormRequest {
    pub mode: TaskFormMode,
    pub project_id: String,
}

/// Trait abstracting the visual side of the view.
pub trait ViewSurface: Send {
    fn render(&mut self, frame: &CanvasFrame);

    /// Fit the viewport around every node, animating over
    /// `options.duration`.
    fn fit_view(&mut self, options: FitViewOptions);

    fn notify(&mut self, notification: &Notification);

    fn open_task_form(&mut self, request: &TaskFormRequest);
}
