use std::sync::{Arc, Mutex};

use taskdag::engine::CanvasFrame;
use taskdag::layout::FitViewOptions;
use taskdag::surface::{Notification, TaskFormRequest, ViewSurface};

/// Everything a [`RecordingSurface`] was asked to show.
#[derive(Debug, Default, Clone)]
pub struct SurfaceLog {
    pub frames: Vec<CanvasFrame>,
    pub fits: Vec<FitViewOptions>,
    pub notifications: Vec<Notification>,
    pub task_forms: Vec<TaskFormRequest>,
}

impl SurfaceLog {
    pub fn last_frame(&self) -> Option<&CanvasFrame> {
        self.frames.last()
    }
}

/// A fake surface that records every call. Clones share one log.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    log: Arc<Mutex<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the log so far.
    pub fn log(&self) -> SurfaceLog {
        self.log.lock().unwrap().clone()
    }
}

impl ViewSurface for RecordingSurface {
    fn render(&mut self, frame: &CanvasFrame) {
        self.log.lock().unwrap().frames.push(frame.clone());
    }

    fn fit_view(&mut self, options: FitViewOptions) {
        self.log.lock().unwrap().fits.push(options);
    }

    fn notify(&mut self, notification: &Notification) {
        self.log.lock().unwrap().notifications.push(notification.clone());
    }

    fn open_task_form(&mut self, request: &TaskFormRequest) {
        self.log.lock().unwrap().task_forms.push(request.clone());
    }
}
