// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::backend::DependencyBackend;
use crate::errors::Result;
use crate::layout::FitViewOptions;
use crate::surface::ViewSurface;

use super::core::CoreRuntime;
use super::mutation::MutationIntent;
use super::{ViewCommand, ViewEvent};

/// Drives the view core in response to `ViewEvent`s, draws through a
/// `ViewSurface` and forwards intents to a `DependencyBackend`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// view semantics. This struct handles async IO: reading events from the
/// channel, running timers and awaiting backend mutations.
pub struct Runtime<B: DependencyBackend, S: ViewSurface> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<ViewEvent>,
    event_tx: mpsc::Sender<ViewEvent>,
    backend: B,
    surface: S,
}

impl<B: DependencyBackend, S: ViewSurface> fmt::Debug for Runtime<B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: DependencyBackend, S: ViewSurface> Runtime<B, S> {
    /// `event_tx` must feed `event_rx`; timers and failed mutations are
    /// posted back through it.
    pub fn new(
        core: CoreRuntime,
        event_rx: mpsc::Receiver<ViewEvent>,
        event_tx: mpsc::Sender<ViewEvent>,
        backend: B,
        surface: S,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx,
            backend,
            surface,
        }
    }

    /// Main event loop.
    ///
    /// - Seeds the core with the backend's connectivity.
    /// - Consumes `ViewEvent`s from `event_rx`.
    /// - Executes commands returned by the core (render, timers, mutations).
    ///
    /// Returns the surface so callers can inspect what was drawn.
    pub async fn run(mut self) -> Result<S> {
        info!("taskdag runtime started");

        let connected = self.backend.is_connected();
        let step = self.core.step(ViewEvent::ConnectivityChanged(connected));
        for command in step.commands {
            self.execute_command(command);
        }

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command);
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(self.surface)
    }

    /// Execute a single command from the core.
    fn execute_command(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::Render(frame) => self.surface.render(&frame),
            ViewCommand::ScheduleSettle { token, delay } => {
                self.post_after(delay, ViewEvent::SettleElapsed { token });
            }
            ViewCommand::FitView { delay, options } => self.fit_view(delay, options),
            ViewCommand::Mutate(intent) => self.dispatch_mutation(intent),
            ViewCommand::Notify(notification) => self.surface.notify(&notification),
            ViewCommand::OpenTaskForm(request) => self.surface.open_task_form(&request),
            ViewCommand::RequestExit => {
                // keep_running=false already stops the loop.
                info!("core issued RequestExit command");
            }
        }
    }

    fn fit_view(&mut self, delay: Duration, options: FitViewOptions) {
        if delay.is_zero() {
            self.surface.fit_view(options);
        } else {
            self.post_after(delay, ViewEvent::FitViewDue(options));
        }
    }

    fn post_after(&self, delay: Duration, event: ViewEvent) {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(event).await.is_err() {
                debug!("runtime gone before timer fired");
            }
        });
    }

    fn dispatch_mutation(&mut self, intent: MutationIntent) {
        let dependency = intent.dependency().clone();
        let fut = match &intent {
            MutationIntent::CreateDependency(_) => self.backend.create(dependency),
            MutationIntent::DeleteDependency(_) => self.backend.delete(dependency),
        };

        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                warn!(intent = %intent, error = %err, "dependency mutation failed");
                let event = ViewEvent::MutationFailed {
                    intent,
                    reason: err.to_string(),
                };
                if tx.send(event).await.is_err() {
                    debug!("runtime gone before mutation failure was reported");
                }
            }
        });
    }
}
