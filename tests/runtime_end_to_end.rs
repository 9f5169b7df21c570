// tests/runtime_end_to_end.rs

mod common;
use crate::common::builders::BoardBuilder;
use crate::common::{FakeBackend, RecordingSurface, init_tracing, with_timeout};

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;
use taskdag::backend::{DependencyBackend, InMemoryBackend};
use taskdag::engine::{
    CoreRuntime, Gesture, MutationIntent, Runtime, SessionOptions, ViewEvent,
};
use taskdag::model::{BoardSnapshot, Dependency};
use taskdag::surface::Notification;
use taskdag_test_utils::SurfaceLog;

type TestResult = Result<(), Box<dyn Error>>;

fn fast_options() -> SessionOptions {
    SessionOptions {
        initial_settle: Duration::from_millis(10),
        fit_delay: Duration::from_millis(5),
        ..SessionOptions::default()
    }
}

/// T0 <- T1 on the canvas, T2 in the pool.
fn board() -> BoardSnapshot {
    BoardBuilder::new().tasks(3).dep("T1", "T0").build()
}

/// Poll the surface log until `check` holds.
async fn wait_for(surface: &RecordingSurface, check: impl Fn(&SurfaceLog) -> bool) {
    loop {
        if check(&surface.log()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

fn start<B: DependencyBackend + 'static>(
    backend: B,
    rx: mpsc::Receiver<ViewEvent>,
    tx: mpsc::Sender<ViewEvent>,
    surface: RecordingSurface,
) -> tokio::task::JoinHandle<taskdag::errors::Result<RecordingSurface>> {
    let core = CoreRuntime::with_layered_layout(fast_options());
    let runtime = Runtime::new(core, rx, tx, backend, surface);
    tokio::spawn(runtime.run())
}

#[tokio::test]
async fn initial_layout_settles_and_fits_the_viewport() -> TestResult {
    with_timeout(async {
        init_tracing();

        let (tx, rx) = mpsc::channel(64);
        let surface = RecordingSurface::new();
        let handle = start(FakeBackend::new(), rx, tx.clone(), surface.clone());

        tx.send(ViewEvent::SnapshotArrived(board())).await?;
        wait_for(&surface, |log| !log.fits.is_empty()).await;

        tx.send(ViewEvent::ShutdownRequested).await?;
        handle.await??;

        let log = surface.log();
        assert_eq!(log.fits.len(), 1);
        let frame = log.last_frame().expect("at least one frame");
        assert!(frame.connected);
        assert_eq!(frame.nodes.len(), 2);
        assert_eq!(frame.pool.tasks.len(), 1);

        Ok(())
    })
    .await
}

#[tokio::test]
async fn connect_round_trips_through_the_in_memory_backend() -> TestResult {
    with_timeout(async {
        init_tracing();

        let snapshot = board();
        let (tx, rx) = mpsc::channel(64);
        let backend = InMemoryBackend::new(&snapshot, tx.clone());
        let store = backend.clone();
        let surface = RecordingSurface::new();
        let handle = start(backend, rx, tx.clone(), surface.clone());

        tx.send(ViewEvent::SnapshotArrived(snapshot)).await?;
        wait_for(&surface, |log| !log.fits.is_empty()).await;

        tx.send(ViewEvent::Gesture(Gesture::Connect {
            source: Some("T1".into()),
            target: Some("T2".into()),
        }))
        .await?;

        // The live update moves T2 out of the pool and re-runs the layout.
        wait_for(&surface, |log| {
            log.last_frame().is_some_and(|f| f.pool.is_empty())
        })
        .await;
        wait_for(&surface, |log| log.fits.len() >= 2).await;

        tx.send(ViewEvent::ShutdownRequested).await?;
        handle.await??;

        assert!(store.dependencies()?.contains(&Dependency::new("T2", "T1")));
        let log = surface.log();
        let frame = log.last_frame().expect("frame");
        assert_eq!(frame.nodes.len(), 3);
        assert_eq!(frame.position_of("T2").map(|p| p.x), Some(680.0));
        assert!(log.notifications.is_empty());

        Ok(())
    })
    .await
}

#[tokio::test]
async fn rejected_mutation_is_reported_to_the_user() -> TestResult {
    with_timeout(async {
        init_tracing();

        let snapshot = board();
        let (tx, rx) = mpsc::channel(64);
        let backend = InMemoryBackend::new(&snapshot, tx.clone());
        let surface = RecordingSurface::new();
        let handle = start(backend, rx, tx.clone(), surface.clone());

        tx.send(ViewEvent::SnapshotArrived(snapshot)).await?;
        // T0 depending on T1 would close a cycle.
        tx.send(ViewEvent::Gesture(Gesture::Connect {
            source: Some("T1".into()),
            target: Some("T0".into()),
        }))
        .await?;
        wait_for(&surface, |log| !log.notifications.is_empty()).await;

        tx.send(ViewEvent::ShutdownRequested).await?;
        handle.await??;

        let log = surface.log();
        match &log.notifications[0] {
            Notification::MutationFailed { intent, reason } => {
                assert_eq!(
                    intent,
                    &MutationIntent::CreateDependency(Dependency::new("T0", "T1"))
                );
                assert!(reason.contains("Cycle"), "{reason}");
            }
        }

        Ok(())
    })
    .await
}

#[tokio::test]
async fn failing_backend_and_disconnected_channel_show_up_on_the_surface() -> TestResult {
    with_timeout(async {
        init_tracing();

        let backend = FakeBackend::failing("service unavailable").disconnected();
        let recorded = backend.clone();
        let (tx, rx) = mpsc::channel(64);
        let surface = RecordingSurface::new();
        let handle = start(backend, rx, tx.clone(), surface.clone());

        tx.send(ViewEvent::SnapshotArrived(board())).await?;
        tx.send(ViewEvent::Gesture(Gesture::RemoveEdges(vec![
            Dependency::new("T1", "T0").edge_id(),
        ])))
        .await?;
        tx.send(ViewEvent::AddTaskRequested).await?;
        wait_for(&surface, |log| !log.notifications.is_empty()).await;

        tx.send(ViewEvent::ShutdownRequested).await?;
        let surface = handle.await??;

        assert_eq!(
            recorded.intents(),
            vec![MutationIntent::DeleteDependency(Dependency::new("T1", "T0"))]
        );

        let log = surface.log();
        assert!(!log.frames[0].connected);
        assert_eq!(log.task_forms.len(), 1);
        assert!(matches!(
            &log.notifications[0],
            Notification::MutationFailed { reason, .. } if reason == "service unavailable"
        ));

        Ok(())
    })
    .await
}
