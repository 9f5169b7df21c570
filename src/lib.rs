// src/lib.rs

pub mod backend;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod layout;
pub mod logging;
pub mod model;
pub mod surface;
pub mod types;
pub mod view;

use std::time::Duration;

use anyhow::{Result, anyhow};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::backend::InMemoryBackend;
use crate::cli::CliArgs;
use crate::config::{
    BoardFile, GestureScript, default_board_path, load_and_validate, load_script,
};
use crate::dag::{canvas_edges, partition};
use crate::engine::{CoreRuntime, Runtime, SessionOptions, ViewEvent};
use crate::layout::grid_layout;
use crate::surface::{ConsoleSurface, print_frame};
use crate::view::{PoolView, TableView};

/// Extra wait after the last scripted step so pending layouts and
/// mutations can land before shutdown.
const SCRIPT_GRACE: Duration = Duration::from_millis(50);

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - board loading
/// - the view core and its runtime shell
/// - the in-memory dependency backend and the console surface
/// - (optional) gesture script replay
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let board_path = args.board.clone().unwrap_or_else(default_board_path);
    let board = load_and_validate(&board_path)?;

    if args.dry_run {
        print_dry_run(&board);
        return Ok(());
    }
    if args.table {
        print_table(&board);
        return Ok(());
    }

    let script = args.script.as_ref().map(load_script).transpose()?;

    let mut options = board.session_options();
    if args.no_auto_layout {
        options.auto_layout = false;
    }

    let snapshot = board.snapshot();
    let (rt_tx, rt_rx) = mpsc::channel::<ViewEvent>(64);

    let backend = InMemoryBackend::new(&snapshot, rt_tx.clone());
    let store = backend.clone();
    let surface = ConsoleSurface::new();
    let last_frame = surface.last_frame();

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(ViewEvent::ShutdownRequested).await;
        });
    }

    let core = CoreRuntime::with_layered_layout(options.clone());
    let runtime = Runtime::new(core, rt_rx, rt_tx.clone(), backend, surface);
    let handle = tokio::spawn(runtime.run());

    info!(
        tasks = snapshot.tasks.len(),
        dependencies = snapshot.dependencies.len(),
        "board loaded"
    );
    rt_tx.send(ViewEvent::SnapshotArrived(snapshot)).await?;

    if let Some(script) = script {
        replay_script(script, &rt_tx, &options).await;
        let _ = rt_tx.send(ViewEvent::ShutdownRequested).await;
    }

    handle.await??;

    let frame = last_frame
        .lock()
        .map_err(|_| anyhow!("frame store lock poisoned"))?
        .clone();
    if let Some(frame) = frame {
        print_frame(&frame);
    }

    println!("dependencies:");
    for dep in store.dependencies()? {
        println!("  {dep}");
    }

    Ok(())
}

async fn replay_script(
    script: GestureScript,
    tx: &mpsc::Sender<ViewEvent>,
    options: &SessionOptions,
) {
    info!(steps = script.step.len(), "replaying gesture script");

    for step in script.step {
        tokio::time::sleep(step.wait()).await;
        debug!(action = ?step.action, "script step");
        if tx.send(step.action.into_event()).await.is_err() {
            info!("runtime stopped before the script finished");
            return;
        }
    }

    let grace = options.initial_settle + options.fit_delay + SCRIPT_GRACE;
    tokio::time::sleep(grace).await;
}

/// Partition, grid positions and pool, without starting the runtime.
fn print_dry_run(board: &BoardFile) {
    let snapshot = board.snapshot();
    let options = board.session_options();
    let split = partition(&snapshot.tasks, &snapshot.dependencies);

    println!("taskdag dry-run");
    println!("  view.project_id = {}", options.project_id);
    println!("  view.auto_layout = {}", options.auto_layout);
    println!("  view.empty_canvas_drop = {:?}", options.empty_canvas_drop);
    println!();

    println!("canvas ({}):", split.connected.len());
    for (id, pos) in grid_layout(&split.connected, &options.grid) {
        println!("  - {id} at ({:.0}, {:.0})", pos.x, pos.y);
    }
    for edge in canvas_edges(&snapshot.dependencies) {
        println!("  {} -> {}", edge.source, edge.target);
    }
    println!();

    let pool = PoolView::from_isolated(&split.isolated);
    println!("pool ({} open, {} done):", pool.todo_count, pool.done_count);
    for task in &pool.tasks {
        println!("  - {} \"{}\" [{}]", task.id, task.title, task.status);
    }

    debug!("dry-run complete (no runtime)");
}

fn print_table(board: &BoardFile) {
    let snapshot = board.snapshot();
    match TableView::from_tasks(&snapshot.tasks) {
        TableView::Empty => println!("no tasks"),
        TableView::Rows(rows) => {
            for task in rows {
                println!(
                    "{:<12} {:<11} {}  {}",
                    task.id,
                    task.status.as_str(),
                    task.created_at.format("%Y-%m-%d %H:%M"),
                    task.title
                );
            }
        }
    }
}
