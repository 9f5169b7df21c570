// src/backend/memory.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::backend::{DependencyBackend, MutationFuture};
use crate::dag::DagGraph;
use crate::engine::ViewEvent;
use crate::errors::{Result, TaskDagError};
use crate::model::{BoardSnapshot, Dependency, TaskId};

#[derive(Debug, Default)]
struct Store {
    task_ids: HashSet<TaskId>,
    dependencies: Vec<Dependency>,
}

impl Store {
    fn validate_create(&self, dep: &Dependency) -> Result<()> {
        for id in [&dep.task_id, &dep.depends_on_task_id] {
            if !self.task_ids.contains(id) {
                return Err(TaskDagError::TaskNotFound(id.clone()));
            }
        }
        if dep.is_self_loop() {
            return Err(TaskDagError::SelfDependency(dep.task_id.clone()));
        }
        if self.dependencies.contains(dep) {
            return Err(TaskDagError::DuplicateDependency {
                task_id: dep.task_id.clone(),
                depends_on_task_id: dep.depends_on_task_id.clone(),
            });
        }
        if DagGraph::from_dependencies(&self.dependencies).would_create_cycle(dep) {
            return Err(TaskDagError::DagCycle(format!(
                "'{}' depending on '{}' would close a cycle",
                dep.task_id, dep.depends_on_task_id
            )));
        }
        Ok(())
    }
}

/// Dependency service kept in memory.
///
/// Cloning yields another handle onto the same store. Every successful
/// mutation publishes the full new list as
/// [`ViewEvent::DependenciesUpdated`], the way the live channel of the
/// real service would.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
    updates: mpsc::Sender<ViewEvent>,
    latency: Duration,
}

impl InMemoryBackend {
    pub fn new(snapshot: &BoardSnapshot, updates: mpsc::Sender<ViewEvent>) -> Self {
        let store = Store {
            task_ids: snapshot.tasks.iter().map(|t| t.id.clone()).collect(),
            dependencies: snapshot.dependencies.clone(),
        };
        Self {
            store: Arc::new(Mutex::new(store)),
            updates,
            latency: Duration::ZERO,
        }
    }

    /// Delay every mutation by `latency` before it is applied.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Current dependency list.
    pub fn dependencies(&self) -> Result<Vec<Dependency>> {
        let store = self
            .store
            .lock()
            .map_err(|_| anyhow!("dependency store lock poisoned"))?;
        Ok(store.dependencies.clone())
    }

    fn mutate<F>(&self, op: &'static str, dependency: Dependency, apply: F) -> MutationFuture
    where
        F: FnOnce(&mut Store, &Dependency) -> Result<bool> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let updates = self.updates.clone();
        let latency = self.latency;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let published = {
                let mut guard = store
                    .lock()
                    .map_err(|_| anyhow!("dependency store lock poisoned"))?;
                let changed = apply(&mut guard, &dependency)?;
                changed.then(|| guard.dependencies.clone())
            };

            match published {
                Some(list) => {
                    info!(op, dependency = %dependency, total = list.len(), "dependency store updated");
                    updates
                        .send(ViewEvent::DependenciesUpdated(list))
                        .await
                        .map_err(|e| anyhow!("live update channel closed: {e}"))?;
                }
                None => debug!(op, dependency = %dependency, "dependency store unchanged"),
            }
            Ok(())
        })
    }
}

impl DependencyBackend for InMemoryBackend {
    fn create(&mut self, dependency: Dependency) -> MutationFuture {
        self.mutate("create", dependency, |store, dep| {
            store.validate_create(dep)?;
            store.dependencies.push(dep.clone());
            Ok(true)
        })
    }

    fn delete(&mut self, dependency: Dependency) -> MutationFuture {
        self.mutate("delete", dependency, |store, dep| {
            let before = store.dependencies.len();
            store.dependencies.retain(|d| d != dep);
            Ok(store.dependencies.len() != before)
        })
    }

    fn is_connected(&self) -> bool {
        !self.updates.is_closed()
    }
}
