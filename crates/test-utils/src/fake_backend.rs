use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use taskdag::backend::{DependencyBackend, MutationFuture};
use taskdag::engine::MutationIntent;
use taskdag::model::Dependency;

/// A fake dependency backend that:
/// - records every intent it receives
/// - fails each one with `fail_with` when set, otherwise succeeds
///   without publishing anything.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    intents: Arc<Mutex<Vec<MutationIntent>>>,
    fail_with: Option<String>,
    connected: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            intents: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            connected: true,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    pub fn intents(&self) -> Vec<MutationIntent> {
        self.intents.lock().unwrap().clone()
    }

    fn record(&self, intent: MutationIntent) -> MutationFuture {
        self.intents.lock().unwrap().push(intent);
        let fail_with = self.fail_with.clone();
        Box::pin(async move {
            match fail_with {
                Some(reason) => Err(anyhow!(reason).into()),
                None => Ok(()),
            }
        })
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyBackend for FakeBackend {
    fn create(&mut self, dependency: Dependency) -> MutationFuture {
        self.record(MutationIntent::CreateDependency(dependency))
    }

    fn delete(&mut self, dependency: Dependency) -> MutationFuture {
        self.record(MutationIntent::DeleteDependency(dependency))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
