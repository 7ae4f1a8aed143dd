//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::{broadcast, Semaphore};

use element_router::config::RouterSettings;
use element_router::content::{LoadError, ModuleLoader};
use element_router::navigation::{
    MemoryHistory, NavigationController, NavigationState, RouteChange,
};
use element_router::RouteDescriptor;

/// Module loader whose imports block until the test opens their gate.
#[allow(dead_code)]
#[derive(Default)]
pub struct GatedLoader {
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl GatedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make imports of `reference` wait for [`GatedLoader::open`].
    pub fn close(&self, reference: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(reference.to_string(), Arc::new(Semaphore::new(0)));
    }

    /// Let pending and future imports of `reference` finish.
    pub fn open(&self, reference: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(reference) {
            gate.add_permits(1);
        }
    }

    /// Number of import calls started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModuleLoader for GatedLoader {
    fn load<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, Result<(), LoadError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gates.lock().unwrap().get(reference).cloned();
            if let Some(gate) = gate {
                // Dropping the permit hands it back for the next import.
                let _permit = gate
                    .acquire()
                    .await
                    .map_err(|e| LoadError::Failed {
                        reference: reference.to_string(),
                        reason: e.to_string(),
                    })?;
            }
            Ok(())
        })
    }
}

/// Controller over a fresh in-memory history starting at `/`.
#[allow(dead_code)]
pub fn controller(
    settings: RouterSettings,
    routes: Vec<RouteDescriptor>,
    loader: Arc<dyn ModuleLoader>,
) -> (Arc<NavigationController>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let controller =
        NavigationController::new(settings, routes, history.clone(), loader).unwrap();
    (Arc::new(controller), history)
}

/// Yield until the controller reaches `state`.
#[allow(dead_code)]
pub async fn wait_for_state(controller: &NavigationController, state: NavigationState) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while controller.state() != state {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("controller never reached the expected state");
}

/// Receive the next route change, failing the test after a timeout.
#[allow(dead_code)]
pub async fn next_change(events: &mut broadcast::Receiver<RouteChange>) -> RouteChange {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("no route change within timeout")
        .expect("event channel closed")
}

/// Every route change already buffered.
#[allow(dead_code)]
pub fn drain(events: &mut broadcast::Receiver<RouteChange>) -> Vec<RouteChange> {
    let mut changes = Vec::new();
    while let Ok(change) = events.try_recv() {
        changes.push(change);
    }
    changes
}
