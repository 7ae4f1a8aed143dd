//! Route-change notifications.

use serde::Serialize;
use tokio::sync::broadcast;

/// Emitted once per completed, non-redirected navigation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteChange {
    /// Location current when the cycle completed.
    pub url: String,
}

/// Fan-out of [`RouteChange`] events to any number of listeners.
#[derive(Debug, Clone)]
pub struct RouteEvents {
    tx: broadcast::Sender<RouteChange>,
}

impl RouteEvents {
    /// `capacity` must be non-zero; validation rejects zero before this point.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RouteChange> {
        self.tx.subscribe()
    }

    pub fn emit(&self, change: RouteChange) {
        // Sending with no listeners is not an error for a router.
        let _ = self.tx.send(change);
    }
}
