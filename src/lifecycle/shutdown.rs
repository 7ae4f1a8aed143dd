//! Shutdown coordination for the router's background loops.
//!
//! The location listener, the route-file follower and the CLI input loop all
//! stop on the same signal. A `watch` channel keeps the signal latched, so a
//! listener created after the trigger still sees it.

use tokio::sync::watch;

/// Latching stop signal shared by the router's long-running tasks.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A listener for this signal.
    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Stop every listener. Later calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_if_modified(|stopped| !std::mem::replace(stopped, true));
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half handed to each background task.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Completes once shutdown was triggered, immediately if it already was.
    ///
    /// A dropped [`Shutdown`] counts as triggered.
    pub async fn triggered(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}
