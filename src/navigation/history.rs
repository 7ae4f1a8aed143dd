//! Location stack.
//!
//! # Responsibilities
//! - Abstract the host history API behind [`LocationStack`]
//! - Provide [`MemoryHistory`], an in-process stack with back/forward
//!
//! # Design Decisions
//! - `push` never signals: it is the router's own write
//! - `go_back`/`go_forward` signal subscribers, the way a host reports
//!   location changes it caused itself
//! - Only the active router writes; no transactional guarantees beyond that

use std::sync::Mutex;

use tokio::sync::broadcast;

/// Capacity of the location-change channel.
const CHANGE_CAPACITY: usize = 32;

/// Host location stack consumed by the navigation controller.
pub trait LocationStack: Send + Sync {
    /// The current location string (path plus query).
    fn current(&self) -> String;

    /// Record `url` as a new entry and make it current.
    fn push(&self, url: &str);

    /// Stream of locations reached by changes outside the router.
    fn subscribe(&self) -> broadcast::Receiver<String>;
}

#[derive(Debug)]
struct MemoryHistoryState {
    current: String,
    history: Vec<String>,
    future: Vec<String>,
}

/// A [`LocationStack`] kept entirely in memory.
#[derive(Debug)]
pub struct MemoryHistory {
    state: Mutex<MemoryHistoryState>,
    changes: broadcast::Sender<String>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a history whose only entry is `path`.
    pub fn with_initial_path(path: impl Into<String>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            state: Mutex::new(MemoryHistoryState {
                current: path.into(),
                history: Vec::new(),
                future: Vec::new(),
            }),
            changes,
        }
    }

    /// Step back one entry and signal the change. Returns false at the oldest entry.
    pub fn go_back(&self) -> bool {
        let moved = {
            let mut state = self.lock();
            state.history.pop().map(|last| {
                let old = std::mem::replace(&mut state.current, last.clone());
                state.future.push(old);
                last
            })
        };
        self.signal(moved)
    }

    /// Step forward one entry and signal the change. Returns false at the newest entry.
    pub fn go_forward(&self) -> bool {
        let moved = {
            let mut state = self.lock();
            state.future.pop().map(|next| {
                let old = std::mem::replace(&mut state.current, next.clone());
                state.history.push(old);
                next
            })
        };
        self.signal(moved)
    }

    /// All entries from oldest to current.
    pub fn entries(&self) -> Vec<String> {
        let state = self.lock();
        let mut entries = state.history.clone();
        entries.push(state.current.clone());
        entries
    }

    fn signal(&self, moved: Option<String>) -> bool {
        match moved {
            Some(location) => {
                tracing::trace!(location = %location, "History moved");
                // No subscribers is fine: nothing is mounted to react.
                let _ = self.changes.send(location);
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryHistoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LocationStack for MemoryHistory {
    fn current(&self) -> String {
        self.lock().current.clone()
    }

    fn push(&self, url: &str) {
        let mut state = self.lock();
        // don't push the same location twice
        if state.current == url {
            return;
        }
        let old = std::mem::replace(&mut state.current, url.to_string());
        state.history.push(old);
        state.future.clear();
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}
