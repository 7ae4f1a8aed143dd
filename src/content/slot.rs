//! Display slot (outlet).
//!
//! # Responsibilities
//! - Hold the content of the active route
//! - Clear before each resolution, replace on mount
//!
//! # Design Decisions
//! - Holds at most one content value; mounting replaces, never appends
//! - Shared behind `Arc` so hosts can render while the router navigates
//! - Lock is never held across an await point

use std::sync::Mutex;

use crate::content::node::Content;

/// Single-child mount point for resolved content.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    content: Mutex<Option<Content>>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove whatever is mounted.
    pub fn clear(&self) {
        self.lock().take();
    }

    /// Mount `content`, replacing anything already present.
    pub fn mount(&self, content: Content) {
        *self.lock() = Some(content);
    }

    /// Snapshot of the mounted content.
    pub fn current(&self) -> Option<Content> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    /// Render the mounted content as markup; empty string when nothing is mounted.
    pub fn render(&self) -> String {
        self.lock()
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Content>> {
        // A panic while holding the lock cannot leave Option<Content> half-written.
        self.content.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
