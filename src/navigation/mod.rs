//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate_to(url) (registry.rs)
//!     → active NavigationController (controller.rs)
//!     → url == current? stop : push onto LocationStack (history.rs)
//!     → routing::select → content::ContentResolver
//!     → DisplaySlot swap
//!     → RouteChange { url } (events.rs)
//!
//! Back/forward (history.rs signals a change)
//!     → controller.run loop → same cycle, without pushing
//! ```
//!
//! # Design Decisions
//! - Exactly one router is active per registry
//! - Redirects start a fresh cycle; the redirected cycle emits nothing
//! - Location strings are compared verbatim (path plus query)

pub mod controller;
pub mod events;
pub mod history;
pub mod location;
pub mod registry;

pub use controller::{NavigationController, NavigationOutcome, NavigationState};
pub use events::{RouteChange, RouteEvents};
pub use history::{LocationStack, MemoryHistory};
pub use location::{active, Location};
pub use registry::{MountHandle, RouterRegistry};
