//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Module loader → History → Controller → Mount
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop listening for location changes → Unmount
//!
//! Signals (signals.rs):
//!     SIGINT (ctrl-c) → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then collaborators, mount last
//! - Mount is the first navigation; a failed bootstrap is a failed startup

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use startup::{start, RouterRuntime};
