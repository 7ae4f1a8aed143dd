//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms via `metrics`)
//!
//! Consumers:
//!     → Log output (stderr, compact or pretty)
//!     → Whatever `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging with url / generation / pattern fields
//! - Metrics are cheap no-ops until a recorder is installed
//! - The library never installs a global recorder itself

pub mod logging;
pub mod metrics;
