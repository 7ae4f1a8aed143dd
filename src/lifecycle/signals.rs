//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - ctrl-c triggers shutdown once; a failure to listen is logged and also
//!   triggers shutdown rather than leaving the process unstoppable

use crate::lifecycle::shutdown::Shutdown;

/// Wait for ctrl-c, then trigger `shutdown`.
pub async fn wait_for_shutdown_signal(shutdown: &Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupt received, shutting down"),
        Err(e) => tracing::error!(error = %e, "Unable to listen for interrupt, shutting down"),
    }
    shutdown.trigger();
}
