//! Active-router registry.
//!
//! # Responsibilities
//! - Hold the single active router of a navigable context
//! - Reject a second activation
//! - Expose process-wide `navigate_to`, `is_current_location`, and `active`
//!
//! # Lifecycle
//! ```text
//! mount(controller) → activate (or AlreadyActive) → bootstrap cycle → MountHandle
//! drop(MountHandle) → registration cleared
//! ```
//!
//! # Design Decisions
//! - One owned registration slot rather than a list of routers
//! - [`RouterRegistry::global`] is the process-wide instance; tests and
//!   embedders may create their own registries
//! - A failed bootstrap unmounts before the error is returned

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::error::RouterError;
use crate::navigation::controller::{NavigationController, NavigationOutcome};

static GLOBAL: OnceLock<Arc<RouterRegistry>> = OnceLock::new();

/// Registration slot for the active router.
#[derive(Debug, Default)]
pub struct RouterRegistry {
    active: Mutex<Option<Arc<NavigationController>>>,
}

impl RouterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<RouterRegistry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(RouterRegistry::new())))
    }

    /// Register `controller` as the active router.
    pub fn activate(&self, controller: Arc<NavigationController>) -> Result<(), RouterError> {
        let mut active = self.lock();
        if active.is_some() {
            tracing::error!("Refusing to activate a second router");
            return Err(RouterError::AlreadyActive);
        }
        *active = Some(controller);
        Ok(())
    }

    /// Clear the registration if `controller` holds it.
    pub fn deactivate(&self, controller: &Arc<NavigationController>) -> bool {
        let mut active = self.lock();
        match active.as_ref() {
            Some(current) if Arc::ptr_eq(current, controller) => {
                active.take();
                true
            }
            _ => false,
        }
    }

    pub fn active_router(&self) -> Option<Arc<NavigationController>> {
        self.lock().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().is_some()
    }

    /// Activate `controller` and run its first navigation cycle.
    pub async fn mount(
        self: &Arc<Self>,
        controller: Arc<NavigationController>,
    ) -> Result<MountHandle, RouterError> {
        self.activate(Arc::clone(&controller))?;
        let handle = MountHandle {
            registry: Arc::clone(self),
            controller,
        };

        tracing::info!(
            location = %handle.controller.current_location(),
            routes = handle.controller.routes().len(),
            "Router mounted"
        );
        // On error the handle drops here and clears the registration.
        handle.controller.refresh().await?;
        Ok(handle)
    }

    /// Navigate the active router to `url`.
    pub async fn navigate_to(&self, url: &str) -> Result<NavigationOutcome, RouterError> {
        let controller = self.active_router().ok_or(RouterError::NoActiveRouter)?;
        controller.navigate(url).await
    }

    /// Whether `url` equals the active router's current location.
    pub fn is_current_location(&self, url: &str) -> bool {
        self.active_router()
            .is_some_and(|controller| controller.is_current_location(url))
    }

    /// `class_name` when `url` is the current location, else `""`.
    pub fn active<'a>(&self, url: &str, class_name: &'a str) -> &'a str {
        if self.is_current_location(url) {
            class_name
        } else {
            ""
        }
    }

    /// [`active`](Self::active) with the active router's configured class.
    pub fn active_default(&self, url: &str) -> String {
        self.active_router()
            .map(|controller| controller.active_default(url).to_string())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<NavigationController>>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps a router mounted; dropping it unmounts.
#[derive(Debug)]
pub struct MountHandle {
    registry: Arc<RouterRegistry>,
    controller: Arc<NavigationController>,
}

impl MountHandle {
    pub fn controller(&self) -> &Arc<NavigationController> {
        &self.controller
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if self.registry.deactivate(&self.controller) {
            tracing::info!("Router unmounted");
        }
    }
}
