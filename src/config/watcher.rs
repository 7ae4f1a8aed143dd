//! Route file hot reload.
//!
//! # Data Flow
//! ```text
//! notify event (modify/create)
//!     → reload: read + parse + validate the route file
//!     → unchanged route list? drop
//!     → mpsc → NavigationController::follow_reloads → route table swap
//! ```
//!
//! A rejected reload keeps the current table and logs every problem with
//! the index of the route that caused it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::RouterConfig;
use crate::navigation::controller::NavigationController;
use crate::routing::descriptor::RouteDescriptor;

/// What a single reload attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A new route list was sent to the router.
    Applied { routes: usize },
    /// The file parsed to the route list already in use.
    Unchanged,
    /// The file could not be read, parsed, or validated.
    Rejected,
}

/// Reloads one route file, remembering the last routes it handed out.
struct Reloader {
    path: PathBuf,
    current: Vec<RouteDescriptor>,
    tx: mpsc::UnboundedSender<RouterConfig>,
}

impl Reloader {
    fn reload(&mut self) -> ReloadOutcome {
        match load_config(&self.path) {
            Ok(config) if config.routes == self.current => {
                tracing::debug!(path = ?self.path, "Route file saved without route changes");
                ReloadOutcome::Unchanged
            }
            Ok(config) => {
                let routes = config.routes.len();
                self.current = config.routes.clone();
                tracing::info!(path = ?self.path, routes, "Route file reloaded");
                let _ = self.tx.send(config);
                ReloadOutcome::Applied { routes }
            }
            Err(ConfigError::Validation(errors)) => {
                for error in &errors {
                    match error.route_index() {
                        Some(route) => tracing::error!(route, error = %error, "Reloaded route rejected"),
                        None => tracing::error!(error = %error, "Reloaded settings rejected"),
                    }
                }
                tracing::warn!(problems = errors.len(), "Keeping current routes");
                ReloadOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Route file reload failed. Keeping current routes.");
                ReloadOutcome::Rejected
            }
        }
    }

    fn on_event(&mut self, event: notify::Result<Event>) {
        match event {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                self.reload();
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Route file watch error"),
        }
    }
}

/// Watches a route file and feeds reloads into a running router.
pub struct RouteWatcher {
    reloader: Reloader,
    updates: mpsc::UnboundedReceiver<RouterConfig>,
}

impl RouteWatcher {
    /// `active` is the configuration the router was started with; saves that
    /// leave its routes untouched are not forwarded.
    pub fn new(path: &Path, active: &RouterConfig) -> Self {
        let (tx, updates) = mpsc::unbounded_channel();
        Self {
            reloader: Reloader {
                path: path.to_path_buf(),
                current: active.routes.clone(),
                tx,
            },
            updates,
        }
    }

    /// Start watching and apply every accepted reload to `controller`.
    ///
    /// Reloads stop when the returned [`RouteWatch`] is dropped.
    pub fn spawn(self, controller: Arc<NavigationController>) -> Result<RouteWatch, notify::Error> {
        let Self {
            mut reloader,
            updates,
        } = self;
        let path = reloader.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |event: notify::Result<Event>| reloader.on_event(event),
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        let follower = tokio::spawn(controller.follow_reloads(updates));
        tracing::info!(path = ?path, "Route watcher started");

        Ok(RouteWatch {
            _watcher: watcher,
            follower,
        })
    }
}

/// A running route watcher.
pub struct RouteWatch {
    _watcher: RecommendedWatcher,
    follower: JoinHandle<()>,
}

impl Drop for RouteWatch {
    fn drop(&mut self) {
        self.follower.abort();
    }
}
