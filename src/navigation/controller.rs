//! Navigation controller.
//!
//! # States
//! - Idle: waiting for a navigation request
//! - Matching: selecting a route for the new location
//! - Resolving: producing content (may suspend on a module import)
//! - Mounted: outlet updated, change notification being emitted
//!
//! # State Transitions
//! ```text
//! Idle → Idle:            target equals current location (no-op)
//! Idle → Matching:        location pushed, outlet cleared
//! Matching → Mounted:     no route matched (outlet stays empty)
//! Matching → Resolving:   route selected
//! Resolving → Idle:       redirect; a new cycle starts for the target
//! Resolving → Idle:       resolution failed; error returned to the caller
//! Resolving → Mounted:    content (or nothing) mounted
//! Mounted → Idle:         `routechange` emitted
//! ```
//!
//! # Design Decisions
//! - Redirects recurse through `navigate`, bounded by `max_redirects`
//! - Each cycle takes a generation number; with `single_flight` a cycle that
//!   was overtaken by a newer one drops its mount or redirect and emits nothing
//! - Without `single_flight`, overlapping cycles mount in completion order
//! - Cycles are never cancelled; an overtaken import still runs to completion

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use futures_util::future::BoxFuture;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc;

use crate::config::validation::validate_routes;
use crate::config::{RouterConfig, RouterSettings};
use crate::content::loader::ModuleLoader;
use crate::content::resolver::{ContentResolver, Resolution};
use crate::content::slot::DisplaySlot;
use crate::error::RouterError;
use crate::lifecycle::shutdown::ShutdownListener;
use crate::navigation::events::{RouteChange, RouteEvents};
use crate::navigation::history::LocationStack;
use crate::navigation::location::{self, Location};
use crate::observability::metrics;
use crate::routing::descriptor::{RouteDescriptor, RouteTable};
use crate::routing::selector::select;

/// Navigation state, observable for diagnostics.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Idle = 0,
    Matching = 1,
    Resolving = 2,
    Mounted = 3,
}

impl From<u8> for NavigationState {
    fn from(val: u8) -> Self {
        match val {
            1 => NavigationState::Matching,
            2 => NavigationState::Resolving,
            3 => NavigationState::Mounted,
            _ => NavigationState::Idle,
        }
    }
}

/// How a navigation request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The target was already the current location.
    Unchanged,
    /// The cycle mounted its result and emitted `routechange`.
    Completed {
        url: String,
        /// Pattern of the selected route; `None` when nothing matched.
        route: Option<String>,
    },
    /// A newer cycle started first; this one mounted nothing.
    Superseded,
}

/// Drives match → resolve → mount → notify for one router.
pub struct NavigationController {
    settings: RouterSettings,
    routes: ArcSwap<RouteTable>,
    history: Arc<dyn LocationStack>,
    resolver: ContentResolver,
    slot: Arc<DisplaySlot>,
    events: RouteEvents,
    generation: AtomicU64,
    state: AtomicU8,
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("settings", &self.settings)
            .field("routes", &self.routes.load().len())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl NavigationController {
    /// Create a controller. Fails only in strict mode with an invalid route table.
    pub fn new(
        settings: RouterSettings,
        routes: Vec<RouteDescriptor>,
        history: Arc<dyn LocationStack>,
        loader: Arc<dyn ModuleLoader>,
    ) -> Result<Self, RouterError> {
        let table = compile_routes(&settings, routes)?;
        let events = RouteEvents::new(settings.event_capacity);
        Ok(Self {
            settings,
            routes: ArcSwap::from_pointee(table),
            history,
            resolver: ContentResolver::new(loader),
            slot: Arc::new(DisplaySlot::new()),
            events,
            generation: AtomicU64::new(0),
            state: AtomicU8::new(NavigationState::Idle as u8),
        })
    }

    /// Swap in a new route table. The mounted content is left as is.
    pub fn replace_routes(&self, routes: Vec<RouteDescriptor>) -> Result<(), RouterError> {
        let table = compile_routes(&self.settings, routes)?;
        tracing::info!(routes = table.len(), "Route table replaced");
        self.routes.store(Arc::new(table));
        Ok(())
    }

    pub fn routes(&self) -> Arc<RouteTable> {
        self.routes.load_full()
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// The outlet this controller mounts into.
    pub fn slot(&self) -> Arc<DisplaySlot> {
        Arc::clone(&self.slot)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RouteChange> {
        self.events.subscribe()
    }

    pub fn state(&self) -> NavigationState {
        self.state.load(Ordering::SeqCst).into()
    }

    pub fn current_location(&self) -> String {
        self.history.current()
    }

    pub fn is_current_location(&self, url: &str) -> bool {
        self.history.current() == url
    }

    /// `class_name` when `url` is the current location, else `""`.
    pub fn active<'a>(&self, url: &str, class_name: &'a str) -> &'a str {
        location::active(&self.history.current(), url, class_name)
    }

    /// [`active`](Self::active) with the configured `active_class`.
    pub fn active_default(&self, url: &str) -> &str {
        location::active(&self.history.current(), url, &self.settings.active_class)
    }

    /// The current location split into path, query and fragment.
    pub fn location(&self) -> Location {
        Location::parse(&self.history.current())
    }

    /// Navigate to `url`: no-op when already there, otherwise push and run a cycle.
    pub async fn navigate(&self, url: &str) -> Result<NavigationOutcome, RouterError> {
        self.navigate_with_depth(url.to_string(), 0).await
    }

    /// Run a cycle for the current location without touching the stack.
    ///
    /// Used on mount and whenever the location changed outside the router.
    pub async fn refresh(&self) -> Result<NavigationOutcome, RouterError> {
        self.cycle(self.history.current(), 0).await
    }

    fn navigate_with_depth(
        &self,
        url: String,
        depth: usize,
    ) -> BoxFuture<'_, Result<NavigationOutcome, RouterError>> {
        Box::pin(async move {
            if url == self.history.current() {
                tracing::trace!(url = %url, "Already at location");
                return Ok(NavigationOutcome::Unchanged);
            }
            self.history.push(&url);
            self.cycle(url, depth).await
        })
    }

    async fn cycle(&self, url: String, depth: usize) -> Result<NavigationOutcome, RouterError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(url = %url, generation, depth, "Navigation started");

        self.set_state(NavigationState::Matching);
        self.slot.clear();

        let routes = self.routes.load_full();
        let selected = select(&routes, &url).map(|selection| {
            (selection.route.descriptor.clone(), selection.params)
        });

        let (resolution, pattern) = match selected {
            None => {
                tracing::debug!(url = %url, generation, "No route matched");
                (Resolution::Empty, None)
            }
            Some((descriptor, params)) => {
                let pattern = descriptor.path_str().to_string();
                tracing::debug!(url = %url, generation, pattern = %pattern, "Route selected");
                self.set_state(NavigationState::Resolving);

                let started = Instant::now();
                let result = self.resolver.resolve(&descriptor, &params).await;
                metrics::record_resolution(started.elapsed(), result.is_ok());

                match result {
                    Ok(resolution) => (resolution, Some(pattern)),
                    Err(e) => {
                        self.set_state(NavigationState::Idle);
                        metrics::record_navigation("failed");
                        tracing::error!(url = %url, generation, pattern = %pattern, error = %e, "Route resolution failed");
                        return Err(e);
                    }
                }
            }
        };

        let content = match resolution {
            Resolution::Redirect(target) => {
                if self.is_superseded(generation) {
                    metrics::record_navigation("superseded");
                    tracing::debug!(from = %url, to = %target, generation, "Navigation superseded, redirect dropped");
                    return Ok(NavigationOutcome::Superseded);
                }
                self.set_state(NavigationState::Idle);
                if let Some(limit) = self.settings.max_redirects {
                    if depth >= limit {
                        metrics::record_navigation("failed");
                        tracing::warn!(from = %url, to = %target, limit, "Redirect limit reached");
                        return Err(RouterError::RedirectLimit { limit, target });
                    }
                }
                metrics::record_redirect();
                tracing::info!(from = %url, to = %target, generation, "Redirecting");
                return self.navigate_with_depth(target, depth + 1).await;
            }
            Resolution::Content(content) => Some(content),
            Resolution::Empty => None,
        };

        if self.is_superseded(generation) {
            metrics::record_navigation("superseded");
            tracing::debug!(url = %url, generation, "Navigation superseded, discarding result");
            return Ok(NavigationOutcome::Superseded);
        }

        self.slot.clear();
        let outcome = match (&content, &pattern) {
            (_, None) => "no_match",
            (None, Some(_)) => "empty",
            (Some(_), Some(_)) => "mounted",
        };
        if let Some(content) = content {
            self.slot.mount(content);
        }
        self.set_state(NavigationState::Mounted);

        let change = RouteChange {
            url: self.history.current(),
        };
        self.events.emit(change.clone());
        self.set_state(NavigationState::Idle);

        metrics::record_navigation(outcome);
        tracing::info!(url = %change.url, generation, outcome, "Navigation complete");

        Ok(NavigationOutcome::Completed {
            url: change.url,
            route: pattern,
        })
    }

    /// A newer cycle has started and single-flight discards this one.
    fn is_superseded(&self, generation: u64) -> bool {
        self.settings.single_flight && self.generation.load(Ordering::SeqCst) != generation
    }

    fn set_state(&self, state: NavigationState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// React to location changes made outside the router until shutdown.
    ///
    /// The subscription is taken before this returns, so changes made after
    /// the call are never missed even if the future is polled later.
    pub fn run(
        self: Arc<Self>,
        mut shutdown: ShutdownListener,
    ) -> impl Future<Output = ()> + Send + 'static {
        let mut changes = self.history.subscribe();
        tracing::info!("Listening for location changes");

        async move {
            loop {
                tokio::select! {
                    change = changes.recv() => {
                        match change {
                            Ok(location) => {
                                tracing::debug!(location = %location, "Location changed externally");
                            }
                            Err(RecvError::Lagged(skipped)) => {
                                tracing::warn!(skipped, "Location changes dropped, syncing to current");
                            }
                            Err(RecvError::Closed) => break,
                        }
                        if let Err(e) = self.refresh().await {
                            tracing::error!(error = %e, "Navigation after location change failed");
                        }
                    }
                    _ = shutdown.triggered() => {
                        tracing::info!("Router received shutdown signal, exiting loop");
                        break;
                    }
                }
            }
        }
    }

    /// Apply reloaded configurations until the sender goes away.
    ///
    /// A rejected table (strict mode) keeps the current routes.
    pub async fn follow_reloads(self: Arc<Self>, mut updates: mpsc::UnboundedReceiver<RouterConfig>) {
        while let Some(config) = updates.recv().await {
            if let Err(e) = self.replace_routes(config.routes) {
                tracing::error!(error = %e, "Reloaded routes rejected. Keeping current routes.");
            }
        }
    }
}

fn compile_routes(
    settings: &RouterSettings,
    routes: Vec<RouteDescriptor>,
) -> Result<RouteTable, RouterError> {
    if settings.strict_validation {
        validate_routes(&routes).map_err(RouterError::InvalidRoutes)?;
    }

    let table = RouteTable::compile(routes);
    if let Some(index) = table.truncation_point() {
        tracing::warn!(
            index,
            ignored = table.len() - index,
            "Route table contains an invalid descriptor; it and every later route are unreachable"
        );
    }
    Ok(table)
}
