//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the module loader and in-memory history from configuration
//! - Create the navigation controller
//! - Mount it into a registry, running the bootstrap navigation
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Collaborators initialize in order, not concurrently
//! - Mount happens last (navigation only when everything is wired)

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::content::loader::StaticModuleLoader;
use crate::error::RouterError;
use crate::navigation::controller::NavigationController;
use crate::navigation::history::MemoryHistory;
use crate::navigation::registry::{MountHandle, RouterRegistry};

/// A mounted router with its in-process collaborators.
#[derive(Debug)]
pub struct RouterRuntime {
    pub handle: MountHandle,
    pub history: Arc<MemoryHistory>,
    pub loader: Arc<StaticModuleLoader>,
}

impl RouterRuntime {
    pub fn controller(&self) -> &Arc<NavigationController> {
        self.handle.controller()
    }
}

/// Build and mount a router for `config` into `registry`.
pub async fn start(
    config: &RouterConfig,
    registry: &Arc<RouterRegistry>,
) -> Result<RouterRuntime, RouterError> {
    let loader = Arc::new(StaticModuleLoader::from_config(&config.loader));
    let history = Arc::new(MemoryHistory::with_initial_path(
        config.router.initial_location.clone(),
    ));

    tracing::info!(
        initial_location = %config.router.initial_location,
        routes = config.routes.len(),
        modules = config.loader.modules.len(),
        "Configuration loaded"
    );

    let controller = Arc::new(NavigationController::new(
        config.router.clone(),
        config.routes.clone(),
        history.clone(),
        loader.clone(),
    )?);

    let handle = registry.mount(controller).await?;

    Ok(RouterRuntime {
        handle,
        history,
        loader,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    #[tokio::test]
    async fn test_start_mounts_initial_location() {
        let config = parse_config(
            r#"
            [router]
            initial_location = "/settings"

            [[routes]]
            path = "/settings"
            element = "x-settings"
            import = "./pages/settings.js"

            [loader]
            modules = ["./pages/settings.js"]
            "#,
        )
        .unwrap();
        let registry = Arc::new(RouterRegistry::new());

        let runtime = start(&config, &registry).await.unwrap();
        assert!(runtime.loader.is_loaded("./pages/settings.js"));
        assert_eq!(runtime.controller().slot().render(), "<x-settings></x-settings>");
        assert!(registry.is_mounted());
    }

    #[tokio::test]
    async fn test_start_fails_on_missing_module() {
        let config = parse_config(
            r#"
            [[routes]]
            path = "/"
            element = "x-home"
            import = "./pages/home.js"
            "#,
        )
        .unwrap();
        let registry = Arc::new(RouterRegistry::new());

        let err = start(&config, &registry).await.unwrap_err();
        assert!(matches!(err, RouterError::Import { .. }));
        assert!(!registry.is_mounted());
    }
}
