//! Deferred module loading.
//!
//! # Responsibilities
//! - Abstract the host's dynamic-import facility behind [`ModuleLoader`]
//! - Provide an in-process catalog loader for the CLI and tests
//!
//! # Design Decisions
//! - A module loads at most once; later imports resolve immediately
//! - Unknown references fail unless the catalog is open
//! - Failures are returned, never retried

use std::time::Duration;

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::config::LoaderConfig;

/// Errors from loading a deferred module.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("module not found: {0}")]
    NotFound(String),

    #[error("module {reference} failed to load: {reason}")]
    Failed { reference: String, reason: String },
}

/// Host facility resolving a module reference.
pub trait ModuleLoader: Send + Sync {
    /// Load `reference`, completing once the module is usable.
    fn load<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, Result<(), LoadError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ModuleState {
    Available,
    Loaded,
    Broken(String),
}

/// Catalog-backed loader with optional simulated latency.
#[derive(Debug, Default)]
pub struct StaticModuleLoader {
    modules: DashMap<String, ModuleState>,
    allow_unknown: bool,
    latency: Duration,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        let loader = Self::new()
            .allow_unknown(config.allow_unknown)
            .with_latency(Duration::from_millis(config.latency_ms));
        for reference in &config.modules {
            loader.register(reference.clone());
        }
        loader
    }

    /// Accept references that were never registered.
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    /// Delay applied to every first load.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn register(&self, reference: impl Into<String>) {
        self.modules.entry(reference.into()).or_insert(ModuleState::Available);
    }

    /// Register a module whose load always fails with `reason`.
    pub fn register_broken(&self, reference: impl Into<String>, reason: impl Into<String>) {
        self.modules
            .insert(reference.into(), ModuleState::Broken(reason.into()));
    }

    pub fn is_loaded(&self, reference: &str) -> bool {
        self.modules
            .get(reference)
            .is_some_and(|state| *state == ModuleState::Loaded)
    }

    fn state(&self, reference: &str) -> Option<ModuleState> {
        self.modules.get(reference).map(|state| state.clone())
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, Result<(), LoadError>> {
        Box::pin(async move {
            match self.state(reference) {
                Some(ModuleState::Loaded) => return Ok(()),
                Some(ModuleState::Broken(reason)) => {
                    return Err(LoadError::Failed {
                        reference: reference.to_string(),
                        reason,
                    })
                }
                Some(ModuleState::Available) => {}
                None if self.allow_unknown => {}
                None => return Err(LoadError::NotFound(reference.to_string())),
            }

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.modules
                .insert(reference.to_string(), ModuleState::Loaded);
            tracing::debug!(reference, "Module loaded");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_module_loads_once() {
        let loader = StaticModuleLoader::new();
        loader.register("./pages/a.js");
        assert!(!loader.is_loaded("./pages/a.js"));

        loader.load("./pages/a.js").await.unwrap();
        assert!(loader.is_loaded("./pages/a.js"));
        loader.load("./pages/a.js").await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_module() {
        let closed = StaticModuleLoader::new();
        assert_eq!(
            closed.load("./missing.js").await,
            Err(LoadError::NotFound("./missing.js".into()))
        );

        let open = StaticModuleLoader::new().allow_unknown(true);
        assert!(open.load("./missing.js").await.is_ok());
    }

    #[tokio::test]
    async fn test_broken_module() {
        let loader = StaticModuleLoader::new();
        loader.register_broken("./bad.js", "syntax error");
        let err = loader.load("./bad.js").await.unwrap_err();
        assert_eq!(err.to_string(), "module ./bad.js failed to load: syntax error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_applies_to_first_load() {
        let loader = StaticModuleLoader::new()
            .allow_unknown(true)
            .with_latency(Duration::from_millis(250));
        let started = tokio::time::Instant::now();
        loader.load("./slow.js").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
