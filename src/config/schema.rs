//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::descriptor::RouteDescriptor;

/// Root configuration for a router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Navigation behavior.
    pub router: RouterSettings,

    /// Route descriptors in declaration order.
    pub routes: Vec<RouteDescriptor>,

    /// Module catalog used for `import` references.
    pub loader: LoaderConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Navigation behavior.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterSettings {
    /// Location the in-memory history starts at.
    pub initial_location: String,

    /// Maximum chained redirects per navigation. Absent means unbounded.
    pub max_redirects: Option<usize>,

    /// Drop the mount of a cycle overtaken by a newer navigation.
    pub single_flight: bool,

    /// Reject route tables containing invalid descriptors instead of truncating.
    pub strict_validation: bool,

    /// Class name returned by `active` helpers.
    pub active_class: String,

    /// Buffered route-change events per listener.
    pub event_capacity: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            initial_location: "/".to_string(),
            max_redirects: Some(16),
            single_flight: true,
            strict_validation: false,
            active_class: "active".to_string(),
            event_capacity: 64,
        }
    }
}

/// Module catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Module references that load successfully.
    pub modules: Vec<String>,

    /// Treat any reference as loadable.
    pub allow_unknown: bool,

    /// Simulated latency of a first load in milliseconds.
    pub latency_ms: u64,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.router, RouterSettings::default());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: RouterConfig = toml::from_str(
            r#"
            [router]
            initial_location = "/home"
            max_redirects = 4
            single_flight = false

            [[routes]]
            path = "/home"
            element = "x-home"
            import = "./pages/home.js"

            [[routes]]
            path = "/about"
            [[routes.template]]
            type = "text"
            text = "About"

            [[routes]]
            path = "*"
            redirect = "/home"

            [loader]
            modules = ["./pages/home.js"]

            [observability]
            log_level = "debug"
            log_format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.router.initial_location, "/home");
        assert_eq!(config.router.max_redirects, Some(4));
        assert!(!config.router.single_flight);
        assert_eq!(config.router.active_class, "active");
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.routes[1].template.as_ref().map(|t| t.content.len()), Some(1));
        assert_eq!(config.routes[2].redirect.as_deref(), Some("/home"));
        assert_eq!(config.loader.modules, vec!["./pages/home.js"]);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }
}
