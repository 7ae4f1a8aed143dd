//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a route file was not accepted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read route file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed route file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{} problem(s) in route file: {}", .0.len(), list(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// Routes named by validation problems, in file order, without repeats.
    pub fn invalid_routes(&self) -> Vec<usize> {
        let ConfigError::Validation(errors) = self else {
            return Vec::new();
        };
        let mut routes: Vec<usize> = errors.iter().filter_map(ValidationError::route_index).collect();
        routes.dedup();
        routes
    }
}

fn list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
