//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route descriptors are well formed
//! - Validate value ranges (event capacity > 0)
//! - Flag patterns with unreachable segments
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::descriptor::{RouteDescriptor, ROUTE_TAG};
use crate::routing::pattern::PathPattern;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route {index}: tag `{tag}` is not `{}`", ROUTE_TAG)]
    UnknownTag { index: usize, tag: String },

    #[error("route {index}: missing path")]
    MissingPath { index: usize },

    #[error("route {index}: greedy parameter in `{path}` is not the last segment")]
    GreedyNotLast { index: usize, path: String },

    #[error("route {index}: redirect target is empty")]
    EmptyRedirect { index: usize },

    #[error("router.event_capacity must be greater than zero")]
    ZeroEventCapacity,
}

impl ValidationError {
    /// Index of the offending route, for route-level problems.
    pub fn route_index(&self) -> Option<usize> {
        match self {
            ValidationError::UnknownTag { index, .. }
            | ValidationError::MissingPath { index }
            | ValidationError::GreedyNotLast { index, .. }
            | ValidationError::EmptyRedirect { index } => Some(*index),
            ValidationError::ZeroEventCapacity => None,
        }
    }
}

/// Validate a whole configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.router.event_capacity == 0 {
        errors.push(ValidationError::ZeroEventCapacity);
    }
    if let Err(route_errors) = validate_routes(&config.routes) {
        errors.extend(route_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate route descriptors. This is the strict counterpart of the
/// selector's stop-at-first-invalid policy.
pub fn validate_routes(routes: &[RouteDescriptor]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, route) in routes.iter().enumerate() {
        if route.tag != ROUTE_TAG {
            errors.push(ValidationError::UnknownTag {
                index,
                tag: route.tag.clone(),
            });
            continue;
        }

        let Some(path) = route.path.as_deref().filter(|path| !path.is_empty()) else {
            errors.push(ValidationError::MissingPath { index });
            continue;
        };

        if PathPattern::parse(path).misplaced_greedy().is_some() {
            errors.push(ValidationError::GreedyNotLast {
                index,
                path: path.to_string(),
            });
        }

        if route.redirect.as_deref() == Some("") {
            errors.push(ValidationError::EmptyRedirect { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
