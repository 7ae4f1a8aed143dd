//! Router error types.

use thiserror::Error;

use crate::config::validation::ValidationError;
use crate::content::loader::LoadError;

/// Errors surfaced by mounting and navigation.
///
/// Matching and selection never produce errors; only activation and content
/// resolution do. Nothing here is retried.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A second router tried to activate in the same context.
    #[error("a router is already active; only one router may be mounted at a time")]
    AlreadyActive,

    #[error("no router is mounted")]
    NoActiveRouter,

    #[error("failed to import {reference}: {source}")]
    Import {
        reference: String,
        #[source]
        source: LoadError,
    },

    /// Parameters were matched but the route produced no element to receive them.
    #[error("route {path} has parameters to apply but declares no element")]
    MissingElement { path: String },

    #[error("redirect limit of {limit} exceeded while navigating to {target}")]
    RedirectLimit { limit: usize, target: String },

    #[error("invalid route table: {}", join_errors(.0))]
    InvalidRoutes(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
