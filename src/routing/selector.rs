//! Route selection.
//!
//! # Responsibilities
//! - Walk the route table in declaration order
//! - Return the first route whose pattern matches, with its parameters
//! - Stop at the first invalid descriptor
//!
//! # Design Decisions
//! - An invalid descriptor truncates the table on purpose: routes declared after
//!   it are unreachable. Callers wanting an error instead run
//!   `config::validation::validate_routes` (strict mode does this on mount)
//! - Selection is pure and never fails

use crate::routing::descriptor::{CompiledRoute, RouteTable};
use crate::routing::matcher::Params;

/// The route chosen for a location.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    /// Position in the route table.
    pub index: usize,
    pub route: &'a CompiledRoute,
    pub params: Params,
}

/// Select the first matching route for `target`.
pub fn select<'a>(table: &'a RouteTable, target: &str) -> Option<Selection<'a>> {
    for (index, route) in table.routes().iter().enumerate() {
        let Some(pattern) = &route.pattern else {
            tracing::trace!(index, tag = %route.descriptor.tag, "Invalid descriptor ends route scan");
            break;
        };
        if let Some(params) = pattern.matches(target) {
            return Some(Selection {
                index,
                route,
                params,
            });
        }
    }
    None
}
