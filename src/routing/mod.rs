//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation target ("/users/42?tab=1#top")
//!     → selector.rs (walk route table in declaration order)
//!     → pattern.rs + matcher.rs (segment walk, parameter extraction)
//!     → Return: selected descriptor + Params, or no selection
//!
//! Route Compilation (on mount and on every reload):
//!     RouteDescriptor[]
//!     → Parse `path` into PathPattern
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable until the table is swapped
//! - No regex: patterns are split into segments at compile time
//! - Deterministic: same table and path always select the same route
//! - First match wins (declaration order, no priority scoring)
//! - Matching never fails; it only answers "no match"

pub mod descriptor;
pub mod matcher;
pub mod pattern;
pub mod selector;

pub use descriptor::{CompiledRoute, RouteDescriptor, RouteTable, ROUTE_TAG};
pub use matcher::{match_path, Params};
pub use pattern::{Modifiers, ParamSegment, PathPattern, Segment};
pub use selector::{select, Selection};
