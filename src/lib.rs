//! Declarative client-side router.
//!
//! Selects one route among ordered descriptors for the current location,
//! resolves its content (module import, element, template, or redirect), mounts
//! it into a single outlet, and keeps the location stack and listeners in sync.

pub mod config;
pub mod content;
pub mod error;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use error::RouterError;
pub use navigation::{NavigationController, RouterRegistry};
pub use routing::RouteDescriptor;
