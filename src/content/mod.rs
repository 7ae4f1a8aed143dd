//! Content subsystem.
//!
//! # Data Flow
//! ```text
//! Selected RouteDescriptor + Params
//!     → loader.rs (await deferred module, if any)
//!     → resolver.rs (element / redirect / template / properties)
//!     → node.rs (Element, Template clone, Content)
//!     → slot.rs (clear, then mount at most one Content)
//! ```
//!
//! # Design Decisions
//! - The node forest is plain owned data; no live tree is queried
//! - The outlet never holds more than one resolved content value
//! - Module loading is the only suspension point in a navigation

pub mod loader;
pub mod node;
pub mod resolver;
pub mod slot;

pub use loader::{LoadError, ModuleLoader, StaticModuleLoader};
pub use node::{Content, Element, Node, Template};
pub use resolver::{ContentResolver, Resolution};
pub use slot::DisplaySlot;
