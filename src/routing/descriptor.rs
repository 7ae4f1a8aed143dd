//! Route descriptors and the compiled route table.
//!
//! Descriptors arrive as parsed configuration (TOML or built in code) and are
//! never mutated; a changed configuration produces a new [`RouteTable`].

use serde::{Deserialize, Serialize};

use crate::content::node::Template;
use crate::routing::pattern::PathPattern;

/// Tag naming a route descriptor. Any other tag is not a route.
pub const ROUTE_TAG: &str = "element-route";

fn default_tag() -> String {
    ROUTE_TAG.to_string()
}

/// Declarative record mapping a path pattern to content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteDescriptor {
    /// Descriptor kind. Only [`ROUTE_TAG`] participates in matching.
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Pattern string (`/users/:id`, `*`, ...).
    #[serde(default)]
    pub path: Option<String>,

    /// Element tag to instantiate when the route resolves.
    #[serde(default)]
    pub element: Option<String>,

    /// Module reference loaded before the element is created.
    #[serde(default)]
    pub import: Option<String>,

    /// Navigation target replacing this route.
    #[serde(default)]
    pub redirect: Option<String>,

    /// Inline content cloned into the outlet instead of an element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

impl RouteDescriptor {
    /// A route for `path` with nothing to produce yet.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            tag: default_tag(),
            path: Some(path.into()),
            element: None,
            import: None,
            redirect: None,
            template: None,
        }
    }

    /// A catch-all route.
    pub fn wildcard() -> Self {
        Self::new("*")
    }

    /// A non-route child, such as an outlet or stray markup.
    pub fn foreign(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            path: None,
            ..Self::new("")
        }
    }

    pub fn element(mut self, tag: impl Into<String>) -> Self {
        self.element = Some(tag.into());
        self
    }

    pub fn import(mut self, reference: impl Into<String>) -> Self {
        self.import = Some(reference.into());
        self
    }

    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Whether this is a route-descriptor kind with a non-empty path.
    pub fn is_valid(&self) -> bool {
        self.tag == ROUTE_TAG && self.path.as_deref().is_some_and(|path| !path.is_empty())
    }

    /// The declared path, or an empty string.
    pub fn path_str(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }
}

/// A descriptor with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub descriptor: RouteDescriptor,
    /// `None` when the descriptor is not a valid route.
    pub pattern: Option<PathPattern>,
}

impl CompiledRoute {
    pub fn compile(descriptor: RouteDescriptor) -> Self {
        let pattern = descriptor
            .is_valid()
            .then(|| PathPattern::parse(descriptor.path_str()));
        Self {
            descriptor,
            pattern,
        }
    }
}

/// Immutable, ordered set of compiled routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn compile(descriptors: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        Self {
            routes: descriptors.into_iter().map(CompiledRoute::compile).collect(),
        }
    }

    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Index of the first invalid descriptor. Routes from here on are never selected.
    pub fn truncation_point(&self) -> Option<usize> {
        self.routes.iter().position(|route| route.pattern.is_none())
    }
}
