//! Node forest mounted into the outlet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::matcher::Params;

/// An element with properties and children.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub properties: Params,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    /// An empty element of `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            properties: Params::new(),
            children: Vec::new(),
        }
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name, value);
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }
}

/// A typed node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Inline literal content attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Template {
    pub content: Vec<Node>,
}

impl Template {
    pub fn new(content: impl IntoIterator<Item = Node>) -> Self {
        Self {
            content: content.into_iter().collect(),
        }
    }

    /// Deep copy of the template content, detached from the descriptor.
    pub fn instantiate(&self) -> Vec<Node> {
        self.content.clone()
    }
}

/// Resolved content, ready for the outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "nodes", rename_all = "lowercase")]
pub enum Content {
    Element(Element),
    Fragment(Vec<Node>),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in self.properties.iter() {
            write!(f, " {}=\"{}\"", name, value.replace('"', "&quot;"))?;
        }
        f.write_str(">")?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{}", element),
            Node::Text { text } => f.write_str(text),
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Element(element) => write!(f, "{}", element),
            Content::Fragment(nodes) => nodes.iter().try_for_each(|node| write!(f, "{}", node)),
        }
    }
}
