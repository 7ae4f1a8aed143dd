//! Content resolution.
//!
//! # Responsibilities
//! - Await the route's deferred module
//! - Create the route element, or clone its template
//! - Report redirects to the navigation layer
//! - Copy matched parameters onto the element as properties
//!
//! # Resolution Order
//! ```text
//! import?   → await load (error aborts the resolution)
//! element?  → create empty element
//! redirect? → Redirect(target), created element is discarded
//! template? → Content(Fragment(clone)), parameters are not applied
//! params    → set on element; params without element is an error
//! ```

use std::sync::Arc;

use crate::content::loader::ModuleLoader;
use crate::content::node::{Content, Element};
use crate::error::RouterError;
use crate::routing::descriptor::RouteDescriptor;
use crate::routing::matcher::Params;

/// Outcome of resolving a selected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Content to mount.
    Content(Content),
    /// The route produces nothing; the outlet stays empty.
    Empty,
    /// Navigate to the target instead; nothing is mounted for this route.
    Redirect(String),
}

/// Turns descriptors into mountable content.
#[derive(Clone)]
pub struct ContentResolver {
    loader: Arc<dyn ModuleLoader>,
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver").finish_non_exhaustive()
    }
}

impl ContentResolver {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self { loader }
    }

    pub async fn resolve(
        &self,
        descriptor: &RouteDescriptor,
        params: &Params,
    ) -> Result<Resolution, RouterError> {
        if let Some(reference) = descriptor.import.as_deref() {
            self.loader
                .load(reference)
                .await
                .map_err(|source| RouterError::Import {
                    reference: reference.to_string(),
                    source,
                })?;
        }

        let mut element = descriptor.element.as_deref().map(Element::new);

        if let Some(target) = &descriptor.redirect {
            return Ok(Resolution::Redirect(target.clone()));
        }

        if let Some(template) = &descriptor.template {
            return Ok(Resolution::Content(Content::Fragment(template.instantiate())));
        }

        match element.as_mut() {
            Some(element) => {
                for (name, value) in params.iter() {
                    element.set_property(name, value);
                }
            }
            None if !params.is_empty() => {
                return Err(RouterError::MissingElement {
                    path: descriptor.path_str().to_string(),
                });
            }
            None => {}
        }

        Ok(element.map_or(Resolution::Empty, |element| {
            Resolution::Content(Content::Element(element))
        }))
    }
}
