//! Choosing the element a root renders into.
use std::collections::HashMap;

use crate::view::ViewElement;

/// Class marking an element as a container that a root renders directly
/// into.
pub const ROOT_CLASS: &str = "mogwai-root";

/// Where a root is rendered.
pub struct Placement<El> {
    pub element: El,
    /// Whether `element` is a wrapper created for this root, as opposed to a
    /// caller-supplied element or the container itself.
    pub created: bool,
}

/// Resolves root models to the elements they render into.
///
/// Resolution order, first match wins:
/// 1. the root's position is within the declared root ids and the id at that
///    position is a key of the element map,
/// 2. the model's own id is a key of the element map,
/// 3. the container is marked with [`ROOT_CLASS`], so the root renders
///    straight into it,
/// 4. a fresh `div` marked with [`ROOT_CLASS`] is appended to the container.
pub struct RootResolver<El> {
    container: El,
    elements: HashMap<String, El>,
    root_ids: Vec<String>,
}

impl<El: ViewElement> RootResolver<El> {
    pub fn new(container: El) -> Self {
        Self {
            container,
            elements: HashMap::new(),
            root_ids: vec![],
        }
    }

    pub fn container(&self) -> &El {
        &self.container
    }

    /// Map an identifier, either a declared root id or a model id, to a
    /// target element.
    pub fn insert_element(&mut self, id: impl Into<String>, element: El) {
        self.elements.insert(id.into(), element);
    }

    /// Declare root ids by position.
    pub fn set_root_ids(&mut self, root_ids: Vec<String>) {
        self.root_ids = root_ids;
    }

    /// Pick the element for a root.
    ///
    /// `n` is the model's position among the document's roots, or `None` if
    /// it is not currently a root.
    pub fn resolve(&self, model_id: &str, n: Option<usize>) -> Placement<El> {
        let declared = n
            .and_then(|n| self.root_ids.get(n))
            .and_then(|root_id| self.elements.get(root_id));
        if let Some(element) = declared {
            log::trace!("placing '{model_id}' by declared root id at {n:?}");
            return Placement {
                element: element.clone(),
                created: false,
            };
        }

        if let Some(element) = self.elements.get(model_id) {
            log::trace!("placing '{model_id}' by model id");
            return Placement {
                element: element.clone(),
                created: false,
            };
        }

        if self.container.has_class(ROOT_CLASS) {
            log::trace!("placing '{model_id}' in the container");
            return Placement {
                element: self.container.clone(),
                created: false,
            };
        }

        log::trace!("placing '{model_id}' in a new wrapper");
        let wrapper = El::create("div");
        wrapper.add_class(ROOT_CLASS);
        self.container.append_child(&wrapper);
        Placement {
            element: wrapper,
            created: true,
        }
    }

    /// Give up a placement. Wrappers created for it are detached from the
    /// container, anything else is left alone.
    pub fn release(&self, placement: Placement<El>) {
        if placement.created {
            self.container.remove_child(&placement.element);
        }
    }
}
