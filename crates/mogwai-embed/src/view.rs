//! Traits at the seams between the binding and the platform.
//!
//! * [`ViewElement`] - a node that roots can be placed into.
//! * [`View`] - what a [`BuildView`] produces for a model.
//! * [`RenderTo`] - the optional capability of a view to attach itself to an
//!   element.
//! * [`ViewTitle`] - somewhere to write a document's title.
use std::future::Future;

use crate::model::Model;

/// An element in a platform's view tree.
pub trait ViewElement: Clone + 'static {
    /// Create a new, detached element with the given tag name.
    fn create(tag: &str) -> Self;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn append_child(&self, child: &Self);

    /// Detach `child`. Does nothing if `child` is not a child of `self`.
    fn remove_child(&self, child: &Self);
}

/// A target for a document's title.
pub trait ViewTitle {
    fn set_title(&self, title: &str);
}

/// Views that can attach themselves to an element.
pub trait RenderTo<El> {
    fn render_to(&self, element: &El);
}

/// A rendered model.
///
/// Views are handles. Clones refer to the same view, so one view can live in
/// both a binding's local index and the [`ViewIndex`](crate::index::ViewIndex).
pub trait View: Clone + 'static {
    type Element: ViewElement;

    /// Returns the view's DOM attach capability, if it has one.
    fn as_render_to(&self) -> Option<&dyn RenderTo<Self::Element>> {
        None
    }

    /// Tear the view down, releasing its resources.
    fn remove(&self);
}

/// Constructs views for models.
pub trait BuildView<M: Model>: Clone + 'static {
    type View: View;

    /// Construct a view for a root model.
    ///
    /// Construction may suspend, for example while views for nested models
    /// are built.
    fn build_view(&self, model: &M) -> impl Future<Output = anyhow::Result<Self::View>>;
}
