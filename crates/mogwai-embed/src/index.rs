//! Indices of rendered views.
//!
//! Every binding keeps a [`LocalIndex`] of the roots it rendered. Bindings
//! that share a [`ViewIndex`] also publish their views there, where any code
//! can look a view up by model id without a handle on the binding that
//! created it.
use std::collections::HashMap;

use crate::{error::EmbedError, sync::Shared, view::View};

/// A registry of rendered views keyed by model id.
///
/// Clones share one table. Pass the same registry to several
/// [`Embed`](crate::embed::Embed)s to make their views discoverable from one
/// place.
///
/// Holds at most one entry per model id. An entry exists exactly while some
/// binding has that model's view rendered. Registration is first-write-wins:
/// registering an id that is already present fails with
/// [`EmbedError::AlreadyRendered`] and leaves the existing entry in place.
pub struct ViewIndex<V> {
    views: Shared<HashMap<String, V>>,
}

impl<V> Clone for ViewIndex<V> {
    fn clone(&self) -> Self {
        Self {
            views: self.views.clone(),
        }
    }
}

impl<V> Default for ViewIndex<V> {
    fn default() -> Self {
        Self {
            views: Shared::new(HashMap::new()),
        }
    }
}

impl<V: Clone> ViewIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view currently rendered for `model_id`, if any.
    pub fn get(&self, model_id: &str) -> Option<V> {
        self.views.get().get(model_id).cloned()
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.views.get().contains_key(model_id)
    }

    pub fn len(&self) -> usize {
        self.views.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.get().is_empty()
    }

    /// All registered model ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids = self.views.get().keys().cloned().collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub(crate) fn register(&self, model_id: &str, view: V) -> Result<(), EmbedError> {
        let mut views = self.views.get_mut();
        if views.contains_key(model_id) {
            return Err(EmbedError::AlreadyRendered {
                model_id: model_id.to_owned(),
            });
        }
        log::trace!("indexing view for '{model_id}'");
        views.insert(model_id.to_owned(), view);
        Ok(())
    }

    pub(crate) fn unregister(&self, model_id: &str) -> Option<V> {
        log::trace!("unindexing view for '{model_id}'");
        self.views.get_mut().remove(model_id)
    }
}

/// A view rendered by one binding, along with the wrapper element created to
/// hold it, if one was.
pub(crate) struct LocalEntry<V: View> {
    pub model_id: String,
    pub view: V,
    pub wrapper: Option<V::Element>,
}

/// The views rendered by one binding, in the order they were rendered.
pub(crate) struct LocalIndex<V: View> {
    entries: Shared<Vec<LocalEntry<V>>>,
}

impl<V: View> Clone for LocalIndex<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<V: View> Default for LocalIndex<V> {
    fn default() -> Self {
        Self {
            entries: Shared::new(vec![]),
        }
    }
}

impl<V: View> LocalIndex<V> {
    pub fn insert(&self, entry: LocalEntry<V>) {
        self.entries.get_mut().push(entry);
    }

    pub fn remove(&self, model_id: &str) -> Option<LocalEntry<V>> {
        let mut entries = self.entries.get_mut();
        let i = entries.iter().position(|e| e.model_id == model_id)?;
        Some(entries.remove(i))
    }

    pub fn get(&self, model_id: &str) -> Option<V> {
        self.entries
            .get()
            .iter()
            .find(|e| e.model_id == model_id)
            .map(|e| e.view.clone())
    }

    pub fn views(&self) -> Vec<V> {
        self.entries.get().iter().map(|e| e.view.clone()).collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries
            .get()
            .iter()
            .map(|e| e.model_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn registration_is_first_write_wins() {
        let index = ViewIndex::<&'static str>::new();
        index.register("a", "first").unwrap();
        assert_eq!(
            index.register("a", "second"),
            Err(EmbedError::AlreadyRendered {
                model_id: "a".into()
            })
        );
        assert_eq!(index.get("a"), Some("first"));
        assert_eq!(index.len(), 1);

        assert_eq!(index.unregister("a"), Some("first"));
        assert!(index.is_empty());
        assert_eq!(index.unregister("a"), None);

        index.register("a", "second").unwrap();
        assert_eq!(index.get("a"), Some("second"));
    }

    #[test]
    fn clones_share_entries() {
        let index = ViewIndex::<u32>::default();
        let other = index.clone();
        index.register("b", 1).unwrap();
        other.register("a", 0).unwrap();
        assert_eq!(index.ids(), vec!["a".to_string(), "b".to_string()]);
        assert!(other.contains("b"));
    }
}
