//! Contracts for documents and the models they hold.
//!
//! A [`Document`] is an ordered list of root [`Model`]s plus a title. Changes
//! to either are published as [`DocumentEvent`]s to every stream returned by
//! [`Document::changes`].
use futures::Stream;

/// An identity-bearing entity in a document.
///
/// The id must be unique within a document and stable for the model's
/// lifetime. It is the key views are indexed by.
pub trait Model: Clone + 'static {
    fn id(&self) -> &str;
}

/// A change to a [`Document`].
#[derive(Clone, Debug)]
pub enum DocumentEvent<M> {
    /// A model was added to the document's roots.
    RootAdded(M),
    /// A model was removed from the document's roots.
    RootRemoved(M),
    /// The document's title changed to the carried value.
    TitleChanged(String),
    /// A property of some model in the document changed.
    ModelChanged { model: M, attr: String },
}

/// A tree of models with an ordered set of roots.
pub trait Document: Clone + 'static {
    type Model: Model;
    type Changes: Stream<Item = DocumentEvent<Self::Model>> + 'static;

    /// The current roots, in document order.
    fn roots(&self) -> Vec<Self::Model>;

    fn title(&self) -> String;

    /// Subscribe to changes.
    ///
    /// The returned stream yields every change made after this call, in the
    /// order they were made. There is no unsubscribe beyond dropping the
    /// stream.
    fn changes(&self) -> Self::Changes;
}
