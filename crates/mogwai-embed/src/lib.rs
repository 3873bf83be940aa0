//! Embed documents into a view tree and keep them there.
//!
//! A [`Document`](model::Document) holds an ordered set of root
//! [`Model`](model::Model)s. Embedding a document renders each root into a
//! live [`View`](view::View), places it in a container element and then
//! follows the document as roots come and go, touching only the roots that
//! changed.
//!
//! ## Placement
//! Each root renders into one element, picked by [`root::RootResolver`]:
//! an element mapped to the root's declared position, an element mapped to
//! the model's id, the container itself when it carries
//! [`ROOT_CLASS`](root::ROOT_CLASS), or a new wrapper `div` appended to the
//! container.
//!
//! ## Indices
//! A binding tracks the views it rendered itself. It also publishes them to
//! a [`ViewIndex`](index::ViewIndex), which may be shared between bindings so
//! that any view can be found by its model's id. A model id is rendered at
//! most once across all bindings sharing an index.
//!
//! ## Scheduling
//! Everything runs on one thread. Roots present when embedding starts are
//! rendered one after the other, in document order. Roots added later are
//! rendered in tasks of their own on the [`LocalSpawn`](futures::task::LocalSpawn)
//! passed to [`Embed::run`](embed::Embed::run), and may finish in any order.
//!
//! ## Platforms
//! * `ssr` (default) - an in-memory element tree and document, see [`ssr`].
//! * `web` - `web-sys` elements and a spawner backed by
//!   `wasm-bindgen-futures`.
pub mod embed;
pub mod error;
pub mod index;
pub mod model;
pub mod root;
#[cfg(feature = "ssr")]
pub mod ssr;
pub mod sync;
pub mod view;
#[cfg(feature = "web")]
pub mod web;

pub mod prelude {
    pub use crate::{
        embed::{Embed, Embedded},
        error::{EmbedError, RenderFailure},
        index::ViewIndex,
        model::{Document, DocumentEvent, Model},
        root::ROOT_CLASS,
        view::{BuildView, RenderTo, View, ViewElement, ViewTitle},
    };
}
