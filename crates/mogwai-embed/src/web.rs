//! Embedding into the browser DOM (through web-sys).
use futures::{
    future::LocalFutureObj,
    task::{LocalSpawn, SpawnError},
};
use wasm_bindgen::UnwrapThrowExt;

use crate::view::{ViewElement, ViewTitle};

pub mod prelude {
    pub use super::{WebSpawner, document, window};
    pub use crate::prelude::*;
}

impl ViewElement for web_sys::Element {
    fn create(tag: &str) -> Self {
        document().create_element(tag).unwrap_throw()
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn append_child(&self, child: &Self) {
        let _ = web_sys::Node::append_child(self, child);
    }

    fn remove_child(&self, child: &Self) {
        let _ = web_sys::Node::remove_child(self, child);
    }
}

impl ViewTitle for web_sys::Document {
    fn set_title(&self, title: &str) {
        web_sys::Document::set_title(self, title);
    }
}

/// Spawns onto the browser's microtask queue.
#[derive(Clone, Copy, Default)]
pub struct WebSpawner;

impl LocalSpawn for WebSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

thread_local! {
    pub static WINDOW: web_sys::Window = web_sys::window().unwrap_throw();
    pub static DOCUMENT: web_sys::Document = WINDOW.with(|w| w.document().unwrap_throw());
}

/// Return the DOM [`web_sys::Window`].
/// #### Panics
/// Panics when the window cannot be returned.
pub fn window() -> web_sys::Window {
    WINDOW.with(|w| w.clone())
}

/// Return the DOM [`web_sys::Document`].
/// #### Panics
/// Panics when the document cannot be returned.
pub fn document() -> web_sys::Document {
    DOCUMENT.with(|d| d.clone())
}
