//! A document of notes, embedded on the web and as a server-side rendered
//! string.
use std::{future::Future, marker::PhantomData};

use mogwai_embed::{prelude::*, sync::Shared};

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

#[derive(Clone, Debug)]
pub struct Note {
    pub id: String,
    pub text: String,
}

impl Note {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl Model for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Elements that can hold a paragraph of text.
pub trait NoteElement: ViewElement {
    fn paragraph(text: &str) -> Self;
}

#[cfg(feature = "ssr")]
impl NoteElement for mogwai_embed::ssr::SsrElement {
    fn paragraph(text: &str) -> Self {
        let p = mogwai_embed::ssr::SsrElement::new("p");
        p.append_node(mogwai_embed::ssr::SsrText::new(text.to_owned()));
        p
    }
}

#[cfg(feature = "web")]
impl NoteElement for web_sys::Element {
    fn paragraph(text: &str) -> Self {
        let p = <web_sys::Element as ViewElement>::create("p");
        p.set_text_content(Some(text));
        p
    }
}

#[derive(Clone)]
pub struct NoteView<El> {
    pub paragraph: El,
    parent: Shared<Option<El>>,
}

impl<El: NoteElement> RenderTo<El> for NoteView<El> {
    fn render_to(&self, element: &El) {
        element.append_child(&self.paragraph);
        self.parent.set(Some(element.clone()));
    }
}

impl<El: NoteElement> View for NoteView<El> {
    type Element = El;

    fn as_render_to(&self) -> Option<&dyn RenderTo<El>> {
        Some(self)
    }

    fn remove(&self) {
        if let Some(parent) = self.parent.set(None) {
            parent.remove_child(&self.paragraph);
        }
    }
}

pub struct NoteBuilder<El>(PhantomData<El>);

impl<El> Clone for NoteBuilder<El> {
    fn clone(&self) -> Self {
        NoteBuilder(PhantomData)
    }
}

impl<El> Default for NoteBuilder<El> {
    fn default() -> Self {
        NoteBuilder(PhantomData)
    }
}

impl<El: NoteElement> BuildView<Note> for NoteBuilder<El> {
    type View = NoteView<El>;

    fn build_view(&self, model: &Note) -> impl Future<Output = anyhow::Result<NoteView<El>>> {
        let Note { id, text } = model.clone();
        async move {
            log::info!("building note '{id}'");
            Ok(NoteView {
                paragraph: El::paragraph(&text),
                parent: Default::default(),
            })
        }
    }
}

#[cfg(feature = "ssr")]
pub fn sample_document() -> mogwai_embed::ssr::SsrDocument<Note> {
    mogwai_embed::ssr::SsrDocument::new("Notes").with_roots([
        Note::new("one", "The first note."),
        Note::new("two", "The second note."),
    ])
}

#[cfg(feature = "web")]
#[wasm_bindgen(start)]
fn web_run() -> Result<(), JsValue> {
    use mogwai_embed::web::{WebSpawner, document};

    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let body: web_sys::Element = document()
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .into();
    let doc = sample_document();
    wasm_bindgen_futures::spawn_local(async move {
        let embed = Embed::<Note, NoteBuilder<web_sys::Element>>::new(body, NoteBuilder::default())
            .with_title(document());
        match embed.run(doc.clone(), &WebSpawner).await {
            Ok(embedded) => {
                log::info!("embedded {} notes", embedded.views().len());
                doc.add_root(Note::new("three", "A note added after embedding."));
            }
            Err(e) => log::error!("{e:#}"),
        }
    });
    Ok(())
}
