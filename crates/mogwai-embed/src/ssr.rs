//! Server-side rendered views.
//!
//! An in-memory element tree, a title and a document, enough to run a
//! binding without a browser and render the result to a string.
use crate::{
    model::{Document, DocumentEvent, Model},
    sync::Shared,
    view::{ViewElement, ViewTitle},
};

#[derive(Clone)]
pub struct SsrText {
    pub text: Shared<String>,
}

impl SsrText {
    pub fn new(text: impl Into<String>) -> Self {
        SsrText {
            text: Shared::new(text.into()),
        }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }
}

/// An in-memory element.
///
/// Clones are handles to the same element. Equality is identity.
#[derive(Clone)]
pub struct SsrElement {
    pub name: String,
    pub attributes: Shared<Vec<(String, Option<String>)>>,
    pub children: Shared<Vec<SsrNode>>,
}

impl PartialEq for SsrElement {
    fn eq(&self, other: &Self) -> bool {
        self.children.ptr_eq(&other.children)
    }
}

#[derive(Clone)]
pub enum SsrNode {
    Element(SsrElement),
    Text(SsrText),
}

impl PartialEq for SsrNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SsrNode::Element(a), SsrNode::Element(b)) => a == b,
            (SsrNode::Text(a), SsrNode::Text(b)) => a.text.ptr_eq(&b.text),
            _ => false,
        }
    }
}

impl From<SsrText> for SsrNode {
    fn from(value: SsrText) -> Self {
        SsrNode::Text(value)
    }
}

impl From<SsrElement> for SsrNode {
    fn from(value: SsrElement) -> Self {
        SsrNode::Element(value)
    }
}

impl ViewElement for SsrElement {
    fn create(tag: &str) -> Self {
        SsrElement::new(tag.to_owned())
    }

    fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.get_attribute("class") {
            Some(prev) if !prev.trim().is_empty() => format!("{} {class}", prev.trim()),
            _ => class.to_owned(),
        };
        self.set_attribute("class", classes);
    }

    fn append_child(&self, child: &Self) {
        self.children.get_mut().push(SsrNode::Element(child.clone()));
    }

    fn remove_child(&self, child: &Self) {
        let child = SsrNode::Element(child.clone());
        self.children.get_mut().retain(|node| *node != child);
    }
}

impl SsrElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Default::default(),
            children: Default::default(),
        }
    }

    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut attributes = self.attributes.get_mut();
        let (k, v) = (key.into(), value.into());
        for (k_prev, v_prev) in attributes.iter_mut() {
            if k_prev == &k {
                *v_prev = Some(v);
                return;
            }
        }
        attributes.push((k, Some(v)));
    }

    pub fn get_attribute(&self, key: impl AsRef<str>) -> Option<String> {
        self.attributes
            .get()
            .iter()
            .find(|(k, _)| k == key.as_ref())
            .and_then(|(_, v)| v.clone())
    }

    pub fn append_node(&self, node: impl Into<SsrNode>) {
        self.children.get_mut().push(node.into());
    }

    pub fn children(&self) -> Vec<SsrNode> {
        self.children.get().clone()
    }

    pub fn child_elements(&self) -> Vec<SsrElement> {
        self.children
            .get()
            .iter()
            .filter_map(|node| match node {
                SsrNode::Element(el) => Some(el.clone()),
                SsrNode::Text(_) => None,
            })
            .collect()
    }

    /// The html of this element's children.
    pub fn inner_html(&self) -> String {
        self.children
            .get()
            .iter()
            .map(|node| match node {
                SsrNode::Element(el) => el.html_string(),
                SsrNode::Text(text) => text.text.get().to_string(),
            })
            .collect::<Vec<_>>()
            .join("")
    }

    pub fn html_string(&self) -> String {
        // Only certain nodes can be "void" - which means written as <tag /> when
        // the node contains no children. Writing non-void nodes in void notation
        // does some spooky things to the DOM at parse-time.
        fn tag_is_voidable(tag: &str) -> bool {
            matches!(
                tag,
                "area"
                    | "base"
                    | "br"
                    | "col"
                    | "hr"
                    | "img"
                    | "input"
                    | "link"
                    | "meta"
                    | "param"
                    | "command"
                    | "keygen"
                    | "source"
            )
        }

        let name = &self.name;
        let atts = self
            .attributes
            .get()
            .iter()
            .map(|(key, may_val)| match may_val {
                Some(val) => format!(r#" {key}="{val}""#),
                None => format!(" {key}"),
            })
            .collect::<String>();
        let is_empty = self.children.get().is_empty();
        if is_empty && tag_is_voidable(name) {
            format!("<{name}{atts} />")
        } else {
            format!("<{name}{atts}>{}</{name}>", self.inner_html())
        }
    }
}

/// A title held in memory.
#[derive(Clone, Default)]
pub struct SsrTitle {
    title: Shared<String>,
}

impl SsrTitle {
    pub fn get(&self) -> String {
        self.title.get().clone()
    }
}

impl ViewTitle for SsrTitle {
    fn set_title(&self, title: &str) {
        self.title.set(title.to_owned());
    }
}

/// An in-memory [`Document`].
///
/// Clones are handles to the same document. Every mutation is broadcast to
/// all live subscribers.
pub struct SsrDocument<M> {
    roots: Shared<Vec<M>>,
    title: Shared<String>,
    subscribers: Shared<Vec<async_channel::Sender<DocumentEvent<M>>>>,
}

impl<M> Clone for SsrDocument<M> {
    fn clone(&self) -> Self {
        Self {
            roots: self.roots.clone(),
            title: self.title.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<M: Model> SsrDocument<M> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            roots: Shared::new(vec![]),
            title: Shared::new(title.into()),
            subscribers: Shared::new(vec![]),
        }
    }

    pub fn with_roots(self, roots: impl IntoIterator<Item = M>) -> Self {
        self.roots.get_mut().extend(roots);
        self
    }

    /// Append a root. Returns `false` if a root with the same id is already
    /// present.
    pub fn add_root(&self, model: M) -> bool {
        {
            let mut roots = self.roots.get_mut();
            if roots.iter().any(|root| root.id() == model.id()) {
                return false;
            }
            roots.push(model.clone());
        }
        self.emit(DocumentEvent::RootAdded(model));
        true
    }

    /// Remove the root with the given id, returning it.
    pub fn remove_root(&self, model_id: &str) -> Option<M> {
        let model = {
            let mut roots = self.roots.get_mut();
            let i = roots.iter().position(|root| root.id() == model_id)?;
            roots.remove(i)
        };
        self.emit(DocumentEvent::RootRemoved(model.clone()));
        Some(model)
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        if *self.title.get() == title {
            return;
        }
        self.title.set(title.clone());
        self.emit(DocumentEvent::TitleChanged(title));
    }

    /// Announce that a property of `model` changed.
    pub fn notify_changed(&self, model: M, attr: impl Into<String>) {
        self.emit(DocumentEvent::ModelChanged {
            model,
            attr: attr.into(),
        });
    }

    fn emit(&self, event: DocumentEvent<M>) {
        self.subscribers
            .get_mut()
            .retain(|tx| tx.try_send(event.clone()).is_ok());
    }
}

impl<M: Model> Document for SsrDocument<M> {
    type Model = M;
    type Changes = async_channel::Receiver<DocumentEvent<M>>;

    fn roots(&self) -> Vec<M> {
        self.roots.get().clone()
    }

    fn title(&self) -> String {
        self.title.get().clone()
    }

    fn changes(&self) -> Self::Changes {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.get_mut().push(tx);
        rx
    }
}
