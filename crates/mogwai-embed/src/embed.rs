//! Binding a document's roots to views.
//!
//! [`Embed`] renders every root of a [`Document`] into a container and then
//! follows the document's changes for as long as the document publishes
//! them:
//!
//! * a root added to the document is rendered in a task of its own, so a
//!   slow construction never holds up the events behind it,
//! * a root removed from the document has its view torn down before the next
//!   event is looked at,
//! * a title change is written to the title target, if one was given.
use std::{marker::PhantomData, pin::pin, rc::Rc};

use anyhow::Context;
use futures::{
    Stream, StreamExt,
    task::{LocalSpawn, LocalSpawnExt},
};

use crate::{
    error::RenderFailure,
    index::{LocalEntry, LocalIndex, ViewIndex},
    model::{Document, DocumentEvent, Model},
    root::RootResolver,
    view::{BuildView, View, ViewElement, ViewTitle},
};

/// The element type views built by `B` render into.
pub type ElementOf<M, B> = <<B as BuildView<M>>::View as View>::Element;

/// Configuration for binding a document to a container.
///
/// ```rust,ignore
/// let embedded = Embed::new(container, builder)
///     .with_roots([("plot", plot_el)])
///     .with_title(window_document)
///     .run(document, &spawner)
///     .await?;
/// ```
pub struct Embed<M: Model, B: BuildView<M>> {
    resolver: RootResolver<ElementOf<M, B>>,
    builder: B,
    title: Option<Rc<dyn ViewTitle>>,
    index: ViewIndex<B::View>,
    failures: Option<async_channel::Sender<RenderFailure>>,
    _model: PhantomData<M>,
}

impl<M: Model, B: BuildView<M>> Embed<M, B> {
    pub fn new(container: ElementOf<M, B>, builder: B) -> Self {
        Self {
            resolver: RootResolver::new(container),
            builder,
            title: None,
            index: ViewIndex::default(),
            failures: None,
            _model: PhantomData,
        }
    }

    /// Map identifiers to the elements their roots should render into.
    ///
    /// Keys are either root ids declared with [`Embed::with_root_ids`] or
    /// model ids.
    pub fn with_roots<K: Into<String>>(
        mut self,
        roots: impl IntoIterator<Item = (K, ElementOf<M, B>)>,
    ) -> Self {
        for (id, element) in roots {
            self.resolver.insert_element(id, element);
        }
        self
    }

    /// Declare root ids by position. The root at position `n` renders into
    /// the element mapped to the `n`th id, when there is one.
    pub fn with_root_ids<K: Into<String>>(mut self, root_ids: impl IntoIterator<Item = K>) -> Self {
        self.resolver
            .set_root_ids(root_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Keep `title` in sync with the document's title.
    pub fn with_title(mut self, title: impl ViewTitle + 'static) -> Self {
        self.title = Some(Rc::new(title));
        self
    }

    /// Publish views into `index` instead of a registry private to this
    /// binding.
    pub fn with_index(mut self, index: ViewIndex<B::View>) -> Self {
        self.index = index;
        self
    }

    /// Report failed renders of roots added after the initial pass.
    pub fn with_failures(mut self, failures: async_channel::Sender<RenderFailure>) -> Self {
        self.failures = Some(failures);
        self
    }

    /// Render every root of `document`, in order, then subscribe to its
    /// changes.
    ///
    /// Each root's view is constructed before the next root is started. The
    /// first construction that fails ends the pass with its error, after the
    /// roots rendered before it have been torn down again.
    ///
    /// Change handling runs on `spawner` for as long as the document's change
    /// stream lasts.
    pub async fn run<D, S>(self, document: D, spawner: &S) -> anyhow::Result<Embedded<B::View>>
    where
        D: Document<Model = M>,
        S: LocalSpawn + Clone + 'static,
    {
        let Embed {
            resolver,
            builder,
            title,
            index,
            failures,
            _model,
        } = self;
        let binding = Binding {
            resolver: Rc::new(resolver),
            builder,
            index,
            local: LocalIndex::default(),
            _model,
        };

        let roots = document.roots();
        log::debug!("rendering {} roots", roots.len());
        let mut views = Vec::with_capacity(roots.len());
        for (n, model) in roots.iter().enumerate() {
            match binding.render_model(model, Some(n)).await {
                Ok(view) => views.push(view),
                Err(e) => {
                    log::debug!("initial pass failed at root {n}, unrendering {n} roots");
                    for rendered in &roots[..n] {
                        binding.unrender_model(rendered.id());
                    }
                    return Err(e);
                }
            }
        }

        if let Some(title) = title.as_ref() {
            title.set_title(&document.title());
        }

        let changes = document.changes();
        let subscriber = Subscriber {
            binding: binding.clone(),
            document,
            title,
            failures,
            spawner: spawner.clone(),
        };
        spawner
            .spawn_local(subscriber.run(changes))
            .context("could not spawn the document change subscriber")?;

        Ok(Embedded {
            views,
            local: binding.local,
            index: binding.index,
        })
    }
}

/// A document bound to a container.
pub struct Embedded<V: View> {
    views: Vec<V>,
    local: LocalIndex<V>,
    index: ViewIndex<V>,
}

impl<V: View> Embedded<V> {
    /// Views rendered by the initial pass, in root order.
    pub fn views(&self) -> &[V] {
        &self.views
    }

    pub fn into_views(self) -> Vec<V> {
        self.views
    }

    /// Views this binding has rendered right now, in the order they were
    /// rendered.
    pub fn rendered(&self) -> Vec<V> {
        self.local.views()
    }

    /// Model ids of [`Embedded::rendered`].
    pub fn rendered_ids(&self) -> Vec<String> {
        self.local.ids()
    }

    /// The view this binding currently renders for `model_id`.
    pub fn get(&self, model_id: &str) -> Option<V> {
        self.local.get(model_id)
    }

    /// The registry this binding publishes into.
    pub fn index(&self) -> &ViewIndex<V> {
        &self.index
    }
}

struct Binding<M: Model, B: BuildView<M>> {
    resolver: Rc<RootResolver<ElementOf<M, B>>>,
    builder: B,
    index: ViewIndex<B::View>,
    local: LocalIndex<B::View>,
    _model: PhantomData<M>,
}

impl<M: Model, B: BuildView<M>> Clone for Binding<M, B> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            builder: self.builder.clone(),
            index: self.index.clone(),
            local: self.local.clone(),
            _model: PhantomData,
        }
    }
}

impl<M: Model, B: BuildView<M>> Binding<M, B> {
    async fn render_model(&self, model: &M, n: Option<usize>) -> anyhow::Result<B::View> {
        let model_id = model.id().to_owned();
        if self.index.contains(&model_id) {
            log::warn!("'{model_id}' is already rendered, skipping");
            anyhow::bail!(crate::error::EmbedError::AlreadyRendered { model_id });
        }

        log::debug!("rendering '{model_id}' at {n:?}");
        let placement = self.resolver.resolve(&model_id, n);
        let view = match self.builder.build_view(model).await {
            Ok(view) => view,
            Err(e) => {
                self.resolver.release(placement);
                return Err(e.context(format!("could not build a view for '{model_id}'")));
            }
        };

        // Another render of the same id may have finished while this one
        // was under construction.
        if let Err(e) = self.index.register(&model_id, view.clone()) {
            log::warn!("{e}, discarding the new view");
            view.remove();
            self.resolver.release(placement);
            return Err(e.into());
        }

        if let Some(dom) = view.as_render_to() {
            dom.render_to(&placement.element);
        }
        self.local.insert(LocalEntry {
            model_id,
            view: view.clone(),
            wrapper: placement.created.then_some(placement.element),
        });
        Ok(view)
    }

    fn unrender_model(&self, model_id: &str) {
        let Some(entry) = self.local.remove(model_id) else {
            log::trace!("'{model_id}' is not rendered here");
            return;
        };
        log::debug!("unrendering '{model_id}'");
        entry.view.remove();
        self.index.unregister(model_id);
        if let Some(wrapper) = entry.wrapper {
            self.resolver.container().remove_child(&wrapper);
        }
    }
}

struct Subscriber<D: Document, B: BuildView<D::Model>, S> {
    binding: Binding<D::Model, B>,
    document: D,
    title: Option<Rc<dyn ViewTitle>>,
    failures: Option<async_channel::Sender<RenderFailure>>,
    spawner: S,
}

impl<D, B, S> Subscriber<D, B, S>
where
    D: Document,
    B: BuildView<D::Model>,
    S: LocalSpawn,
{
    async fn run(self, changes: impl Stream<Item = DocumentEvent<D::Model>>) {
        let mut changes = pin!(changes);
        while let Some(event) = changes.next().await {
            self.dispatch(event);
        }
        log::debug!("document change stream ended");
    }

    fn dispatch(&self, event: DocumentEvent<D::Model>) {
        match event {
            DocumentEvent::RootAdded(model) => {
                let n = self
                    .document
                    .roots()
                    .iter()
                    .position(|root| root.id() == model.id());
                let model_id = model.id().to_owned();
                log::debug!("root '{model_id}' added at {n:?}");
                let binding = self.binding.clone();
                let document = self.document.clone();
                let failures = self.failures.clone();
                let task = async move {
                    if let Err(error) = binding.render_model(&model, n).await {
                        report(failures.as_ref(), model.id(), error);
                        return;
                    }
                    // The root may have been removed while its view was under
                    // construction.
                    if !document.roots().iter().any(|root| root.id() == model.id()) {
                        log::debug!("'{}' left the document before it rendered", model.id());
                        binding.unrender_model(model.id());
                    }
                };
                if let Err(e) = self.spawner.spawn_local(task) {
                    report(self.failures.as_ref(), &model_id, e.into());
                }
            }
            DocumentEvent::RootRemoved(model) => {
                log::debug!("root '{}' removed", model.id());
                self.binding.unrender_model(model.id());
            }
            DocumentEvent::TitleChanged(title) => {
                if let Some(target) = self.title.as_ref() {
                    log::debug!("title changed to '{title}'");
                    target.set_title(&title);
                }
            }
            DocumentEvent::ModelChanged { .. } => {}
        }
    }
}

fn report(
    failures: Option<&async_channel::Sender<RenderFailure>>,
    model_id: &str,
    error: anyhow::Error,
) {
    let failure = RenderFailure {
        model_id: model_id.to_owned(),
        error,
    };
    log::error!("{failure}");
    if let Some(tx) = failures {
        if let Err(e) = tx.try_send(failure) {
            log::warn!("could not deliver render failure: {e}");
        }
    }
}
