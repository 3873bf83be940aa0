//! Server-side rendering demo.
use demo::{Note, NoteBuilder, sample_document};
use futures::executor::LocalPool;
use mogwai_embed::{
    prelude::*,
    ssr::{SsrElement, SsrTitle},
};

fn main() -> anyhow::Result<()> {
    simplelog::SimpleLogger::init(simplelog::LevelFilter::Info, simplelog::Config::default())?;

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let doc = sample_document();
    let container = SsrElement::new("main");
    let title = SsrTitle::default();
    let embedded = pool.run_until(
        Embed::<Note, NoteBuilder<SsrElement>>::new(container.clone(), NoteBuilder::default())
            .with_title(title.clone())
            .run(doc.clone(), &spawner),
    )?;
    let init_html_string = container.html_string();
    let init_title = title.get();

    doc.add_root(Note::new("three", "A note added after embedding."));
    doc.remove_root("one");
    doc.set_title("Notes, revised");
    pool.run_until_stalled();

    println!("init ({init_title}): {init_html_string}");
    println!();
    println!("final ({}): {}", title.get(), container.html_string());
    println!("rendered: {:?}", embedded.rendered_ids());
    Ok(())
}
