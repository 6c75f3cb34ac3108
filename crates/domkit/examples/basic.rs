//! Example: Basic usage of domkit

use domkit::css::{InclusionPolicy, get_element_height, get_element_width};
use domkit::dom::{AttrValue, create_element};
use domkit::scroll::{get_scroll_horz, rtl_scroll_type, set_scroll_horz};
use domkit::{Config, Document, ElementGeometry, NodeOperations};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::default();
    let mut doc = Document::with_config(config);
    println!("domkit v{} initialized", domkit::VERSION);

    let body = doc.body();
    let panel = create_element(
        &mut doc,
        "div",
        [
            ("dir", "rtl".into()),
            ("css", AttrValue::css([("width", "320px"), ("height", "200px"), ("padding", "12px"), ("border", "1px solid")])),
        ],
        [],
    )?;
    doc.tree_mut().append_child(body, panel)?;

    for policy in [InclusionPolicy::CONTENT, InclusionPolicy::BORDER_BOX, InclusionPolicy::new(true, true, true)] {
        let width = get_element_width(&doc, panel, policy);
        let height = get_element_height(&doc, panel, policy);
        println!("{policy:?}: {width}x{height}");
    }

    doc.set_layout(
        panel,
        Some(ElementGeometry { scroll_width: 1200.0, client_width: 344.0, offset_width: 346.0, ..Default::default() }),
    );
    tracing::info!("RTL scroll type: {}", rtl_scroll_type(&doc));

    set_scroll_horz(&mut doc, panel, 100.0, None);
    println!(
        "native scrollLeft {} / logical horizontal {}",
        doc.scroll_left(panel),
        get_scroll_horz(&doc, panel, None)
    );
    Ok(())
}
