//! RTL scroll convention detection

use domkit_dom::{Config, Document, DomResult, NodeOperations, RtlScrollType};

const PROBE_STYLE: [(&str, &str); 7] = [
    ("direction", "rtl"),
    ("font-size", "14px"),
    ("width", "1px"),
    ("height", "1px"),
    ("position", "absolute"),
    ("top", "-1000px"),
    ("overflow", "scroll"),
];

/// Classify the platform by scrolling a tiny off-screen RTL box.
///
/// A box that starts scrolled is `default`; one that cannot move off 0 in
/// the positive direction is `negative`; anything else is `reverse`.
pub fn detect_rtl_scroll_type(config: &Config) -> RtlScrollType {
    let mut doc = Document::with_config(config.clone());
    let kind = probe(&mut doc).unwrap_or(RtlScrollType::Reverse);
    tracing::debug!("Detected RTL scroll type: {}", kind);
    kind
}

fn probe(doc: &mut Document) -> DomResult<RtlScrollType> {
    let definer = doc.create_element("div");
    doc.tree_mut().set_attribute(definer, "dir", "rtl")?;
    for (name, value) in PROBE_STYLE {
        doc.set_style_property(definer, name, value);
    }
    doc.tree_mut().set_text_content(definer, "A")?;

    let body = doc.body();
    doc.tree_mut().append_child(body, definer)?;

    let mut kind = RtlScrollType::Reverse;
    if doc.scroll_left(definer) > 0.0 {
        kind = RtlScrollType::Default;
    } else {
        doc.set_scroll_left(definer, 1.0);
        // Some platforms report a positive sub-pixel delta while still
        // scrolling in the negative direction
        if doc.scroll_left(definer).floor() == 0.0 {
            kind = RtlScrollType::Negative;
        }
    }

    doc.tree_mut().remove_child(body, definer)?;
    Ok(kind)
}

/// The document's RTL scroll convention, detected on first use
pub fn rtl_scroll_type(doc: &Document) -> RtlScrollType {
    doc.features()
        .rtl_scroll_type_or_init(|| detect_rtl_scroll_type(doc.config()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rtl_scroll: RtlScrollType) -> Config {
        Config { rtl_scroll, ..Config::default() }
    }

    #[test]
    fn test_detects_each_convention() {
        for kind in [RtlScrollType::Default, RtlScrollType::Negative, RtlScrollType::Reverse] {
            assert_eq!(detect_rtl_scroll_type(&config(kind)), kind);
        }
    }

    #[test]
    fn test_detection_is_memoized_per_document() {
        let doc = Document::with_config(config(RtlScrollType::Default));
        assert_eq!(doc.features().rtl_scroll_type(), None);

        assert_eq!(rtl_scroll_type(&doc), RtlScrollType::Default);
        assert_eq!(doc.features().rtl_scroll_type(), Some(RtlScrollType::Default));
    }

    #[test]
    fn test_probe_leaves_no_trace() {
        let doc = Document::new();
        let nodes_before = doc.tree().len();

        rtl_scroll_type(&doc);

        assert_eq!(doc.tree().len(), nodes_before);
        assert!(doc.tree().child_ids(doc.body()).is_empty());
    }
}
