//! Box metric resolver scenarios

use domkit_css::{
    InclusionPolicy, css_px, get_element_height, get_element_width, get_pseudo_element_width,
    set_element_height, set_element_width,
};
use domkit_dom::{Document, ElementGeometry, NodeId, NodeOperations};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn attached(doc: &mut Document, css: &str) -> NodeId {
    let el = doc.create_element("div");
    let body = doc.body();
    doc.tree_mut().append_child(body, el).unwrap();
    doc.set_cascaded_style(el, css);
    el
}

#[test]
fn test_auto_pseudo_width_uses_client_width() {
    let mut doc = Document::new();
    let el = attached(&mut doc, "");
    doc.set_layout(el, Some(ElementGeometry { client_width: 50.0, ..Default::default() }));
    doc.set_pseudo_style(el, "::before", "box-sizing: content-box; padding-left: 5px; padding-right: 5px");

    let width = get_pseudo_element_width(&doc, el, "::before", InclusionPolicy::CONTENT);
    assert!(approx_eq(width, 40.0), "{width}");
}

#[test]
fn test_bounding_rect_path_subtracts_padding_and_border() {
    let mut doc = Document::new();
    let el = attached(&mut doc, "padding: 0 4px; border-left-width: 1px; border-right-width: 1px");
    doc.set_layout(el, Some(ElementGeometry { offset_width: 120.0, ..Default::default() }));

    let width = get_element_width(&doc, el, InclusionPolicy::CONTENT);
    assert!(approx_eq(width, 110.0), "{width}");
}

#[test]
fn test_read_then_write_round_trip() {
    for sizing in ["content-box", "border-box"] {
        for policy in InclusionPolicy::all() {
            let mut doc = Document::new();
            let css = format!(
                "box-sizing: {sizing}; width: 120.5px; height: 40px; padding: 3px 7px; border: 2px solid; margin: 4px 9px"
            );
            let el = attached(&mut doc, &css);
            let before_height = doc.computed_style(el, None).get("height").to_string();

            let width = get_element_width(&doc, el, policy);
            set_element_width(&mut doc, el, width, policy);
            let height = get_element_height(&doc, el, policy);
            set_element_height(&mut doc, el, height, policy);

            let style = doc.computed_style(el, None);
            assert!(
                approx_eq(css_px(style.get("width")), 120.5),
                "{sizing} {policy:?}: {}",
                style.get("width")
            );
            assert_eq!(style.get("height"), before_height, "{sizing} {policy:?}");
        }
    }
}

#[test]
fn test_zero_deltas_make_policy_irrelevant() {
    let mut doc = Document::new();
    let el = attached(&mut doc, "width: 64px; height: 16px");

    for policy in InclusionPolicy::all() {
        assert!(approx_eq(get_element_width(&doc, el, policy), 64.0), "{policy:?}");
        assert!(approx_eq(get_element_height(&doc, el, policy), 16.0), "{policy:?}");
    }
}

#[test]
fn test_negative_results_clamp_to_zero() {
    let mut doc = Document::new();
    let el = attached(&mut doc, "padding: 0 30px");
    doc.set_layout(el, Some(ElementGeometry { offset_width: 20.0, ..Default::default() }));

    assert_eq!(get_element_width(&doc, el, InclusionPolicy::CONTENT), 0.0);

    set_element_width(&mut doc, el, 10.0, InclusionPolicy::new(true, false, false));
    assert_eq!(doc.style_property(el, "width"), Some("0px"));
}

#[test]
fn test_margins_added_after_clamp() {
    let mut doc = Document::new();
    let el = attached(&mut doc, "padding: 0 30px; margin: 0 5px");
    doc.set_layout(el, Some(ElementGeometry { offset_width: 20.0, ..Default::default() }));

    let width = get_element_width(&doc, el, InclusionPolicy::new(false, false, true));
    assert!(approx_eq(width, 10.0), "{width}");
}

#[test]
fn test_unparsable_raw_size_is_zero() {
    let mut doc = Document::new();
    let el = attached(&mut doc, "");
    doc.set_pseudo_style(el, "::after", "width: calc(1px + 2px); padding-left: 3px");

    let width = get_pseudo_element_width(&doc, el, "::after", InclusionPolicy::new(true, false, false));
    assert!(approx_eq(width, 3.0), "{width}");
}
