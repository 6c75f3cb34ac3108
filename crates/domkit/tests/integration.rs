//! Integration tests - helpers working together on one document
//!
//! Platform profile → element creation → measurement → scrolling → events

#![cfg(feature = "full")]

use domkit::css::{AnchorSpec, InclusionPolicy, anchored_position, get_element_width, parse_transition, set_element_width};
use domkit::dom::{AttrValue, create_element};
use domkit::dom_compat::{append, has_scoped_selector, scoped_selector_all, toggle_class};
use domkit::events_sink::{EventsSink, SinkFilter};
use domkit::scroll::{get_scroll_horz, get_scroll_left, rtl_scroll_type, set_scroll_horz};
use domkit::touches::{TouchTapOptions, bind_touch_tap};
use domkit::{
    Config, Document, ElementGeometry, Event, EventDispatcher, EventListener, NodeOperations, RtlScrollType,
    Touch,
};
use std::cell::Cell;
use std::rc::Rc;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// PLATFORM PROFILES
// ============================================================================

#[test]
fn test_platform_profile_from_json() {
    let config: Config = serde_json::from_str(r#"{ "rtl_scroll": "reverse", "scope_selector": false }"#).unwrap();
    let doc = Document::with_config(config);

    assert_eq!(rtl_scroll_type(&doc), RtlScrollType::Reverse);
    assert!(!has_scoped_selector(&doc));
    assert_eq!(doc.viewport().width, 1024.0);
}

// ============================================================================
// CREATION AND MEASUREMENT
// ============================================================================

#[test]
fn test_create_then_measure() {
    let mut doc = Document::new();
    let body = doc.body();
    let card = create_element(
        &mut doc,
        "div",
        [
            ("class", "card".into()),
            ("css", AttrValue::css([("width", "100px"), ("padding", "0 8px"), ("border", "2px solid")])),
        ],
        [],
    )
    .unwrap();
    append(&mut doc, body, [card]).unwrap();

    assert!(approx_eq(get_element_width(&doc, card, InclusionPolicy::CONTENT), 100.0));
    assert!(approx_eq(get_element_width(&doc, card, InclusionPolicy::BORDER_BOX), 120.0));

    set_element_width(&mut doc, card, 60.0, InclusionPolicy::BORDER_BOX);
    assert_eq!(doc.style_property(card, "width"), Some("40px"));

    let pos = anchored_position(&doc, Some(card), "center", "top", None, None);
    assert_eq!(pos.x_spec, AnchorSpec::Center);
    assert!(approx_eq(pos.left, 30.0));
}

#[test]
fn test_transition_of_created_element() {
    let mut doc = Document::new();
    let el = create_element(&mut doc, "div", [("css", "transition: opacity 150ms ease-out".into())], []).unwrap();

    let value = doc.style_property(el, "transition").unwrap_or_default().to_string();
    let transitions = parse_transition(&value);
    assert_eq!(transitions.len(), 1);
    assert_eq!(transitions[0].duration, Some(150.0));
}

// ============================================================================
// SCOPED QUERIES
// ============================================================================

#[test]
fn test_scoped_query_of_markup() {
    for scope_selector in [true, false] {
        let mut doc = Document::with_config(Config { scope_selector, ..Config::default() });
        let body = doc.body();
        let menu = create_element(
            &mut doc,
            "ul",
            [("innerHTML", "<li>a</li><li><ul><li>b</li></ul></li>".into())],
            [],
        )
        .unwrap();
        doc.tree_mut().append_child(body, menu).unwrap();

        let items = scoped_selector_all(&mut doc, menu, "> li").unwrap();
        assert_eq!(items.len(), 2);
        assert!(toggle_class(&mut doc, items[0], "active", None).unwrap());
    }
}

// ============================================================================
// RTL SCROLLING
// ============================================================================

#[test]
fn test_rtl_scroller_on_every_platform() {
    for rtl_scroll in [RtlScrollType::Default, RtlScrollType::Negative, RtlScrollType::Reverse] {
        let mut doc = Document::with_config(Config { rtl_scroll, ..Config::default() });
        let body = doc.body();
        let strip = create_element(&mut doc, "div", [("dir", "rtl".into())], []).unwrap();
        doc.tree_mut().append_child(body, strip).unwrap();
        doc.set_layout(
            strip,
            Some(ElementGeometry { scroll_width: 900.0, client_width: 300.0, offset_width: 300.0, ..Default::default() }),
        );

        assert_eq!(get_scroll_horz(&doc, strip, None), 0.0, "{rtl_scroll}");
        set_scroll_horz(&mut doc, strip, 250.0, None);
        assert_eq!(get_scroll_horz(&doc, strip, None), 250.0, "{rtl_scroll}");
        assert_eq!(get_scroll_left(&doc, strip, None), 350.0, "{rtl_scroll}");
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_sink_and_touch_tap() {
    let mut doc = Document::new();
    let body = doc.body();
    let button = create_element(&mut doc, "button", [("textContent", "Go".into())], []).unwrap();
    doc.tree_mut().append_child(body, button).unwrap();

    let clicks = Rc::new(Cell::new(0));
    let taps = Rc::new(Cell::new(0));

    let mut sink = EventsSink::new();
    let on_click = {
        let clicks = Rc::clone(&clicks);
        EventListener::new(move |_, _| clicks.set(clicks.get() + 1))
    };
    sink.add(&mut doc, body, "click.app", on_click, false);

    let on_tap = {
        let taps = Rc::clone(&taps);
        EventListener::new(move |doc, event| {
            taps.set(taps.get() + 1);
            doc.dispatch_event(&mut Event::bubbling("click", event.target));
        })
    };
    let binding = bind_touch_tap(&mut doc, button, TouchTapOptions { handler: Some(on_tap), ..Default::default() });

    let touch = Touch { identifier: 7, page_x: 40.0, page_y: 12.0 };
    doc.dispatch_event(&mut Event::touch("touchstart", button, vec![touch]));
    doc.dispatch_event(&mut Event::touch("touchend", button, vec![touch]));
    assert_eq!((taps.get(), clicks.get()), (1, 1));

    sink.remove(&mut doc, &SinkFilter::new().event(".app"));
    binding.unbind(&mut doc);

    doc.dispatch_event(&mut Event::touch("touchstart", button, vec![touch]));
    doc.dispatch_event(&mut Event::touch("touchend", button, vec![touch]));
    doc.dispatch_event(&mut Event::bubbling("click", button));
    assert_eq!((taps.get(), clicks.get()), (1, 1));
}
