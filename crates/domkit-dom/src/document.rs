//! Document - High-level document API
//!
//! Owns the tree together with everything the browser would otherwise
//! provide: computed style, layout geometry, native scroll offsets, the
//! viewport, feature-detection results and event listeners.

use crate::box_model::{BoxDimensions, EdgeSizes};
use crate::config::{Config, RtlScrollType};
use crate::events::{EventListener, ListenerOptions, ListenerStore};
use crate::geometry::{DOMRect, ElementGeometry};
use crate::node::pseudo_key;
use crate::selector::ElementQuery;
use crate::style::{
    ComputedStyle, INHERITED, PercentBasis, StyleDeclaration, initial_value, length_to_px, parse_percentage,
};
use crate::{DomTree, NodeId};
use std::cell::OnceCell;
use std::collections::HashMap;

/// Viewport (the window)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Horizontal page scroll (`window.pageXOffset`)
    pub page_x_offset: f64,
    /// Vertical page scroll (`window.pageYOffset`)
    pub page_y_offset: f64,
}

/// Feature-detection results, each computed at most once per document
#[derive(Debug, Default)]
pub struct Features {
    rtl_scroll_type: OnceCell<RtlScrollType>,
    scoped_selector: OnceCell<bool>,
}

impl Features {
    /// Detected RTL scroll convention, if detection already ran
    pub fn rtl_scroll_type(&self) -> Option<RtlScrollType> {
        self.rtl_scroll_type.get().copied()
    }

    /// Detected RTL scroll convention, running `detect` on first use
    pub fn rtl_scroll_type_or_init(&self, detect: impl FnOnce() -> RtlScrollType) -> RtlScrollType {
        *self.rtl_scroll_type.get_or_init(detect)
    }

    /// Whether `:scope` selectors work, if detection already ran
    pub fn scoped_selector(&self) -> Option<bool> {
        self.scoped_selector.get().copied()
    }

    pub fn scoped_selector_or_init(&self, detect: impl FnOnce() -> bool) -> bool {
        *self.scoped_selector.get_or_init(detect)
    }
}

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    config: Config,
    viewport: Viewport,
    features: Features,
    pub(crate) listeners: ListenerStore,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document for the default platform profile
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn with_config(config: Config) -> Self {
        let mut tree = DomTree::new();
        tree.scope_selector = config.scope_selector;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.link(NodeId::ROOT, html, None);
        tree.link(html, head, None);
        tree.link(html, body, None);

        let viewport = Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            page_x_offset: 0.0,
            page_y_offset: 0.0,
        };

        Self {
            tree,
            config,
            viewport,
            features: Features::default(),
            listeners: ListenerStore::default(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text_node(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    pub fn create_document_fragment(&mut self) -> NodeId {
        self.tree.create_fragment()
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(id)
    }

    // ---- style ----

    /// Set an inline style property (`el.style[name] = value`); empty clears
    pub fn set_style_property(&mut self, element: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.tree.element_mut(element) {
            elem.set_style_property(name, value);
        }
    }

    /// Inline style value (`el.style[name]`)
    pub fn style_property(&self, element: NodeId, name: &str) -> Option<&str> {
        self.tree
            .element(element)
            .and_then(|e| e.style.get_property_value(name))
    }

    /// Replace the stylesheet-derived declarations of an element
    pub fn set_cascaded_style(&mut self, element: NodeId, css_text: &str) {
        if let Some(elem) = self.tree.element_mut(element) {
            elem.cascaded = StyleDeclaration::parse(css_text);
        }
    }

    /// Replace the declarations of a pseudo-element (`::before`, `::after`)
    pub fn set_pseudo_style(&mut self, element: NodeId, pseudo: &str, css_text: &str) {
        if let Some(elem) = self.tree.element_mut(element) {
            elem.pseudo.insert(pseudo_key(pseudo), StyleDeclaration::parse(css_text));
        }
    }

    /// `getComputedStyle(el, pseudo)`
    pub fn computed_style(&self, element: NodeId, pseudo: Option<&str>) -> ComputedStyle {
        let Some(elem) = self.tree.element(element) else {
            return ComputedStyle::default();
        };
        let pseudo = pseudo.filter(|p| !p.trim().is_empty());

        // Pseudo-elements inherit from their originating element
        let (inherit_from, declarations): (Option<ComputedStyle>, Vec<&StyleDeclaration>) = match pseudo {
            Some(p) => (
                Some(self.computed_style(element, None)),
                elem.pseudo_style(p).into_iter().collect(),
            ),
            None => (
                self.tree
                    .parent_element(element)
                    .map(|parent| self.computed_style(parent, None)),
                vec![&elem.cascaded, &elem.style],
            ),
        };

        let mut values: HashMap<String, String> = HashMap::new();
        if let Some(parent) = &inherit_from {
            for name in INHERITED {
                values.insert(name.to_string(), parent.get(name).to_string());
            }
        }

        if pseudo.is_none() {
            if let Some(dir) = elem.get_attr("dir").map(|d| d.trim().to_ascii_lowercase()) {
                if dir == "rtl" || dir == "ltr" {
                    values.insert("direction".to_string(), dir);
                }
            }
        }

        for declaration in declarations {
            for (name, value) in declaration.iter() {
                values.insert(name.to_string(), value.to_string());
            }
        }

        let root_font = self.config.root_font_size;
        let parent_font = inherit_from
            .as_ref()
            .and_then(|s| length_to_px(s.get("font-size"), root_font, root_font))
            .unwrap_or(root_font);
        let font_size = values
            .get("font-size")
            .and_then(|v| {
                length_to_px(v, parent_font, root_font)
                    .or_else(|| parse_percentage(v).map(|p| parent_font * p / 100.0))
            })
            .unwrap_or(parent_font);
        values.insert("font-size".to_string(), format_px(font_size));

        for value in values.values_mut() {
            if value.ends_with("em") {
                if let Some(px) = length_to_px(value, font_size, root_font) {
                    *value = format_px(px);
                }
            }
        }

        if values.values().any(|v| parse_percentage(v).is_some()) {
            // Pseudo-elements resolve against their originating element
            let block = match pseudo {
                Some(_) => Some(element),
                None => self.tree.parent_element(element),
            };
            let basis = match block {
                Some(block) => self.percentage_basis_size(block),
                None if element == self.html_element => (Some(self.viewport.width), Some(self.viewport.height)),
                None => (None, None),
            };
            for (name, value) in values.iter_mut() {
                let (Some(kind), Some(percent)) = (PercentBasis::of(name), parse_percentage(value)) else {
                    continue;
                };
                *value = match kind.pick(basis) {
                    Some(size) => format_px(size * percent / 100.0),
                    None => initial_value(name).to_string(),
                };
            }
        }

        ComputedStyle::from_values(values)
    }

    /// Content-box size of a containing block, per axis when known.
    /// An `auto` width fills the enclosing block; an `auto` height is unknown.
    fn percentage_basis_size(&self, block: NodeId) -> (Option<f64>, Option<f64>) {
        let style = self.computed_style(block, None);
        let px = |name: &str| length_to_px(style.get(name), 0.0, 0.0).unwrap_or(0.0);

        if let Some(geometry) = self.geometry(block) {
            return (
                Some((geometry.client_width - px("padding-left") - px("padding-right")).max(0.0)),
                Some((geometry.client_height - px("padding-top") - px("padding-bottom")).max(0.0)),
            );
        }
        if block == self.html_element {
            return (Some(self.viewport.width), Some(self.viewport.height));
        }

        let border_box = style.get("box-sizing") == "border-box";
        let content = |size: f64, edges: [&str; 4]| {
            if border_box {
                (size - edges.iter().map(|e| px(e)).sum::<f64>()).max(0.0)
            } else {
                size
            }
        };
        let width = match length_to_px(style.get("width"), 0.0, 0.0) {
            Some(w) => Some(content(w, ["padding-left", "padding-right", "border-left-width", "border-right-width"])),
            None => self
                .tree
                .parent_element(block)
                .and_then(|parent| self.percentage_basis_size(parent).0),
        };
        let height = length_to_px(style.get("height"), 0.0, 0.0)
            .map(|h| content(h, ["padding-top", "padding-bottom", "border-top-width", "border-bottom-width"]));
        (width, height)
    }

    /// Whether the element's computed direction is `rtl`
    pub fn is_rtl(&self, element: NodeId) -> bool {
        self.computed_style(element, None).is_rtl()
    }

    // ---- geometry ----

    /// Supply (or clear) laid-out geometry for an element
    pub fn set_layout(&mut self, element: NodeId, layout: Option<ElementGeometry>) {
        if let Some(elem) = self.tree.element_mut(element) {
            elem.layout = layout;
        }
    }

    /// Layout geometry in page coordinates; `None` when the element has no box
    pub fn geometry(&self, element: NodeId) -> Option<ElementGeometry> {
        let elem = self.tree.element(element)?;
        if let Some(layout) = elem.layout {
            return Some(layout);
        }
        if !self.tree.is_connected(element) || self.is_display_none(element) {
            return None;
        }

        let style = self.computed_style(element, None);
        let root_font = self.config.root_font_size;
        let font_size = length_to_px(style.get("font-size"), root_font, root_font).unwrap_or(root_font);
        let width = length_to_px(style.get("width"), font_size, root_font)?;
        let height = length_to_px(style.get("height"), font_size, root_font)?;

        let padding = EdgeSizes::from_style(&style, "padding-", "");
        let border = EdgeSizes::from_style(&style, "border-", "-width");
        let margin = EdgeSizes::from_style(&style, "margin-", "");

        let (content_width, content_height) = if style.get("box-sizing") == "border-box" {
            (
                (width - padding.horizontal() - border.horizontal()).max(0.0),
                (height - padding.vertical() - border.vertical()).max(0.0),
            )
        } else {
            (width.max(0.0), height.max(0.0))
        };

        let offset = |name: &str| length_to_px(style.get(name), font_size, root_font).unwrap_or(0.0);
        let content = DOMRect::from_xywh(
            offset("left") + margin.left + border.left + padding.left,
            offset("top") + margin.top + border.top + padding.top,
            content_width,
            content_height,
        );

        let text_chars: usize = self
            .tree
            .children(element)
            .filter_map(|(_, node)| node.as_text())
            .map(|text| text.chars().count())
            .sum();
        let advance = text_chars as f64 * font_size * self.config.glyph_advance_em;

        let dims = BoxDimensions { content, padding, border, margin };
        Some(dims.to_geometry(advance))
    }

    fn is_display_none(&self, element: NodeId) -> bool {
        let mut cursor = Some(element);
        while let Some(node) = cursor {
            let declared = self.tree.element(node).and_then(|e| {
                e.style
                    .get_property_value("display")
                    .or_else(|| e.cascaded.get_property_value("display"))
            });
            if declared == Some("none") {
                return true;
            }
            cursor = self.tree.parent_element(node);
        }
        false
    }

    /// `getBoundingClientRect()`, relative to the viewport
    pub fn bounding_client_rect(&self, element: NodeId) -> Option<DOMRect> {
        let rect = self.geometry(element)?.bounding_client_rect();
        Some(rect.translated(-self.viewport.page_x_offset, -self.viewport.page_y_offset))
    }

    /// `getClientRects()`; empty when the element has no layout box
    pub fn client_rects(&self, element: NodeId) -> Vec<DOMRect> {
        self.bounding_client_rect(element).into_iter().collect()
    }

    fn metric(&self, element: NodeId, pick: impl Fn(&ElementGeometry) -> f64) -> f64 {
        self.geometry(element).map_or(0.0, |g| pick(&g).round())
    }

    fn uses_viewport_size(&self, element: NodeId) -> bool {
        element == self.html_element
            && self.tree.element(element).is_some_and(|e| e.layout.is_none())
    }

    /// `clientWidth` (rounded); the root element reports the viewport
    pub fn client_width(&self, element: NodeId) -> f64 {
        if self.uses_viewport_size(element) {
            return self.viewport.width.round();
        }
        self.metric(element, |g| g.client_width)
    }

    /// `clientHeight` (rounded); the root element reports the viewport
    pub fn client_height(&self, element: NodeId) -> f64 {
        if self.uses_viewport_size(element) {
            return self.viewport.height.round();
        }
        self.metric(element, |g| g.client_height)
    }

    pub fn offset_width(&self, element: NodeId) -> f64 {
        self.metric(element, |g| g.offset_width)
    }

    pub fn offset_height(&self, element: NodeId) -> f64 {
        self.metric(element, |g| g.offset_height)
    }

    pub fn scroll_width(&self, element: NodeId) -> f64 {
        if self.uses_viewport_size(element) {
            return self.metric(element, |g| g.scroll_width).max(self.client_width(element));
        }
        self.metric(element, |g| g.scroll_width)
    }

    pub fn scroll_height(&self, element: NodeId) -> f64 {
        if self.uses_viewport_size(element) {
            return self.metric(element, |g| g.scroll_height).max(self.client_height(element));
        }
        self.metric(element, |g| g.scroll_height)
    }

    // ---- native scroll ----

    fn max_scroll_left(&self, element: NodeId) -> f64 {
        (self.scroll_width(element) - self.client_width(element)).max(0.0)
    }

    fn max_scroll_top(&self, element: NodeId) -> f64 {
        (self.scroll_height(element) - self.client_height(element)).max(0.0)
    }

    /// Native `scrollLeft`, in the platform's RTL convention
    pub fn scroll_left(&self, element: NodeId) -> f64 {
        let Some(elem) = self.tree.element(element) else {
            return 0.0;
        };
        match elem.scroll.left {
            Some(left) => left,
            // Untouched RTL boxes start at the right edge
            None if self.config.rtl_scroll == RtlScrollType::Default && self.is_rtl(element) => {
                self.max_scroll_left(element)
            }
            None => 0.0,
        }
    }

    /// Assign native `scrollLeft`, clamped the way the platform clamps it
    pub fn set_scroll_left(&mut self, element: NodeId, value: f64) {
        let max = self.max_scroll_left(element);
        let (min, max) = if self.config.rtl_scroll == RtlScrollType::Negative && self.is_rtl(element) {
            (-max, 0.0)
        } else {
            (0.0, max)
        };
        let value = if value.is_nan() { 0.0 } else { value.clamp(min, max) };

        if let Some(elem) = self.tree.element_mut(element) {
            elem.scroll.left = Some(value);
        }
    }

    pub fn scroll_top(&self, element: NodeId) -> f64 {
        self.tree.element(element).map_or(0.0, |e| e.scroll.top)
    }

    pub fn set_scroll_top(&mut self, element: NodeId, value: f64) {
        let max = self.max_scroll_top(element);
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, max) };
        if let Some(elem) = self.tree.element_mut(element) {
            elem.scroll.top = value;
        }
    }

    // ---- listeners ----

    /// `addEventListener`; returns false when the same listener is already registered
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: EventListener,
        options: impl Into<ListenerOptions>,
    ) -> bool {
        self.listeners.add(target, event_type, listener, options.into())
    }

    /// `removeEventListener`; returns whether a registration was removed
    pub fn remove_event_listener(&mut self, target: NodeId, event_type: &str, listener: &EventListener, capture: bool) -> bool {
        self.listeners.remove(target, event_type, listener, capture)
    }

    /// Number of listeners registered for a type on a target
    pub fn listener_count(&self, target: NodeId, event_type: &str) -> usize {
        self.listeners.count(target, event_type)
    }
}

fn format_px(value: f64) -> String {
    format!("{value}px")
}
