//! Box Metric Resolver
//!
//! Element width/height under a caller-chosen inclusion of padding, border
//! and margin, reconciled against what the measured value already includes.
//!
//! Read path: the bounding rect (padding and border inclusive) when the
//! element has a layout box and no pseudo-element is asked for; otherwise
//! the computed `width`/`height` (`auto` falls back to the rounded client
//! size, which includes padding). `border-box` sizing means the raw value
//! already holds padding and border. Deltas are then added or subtracted,
//! the result is floored at 0, and only then are margins added.
//!
//! Write path: the inverse adjustment, assigned to the inline style. The
//! viewport and the document cannot be resized; writes to them do nothing.

use crate::value::css_px;
use domkit_dom::{ComputedStyle, Document, NodeId};

/// Which box layers a size accounts for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InclusionPolicy {
    pub padding: bool,
    pub border: bool,
    pub margin: bool,
}

impl InclusionPolicy {
    /// Content box only
    pub const CONTENT: Self = Self::new(false, false, false);

    /// Padding and border, like `offsetWidth`
    pub const BORDER_BOX: Self = Self::new(true, true, false);

    pub const fn new(padding: bool, border: bool, margin: bool) -> Self {
        Self { padding, border, margin }
    }

    /// All eight combinations
    pub fn all() -> impl Iterator<Item = Self> {
        (0u8..8).map(|bits| Self::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0))
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// CSS dimension property
    pub fn dimension(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }

    /// Start and end edge names
    pub fn edges(self) -> (&'static str, &'static str) {
        match self {
            Self::Horizontal => ("left", "right"),
            Self::Vertical => ("top", "bottom"),
        }
    }
}

/// What is being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTarget {
    /// The viewport (`window`)
    Window,
    /// The whole document
    Document,
    Element(NodeId),
}

impl From<NodeId> for SizeTarget {
    fn from(element: NodeId) -> Self {
        Self::Element(element)
    }
}

/// `box-sizing` mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSizing {
    ContentBox,
    BorderBox,
}

impl BoxSizing {
    pub fn of(style: &ComputedStyle) -> Self {
        if style.get("box-sizing") == "border-box" {
            Self::BorderBox
        } else {
            Self::ContentBox
        }
    }
}

/// Padding, border and margin sums along one axis (px; unparsable = 0)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisMetrics {
    pub padding: f64,
    pub border: f64,
    pub margin: f64,
}

impl AxisMetrics {
    pub fn resolve(style: &ComputedStyle, axis: Axis) -> Self {
        let (start, end) = axis.edges();
        let sum = |prefix: &str, suffix: &str| {
            css_px(style.get(&format!("{prefix}{start}{suffix}"))) + css_px(style.get(&format!("{prefix}{end}{suffix}")))
        };
        Self {
            padding: sum("padding-", ""),
            border: sum("border-", "-width"),
            margin: sum("margin-", ""),
        }
    }
}

fn client_size(doc: &Document, element: NodeId, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => doc.client_width(element),
        Axis::Vertical => doc.client_height(element),
    }
}

/// Largest of the root/body scroll, offset and client sizes
fn document_size(doc: &Document, axis: Axis) -> f64 {
    let html = doc.document_element();
    let body = doc.body();
    let (scroll, offset): (fn(&Document, NodeId) -> f64, fn(&Document, NodeId) -> f64) = match axis {
        Axis::Horizontal => (Document::scroll_width, Document::offset_width),
        Axis::Vertical => (Document::scroll_height, Document::offset_height),
    };

    [
        scroll(doc, body),
        scroll(doc, html),
        offset(doc, body),
        offset(doc, html),
        client_size(doc, html, axis),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Measure `target` along `axis` under `policy`
pub fn element_size(
    doc: &Document,
    target: SizeTarget,
    axis: Axis,
    pseudo: Option<&str>,
    policy: InclusionPolicy,
) -> f64 {
    let element = match target {
        SizeTarget::Window => return client_size(doc, doc.document_element(), axis),
        SizeTarget::Document => return document_size(doc, axis),
        SizeTarget::Element(element) => element,
    };

    let mut includes_padding = false;
    let mut includes_border = false;

    let measured = match pseudo {
        None => doc.bounding_client_rect(element).map(|rect| match axis {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }),
        Some(_) => None,
    };
    if measured.is_some() {
        includes_padding = true;
        includes_border = true;
    }

    if let Some(value) = measured {
        if !policy.margin && includes_padding == policy.padding && includes_border == policy.border {
            return value.max(0.0);
        }
    }

    let style = doc.computed_style(element, pseudo);
    let mut value = match measured {
        Some(value) => value,
        None => {
            let raw = style.get(axis.dimension());
            let value = if raw == "auto" {
                includes_padding = true;
                client_size(doc, element, axis)
            } else {
                css_px(raw)
            };
            if BoxSizing::of(&style) == BoxSizing::BorderBox {
                includes_padding = true;
                includes_border = true;
            }
            value
        }
    };

    let metrics = AxisMetrics::resolve(&style, axis);
    if policy.padding != includes_padding {
        if policy.padding {
            value += metrics.padding;
        } else {
            value -= metrics.padding;
        }
    }
    if policy.border != includes_border {
        if policy.border {
            value += metrics.border;
        } else {
            value -= metrics.border;
        }
    }

    value = value.max(0.0);

    if policy.margin {
        value += metrics.margin;
    }
    value
}

/// Assign the size of `target` along `axis`, given a value measured under `policy`
pub fn set_element_size(doc: &mut Document, target: SizeTarget, axis: Axis, value: f64, policy: InclusionPolicy) {
    let SizeTarget::Element(element) = target else {
        tracing::trace!("Ignoring {} write to {:?}", axis.dimension(), target);
        return;
    };

    let style = doc.computed_style(element, None);
    let includes_padding_and_border = BoxSizing::of(&style) == BoxSizing::BorderBox;
    let metrics = AxisMetrics::resolve(&style, axis);

    let mut value = value;
    if policy.margin {
        value -= metrics.margin;
    }
    if policy.padding != includes_padding_and_border {
        if policy.padding {
            value -= metrics.padding;
        } else {
            value += metrics.padding;
        }
    }
    if policy.border != includes_padding_and_border {
        if policy.border {
            value -= metrics.border;
        } else {
            value += metrics.border;
        }
    }

    let value = value.max(0.0);
    doc.set_style_property(element, axis.dimension(), &format!("{value}px"));
}

/// Width of an element, the viewport or the document
pub fn get_element_width(doc: &Document, target: impl Into<SizeTarget>, policy: InclusionPolicy) -> f64 {
    element_size(doc, target.into(), Axis::Horizontal, None, policy)
}

/// Height of an element, the viewport or the document
pub fn get_element_height(doc: &Document, target: impl Into<SizeTarget>, policy: InclusionPolicy) -> f64 {
    element_size(doc, target.into(), Axis::Vertical, None, policy)
}

/// Width of a pseudo-element (`::before`, `::after`)
pub fn get_pseudo_element_width(doc: &Document, element: NodeId, pseudo: &str, policy: InclusionPolicy) -> f64 {
    element_size(doc, SizeTarget::Element(element), Axis::Horizontal, Some(pseudo), policy)
}

/// Height of a pseudo-element
pub fn get_pseudo_element_height(doc: &Document, element: NodeId, pseudo: &str, policy: InclusionPolicy) -> f64 {
    element_size(doc, SizeTarget::Element(element), Axis::Vertical, Some(pseudo), policy)
}

pub fn set_element_width(doc: &mut Document, target: impl Into<SizeTarget>, value: f64, policy: InclusionPolicy) {
    set_element_size(doc, target.into(), Axis::Horizontal, value, policy);
}

pub fn set_element_height(doc: &mut Document, target: impl Into<SizeTarget>, value: f64, policy: InclusionPolicy) {
    set_element_size(doc, target.into(), Axis::Vertical, value, policy);
}
