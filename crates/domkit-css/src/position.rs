//! Element offsets and anchored positions

use crate::box_metrics::{InclusionPolicy, get_element_height, get_element_width};
use crate::value::parse_float;
use domkit_dom::{Document, NodeId};

/// Position of an element relative to the document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementOffset {
    pub top: f64,
    pub left: f64,
}

/// Document offset of an element: its bounding rect plus the page scroll.
/// Elements without a layout box report `{0, 0}`.
pub fn get_element_offset(doc: &Document, element: NodeId) -> ElementOffset {
    if doc.client_rects(element).is_empty() {
        return ElementOffset::default();
    }
    let Some(rect) = doc.bounding_client_rect(element) else {
        return ElementOffset::default();
    };

    let viewport = doc.viewport();
    ElementOffset {
        top: rect.top() + viewport.page_y_offset,
        left: rect.left() + viewport.page_x_offset,
    }
}

/// Anchor point along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorSpec {
    Left,
    Center,
    Right,
    /// `left` in LTR, `right` in RTL
    Start,
    /// `right` in LTR, `left` in RTL
    End,
    Top,
    Bottom,
    /// Percentage of the size (`"25%"` → `Percent(25.0)`)
    Percent(f64),
    /// Fixed pixel offset
    Offset(f64),
}

impl From<&str> for AnchorSpec {
    fn from(spec: &str) -> Self {
        match spec {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            "start" => Self::Start,
            "end" => Self::End,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            s if s.ends_with('%') => Self::Percent(parse_float(s).unwrap_or(0.0)),
            s => Self::Offset(parse_float(s).unwrap_or(0.0)),
        }
    }
}

impl From<f64> for AnchorSpec {
    fn from(offset: f64) -> Self {
        Self::Offset(offset)
    }
}

/// Outer size (padding and border inclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

/// Result of [`anchored_position`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchoredPosition {
    pub left: f64,
    pub top: f64,
    /// Offset from the opposite edge
    pub right: f64,
    pub bottom: f64,
    /// Horizontal anchor with `start`/`end` resolved
    pub x_spec: AnchorSpec,
    pub y_spec: AnchorSpec,
}

/// Anchor point inside an element's outer box.
///
/// `size` and `rtl` are measured from `element` when omitted; with no
/// element either, the size is zero and the direction LTR.
pub fn anchored_position(
    doc: &Document,
    element: Option<NodeId>,
    x_spec: impl Into<AnchorSpec>,
    y_spec: impl Into<AnchorSpec>,
    size: Option<BoxSize>,
    rtl: Option<bool>,
) -> AnchoredPosition {
    let size = size.unwrap_or_else(|| match element {
        Some(el) => BoxSize {
            width: get_element_width(doc, el, InclusionPolicy::BORDER_BOX),
            height: get_element_height(doc, el, InclusionPolicy::BORDER_BOX),
        },
        None => BoxSize::default(),
    });

    let mut rtl = rtl;
    let mut is_rtl = || *rtl.get_or_insert_with(|| element.is_some_and(|el| doc.is_rtl(el)));

    let x_spec = match x_spec.into() {
        AnchorSpec::Start if is_rtl() => AnchorSpec::Right,
        AnchorSpec::Start => AnchorSpec::Left,
        AnchorSpec::End if is_rtl() => AnchorSpec::Left,
        AnchorSpec::End => AnchorSpec::Right,
        spec => spec,
    };

    let (x, x_inverted) = match x_spec {
        AnchorSpec::Right => (size.width, 0.0),
        AnchorSpec::Center => (size.width / 2.0, size.width / 2.0),
        AnchorSpec::Left => (0.0, size.width),
        AnchorSpec::Percent(percent) => {
            let fraction = percent / 100.0;
            if is_rtl() {
                let x = size.width - size.width * fraction;
                (x, size.width - x)
            } else {
                (size.width * fraction, size.width * -fraction)
            }
        }
        AnchorSpec::Offset(offset) => (offset, -offset),
        _ => (0.0, -0.0),
    };

    let y_spec = y_spec.into();
    let (y, y_inverted) = match y_spec {
        AnchorSpec::Bottom => (size.height, 0.0),
        AnchorSpec::Center => (size.height / 2.0, size.height / 2.0),
        AnchorSpec::Top => (0.0, size.height),
        AnchorSpec::Percent(percent) => {
            let fraction = percent / 100.0;
            (size.height * fraction, size.height * -fraction)
        }
        AnchorSpec::Offset(offset) => (offset, -offset),
        _ => (0.0, -0.0),
    };

    AnchoredPosition {
        left: x,
        top: y,
        right: x_inverted,
        bottom: y_inverted,
        x_spec,
        y_spec,
    }
}
