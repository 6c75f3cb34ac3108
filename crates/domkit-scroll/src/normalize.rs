//! Logical scroll coordinates
//!
//! *left*: pixels scrolled from the left edge, in every direction.
//! *horz*: pixels scrolled from the reading start; the same as *left* in
//! LTR, measured from the right edge in RTL.

use crate::detect::rtl_scroll_type;
use domkit_dom::{Document, NodeId, RtlScrollType};

/// Scrollable extent of an element along the horizontal axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollExtent {
    pub scroll_width: f64,
    pub client_width: f64,
}

impl ScrollExtent {
    pub fn new(scroll_width: f64, client_width: f64) -> Self {
        Self { scroll_width, client_width }
    }

    /// Measure an element's current extent
    pub fn of(doc: &Document, element: NodeId) -> Self {
        Self::new(doc.scroll_width(element), doc.client_width(element))
    }

    /// Largest logical left offset
    pub fn max(&self) -> f64 {
        self.scroll_width - self.client_width
    }

    /// Native value for a logical left offset. `convention` is `None` for
    /// LTR content.
    pub fn native_for_left(&self, left: f64, convention: Option<RtlScrollType>) -> f64 {
        match convention {
            Some(RtlScrollType::Negative) => left - self.max(),
            Some(RtlScrollType::Reverse) => self.max() - left,
            Some(RtlScrollType::Default) | None => left,
        }
    }

    /// Logical left offset for a native value
    pub fn left_for_native(&self, native: f64, convention: Option<RtlScrollType>) -> f64 {
        match convention {
            Some(RtlScrollType::Negative) => native + self.max(),
            Some(RtlScrollType::Reverse) => self.max() - native,
            Some(RtlScrollType::Default) | None => native,
        }
    }

    /// Native value for a logical horizontal position
    pub fn native_for_horz(&self, horz: f64, convention: Option<RtlScrollType>) -> f64 {
        match convention {
            Some(_) => self.native_for_left(self.max() - horz, convention),
            None => horz,
        }
    }

    /// Logical horizontal position for a native value
    pub fn horz_for_native(&self, native: f64, convention: Option<RtlScrollType>) -> f64 {
        match convention {
            Some(_) => self.max() - self.left_for_native(native, convention),
            None => native,
        }
    }
}

/// Convention in effect for an element; detection only runs for RTL content
fn convention(doc: &Document, element: NodeId, rtl: Option<bool>) -> Option<RtlScrollType> {
    let rtl = rtl.unwrap_or_else(|| doc.is_rtl(element));
    rtl.then(|| rtl_scroll_type(doc))
}

/// Native `scrollLeft` that scrolls `element` to logical `left`.
/// `rtl` overrides the element's computed direction.
pub fn calculate_native_scroll_left_for_left(doc: &Document, element: NodeId, left: f64, rtl: Option<bool>) -> f64 {
    ScrollExtent::of(doc, element).native_for_left(left, convention(doc, element, rtl))
}

/// Logical left offset of `element`
pub fn get_scroll_left(doc: &Document, element: NodeId, rtl: Option<bool>) -> f64 {
    let native = doc.scroll_left(element);
    ScrollExtent::of(doc, element).left_for_native(native, convention(doc, element, rtl))
}

pub fn set_scroll_left(doc: &mut Document, element: NodeId, left: f64, rtl: Option<bool>) {
    let native = calculate_native_scroll_left_for_left(doc, element, left, rtl);
    doc.set_scroll_left(element, native);
}

/// Native `scrollLeft` that scrolls `element` to logical horizontal position `horz`
pub fn calculate_native_scroll_left_for_horz(doc: &Document, element: NodeId, horz: f64, rtl: Option<bool>) -> f64 {
    ScrollExtent::of(doc, element).native_for_horz(horz, convention(doc, element, rtl))
}

/// Logical horizontal position of `element`
pub fn get_scroll_horz(doc: &Document, element: NodeId, rtl: Option<bool>) -> f64 {
    let native = doc.scroll_left(element);
    ScrollExtent::of(doc, element).horz_for_native(native, convention(doc, element, rtl))
}

pub fn set_scroll_horz(doc: &mut Document, element: NodeId, horz: f64, rtl: Option<bool>) {
    let native = calculate_native_scroll_left_for_horz(doc, element, horz, rtl);
    doc.set_scroll_left(element, native);
}
