//! domkit RTL Scroll Normalizer
//!
//! Platforms disagree on what `scrollLeft` means under `direction: rtl`:
//!
//! - `default`: 0 at the left edge, content starts scrolled to the maximum
//! - `negative`: 0 at the right edge, growing negative towards the left
//! - `reverse`: 0 at the right edge, growing positive towards the left
//!
//! The convention is detected once per document with an off-screen probe.
//! Two platform-independent coordinates are exposed on top of it: the
//! logical *left* (distance scrolled from the left edge) and the logical
//! *horizontal* position (distance scrolled from the reading start).

mod detect;
mod normalize;

pub use detect::{detect_rtl_scroll_type, rtl_scroll_type};
pub use domkit_dom::RtlScrollType;
pub use normalize::{
    ScrollExtent, calculate_native_scroll_left_for_horz, calculate_native_scroll_left_for_left,
    get_scroll_horz, get_scroll_left, set_scroll_horz, set_scroll_left,
};
