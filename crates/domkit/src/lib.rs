//! domkit
//!
//! DOM utility helpers over an in-memory DOM host: CSS property access, box
//! metrics with padding/border/margin inclusion, anchored positions,
//! RTL-aware scroll offsets, element creation and insertion shims, scoped
//! selectors, a namespaced listener registry and touch-tap detection.
//!
//! # Example
//! ```rust,ignore
//! use domkit::{Document, css::{InclusionPolicy, get_element_width}};
//!
//! let mut doc = Document::new();
//! let el = doc.create_element("div");
//! doc.set_cascaded_style(el, "width: 100px; padding: 0 8px");
//! let outer = get_element_width(&doc, el, InclusionPolicy::BORDER_BOX);
//! ```

pub use domkit_dom::{
    Config, DOMRect, Document, DomError, DomResult, DomTree, ElementGeometry, ElementQuery, Event,
    EventDispatcher, EventListener, ListenerOptions, NodeId, NodeOperations, RtlScrollType, Touch,
    Viewport,
};

// Re-export sub-crates for advanced usage
pub use domkit_css as css;
pub use domkit_dom as host;
#[cfg(feature = "scroll")]
pub use domkit_scroll as scroll;

/// Element creation and selector-driven traversal
#[cfg(feature = "compat")]
pub mod dom {
    pub use domkit_compat::{AttrValue, closest_until, create_element, next, prev, set_element_attrs, unwrap_children};
}

/// Insertion shims, scoped selectors and class toggling
#[cfg(feature = "compat")]
pub mod dom_compat {
    pub use domkit_compat::{
        Insertable, after, append, before, closest, get_root_node, has_scoped_selector, prepend, remove,
        scoped_selector, scoped_selector_all, toggle_class,
    };
}

/// Namespaced listener registry
#[cfg(feature = "events")]
pub mod events_sink {
    pub use domkit_events::{EventsSink, SinkFilter};
}

/// Touch gestures
#[cfg(feature = "events")]
pub mod touches {
    pub use domkit_events::{DEFAULT_TAP_DISTANCE, TouchTapBinding, TouchTapOptions, bind_touch_tap};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
