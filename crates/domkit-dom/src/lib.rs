//! domkit DOM - Document Object Model host
//!
//! Arena-based DOM tree that stands in for the browser's live document:
//! node structure, attributes, inline and cascaded style, layout geometry,
//! native scroll offsets and event listeners.

mod attributes;
mod box_model;
mod config;
mod document;
mod events;
mod geometry;
mod html;
mod node;
mod operations;
mod selector;
mod style;
mod tree;

pub use attributes::{Attr, AttributeList};
pub use box_model::{BoxDimensions, EdgeSizes};
pub use config::{Config, RtlScrollType};
pub use document::{Document, Features, Viewport};
pub use events::{
    Event, EventDispatcher, EventHandler, EventListener, EventPhase, ListenerOptions, Touch,
};
pub use geometry::{DOMRect, ElementGeometry, ScrollState};
pub use node::{ElementData, Node, NodeData, NodeType};
pub use operations::{DomError, DomResult, NodeOperations};
pub use selector::{ElementQuery, SelectorList};
pub use style::{ComputedStyle, StyleDeclaration, normalize_property_name};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Null link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
