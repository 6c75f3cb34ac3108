//! DOM Node
//!
//! Nodes link to each other through `NodeId`s into the tree arena.

use crate::NodeId;
use crate::attributes::AttributeList;
use crate::geometry::{ElementGeometry, ScrollState};
use crate::style::StyleDeclaration;
use std::collections::HashMap;

/// DOM node type, with the `Node.nodeType` numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentFragment = 11,
}

/// Arena node: tree links plus payload
#[derive(Debug, Clone)]
pub struct Node {
    // Links; `NodeId::NONE` when absent
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    pub(crate) fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::Fragment => NodeType::DocumentFragment,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Document, element or fragment
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_) | NodeData::Fragment)
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        if let NodeData::Element(elem) = &self.data { Some(elem) } else { None }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(elem) = &mut self.data { Some(elem) } else { None }
    }

    /// Character data of a text node
    pub fn as_text(&self) -> Option<&str> {
        if let NodeData::Text(text) = &self.data { Some(text) } else { None }
    }
}

/// Node payload
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
    /// Its children move out on insertion
    Fragment,
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag_name: String,
    pub attrs: AttributeList,
    /// Inline declarations (`el.style`)
    pub style: StyleDeclaration,
    /// Declarations produced by the embedder's cascade
    pub cascaded: StyleDeclaration,
    /// Pseudo-element declarations keyed by `::name`
    pub pseudo: HashMap<String, StyleDeclaration>,
    /// Layout geometry supplied by the embedder
    pub layout: Option<ElementGeometry>,
    pub scroll: ScrollState,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributeList::new(),
            style: StyleDeclaration::new(),
            cascaded: StyleDeclaration::new(),
            pseudo: HashMap::new(),
            layout: None,
            scroll: ScrollState::default(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Set an attribute; `style` is parsed into the inline declaration
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("style") {
            self.style.set_css_text(value);
        }
        self.attrs.set(name, value);
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        if name.eq_ignore_ascii_case("style") {
            self.style = StyleDeclaration::new();
        }
        self.attrs.remove(name)
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Tokens of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Set an inline style property, keeping the `style` attribute in sync
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.set_property(name, value);
        let text = self.style.css_text();
        if text.is_empty() {
            self.attrs.remove("style");
        } else {
            self.attrs.set("style", &text);
        }
    }

    /// Pseudo-element declarations, if any were supplied
    pub fn pseudo_style(&self, pseudo: &str) -> Option<&StyleDeclaration> {
        self.pseudo.get(&pseudo_key(pseudo))
    }
}

/// `:before`, `::before` and `::Before` all name the same pseudo-element
pub(crate) fn pseudo_key(pseudo: &str) -> String {
    format!("::{}", pseudo.trim().trim_start_matches(':').to_ascii_lowercase())
}
