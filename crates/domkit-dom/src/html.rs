//! HTML Fragment Parsing
//!
//! `innerHTML` support. Uses html5ever's RcDom and converts the body's
//! children into arena nodes.

use crate::NodeId;
use crate::node::ElementData;
use crate::operations::{DomResult, NodeOperations};
use crate::tree::DomTree;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

impl DomTree {
    /// Parse an HTML fragment (body context) into a detached document fragment
    pub fn parse_fragment(&mut self, html: &str) -> DomResult<NodeId> {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        let fragment = self.create_fragment();

        if let Some(body) = find_body(&dom.document) {
            for child in body.children.borrow().iter() {
                self.convert_node(child, fragment)?;
            }
        }

        tracing::debug!(
            "Parsed HTML fragment into {} nodes",
            self.descendants(fragment).len()
        );
        Ok(fragment)
    }

    /// Replace the children of `element` with the parsed fragment
    pub fn set_inner_html(&mut self, element: NodeId, html: &str) -> DomResult<()> {
        let fragment = self.parse_fragment(html)?;
        self.remove_all_children(element)?;
        self.append_child(element, fragment)?;
        Ok(())
    }

    fn convert_node(&mut self, handle: &Handle, parent: NodeId) -> DomResult<()> {
        match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.is_empty() {
                    let id = self.create_text(&text);
                    self.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = self.create_comment(contents);
                self.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let mut elem = ElementData::new(&name.local);
                for attr in attrs.borrow().iter() {
                    elem.set_attr(&attr.name.local, &attr.value);
                }

                let id = self.create_element(&elem.tag_name);
                if let Some(slot) = self.element_mut(id) {
                    *slot = elem;
                }
                self.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, id)?;
                }
            }
            // Doctypes and processing instructions have no place in a fragment
            RcNodeData::Document | RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}

fn find_body(document: &Handle) -> Option<Handle> {
    let html = first_element(document, "html")?;
    first_element(&html, "body")
}

fn first_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if name.local.as_ref() == tag))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_inner_html() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let old = tree.create_text("old");
        tree.append_child(div, old).unwrap();

        tree.set_inner_html(div, "<span class=\"a\">Hi</span> there<!--c-->").unwrap();

        let children = tree.child_ids(div);
        assert_eq!(children.len(), 3);
        assert_eq!(tree.element(children[0]).map(|e| e.tag_name.as_str()), Some("span"));
        assert_eq!(tree.get_attribute(children[0], "class"), Some("a"));
        assert_eq!(tree.text_content(div), "Hi there");
        assert!(tree.parent(old).is_none());
    }

    #[test]
    fn test_style_attribute_is_parsed() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");

        tree.set_inner_html(div, "<p style=\"width: 5px\"></p>").unwrap();

        let p = tree.first_child(div).unwrap();
        let style = &tree.element(p).unwrap().style;
        assert_eq!(style.get_property_value("width"), Some("5px"));
    }

    #[test]
    fn test_empty_html_clears() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_text_content(div, "text").unwrap();

        tree.set_inner_html(div, "").unwrap();

        assert!(tree.first_child(div).is_none());
    }
}
