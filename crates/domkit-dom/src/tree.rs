//! DOM Tree (arena-based allocation)

use crate::node::{ElementData, Node, NodeData};
use crate::operations::{DomError, DomResult, NodeOperations};
use crate::NodeId;

/// Arena-based DOM tree. Slot 0 always holds the document node.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Whether selectors accept `:scope`
    pub(crate) scope_selector: bool,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::with_data(NodeData::Document)],
            scope_selector: true,
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::with_data(data));
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Text(content.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Comment(content.to_string()))
    }

    /// Create an empty document fragment
    pub fn create_fragment(&mut self) -> NodeId {
        self.push(NodeData::Fragment)
    }

    /// Element data of a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    // ---- traversal ----

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.option())
    }

    /// Parent, if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child.option())
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.last_child.option())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.option())
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling.option())
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.next_sibling(id);
        while let Some(node) = cursor {
            if self.is_element(node) {
                return Some(node);
            }
            cursor = self.next_sibling(node);
        }
        None
    }

    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.prev_sibling(id);
        while let Some(node) = cursor {
            if self.is_element(node) {
                return Some(node);
            }
            cursor = self.prev_sibling(node);
        }
        None
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut cursor = self.first_child(id);
        std::iter::from_fn(move || {
            let current = cursor?;
            let node = self.get(current)?;
            cursor = node.next_sibling.option();
            Some((current, node))
        })
    }

    /// Child ids, collected
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Descendants in document order, excluding the node itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(id).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.child_ids(node).into_iter().rev());
        }
        out
    }

    /// Topmost ancestor (the node itself when detached without parent)
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether the node is in the document
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.root_of(id) == NodeId::ROOT
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    // ---- content ----

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) => t.clone(),
            Some(NodeData::Comment(c)) => c.clone(),
            Some(_) => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound)?;
        match &mut node.data {
            NodeData::Text(t) => {
                *t = text.to_string();
                return Ok(());
            }
            NodeData::Comment(c) => {
                *c = text.to_string();
                return Ok(());
            }
            _ => {}
        }

        self.remove_all_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// Detach every child of a node
    pub fn remove_all_children(&mut self, id: NodeId) -> DomResult<()> {
        for child in self.child_ids(id) {
            self.remove_child(id, child)?;
        }
        Ok(())
    }

    // ---- attributes & classes ----

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        elem.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        Ok(elem.remove_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.attrs.contains(name))
    }

    /// Add or remove a boolean attribute; returns whether it is now present
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        let present = elem.attrs.contains(name);
        let want = force.unwrap_or(!present);
        if want && !present {
            elem.set_attr(name, "");
        } else if !want && present {
            elem.remove_attr(name);
        }
        Ok(want)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class token; no-op when already present
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        if !elem.has_class(class) {
            let mut classes: Vec<&str> = elem.classes().collect();
            classes.push(class);
            let joined = classes.join(" ");
            elem.set_attr("class", &joined);
        }
        Ok(())
    }

    /// Remove every occurrence of a class token
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::InvalidNodeType)?;
        if elem.has_class(class) {
            let joined = elem.classes().filter(|c| *c != class).collect::<Vec<_>>().join(" ");
            elem.set_attr("class", &joined);
        }
        Ok(())
    }

    // ---- linking ----

    /// Unlink a node from its parent and siblings
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Link a detached node under `parent`, before `reference` (or last)
    pub(crate) fn link(&mut self, parent: NodeId, id: NodeId, reference: Option<NodeId>) {
        let prev = match reference {
            Some(r) => self.nodes[r.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        let next = reference.unwrap_or(NodeId::NONE);

        {
            let node = &mut self.nodes[id.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = id;
        } else {
            self.nodes[parent.index()].first_child = id;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = id;
        } else {
            self.nodes[parent.index()].last_child = id;
        }
    }
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound)?;
        if node.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if !parent_node.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        let new_node = self.get(new_child).ok_or(DomError::NotFound)?;
        if matches!(new_node.data, NodeData::Document) || self.is_inclusive_ancestor(new_child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        if let Some(reference) = ref_child {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild);
            }
        }

        if matches!(self.nodes[new_child.index()].data, NodeData::Fragment) {
            for child in self.child_ids(new_child) {
                self.detach(child);
                self.link(parent, child, ref_child);
            }
            return Ok(new_child);
        }

        // Inserting a node before itself keeps its position
        let reference = match ref_child {
            Some(r) if r == new_child => self.next_sibling(new_child),
            other => other,
        };
        self.detach(new_child);
        self.link(parent, new_child, reference);
        Ok(new_child)
    }

    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> DomResult<NodeId> {
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        if new_child == old_child {
            return Ok(old_child);
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.remove_child(parent, old_child)
    }

    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId> {
        let source = self.get(node).ok_or(DomError::NotFound)?;
        let mut data = source.data.clone();
        match &mut data {
            NodeData::Document => return Err(DomError::InvalidNodeType),
            NodeData::Element(elem) => {
                // Layout and scroll state belong to the rendered original
                elem.layout = None;
                elem.scroll = Default::default();
            }
            _ => {}
        }

        let copy = self.push(data);
        if deep {
            for child in self.child_ids(node) {
                let child_copy = self.clone_node(child, true)?;
                self.append_child(copy, child_copy)?;
            }
        }
        Ok(copy)
    }

    fn normalize(&mut self, node: NodeId) -> DomResult<()> {
        if self.get(node).is_none() {
            return Err(DomError::NotFound);
        }

        for child in self.child_ids(node) {
            // Earlier iterations may have merged this node away
            if self.parent(child) != Some(node) {
                continue;
            }
            if !self.nodes[child.index()].is_text() {
                self.normalize(child)?;
                continue;
            }

            let mut merged = self.text_content(child);
            while let Some(next) = self.next_sibling(child).filter(|&n| self.nodes[n.index()].is_text()) {
                merged.push_str(&self.text_content(next));
                self.remove_child(node, next)?;
            }

            if merged.is_empty() {
                self.remove_child(node, child)?;
            } else if let NodeData::Text(t) = &mut self.nodes[child.index()].data {
                *t = merged;
            }
        }
        Ok(())
    }
}
