//! Selector-driven traversal

use domkit_dom::{Document, DomResult, DomTree, ElementQuery, NodeId};

/// Outermost ancestor of `node`: the document for connected nodes,
/// otherwise the root of its detached subtree
pub fn get_root_node(doc: &Document, node: NodeId) -> NodeId {
    doc.tree().root_of(node)
}

/// Closest inclusive ancestor element matching `selector`
pub fn closest(doc: &Document, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
    doc.tree().closest(element, selector)
}

/// Like [`closest`], but gives up after testing `until`
pub fn closest_until(doc: &Document, element: NodeId, selector: &str, until: Option<NodeId>) -> DomResult<Option<NodeId>> {
    let Some(until) = until else {
        return closest(doc, element, selector);
    };

    let tree = doc.tree();
    walk(tree, element, selector, |current| {
        (current != until).then(|| tree.parent_element(current)).flatten()
    })
}

/// First of `element` and its preceding element siblings matching `selector`
pub fn prev(doc: &Document, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
    let tree = doc.tree();
    walk(tree, element, selector, |current| tree.prev_element_sibling(current))
}

/// First of `element` and its following element siblings matching `selector`
pub fn next(doc: &Document, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
    let tree = doc.tree();
    walk(tree, element, selector, |current| tree.next_element_sibling(current))
}

fn walk(
    tree: &DomTree,
    start: NodeId,
    selector: &str,
    step: impl Fn(NodeId) -> Option<NodeId>,
) -> DomResult<Option<NodeId>> {
    let mut cursor = Some(start).filter(|&id| tree.is_element(id));
    while let Some(current) = cursor {
        if tree.matches(current, selector)? {
            return Ok(Some(current));
        }
        cursor = step(current);
    }
    Ok(None)
}
