//! ChildNode / ParentNode style mutation

use domkit_dom::{Document, DomError, DomResult, NodeId, NodeOperations};

/// Something that can be inserted: an existing node or text
#[derive(Debug, Clone, PartialEq)]
pub enum Insertable {
    Node(NodeId),
    Text(String),
}

impl From<NodeId> for Insertable {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Insertable {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Insertable {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Turn the items into a single node; several items are gathered in a fragment
fn convert<I>(doc: &mut Document, nodes: I) -> DomResult<Option<NodeId>>
where
    I: IntoIterator,
    I::Item: Into<Insertable>,
{
    let mut items: Vec<NodeId> = nodes
        .into_iter()
        .map(|item| match item.into() {
            Insertable::Node(node) => node,
            Insertable::Text(text) => doc.create_text_node(&text),
        })
        .collect();

    if items.len() <= 1 {
        return Ok(items.pop());
    }

    let fragment = doc.create_document_fragment();
    for node in items {
        doc.tree_mut().append_child(fragment, node)?;
    }
    Ok(Some(fragment))
}

/// Insert `nodes` just before `anchor`. No-op when `anchor` has no parent.
pub fn before<I>(doc: &mut Document, anchor: NodeId, nodes: I) -> DomResult<()>
where
    I: IntoIterator,
    I::Item: Into<Insertable>,
{
    let Some(parent) = doc.tree().parent(anchor) else {
        return Ok(());
    };
    if let Some(node) = convert(doc, nodes)? {
        doc.tree_mut().insert_before(parent, node, Some(anchor))?;
    }
    Ok(())
}

/// Insert `nodes` just after `anchor`. No-op when `anchor` has no parent.
pub fn after<I>(doc: &mut Document, anchor: NodeId, nodes: I) -> DomResult<()>
where
    I: IntoIterator,
    I::Item: Into<Insertable>,
{
    let Some(parent) = doc.tree().parent(anchor) else {
        return Ok(());
    };
    if let Some(node) = convert(doc, nodes)? {
        let reference = doc.tree().next_sibling(anchor);
        doc.tree_mut().insert_before(parent, node, reference)?;
    }
    Ok(())
}

/// Insert `nodes` before the first child of `parent`
pub fn prepend<I>(doc: &mut Document, parent: NodeId, nodes: I) -> DomResult<()>
where
    I: IntoIterator,
    I::Item: Into<Insertable>,
{
    if let Some(node) = convert(doc, nodes)? {
        let reference = doc.tree().first_child(parent);
        doc.tree_mut().insert_before(parent, node, reference)?;
    }
    Ok(())
}

/// Insert `nodes` after the last child of `parent`
pub fn append<I>(doc: &mut Document, parent: NodeId, nodes: I) -> DomResult<()>
where
    I: IntoIterator,
    I::Item: Into<Insertable>,
{
    if let Some(node) = convert(doc, nodes)? {
        doc.tree_mut().append_child(parent, node)?;
    }
    Ok(())
}

/// Detach `node` from its parent, if it has one
pub fn remove(doc: &mut Document, node: NodeId) -> DomResult<()> {
    if let Some(parent) = doc.tree().parent(node) {
        doc.tree_mut().remove_child(parent, node)?;
    }
    Ok(())
}

/// Replace `element` with its own children
pub fn unwrap_children(doc: &mut Document, element: NodeId) -> DomResult<()> {
    let parent = doc.tree().parent(element).ok_or(DomError::NotFound)?;
    let tree = doc.tree_mut();
    while let Some(child) = tree.first_child(element) {
        tree.insert_before(parent, child, Some(element))?;
    }
    tree.remove_child(parent, element)?;
    Ok(())
}

/// Toggle `class` on `element`; `force` pins the outcome.
/// Returns whether the class is now present.
pub fn toggle_class(doc: &mut Document, element: NodeId, class: &str, force: Option<bool>) -> DomResult<bool> {
    let tree = doc.tree_mut();
    let add = force.unwrap_or_else(|| !tree.has_class(element, class));
    if add {
        tree.add_class(element, class)?;
    } else {
        tree.remove_class(element, class)?;
    }
    Ok(add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_list() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let item = doc.create_element("li");
        let body = doc.body();
        doc.tree_mut().append_child(body, list).unwrap();
        doc.tree_mut().append_child(list, item).unwrap();
        (doc, list, item)
    }

    fn tags(doc: &Document, parent: NodeId) -> Vec<String> {
        doc.tree()
            .children(parent)
            .map(|(_, node)| match node.as_element() {
                Some(el) => el.tag_name.clone(),
                None => format!("#{}", node.as_text().unwrap_or_default()),
            })
            .collect()
    }

    #[test]
    fn test_before_and_after() {
        let (mut doc, list, item) = with_list();
        let a = doc.create_element("a");
        let b = doc.create_element("b");

        before(&mut doc, item, [Insertable::from(a), "x".into()]).unwrap();
        after(&mut doc, item, [b]).unwrap();

        assert_eq!(tags(&doc, list), ["a", "#x", "li", "b"]);
    }

    #[test]
    fn test_prepend_and_append() {
        let (mut doc, list, _) = with_list();
        let first = doc.create_element("em");

        prepend(&mut doc, list, [first]).unwrap();
        append(&mut doc, list, ["tail", "end"]).unwrap();

        assert_eq!(tags(&doc, list), ["em", "li", "#tail", "#end"]);
    }

    #[test]
    fn test_empty_and_orphan_insertions_are_no_ops() {
        let (mut doc, list, item) = with_list();
        let orphan = doc.create_element("p");

        before(&mut doc, item, Vec::<Insertable>::new()).unwrap();
        after(&mut doc, orphan, ["ignored"]).unwrap();

        assert_eq!(tags(&doc, list), ["li"]);
        assert_eq!(doc.tree().parent(orphan), None);
    }

    #[test]
    fn test_unwrap_children() {
        let (mut doc, list, item) = with_list();
        append(&mut doc, item, ["one", "two"]).unwrap();

        unwrap_children(&mut doc, item).unwrap();
        assert_eq!(tags(&doc, list), ["#one", "#two"]);
        assert_eq!(doc.tree().parent(item), None);

        assert_eq!(unwrap_children(&mut doc, item), Err(DomError::NotFound));
    }

    #[test]
    fn test_remove() {
        let (mut doc, list, item) = with_list();
        remove(&mut doc, item).unwrap();
        remove(&mut doc, item).unwrap();
        assert!(doc.tree().child_ids(list).is_empty());
    }

    #[test]
    fn test_toggle_class() {
        let (mut doc, _, item) = with_list();

        assert!(toggle_class(&mut doc, item, "open", None).unwrap());
        assert!(!toggle_class(&mut doc, item, "open", None).unwrap());
        assert!(!toggle_class(&mut doc, item, "open", Some(false)).unwrap());
        assert!(toggle_class(&mut doc, item, "open", Some(true)).unwrap());
        assert!(doc.tree().has_class(item, "open"));
    }
}
