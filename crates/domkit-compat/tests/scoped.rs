//! Scoped selector behaviour on both selector engine profiles

use domkit_compat::{has_scoped_selector, scoped_selector, scoped_selector_all};
use domkit_dom::{Config, Document, NodeId, NodeOperations};

/// <div><ul class=list><li>1</li><li><ul><li>nested</li></ul></li></ul></div>
fn fixture(scope_selector: bool) -> (Document, NodeId, NodeId) {
    let mut doc = Document::with_config(Config { scope_selector, ..Config::default() });
    let outer = doc.create_element("div");
    let list = doc.create_element("ul");
    let body = doc.body();

    let tree = doc.tree_mut();
    tree.append_child(body, outer).unwrap();
    tree.append_child(outer, list).unwrap();
    tree.add_class(list, "list").unwrap();
    tree.set_inner_html(list, "<li>1</li><li><ul><li>nested</li></ul></li>").unwrap();
    (doc, outer, list)
}

#[test]
fn test_direct_children_on_both_engines() {
    for native in [true, false] {
        let (mut doc, _, list) = fixture(native);
        assert_eq!(has_scoped_selector(&doc), native);

        let direct = scoped_selector_all(&mut doc, list, "> li").unwrap();
        assert_eq!(direct.len(), 2, "native: {native}");
        assert!(direct.iter().all(|&li| doc.tree().parent(li) == Some(list)));

        let all = scoped_selector_all(&mut doc, list, "li").unwrap();
        assert_eq!(all.len(), 3, "native: {native}");
    }
}

#[test]
fn test_selector_groups_are_each_scoped() {
    for native in [true, false] {
        let (mut doc, outer, list) = fixture(native);

        let found = scoped_selector_all(&mut doc, outer, "> ul, > li").unwrap();
        assert_eq!(found, vec![list], "native: {native}");
    }
}

#[test]
fn test_fallback_restores_original_id() {
    let (mut doc, outer, list) = fixture(false);

    let first = scoped_selector(&mut doc, outer, "> .list").unwrap();
    assert_eq!(first, Some(list));
    assert_eq!(doc.tree().get_attribute(outer, "id"), None);

    doc.tree_mut().set_attribute(list, "id", "mine").unwrap();
    scoped_selector(&mut doc, list, "li").unwrap();
    assert_eq!(doc.tree().get_attribute(list, "id"), Some("mine"));
}

#[test]
fn test_invalid_selector_propagates() {
    let (mut doc, outer, _) = fixture(false);
    assert!(scoped_selector(&mut doc, outer, "> [").is_err());
    assert_eq!(doc.tree().get_attribute(outer, "id"), None);
}
