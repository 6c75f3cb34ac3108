//! Queries relative to an element
//!
//! `scoped_selector(el, "> li")` finds direct `li` children of `el`. Every
//! selector group is prefixed with `:scope ` where the platform supports it,
//! and with a temporary `#id ` otherwise.

use domkit_dom::{Document, DomResult, ElementQuery, NodeId};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Start of each comma-separated group, with its leading whitespace
static GROUP_START: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"((?:^|,)\s*)").ok());

/// Whether the document's selector engine understands `:scope`, detected once
pub fn has_scoped_selector(doc: &Document) -> bool {
    doc.features().scoped_selector_or_init(|| {
        let mut scratch = Document::with_config(doc.config().clone());
        let probe = scratch.create_element("div");
        let supported = scratch.tree().query_selector(probe, ":scope > div").is_ok();
        tracing::debug!("Scoped selector support: {}", supported);
        supported
    })
}

fn prefix_groups<'a>(selector: &'a str, prefix: &str) -> Cow<'a, str> {
    match GROUP_START.as_ref() {
        Some(re) => re.replace_all(selector, |caps: &Captures| format!("{}{}", &caps[1], prefix)),
        None => Cow::Borrowed(selector),
    }
}

fn unique_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("ID_{millis}")
}

/// Run `query` with `element` temporarily carrying a unique id, then put
/// the original id back (or drop the attribute if there was none)
fn with_temporary_id<T>(
    doc: &mut Document,
    element: NodeId,
    query: impl FnOnce(&Document, &str) -> DomResult<T>,
) -> DomResult<T> {
    let original = doc.tree().get_attribute(element, "id").map(str::to_string);
    let id = unique_id();
    doc.tree_mut().set_attribute(element, "id", &id)?;
    tracing::trace!("Scoping query with temporary id {}", id);

    let result = query(doc, &id);

    match original {
        Some(original) => doc.tree_mut().set_attribute(element, "id", &original)?,
        None => {
            doc.tree_mut().remove_attribute(element, "id")?;
        }
    }
    result
}

/// First descendant of `element` matching `selector` relative to it
pub fn scoped_selector(doc: &mut Document, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
    if has_scoped_selector(doc) {
        return doc.tree().query_selector(element, &prefix_groups(selector, ":scope "));
    }
    with_temporary_id(doc, element, |doc, id| {
        let scoped = prefix_groups(selector, &format!("#{id} "));
        doc.tree().query_selector(element, &scoped)
    })
}

/// All descendants of `element` matching `selector` relative to it
pub fn scoped_selector_all(doc: &mut Document, element: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
    if has_scoped_selector(doc) {
        return doc.tree().query_selector_all(element, &prefix_groups(selector, ":scope "));
    }
    with_temporary_id(doc, element, |doc, id| {
        let scoped = prefix_groups(selector, &format!("#{id} "));
        doc.tree().query_selector_all(element, &scoped)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_groups() {
        assert_eq!(prefix_groups("> li", ":scope "), ":scope > li");
        assert_eq!(prefix_groups("a, > b,c", "#x "), "#x a, #x > b,#x c");
    }
}
