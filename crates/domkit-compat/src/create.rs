//! Element creation

use domkit_css::{parse_float, set_css_props};
use domkit_dom::{Document, DomResult, NodeId, NodeOperations};
use std::fmt;

/// Value accepted by [`set_element_attrs`]
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    Int(i64),
    /// Property map for the `css` key; `None` values remove the property
    Css(Vec<(String, Option<String>)>),
    /// Skipped entirely
    None,
}

impl AttrValue {
    /// Build a `css` value from `(property, value)` pairs
    pub fn css<K, V>(props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Css(props.into_iter().map(|(k, v)| (k.into(), Some(v.into()))).collect())
    }

    fn truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Css(_) => true,
            Self::None => false,
        }
    }

    fn as_int(&self) -> i64 {
        match self {
            Self::Str(s) => parse_float(s.trim()).map_or(0, |n| n.trunc() as i64),
            Self::Bool(b) => i64::from(*b),
            Self::Int(n) => *n,
            Self::Css(_) | Self::None => 0,
        }
    }

    fn css_pairs(&self) -> Vec<(String, Option<String>)> {
        match self {
            Self::Css(props) => props.clone(),
            // Inline declaration text, e.g. "color: red; width: 4px"
            Self::Str(text) => text
                .split(';')
                .filter_map(|decl| decl.split_once(':'))
                .map(|(name, value)| (name.trim().to_string(), Some(value.trim().to_string())))
                .filter(|(name, _)| !name.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Css(props) => {
                let mut first = true;
                for (name, value) in props {
                    if let Some(value) = value {
                        if !first {
                            f.write_str("; ")?;
                        }
                        write!(f, "{name}: {value}")?;
                        first = false;
                    }
                }
                Ok(())
            }
            Self::None => Ok(()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Create an element, apply `attrs` and append `children` in order
pub fn create_element<'a>(
    doc: &mut Document,
    tag: &str,
    attrs: impl IntoIterator<Item = (&'a str, AttrValue)>,
    children: impl IntoIterator<Item = NodeId>,
) -> DomResult<NodeId> {
    let el = doc.create_element(tag);
    set_element_attrs(doc, el, attrs)?;
    for child in children {
        doc.tree_mut().append_child(el, child)?;
    }
    Ok(el)
}

/// Apply attributes with a few property shorthands:
///
/// - `innerHTML` replaces the children with parsed markup
/// - `css` sets inline style properties
/// - `readOnly`, `tabIndex` and `textContent` behave like the element properties
///
/// Any other key becomes a plain attribute. [`AttrValue::None`] entries are skipped.
pub fn set_element_attrs<'a>(
    doc: &mut Document,
    element: NodeId,
    attrs: impl IntoIterator<Item = (&'a str, AttrValue)>,
) -> DomResult<()> {
    for (key, value) in attrs {
        if value == AttrValue::None {
            continue;
        }

        match key {
            "innerHTML" => doc.tree_mut().set_inner_html(element, &value.to_string())?,
            "css" => set_css_props(doc, element, value.css_pairs()),
            "readOnly" => {
                if value.truthy() {
                    doc.tree_mut().set_attribute(element, "readonly", "")?;
                } else {
                    doc.tree_mut().remove_attribute(element, "readonly")?;
                }
            }
            "tabIndex" => doc.tree_mut().set_attribute(element, "tabindex", &value.as_int().to_string())?,
            "textContent" => doc.tree_mut().set_text_content(element, &value.to_string())?,
            _ => doc.tree_mut().set_attribute(element, key, &value.to_string())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_with_attrs_and_children() {
        let mut doc = Document::new();
        let child = doc.create_element("span");
        let el = create_element(
            &mut doc,
            "input",
            [
                ("type", "text".into()),
                ("readOnly", true.into()),
                ("tabIndex", "3".into()),
                ("title", AttrValue::from(None::<&str>)),
            ],
            [child],
        )
        .unwrap();

        let tree = doc.tree();
        assert_eq!(tree.get_attribute(el, "type"), Some("text"));
        assert_eq!(tree.get_attribute(el, "readonly"), Some(""));
        assert_eq!(tree.get_attribute(el, "tabindex"), Some("3"));
        assert_eq!(tree.get_attribute(el, "title"), None);
        assert_eq!(tree.child_ids(el), vec![child]);
    }

    #[test]
    fn test_property_shorthands() {
        let mut doc = Document::new();
        let el = doc.create_element("div");

        set_element_attrs(
            &mut doc,
            el,
            [
                ("innerHTML", "<b>bold</b>".into()),
                ("css", AttrValue::css([("width", "10px"), ("background-color", "red")])),
                ("data-count", 7.into()),
            ],
        )
        .unwrap();
        assert_eq!(doc.tree().text_content(el), "bold");
        assert_eq!(doc.style_property(el, "width"), Some("10px"));
        assert_eq!(doc.style_property(el, "background-color"), Some("red"));
        assert_eq!(doc.tree().get_attribute(el, "data-count"), Some("7"));

        set_element_attrs(&mut doc, el, [("textContent", "plain".into()), ("readOnly", false.into())]).unwrap();
        assert_eq!(doc.tree().text_content(el), "plain");
        assert_eq!(doc.tree().get_attribute(el, "readonly"), None);
    }

    #[test]
    fn test_css_declaration_text() {
        let mut doc = Document::new();
        let el = doc.create_element("div");

        set_element_attrs(&mut doc, el, [("css", "height: 4px; color :blue;".into())]).unwrap();
        assert_eq!(doc.style_property(el, "height"), Some("4px"));
        assert_eq!(doc.style_property(el, "color"), Some("blue"));
    }

    #[test]
    fn test_tab_index_coercion() {
        let mut doc = Document::new();
        let el = doc.create_element("div");

        set_element_attrs(&mut doc, el, [("tabIndex", "2.9".into())]).unwrap();
        assert_eq!(doc.tree().get_attribute(el, "tabindex"), Some("2"));

        set_element_attrs(&mut doc, el, [("tabIndex", "abc".into())]).unwrap();
        assert_eq!(doc.tree().get_attribute(el, "tabindex"), Some("0"));
    }
}
