//! CSS property access

use crate::value::css_px;
use domkit_dom::{Document, NodeId};
use std::collections::HashMap;
use std::fmt;

/// A value returned by [`get_css_props`]
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Computed value as serialized by the style system
    Text(String),
    /// Resolved pixel size (for `auto` width/height)
    Px(f64),
}

impl CssValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Px(_) => None,
        }
    }

    /// Numeric value; text values go through `parseFloat`
    pub fn as_px(&self) -> f64 {
        match self {
            Self::Text(text) => css_px(text),
            Self::Px(px) => *px,
        }
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Px(px) => write!(f, "{px}"),
        }
    }
}

/// Read computed values for `props`, keyed by the requested names.
///
/// `width`/`height` that compute to `auto` are replaced by the element's
/// offset size minus padding and border (unless `border-box`), floored at 0.
pub fn get_css_props(doc: &Document, element: NodeId, props: &[&str]) -> HashMap<String, CssValue> {
    let style = doc.computed_style(element, None);
    let mut result = HashMap::with_capacity(props.len());

    for &prop in props {
        let value = style.get(prop);
        let resolved = match prop {
            "width" | "height" if value == "auto" => {
                let (size, start, end) = if prop == "width" {
                    (doc.offset_width(element), "left", "right")
                } else {
                    (doc.offset_height(element), "top", "bottom")
                };

                if style.get("box-sizing") == "border-box" {
                    CssValue::Px(size)
                } else {
                    let deltas = [
                        format!("padding-{start}"),
                        format!("padding-{end}"),
                        format!("border-{start}-width"),
                        format!("border-{end}-width"),
                    ];
                    let content = deltas.iter().fold(size, |acc, name| acc - css_px(style.get(name)));
                    CssValue::Px(content.max(0.0))
                }
            }
            _ => CssValue::Text(value.to_string()),
        };
        result.insert(prop.to_string(), resolved);
    }
    result
}

/// Assign inline style properties; `None` clears a property
pub fn set_css_props<K, V>(doc: &mut Document, element: NodeId, props: impl IntoIterator<Item = (K, Option<V>)>)
where
    K: AsRef<str>,
    V: ToString,
{
    for (name, value) in props {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        doc.set_style_property(element, name.as_ref(), &value);
    }
}
