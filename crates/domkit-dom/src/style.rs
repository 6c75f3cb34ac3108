//! Style Declarations
//!
//! Inline (`el.style`) and cascaded declarations, and the computed-style
//! snapshot returned by `Document::computed_style`.

use std::collections::HashMap;

/// Sides in CSS shorthand order
const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Properties that inherit from the parent element
pub(crate) const INHERITED: [&str; 2] = ["direction", "font-size"];

/// Convert a camelCase or kebab-case property name to kebab-case.
///
/// `paddingLeft` → `padding-left`, `webkitTransition` → `-webkit-transition`.
/// Custom properties (`--foo`) are returned untouched.
pub fn normalize_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }

    for prefix in ["webkit-", "moz-", "ms-"] {
        if out.starts_with(prefix) {
            out.insert(0, '-');
            break;
        }
    }
    out
}

/// Ordered list of property declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclaration {
    declarations: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `css_text` (`"width: 10px; padding: 2px"`)
    pub fn parse(css_text: &str) -> Self {
        let mut decl = Self::new();
        decl.set_css_text(css_text);
        decl
    }

    /// Number of longhand declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Get a declared value
    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        let name = normalize_property_name(name);
        self.declarations
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it. Shorthands expand to longhands.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = normalize_property_name(name);
        let value = value.trim();

        if value.is_empty() {
            for longhand in expand_shorthand(&name, "") {
                self.remove_longhand(&longhand.0);
            }
            return;
        }

        for (longhand, longhand_value) in expand_shorthand(&name, value) {
            self.set_longhand(longhand, longhand_value);
        }
    }

    /// Remove a property, returning its previous value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = normalize_property_name(name);
        let mut removed = None;
        for (longhand, _) in expand_shorthand(&name, "") {
            if let Some(value) = self.remove_longhand(&longhand) {
                removed.get_or_insert(value);
            }
        }
        removed
    }

    /// Serialize as `name: value;` pairs
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace all declarations from a CSS text block
    pub fn set_css_text(&mut self, css_text: &str) {
        self.declarations.clear();
        for item in css_text.split(';') {
            if let Some((name, value)) = item.split_once(':') {
                if !name.trim().is_empty() {
                    self.set_property(name, value);
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn set_longhand(&mut self, name: String, value: String) {
        match self.declarations.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.declarations.push((name, value)),
        }
    }

    fn remove_longhand(&mut self, name: &str) -> Option<String> {
        let index = self.declarations.iter().position(|(n, _)| n == name)?;
        Some(self.declarations.remove(index).1)
    }
}

/// Expand a (possibly shorthand) property into longhand pairs
fn expand_shorthand(name: &str, value: &str) -> Vec<(String, String)> {
    let per_side = |prefix: &str, suffix: &str, values: [String; 4]| {
        SIDES
            .iter()
            .zip(values)
            .map(|(side, v)| (format!("{prefix}{side}{suffix}"), v))
            .collect::<Vec<_>>()
    };

    match name {
        "padding" | "margin" => per_side(&format!("{name}-"), "", box_values(value)),
        "border-width" => per_side("border-", "-width", box_values(value)),
        "border" => {
            let width = border_width_token(value);
            per_side("border-", "-width", [width.clone(), width.clone(), width.clone(), width])
        }
        _ => match name.strip_prefix("border-") {
            Some(side) if SIDES.contains(&side) => {
                vec![(format!("border-{side}-width"), border_width_token(value))]
            }
            _ => vec![(name.to_string(), value.to_string())],
        },
    }
}

/// Resolve 1-4 box values into top/right/bottom/left
fn box_values(value: &str) -> [String; 4] {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let pick = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();
    match parts.len() {
        0 => Default::default(),
        1 => [pick(0), pick(0), pick(0), pick(0)],
        2 => [pick(0), pick(1), pick(0), pick(1)],
        3 => [pick(0), pick(1), pick(2), pick(1)],
        _ => [pick(0), pick(1), pick(2), pick(3)],
    }
}

/// Pick the width component of a `border` shorthand value
fn border_width_token(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    value
        .split_whitespace()
        .find_map(|token| match token {
            "thin" => Some("1px".to_string()),
            "medium" => Some("3px".to_string()),
            "thick" => Some("5px".to_string()),
            t if t.starts_with(|c: char| c.is_ascii_digit() || c == '.') => Some(t.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "3px".to_string())
}

/// Resolve an absolute or font-relative length to pixels
pub(crate) fn length_to_px(value: &str, font_size: f64, root_font_size: f64) -> Option<f64> {
    let value = value.trim();
    let (number, factor) = if let Some(n) = value.strip_suffix("rem") {
        (n, root_font_size)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, font_size)
    } else if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if value == "0" {
        (value, 1.0)
    } else {
        return None;
    };
    number.trim().parse::<f64>().ok().map(|n| n * factor)
}

/// Containing-block dimension a percentage value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PercentBasis {
    Width,
    Height,
}

impl PercentBasis {
    /// Basis of a property's percentages; `None` for properties domkit
    /// leaves as declared
    pub(crate) fn of(name: &str) -> Option<Self> {
        match name {
            "width" | "left" | "right" => Some(Self::Width),
            "height" | "top" | "bottom" => Some(Self::Height),
            // Vertical padding and margins also refer to the width
            n if n.starts_with("padding-") || n.starts_with("margin-") => Some(Self::Width),
            _ => None,
        }
    }

    pub(crate) fn pick(self, (width, height): (Option<f64>, Option<f64>)) -> Option<f64> {
        match self {
            Self::Width => width,
            Self::Height => height,
        }
    }
}

/// `"50%"` → `Some(50.0)`
pub(crate) fn parse_percentage(value: &str) -> Option<f64> {
    value.trim().strip_suffix('%')?.trim().parse::<f64>().ok()
}

/// Computed style snapshot for an element or pseudo-element
#[derive(Debug, Clone, Default)]
pub struct ComputedStyle {
    values: HashMap<String, String>,
}

impl ComputedStyle {
    pub(crate) fn from_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Computed value of a property; initial value when nothing was declared,
    /// empty string for unknown properties
    pub fn get(&self, name: &str) -> &str {
        let name = normalize_property_name(name);
        match self.values.get(&name) {
            Some(v) => v.as_str(),
            None => initial_value(&name),
        }
    }

    /// `direction: rtl`
    pub fn is_rtl(&self) -> bool {
        self.get("direction") == "rtl"
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// CSS initial values for the properties domkit reads
pub(crate) fn initial_value(name: &str) -> &'static str {
    match name {
        "width" | "height" | "top" | "right" | "bottom" | "left" => "auto",
        "box-sizing" => "content-box",
        "direction" => "ltr",
        "display" => "inline",
        "position" => "static",
        "overflow" | "overflow-x" | "overflow-y" => "visible",
        "font-size" => "16px",
        "transition" => "all 0s ease 0s",
        _ if name.starts_with("padding-") || name.starts_with("margin-") => "0px",
        _ if name.starts_with("border-") && name.ends_with("-width") => "0px",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_property_name() {
        assert_eq!(normalize_property_name("paddingLeft"), "padding-left");
        assert_eq!(normalize_property_name("box-sizing"), "box-sizing");
        assert_eq!(normalize_property_name("borderTopWidth"), "border-top-width");
        assert_eq!(normalize_property_name("webkitTransition"), "-webkit-transition");
        assert_eq!(normalize_property_name("--accentColor"), "--accentColor");
    }

    #[test]
    fn test_shorthand_expansion() {
        let decl = StyleDeclaration::parse("padding: 1px 2px 3px; border: 2px solid red; margin: 4px");

        assert_eq!(decl.get_property_value("padding-top"), Some("1px"));
        assert_eq!(decl.get_property_value("padding-right"), Some("2px"));
        assert_eq!(decl.get_property_value("padding-bottom"), Some("3px"));
        assert_eq!(decl.get_property_value("paddingLeft"), Some("2px"));
        assert_eq!(decl.get_property_value("border-left-width"), Some("2px"));
        assert_eq!(decl.get_property_value("margin-bottom"), Some("4px"));
    }

    #[test]
    fn test_border_side_shorthand() {
        let mut decl = StyleDeclaration::new();
        decl.set_property("border-right", "thin dotted");

        assert_eq!(decl.get_property_value("border-right-width"), Some("1px"));
        assert_eq!(decl.get_property_value("border-left-width"), None);
    }

    #[test]
    fn test_empty_value_removes() {
        let mut decl = StyleDeclaration::parse("width: 10px; padding: 3px");
        decl.set_property("width", "");
        decl.set_property("padding", "");

        assert!(decl.is_empty());
    }

    #[test]
    fn test_css_text_round_trip() {
        let decl = StyleDeclaration::parse("width: 10px;height:auto");
        assert_eq!(decl.css_text(), "width: 10px; height: auto;");
    }

    #[test]
    fn test_length_to_px() {
        assert_eq!(length_to_px("12px", 16.0, 16.0), Some(12.0));
        assert_eq!(length_to_px("1.5em", 10.0, 16.0), Some(15.0));
        assert_eq!(length_to_px("2rem", 10.0, 16.0), Some(32.0));
        assert_eq!(length_to_px("auto", 10.0, 16.0), None);
        assert_eq!(length_to_px("50%", 10.0, 16.0), None);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(parse_percentage(" 50% "), Some(50.0));
        assert_eq!(parse_percentage("50px"), None);
        assert_eq!(PercentBasis::of("padding-top"), Some(PercentBasis::Width));
        assert_eq!(PercentBasis::of("bottom"), Some(PercentBasis::Height));
        assert_eq!(PercentBasis::of("font-size"), None);
        assert_eq!(PercentBasis::Height.pick((Some(1.0), None)), None);
    }

    #[test]
    fn test_computed_defaults() {
        let style = ComputedStyle::default();

        assert_eq!(style.get("width"), "auto");
        assert_eq!(style.get("paddingTop"), "0px");
        assert_eq!(style.get("border-bottom-width"), "0px");
        assert_eq!(style.get("boxSizing"), "content-box");
        assert_eq!(style.get("color"), "");
        assert!(!style.is_rtl());
    }
}
