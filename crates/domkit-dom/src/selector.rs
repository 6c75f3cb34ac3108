//! Element Query and Methods
//!
//! Selector parsing and matching behind querySelector, closest and matches.
//!
//! Supported grammar: comma-separated groups of compound selectors joined by
//! descendant, `>`, `+` and `~` combinators. A compound holds an optional tag
//! or `*`, then any number of `#id`, `.class`, `[attr]`, `[attr op value]`
//! (`=`, `~=`, `^=`, `$=`, `*=`) and `:scope`, `:first-child`, `:last-child`.

use crate::NodeId;
use crate::node::ElementData;
use crate::operations::{DomError, DomResult};
use crate::tree::DomTree;

/// Element query trait
pub trait ElementQuery {
    /// First descendant of `root` matching the selector, in document order
    fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>>;

    /// All descendants of `root` matching the selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>>;

    /// Descendant elements carrying every class in a space-separated list
    fn get_elements_by_class_name(&self, root: NodeId, class_names: &str) -> Vec<NodeId>;

    /// Descendant elements with the given tag (`*` for all)
    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId>;

    /// First connected element with the given id
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists(String),
    Equals(String, String),
    Includes(String, String),
    StartsWith(String, String),
    EndsWith(String, String),
    Contains(String, String),
}

impl AttrCondition {
    fn matches(&self, elem: &ElementData) -> bool {
        match self {
            Self::Exists(name) => elem.attrs.contains(name),
            Self::Equals(name, value) => elem.get_attr(name) == Some(value.as_str()),
            Self::Includes(name, value) => elem
                .get_attr(name)
                .is_some_and(|attr| attr.split_ascii_whitespace().any(|token| token == value)),
            // Empty operands never match for the substring operators
            Self::StartsWith(name, value) => {
                !value.is_empty() && elem.get_attr(name).is_some_and(|attr| attr.starts_with(value.as_str()))
            }
            Self::EndsWith(name, value) => {
                !value.is_empty() && elem.get_attr(name).is_some_and(|attr| attr.ends_with(value.as_str()))
            }
            Self::Contains(name, value) => {
                !value.is_empty() && elem.get_attr(name).is_some_and(|attr| attr.contains(value.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PseudoClass {
    Scope,
    FirstChild,
    LastChild,
}

/// One compound selector; no tag means `*`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
    pseudo_classes: Vec<PseudoClass>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorPart {
    compound: Compound,
    /// Relation to the part on the left
    combinator: Option<Combinator>,
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    groups: Vec<Vec<SelectorPart>>,
}

impl SelectorList {
    /// Parse a selector list. `:scope` is a syntax error unless `allow_scope`.
    pub fn parse(selector: &str, allow_scope: bool) -> DomResult<Self> {
        let invalid = || DomError::Syntax(selector.to_string());

        let groups = split_groups(selector)
            .ok_or_else(invalid)?
            .into_iter()
            .map(|group| parse_chain(group, allow_scope))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        Ok(Self { groups })
    }

    /// Whether `element` matches any group; `:scope` refers to `scope`
    pub fn matches(&self, tree: &DomTree, element: NodeId, scope: NodeId) -> bool {
        self.groups
            .iter()
            .any(|chain| matches_chain(tree, chain, element, scope))
    }
}

/// Split on top-level commas; `None` on an empty group or unbalanced brackets
fn split_groups(selector: &str) -> Option<Vec<&str>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in selector.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.checked_sub(1)?,
            (None, ',') if depth == 0 => {
                groups.push(non_empty(&selector[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 || quote.is_some() {
        return None;
    }
    groups.push(non_empty(&selector[start..])?);
    Some(groups)
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Tokenize one group into compounds and combinator tokens
fn tokenize(group: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    };

    for ch in group.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(ch);
            }
            (Some(_), _) => current.push(ch),
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '[') => {
                depth += 1;
                current.push(ch);
            }
            (None, ']') => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            (None, '>' | '+' | '~') if depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(ch.to_string());
            }
            (None, c) if c.is_ascii_whitespace() && depth == 0 => flush(&mut current, &mut tokens),
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

fn parse_chain(group: &str, allow_scope: bool) -> Option<Vec<SelectorPart>> {
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(group) {
        let combinator = match token.as_str() {
            ">" => Some(Combinator::Child),
            "+" => Some(Combinator::AdjacentSibling),
            "~" => Some(Combinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = combinator {
            if pending.is_some() || parts.is_empty() {
                return None;
            }
            pending = Some(combinator);
            continue;
        }

        let compound = parse_compound(&token, allow_scope)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(SelectorPart { compound, combinator });
    }

    if parts.is_empty() || pending.is_some() {
        return None;
    }
    Some(parts)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
}

/// Split a leading identifier off `s`
fn take_ident(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    (end > 0).then(|| s.split_at(end))
}

fn parse_compound(token: &str, allow_scope: bool) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else if let Some((tag, after)) = take_ident(rest) {
        compound.tag = Some(tag.to_ascii_lowercase());
        rest = after;
    }

    while let Some(ch) = rest.chars().next() {
        match ch {
            '#' => {
                let (id, after) = take_ident(&rest[1..])?;
                if compound.id.replace(id.to_string()).is_some() {
                    return None;
                }
                rest = after;
            }
            '.' => {
                let (class, after) = take_ident(&rest[1..])?;
                compound.classes.push(class.to_string());
                rest = after;
            }
            '[' => {
                let end = rest.find(']')?;
                compound.attrs.push(parse_attr_condition(&rest[1..end])?);
                rest = &rest[end + 1..];
            }
            ':' => {
                // Pseudo-elements never match elements
                if rest.starts_with("::") {
                    return None;
                }
                let (name, after) = take_ident(&rest[1..])?;
                let pseudo = match name.to_ascii_lowercase().as_str() {
                    "scope" if allow_scope => PseudoClass::Scope,
                    "first-child" => PseudoClass::FirstChild,
                    "last-child" => PseudoClass::LastChild,
                    _ => return None,
                };
                compound.pseudo_classes.push(pseudo);
                rest = after;
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attr_condition(inner: &str) -> Option<AttrCondition> {
    let (name, rest) = take_ident(inner.trim())?;
    let name = name.to_ascii_lowercase();
    let rest = rest.trim_start();
    if rest.is_empty() {
        return Some(AttrCondition::Exists(name));
    }

    let (op, value) = match rest.strip_prefix('=') {
        Some(value) => ("=", value),
        None => {
            let (op, value) = rest.split_at(rest.char_indices().nth(2).map_or(rest.len(), |(i, _)| i));
            (op, value)
        }
    };
    let value = unquote(value.trim())?;

    Some(match op {
        "=" => AttrCondition::Equals(name, value),
        "~=" => AttrCondition::Includes(name, value),
        "^=" => AttrCondition::StartsWith(name, value),
        "$=" => AttrCondition::EndsWith(name, value),
        "*=" => AttrCondition::Contains(name, value),
        _ => return None,
    })
}

fn unquote(value: &str) -> Option<String> {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            return inner.strip_suffix(quote).map(str::to_string);
        }
    }
    if value.is_empty() || value.contains(char::is_whitespace) {
        return None;
    }
    Some(value.to_string())
}

fn matches_compound(tree: &DomTree, node: NodeId, compound: &Compound, scope: NodeId) -> bool {
    let Some(elem) = tree.element(node) else {
        return false;
    };

    if compound.tag.as_ref().is_some_and(|tag| *tag != elem.tag_name) {
        return false;
    }
    if compound.id.as_ref().is_some_and(|id| elem.id() != Some(id.as_str())) {
        return false;
    }
    if !compound.classes.iter().all(|class| elem.has_class(class)) {
        return false;
    }
    if !compound.attrs.iter().all(|cond| cond.matches(elem)) {
        return false;
    }

    compound.pseudo_classes.iter().all(|pseudo| match pseudo {
        PseudoClass::Scope => node == scope,
        PseudoClass::FirstChild => tree.prev_element_sibling(node).is_none(),
        PseudoClass::LastChild => tree.next_element_sibling(node).is_none(),
    })
}

/// Right-to-left match with backtracking over ancestors and siblings
fn matches_chain(tree: &DomTree, parts: &[SelectorPart], node: NodeId, scope: NodeId) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !matches_compound(tree, node, &last.compound, scope) {
        return false;
    }
    let Some(combinator) = last.combinator else {
        return rest.is_empty();
    };

    match combinator {
        Combinator::Child => tree
            .parent_element(node)
            .is_some_and(|parent| matches_chain(tree, rest, parent, scope)),
        Combinator::Descendant => {
            let mut cursor = tree.parent_element(node);
            while let Some(ancestor) = cursor {
                if matches_chain(tree, rest, ancestor, scope) {
                    return true;
                }
                cursor = tree.parent_element(ancestor);
            }
            false
        }
        Combinator::AdjacentSibling => tree
            .prev_element_sibling(node)
            .is_some_and(|sibling| matches_chain(tree, rest, sibling, scope)),
        Combinator::GeneralSibling => {
            let mut cursor = tree.prev_element_sibling(node);
            while let Some(sibling) = cursor {
                if matches_chain(tree, rest, sibling, scope) {
                    return true;
                }
                cursor = tree.prev_element_sibling(sibling);
            }
            false
        }
    }
}

impl DomTree {
    /// `:scope` for a query rooted at `root`; the document maps to its element
    fn scope_for(&self, root: NodeId) -> NodeId {
        if root == NodeId::ROOT {
            self.children(root)
                .find(|(_, node)| node.is_element())
                .map_or(root, |(id, _)| id)
        } else {
            root
        }
    }

    fn element_descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(root).into_iter().filter(|&id| self.is_element(id))
    }
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector, self.scope_selector)?;
        let scope = self.scope_for(root);
        Ok(self
            .element_descendants(root)
            .find(|&id| list.matches(self, id, scope)))
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector, self.scope_selector)?;
        let scope = self.scope_for(root);
        Ok(self
            .element_descendants(root)
            .filter(|&id| list.matches(self, id, scope))
            .collect())
    }

    fn get_elements_by_class_name(&self, root: NodeId, class_names: &str) -> Vec<NodeId> {
        let wanted: Vec<&str> = class_names.split_ascii_whitespace().collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.element_descendants(root)
            .filter(|&id| wanted.iter().all(|class| self.has_class(id, class)))
            .collect()
    }

    fn get_elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.element_descendants(root)
            .filter(|&id| tag == "*" || self.element(id).is_some_and(|e| e.tag_name == tag))
            .collect()
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.element_descendants(NodeId::ROOT)
            .find(|&node| self.element(node).and_then(ElementData::id) == Some(id))
    }

    fn closest(&self, element: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector, self.scope_selector)?;
        let mut cursor = Some(element).filter(|&id| self.is_element(id));
        while let Some(current) = cursor {
            if list.matches(self, current, element) {
                return Ok(Some(current));
            }
            cursor = self.parent_element(current);
        }
        Ok(None)
    }

    fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        let list = SelectorList::parse(selector, self.scope_selector)?;
        Ok(list.matches(self, element, element))
    }
}
