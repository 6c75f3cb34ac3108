//! CSS transition parsing

use crate::value::parse_float;
use regex::Regex;
use std::sync::LazyLock;

static TIME_STRING: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^-?(0?\.)?\d+m?s$").ok());

/// Comma-separated items, keeping commas inside parentheses
static TRANSITION_ITEM: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"([^,()]|\([^)]*\))+").ok());

/// One entry of a `transition` value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    /// Transitioned property
    pub name: String,
    /// Duration in milliseconds
    pub duration: Option<f64>,
    /// Delay in milliseconds
    pub delay: Option<f64>,
    pub timing_function: Option<String>,
}

/// Whether `value` is a CSS time (`"2s"`, `"150ms"`, `".5s"`, `"-1s"`)
pub fn is_time_string(value: &str) -> bool {
    TIME_STRING.as_ref().is_some_and(|re| re.is_match(value))
}

/// Convert a CSS time to milliseconds; `None` for empty or unparsable input
pub fn time_to_ms(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    let factor = if value.ends_with("ms") { 1.0 } else { 1000.0 };
    parse_float(value).map(|n| n * factor)
}

/// Split on whitespace outside parentheses
fn split_parts(item: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, ch) in item.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&item[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        parts.push(&item[s..]);
    }
    parts
}

/// Parse `name duration [timing-function] [delay]`.
///
/// When the third part is itself a time it is taken as the delay.
pub fn parse_single_transition(transition: &str) -> Transition {
    let parts = split_parts(transition.trim());
    let part = |i: usize| parts.get(i).copied().unwrap_or_default();

    let name = part(0).to_string();
    let duration = time_to_ms(part(1));
    let timing_or_delay = part(2);

    if is_time_string(timing_or_delay) {
        return Transition {
            name,
            duration,
            delay: time_to_ms(timing_or_delay),
            timing_function: None,
        };
    }

    Transition {
        name,
        duration,
        delay: time_to_ms(part(3)),
        timing_function: (!timing_or_delay.is_empty()).then(|| timing_or_delay.to_string()),
    }
}

/// Parse a full `transition` value into its comma-separated entries
pub fn parse_transition(transition: &str) -> Vec<Transition> {
    let Some(re) = TRANSITION_ITEM.as_ref() else {
        return Vec::new();
    };
    re.find_iter(transition)
        .map(|m| m.as_str().trim())
        .filter(|item| !item.is_empty())
        .map(parse_single_transition)
        .collect()
}
