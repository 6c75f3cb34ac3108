//! Platform Configuration
//!
//! Describes the host platform the document emulates: its native RTL scroll
//! convention, selector support and viewport.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native horizontal scroll-offset convention under `direction: rtl`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RtlScrollType {
    /// Offsets grow from 0 at the left edge; content starts scrolled to the max
    Default,
    /// Offsets are 0 at the right edge and go negative towards the left
    Negative,
    /// Offsets are 0 at the right edge and go positive towards the left
    Reverse,
}

impl RtlScrollType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Negative => "negative",
            Self::Reverse => "reverse",
        }
    }
}

impl fmt::Display for RtlScrollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host platform configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Native RTL scroll convention
    pub rtl_scroll: RtlScrollType,

    /// Whether selectors understand `:scope`
    pub scope_selector: bool,

    /// Viewport size in CSS pixels
    pub viewport_width: f64,
    pub viewport_height: f64,

    /// Font size of the root element (px)
    pub root_font_size: f64,

    /// Average glyph advance, as a fraction of the font size
    pub glyph_advance_em: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rtl_scroll: RtlScrollType::Negative,
            scope_selector: true,
            viewport_width: 1024.0,
            viewport_height: 768.0,
            root_font_size: 16.0,
            glyph_advance_em: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_partial_json() {
        let config: Config = serde_json::from_str(r#"{ "rtl_scroll": "reverse", "viewport_width": 320 }"#).unwrap();

        assert_eq!(config.rtl_scroll, RtlScrollType::Reverse);
        assert_eq!(config.viewport_width, 320.0);
        assert_eq!(config.viewport_height, 768.0);
        assert!(config.scope_selector);
    }

    #[test]
    fn test_rtl_scroll_type_display() {
        assert_eq!(RtlScrollType::Negative.to_string(), "negative");
        assert_eq!(serde_json::to_string(&RtlScrollType::Default).unwrap(), "\"default\"");
    }
}
