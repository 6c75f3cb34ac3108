//! CSS Box Model
//!
//! Fixed-size box geometry for elements the embedder has not laid out.

use crate::geometry::{DOMRect, ElementGeometry};
use crate::style::{ComputedStyle, length_to_px};

/// Content rect plus the three edge layers around it
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxDimensions {
    pub content: DOMRect,
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
    pub margin: EdgeSizes,
}

/// Per-side thickness of one box layer, in px
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeSizes {
    /// Read `{prefix}{side}{suffix}` for every side; unresolvable values are 0
    pub fn from_style(style: &ComputedStyle, prefix: &str, suffix: &str) -> Self {
        let side = |name: &str| {
            let value = style.get(&format!("{prefix}{name}{suffix}"));
            length_to_px(value, 0.0, 0.0).unwrap_or(0.0).max(0.0)
        };
        Self {
            top: side("top"),
            right: side("right"),
            bottom: side("bottom"),
            left: side("left"),
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// `rect` grown outwards by these edges
    pub fn expand(&self, rect: DOMRect) -> DOMRect {
        DOMRect::from_xywh(
            rect.x - self.left,
            rect.y - self.top,
            rect.width + self.horizontal(),
            rect.height + self.vertical(),
        )
    }
}

impl BoxDimensions {
    pub fn padding_box(&self) -> DOMRect {
        self.padding.expand(self.content)
    }

    pub fn border_box(&self) -> DOMRect {
        self.border.expand(self.padding_box())
    }

    pub fn margin_box(&self) -> DOMRect {
        self.margin.expand(self.border_box())
    }

    /// Element geometry for this box, given the inline advance of its content
    pub fn to_geometry(&self, content_advance: f64) -> ElementGeometry {
        let border_box = self.border_box();
        let padding_box = self.padding_box();
        ElementGeometry {
            offset_top: border_box.y,
            offset_left: border_box.x,
            offset_width: border_box.width,
            offset_height: border_box.height,
            client_top: self.border.top,
            client_left: self.border.left,
            client_width: padding_box.width,
            client_height: padding_box.height,
            scroll_width: padding_box.width.max(content_advance + self.padding.horizontal()),
            scroll_height: padding_box.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxDimensions {
        BoxDimensions {
            content: DOMRect::from_xywh(20.0, 20.0, 100.0, 50.0),
            padding: EdgeSizes { top: 5.0, right: 5.0, bottom: 5.0, left: 5.0 },
            border: EdgeSizes { top: 1.0, right: 1.0, bottom: 1.0, left: 1.0 },
            margin: EdgeSizes { top: 10.0, right: 10.0, bottom: 10.0, left: 10.0 },
        }
    }

    #[test]
    fn test_box_areas() {
        let dims = sample();

        assert_eq!(dims.padding_box(), DOMRect::from_xywh(15.0, 15.0, 110.0, 60.0));
        assert_eq!(dims.border_box(), DOMRect::from_xywh(14.0, 14.0, 112.0, 62.0));
        assert_eq!(dims.margin_box(), DOMRect::from_xywh(4.0, 4.0, 132.0, 82.0));
    }

    #[test]
    fn test_to_geometry_overflow() {
        let geometry = sample().to_geometry(300.0);

        assert_eq!(geometry.offset_width, 112.0);
        assert_eq!(geometry.client_width, 110.0);
        assert_eq!(geometry.scroll_width, 310.0);
        assert_eq!(geometry.client_left, 1.0);
    }
}
