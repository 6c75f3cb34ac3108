//! Layout Geometry
//!
//! Rectangles, the per-element geometry an embedder (or the fixed-box
//! layout) supplies, and native scroll offsets.

/// Axis-aligned rectangle in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    /// The same rect moved by `(dx, dy)`
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }
}

/// Laid-out geometry of one element.
///
/// Offsets are page coordinates; sizes are unrounded. The `client_*` and
/// `offset_*` DOM properties round these on read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementGeometry {
    // Border box
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,

    // Padding box, relative to the border box
    pub client_top: f64,
    pub client_left: f64,
    pub client_width: f64,
    pub client_height: f64,

    // Content extent including overflow
    pub scroll_width: f64,
    pub scroll_height: f64,
}

impl ElementGeometry {
    /// The border box; transforms are not modelled
    pub fn bounding_client_rect(&self) -> DOMRect {
        DOMRect::from_xywh(self.offset_left, self.offset_top, self.offset_width, self.offset_height)
    }
}

/// Native scroll offsets of an element
///
/// `left` stays `None` until the first write so the initial position can
/// follow the platform's RTL convention.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub left: Option<f64>,
    pub top: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = DOMRect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!((rect.left(), rect.top()), (10.0, 20.0));
        assert_eq!((rect.right(), rect.bottom()), (110.0, 70.0));
        assert_eq!(rect.translated(-10.0, 5.0), DOMRect::from_xywh(0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_bounding_rect_is_border_box() {
        let geometry = ElementGeometry {
            offset_left: 8.0,
            offset_top: 300.0,
            offset_width: 64.0,
            offset_height: 32.0,
            client_width: 60.0,
            ..Default::default()
        };

        assert_eq!(geometry.bounding_client_rect(), DOMRect::from_xywh(8.0, 300.0, 64.0, 32.0));
    }
}
