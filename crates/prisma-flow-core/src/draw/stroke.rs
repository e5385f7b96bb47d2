//! Line properties shared by box outlines and connectors.
//!
//! The diagram draws every line solid, so a stroke is just a color and a
//! width. [`apply_stroke!`](crate::apply_stroke!) writes both onto any SVG
//! element that accepts `.set(..)`:
//!
//! ```
//! use prisma_flow_core::{apply_stroke, color::Color, draw::StrokeDefinition};
//! use svg::node::element::Path;
//!
//! let stroke = StrokeDefinition::solid(Color::new("#333333").unwrap(), 1.5);
//! let edge = apply_stroke!(Path::new().set("d", "M 0 0 L 0 40"), &stroke);
//!
//! assert!(edge.to_string().contains("stroke-width=\"1.5\""));
//! ```

use crate::color::Color;

/// Color and width of a solid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    /// One pixel black.
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity` and `stroke-width` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_default_is_thin_black() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
    }

    #[test]
    fn test_apply_stroke_writes_color_and_width() {
        let stroke = StrokeDefinition::solid(Color::new("red").unwrap(), 2.0);
        let rendered = crate::apply_stroke!(Rectangle::new(), &stroke).to_string();

        assert!(rendered.contains("stroke=\"red\""));
        assert!(rendered.contains("stroke-width=\"2\""));
        assert!(rendered.contains("stroke-opacity=\"1\""));
        assert!(!rendered.contains("stroke-dasharray"));
    }

    #[test]
    fn test_apply_stroke_accepts_owned_definition() {
        let rendered = crate::apply_stroke!(Line::new(), StrokeDefinition::default()).to_string();
        assert!(rendered.contains("stroke=\"black\""));
    }
}
