//! Rectangle drawables used for diagram boxes and band backdrops.

use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Visual properties of a rectangle.
///
/// # Examples
///
/// ```
/// # use prisma_flow_core::draw::RectangleDefinition;
/// # use prisma_flow_core::color::Color;
/// let mut definition = RectangleDefinition::new();
/// definition.set_fill_color(Some(Color::new("white").unwrap()));
/// definition.set_rounded(4.0);
/// ```
#[derive(Debug, Clone)]
pub struct RectangleDefinition {
    fill_color: Option<Color>,
    stroke: Option<StrokeDefinition>,
    rounded: f32,
    layer: RenderLayer,
}

impl RectangleDefinition {
    /// Create a new rectangle definition with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill color; `None` leaves the rectangle unfilled.
    pub fn set_fill_color(&mut self, color: Option<Color>) {
        self.fill_color = color;
    }

    /// Set the outline; `None` draws no outline.
    pub fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    /// Set the corner radius
    pub fn set_rounded(&mut self, radius: f32) {
        self.rounded = radius;
    }

    /// Set the layer the rectangle renders to
    pub fn set_layer(&mut self, layer: RenderLayer) {
        self.layer = layer;
    }

    /// Returns the outline, if any.
    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

impl Default for RectangleDefinition {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke: Some(StrokeDefinition::default()),
            rounded: 0.0,
            layer: RenderLayer::Content,
        }
    }
}

/// A rectangle of a fixed size, rendered centered on its position.
#[derive(Debug, Clone)]
pub struct Rectangle<'a> {
    definition: &'a RectangleDefinition,
    size: Size,
}

impl<'a> Rectangle<'a> {
    pub fn new(definition: &'a RectangleDefinition, size: Size) -> Self {
        Self { definition, size }
    }
}

impl Drawable for Rectangle<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = position.to_bounds(self.size);

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", self.size.width())
            .set("height", self.size.height());

        if self.definition.rounded > 0.0 {
            rect = rect.set("rx", self.definition.rounded);
        }

        rect = match self.definition.fill_color {
            Some(fill_color) => rect
                .set("fill", fill_color.to_string())
                .set("fill-opacity", fill_color.alpha()),
            None => rect.set("fill", "none"),
        };

        if let Some(stroke) = self.definition.stroke() {
            rect = crate::apply_stroke!(rect, stroke);
        }

        output.add_to_layer(self.definition.layer, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_renders_centered() {
        let definition = RectangleDefinition::new();
        let rect = Rectangle::new(&definition, Size::new(20.0, 10.0));
        let svg = rect.render_to_layers(Point::new(50.0, 50.0)).render()[0].to_string();

        assert!(svg.contains("x=\"40\""));
        assert!(svg.contains("y=\"45\""));
        assert!(svg.contains("width=\"20\""));
        assert!(svg.contains("height=\"10\""));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("data-layer=\"content\""));
    }

    #[test]
    fn test_rectangle_fill_and_rounding() {
        let mut definition = RectangleDefinition::new();
        definition.set_fill_color(Some(Color::new("white").unwrap()));
        definition.set_rounded(4.0);

        let svg = Rectangle::new(&definition, Size::new(10.0, 10.0))
            .render_to_layers(Point::default())
            .render()[0]
            .to_string();

        assert!(svg.contains("rx=\"4\""));
        assert!(svg.contains("fill=\"white\""));
    }

    #[test]
    fn test_rectangle_without_stroke_on_background_layer() {
        let mut definition = RectangleDefinition::new();
        definition.set_stroke(None);
        definition.set_layer(RenderLayer::Background);

        let rect = Rectangle::new(&definition, Size::new(10.0, 10.0));
        assert_eq!(rect.size(), Size::new(10.0, 10.0));

        let svg = rect.render_to_layers(Point::default()).render()[0].to_string();
        assert!(!svg.contains("stroke="));
        assert!(svg.contains("data-layer=\"background\""));
    }
}
