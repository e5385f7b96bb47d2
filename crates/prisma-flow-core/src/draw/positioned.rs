//! A drawable pinned to a canvas position.

use crate::{
    draw::{Drawable, LayeredOutput},
    geometry::Point,
};

/// A [`Drawable`] together with the point its center is drawn at.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    center: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    pub fn new(drawable: D, center: Point) -> Self {
        Self { drawable, center }
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers(self.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        draw::{Rectangle, RectangleDefinition},
        geometry::Size,
    };

    #[test]
    fn test_renders_at_stored_center() {
        let definition = RectangleDefinition::new();
        let outline = PositionedDrawable::new(
            Rectangle::new(&definition, Size::new(10.0, 10.0)),
            Point::new(50.0, 50.0),
        );

        let svg = outline.render_to_layers().render()[0].to_string();
        assert!(svg.contains("x=\"45\""));
        assert!(svg.contains("y=\"45\""));
    }
}
