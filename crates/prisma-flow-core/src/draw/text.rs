//! Text rendering definitions for box labels, band labels and titles.
//!
//! Labels arrive already broken into lines (wrapping is a layout decision, not
//! a rendering one), so this module only has to stack those lines around a
//! center point.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`TextBlock`] - A renderable block of pre-wrapped lines
//!
//! # Quick Start
//!
//! ```
//! # use prisma_flow_core::draw::{TextDefinition, TextBlock};
//! let mut style = TextDefinition::new();
//! style.set_font_family("Helvetica");
//! style.set_font_size(12.0);
//!
//! let lines = vec!["Records screened".to_string(), "(n = 180)".to_string()];
//! let block = TextBlock::new(&style, &lines);
//! assert!(block.calculate_size().height() > 0.0);
//! ```

use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Average glyph advance as a fraction of the font size, used for size estimates.
const AVERAGE_GLYPH_ADVANCE: f32 = 0.55;

/// Defines the visual style for text elements.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `11` |
/// | Line height | `1.3` × font size |
/// | Weight | normal |
/// | Text color | `None` (SVG default, black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    line_height: f32,
    bold: bool,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family (e.g., "Arial", "Times New Roman", "sans-serif").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the line height as a multiple of the font size.
    pub fn set_line_height(&mut self, factor: f32) {
        self.line_height = factor;
    }

    /// Renders the text in bold when set.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets the text color. `None` keeps the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Returns the font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the font family.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the distance between two baselines in pixels.
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 11.0,
            line_height: 1.3,
            bold: false,
            color: None,
        }
    }
}

/// A block of pre-wrapped lines rendered centered on a point.
///
/// The block is emitted as a single SVG `<text>` element with one `<tspan>`
/// per line, so that line order survives in the output document.
#[derive(Debug, Clone)]
pub struct TextBlock<'a> {
    definition: &'a TextDefinition,
    lines: &'a [String],
    rotation: f32,
}

impl<'a> TextBlock<'a> {
    /// Creates a new text block with the given definition and lines.
    pub fn new(definition: &'a TextDefinition, lines: &'a [String]) -> Self {
        Self {
            definition,
            lines,
            rotation: 0.0,
        }
    }

    /// Rotates the block around its center by `degrees` (negative is counter-clockwise).
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Returns the lines of this block.
    pub fn lines(&self) -> &[String] {
        self.lines
    }

    /// Estimates the unrotated size of the block from character counts.
    pub fn calculate_size(&self) -> Size {
        let longest = self
            .lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let width = longest as f32 * self.definition.font_size() * AVERAGE_GLYPH_ADVANCE;
        let height = self.lines.len() as f32 * self.definition.line_height_px();
        Size::new(width, height)
    }
}

impl Drawable for TextBlock<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.lines.is_empty() {
            return output;
        }

        let line_height = self.definition.line_height_px();
        // Center of the first line, so the whole block is centered on `position`
        let first_line_y = position.y() - line_height * (self.lines.len() - 1) as f32 / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", first_line_y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.bold {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        if self.rotation != 0.0 {
            rendered_text = rendered_text.set(
                "transform",
                format!("rotate({} {} {})", self.rotation, position.x(), position.y()),
            );
        }

        for (index, line) in self.lines.iter().enumerate() {
            let dy = if index == 0 { 0.0 } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line.as_str()));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_family(), "Arial");
        assert_approx_eq!(f32, def.font_size(), 11.0);
        assert_approx_eq!(f32, def.line_height_px(), 14.3, epsilon = 0.001);
        assert!(def.color().is_none());
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_family("Helvetica");
        def.set_font_size(20.0);
        def.set_line_height(1.5);
        def.set_color(Some(Color::new("navy").unwrap()));

        assert_eq!(def.font_family(), "Helvetica");
        assert_approx_eq!(f32, def.line_height_px(), 30.0, epsilon = 0.001);
        assert!(def.color().is_some());
    }

    #[test]
    fn test_text_block_size_empty() {
        let def = TextDefinition::new();
        let empty: Vec<String> = Vec::new();
        let block = TextBlock::new(&def, &empty);
        assert!(block.calculate_size().is_zero());
        assert!(block.render_to_layers(Point::default()).is_empty());
    }

    #[test]
    fn test_text_block_size_grows_with_lines() {
        let def = TextDefinition::new();
        let one = lines(&["Records screened"]);
        let three = lines(&["Records screened", "(n = 180)", "x"]);

        let one_size = TextBlock::new(&def, &one).calculate_size();
        let three_size = TextBlock::new(&def, &three).calculate_size();

        assert_approx_eq!(f32, three_size.height(), one_size.height() * 3.0);
        assert_approx_eq!(f32, three_size.width(), one_size.width());
    }

    #[test]
    fn test_text_block_renders_lines_in_order() {
        let def = TextDefinition::new();
        let content = lines(&["first", "second", "third"]);
        let nodes = TextBlock::new(&def, &content)
            .render_to_layers(Point::new(100.0, 50.0))
            .render();

        assert_eq!(nodes.len(), 1);
        let svg = nodes[0].to_string();
        let first = svg.find("first").unwrap();
        let second = svg.find("second").unwrap();
        let third = svg.find("third").unwrap();
        assert!(first < second && second < third);
        assert!(svg.contains("data-layer=\"text\""));
    }

    #[test]
    fn test_text_block_centers_vertically() {
        let mut def = TextDefinition::new();
        def.set_font_size(10.0);
        def.set_line_height(2.0);
        let content = lines(&["a", "b", "c"]);
        let svg = TextBlock::new(&def, &content)
            .render_to_layers(Point::new(0.0, 100.0))
            .render()[0]
            .to_string();

        // Three lines of 20px around y=100 start one line above the center
        assert!(svg.contains("y=\"80\""), "unexpected svg: {svg}");
    }

    #[test]
    fn test_text_block_rotation() {
        let def = TextDefinition::new();
        let content = lines(&["Identification"]);
        let svg = TextBlock::new(&def, &content)
            .with_rotation(-90.0)
            .render_to_layers(Point::new(10.0, 20.0))
            .render()[0]
            .to_string();

        assert!(svg.contains("rotate(-90 10 20)"));
    }
}
