//! Connector drawables and SVG arrow-head markers.
//!
//! Connectors in a flow diagram are always straight segments with a single
//! head at the destination. [`ArrowDrawer`] records every stroke color it has
//! drawn with so that one marker per color can be emitted into `<defs>`.

use std::collections::BTreeMap;

use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
};

/// Defines the visual properties of an arrow.
#[derive(Debug, Clone, Default)]
pub struct ArrowDefinition {
    stroke: StrokeDefinition,
}

impl ArrowDefinition {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self { stroke }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

/// A straight connector from a source point to a destination point.
#[derive(Debug, Clone)]
pub struct Arrow<'a> {
    definition: &'a ArrowDefinition,
    source: Point,
    destination: Point,
}

impl<'a> Arrow<'a> {
    /// Creates a new arrow between two absolute points.
    pub fn new(definition: &'a ArrowDefinition, source: Point, destination: Point) -> Self {
        Self {
            definition,
            source,
            destination,
        }
    }

    fn render_to_svg(&self) -> svg_element::Path {
        let color = self.definition.stroke().color();
        let path = svg_element::Path::new()
            .set(
                "d",
                Self::create_path_data_from_points(self.source, self.destination),
            )
            .set("fill", "none");

        crate::apply_stroke!(path, self.definition.stroke())
            .set("marker-end", format!("url(#{})", Self::marker_id(color)))
    }

    /// Create a path data string from two points
    pub fn create_path_data_from_points(start: Point, end: Point) -> String {
        format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
    }

    fn marker_id(color: Color) -> String {
        format!("arrow-right-{}", color.to_id_safe_string())
    }

    fn create_arrow_head(color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", Self::marker_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha()),
            )
    }
}

/// Manages arrow rendering and SVG marker generation.
///
/// Markers are keyed by their element id, so the generated `<defs>` block is
/// ordered and identical across runs.
#[derive(Debug, Default)]
pub struct ArrowDrawer {
    heads: BTreeMap<String, Color>,
}

impl ArrowDrawer {
    /// Creates an empty drawer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws an arrow onto the arrow layer and collects its color for marker generation
    pub fn draw_arrow(&mut self, arrow: &Arrow<'_>) -> LayeredOutput {
        let color = arrow.definition.stroke().color();
        self.heads.insert(Arrow::marker_id(color), color);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Arrow, Box::new(arrow.render_to_svg()));
        output
    }

    /// Generates SVG marker definitions for all collected colors
    pub fn draw_marker_definitions(&self) -> Box<dyn svg::Node> {
        let mut defs = svg_element::Definitions::new();
        for color in self.heads.values() {
            defs = defs.add(Arrow::create_arrow_head(*color));
        }
        defs.into()
    }
}
