//! SVG backend.
//!
//! [`SvgBuilder`] maps a normalized [`Diagram`] onto the configured canvas
//! through a [`Viewport`] and emits one `<g>` per render layer: background
//! and phase bands, boxes, arrows, then text.

use log::debug;
use svg::{Document, node::element as svg_element};

use prisma_flow_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, ArrowDrawer, Drawable, LayeredOutput, PositionedDrawable,
        Rectangle, RectangleDefinition, RenderLayer, StrokeDefinition, TextBlock, TextDefinition,
    },
    geometry::{Bounds, Point, Size},
};

use crate::{
    Diagram, PrismaError,
    config::{CanvasConfig, StyleConfig},
    export::RenderError,
    layout::{PhaseBand, Viewport},
};

/// Vertical space reserved above the drawing area when a title is drawn.
pub const TITLE_SPACE: f32 = 40.0;

/// Horizontal extent of a phase band bar, in normalized units.
const BAND_MIN_X: f32 = 2.0;
const BAND_WIDTH: f32 = 11.0;

const BOX_CORNER_RADIUS: f32 = 4.0;
const BAND_CORNER_RADIUS: f32 = 3.0;
const TITLE_SCALE: f32 = 1.6;
const DEFAULT_LINE_WIDTH: f32 = 1.5;
const DEFAULT_BAND_COLOR: &str = "#dbe9f6";

/// Returns the space reserved for the title under `style`.
pub(crate) fn title_space(style: &StyleConfig) -> f32 {
    if style.title().is_some() {
        TITLE_SPACE
    } else {
        0.0
    }
}

fn color_or(
    configured: Result<Option<Color>, String>,
    fallback: &str,
) -> Result<Color, RenderError> {
    match configured.map_err(RenderError::Style)? {
        Some(color) => Ok(color),
        None => Color::new(fallback).map_err(RenderError::Style),
    }
}

/// Resolved drawing definitions for one render.
#[derive(Debug)]
struct Theme {
    background: Color,
    box_definition: RectangleDefinition,
    band_definition: RectangleDefinition,
    arrow_definition: ArrowDefinition,
    label_text: TextDefinition,
    band_text: TextDefinition,
    title_text: TextDefinition,
}

impl Theme {
    fn from_style(style: &StyleConfig) -> Result<Self, RenderError> {
        let background = color_or(style.background_color(), "white")?;
        let box_fill = color_or(style.box_fill_color(), "white")?;
        let band_fill = color_or(style.band_color(), DEFAULT_BAND_COLOR)?;
        let line_color = style
            .line_color()
            .map_err(RenderError::Style)?
            .unwrap_or_default();
        let line_width = style
            .line_width()
            .map_err(RenderError::Style)?
            .unwrap_or(DEFAULT_LINE_WIDTH);
        let stroke = StrokeDefinition::solid(line_color, line_width);

        let mut box_definition = RectangleDefinition::new();
        box_definition.set_fill_color(Some(box_fill));
        box_definition.set_stroke(Some(stroke));
        box_definition.set_rounded(BOX_CORNER_RADIUS);

        let mut band_definition = RectangleDefinition::new();
        band_definition.set_fill_color(Some(band_fill));
        band_definition.set_stroke(None);
        band_definition.set_rounded(BAND_CORNER_RADIUS);
        band_definition.set_layer(RenderLayer::Background);

        let mut label_text = TextDefinition::new();
        if let Some(family) = style.font_family() {
            label_text.set_font_family(family);
        }
        if let Some(size) = style.font_size().map_err(RenderError::Style)? {
            label_text.set_font_size(size);
        }
        if let Some(spacing) = style.line_spacing().map_err(RenderError::Style)? {
            label_text.set_line_height(spacing);
        }
        label_text.set_color(style.text_color().map_err(RenderError::Style)?);

        let mut band_text = label_text.clone();
        band_text.set_bold(true);

        let mut title_text = label_text.clone();
        title_text.set_font_size(label_text.font_size() * TITLE_SCALE);
        title_text.set_bold(true);

        Ok(Self {
            background,
            box_definition,
            band_definition,
            arrow_definition: ArrowDefinition::new(stroke),
            label_text,
            band_text,
            title_text,
        })
    }
}

/// Builds SVG documents for diagrams.
#[derive(Debug)]
pub struct SvgBuilder<'a> {
    style: &'a StyleConfig,
    canvas: &'a CanvasConfig,
}

impl<'a> SvgBuilder<'a> {
    pub fn new(style: &'a StyleConfig, canvas: &'a CanvasConfig) -> Self {
        Self { style, canvas }
    }

    /// Renders `diagram` into an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Style`] if a style value cannot be resolved, or
    /// [`PrismaError::Layout`] if the canvas leaves no drawing area.
    pub fn build(&self, diagram: &Diagram) -> Result<Document, PrismaError> {
        let theme = Theme::from_style(self.style)?;
        let title_offset = if diagram.title().is_some() {
            TITLE_SPACE
        } else {
            0.0
        };
        let viewport = Viewport::new(self.canvas, title_offset)?;

        let width = self.canvas.width();
        let height = self.canvas.height();

        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Background,
            Box::new(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", theme.background.to_string()),
            ),
        );

        if self.style.phase_labels() {
            for band in diagram.bands() {
                output.merge(self.render_band(&theme, &viewport, band));
            }
        }

        if let Some(title) = diagram.title() {
            let lines = [title.to_string()];
            let position = Point::new(width / 2.0, self.canvas.margin() + TITLE_SPACE / 2.0);
            output.merge(TextBlock::new(&theme.title_text, &lines).render_to_layers(position));
        }

        for node_box in diagram.boxes() {
            let bounds = viewport.map_bounds(node_box.bounds());
            let outline = PositionedDrawable::new(
                Rectangle::new(&theme.box_definition, bounds.to_size()),
                bounds.center(),
            );
            output.merge(outline.render_to_layers());

            let label = TextBlock::new(&theme.label_text, node_box.lines());
            output.merge(label.render_to_layers(bounds.center()));
        }

        let mut arrow_drawer = ArrowDrawer::new();
        for arrow in diagram.arrows() {
            let start = viewport.map_point(arrow.start());
            let end = viewport.map_point(arrow.end());
            let connector = Arrow::new(&theme.arrow_definition, start, end);
            output.merge(arrow_drawer.draw_arrow(&connector));
        }

        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(arrow_drawer.draw_marker_definitions());

        for node in output.render() {
            doc = doc.add(node);
        }

        debug!(
            boxes = diagram.boxes().len(),
            arrows = diagram.arrows().len();
            "SVG document rendered"
        );
        Ok(doc)
    }

    fn render_band(&self, theme: &Theme, viewport: &Viewport, band: &PhaseBand) -> LayeredOutput {
        let normalized = Bounds::new_from_top_left(
            Point::new(BAND_MIN_X, band.bounds().min_y()),
            Size::new(BAND_WIDTH, band.bounds().height()),
        );
        let bounds = viewport.map_bounds(normalized);

        let mut output = Rectangle::new(&theme.band_definition, bounds.to_size())
            .render_to_layers(bounds.center());

        let lines = [band.phase().label().to_string()];
        output.merge(
            TextBlock::new(&theme.band_text, &lines)
                .with_rotation(-90.0)
                .render_to_layers(bounds.center()),
        );
        output
    }
}
