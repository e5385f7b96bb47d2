//! Configuration types for PRISMA flow diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources, and every section falls back to
//! built-in defaults when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Wrap density, node rectangle and label overrides.
//! - [`StyleConfig`] - Colors, fonts, title and phase labels.
//! - [`CanvasConfig`] - Size of the SVG user space.
//! - [`RenderConfig`] - Raster output defaults.
//!
//! # Example
//!
//! ```
//! # use prisma_flow::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.style().title(), Some("PRISMA Flow Diagram"));
//! ```
//!
//! A TOML configuration file mirrors the sections:
//!
//! ```toml
//! [layout]
//! chars_per_unit = 1.0
//!
//! [layout.nodes.excluded_ft]
//! x = 70
//! y = 44
//! width = 25
//! height = 16
//!
//! [layout.labels]
//! merged = "Records after deduplication (n = {records_screened})"
//!
//! [style]
//! line_color = "#333333"
//! phase_labels = true
//!
//! [render]
//! scale = 2.0
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use prisma_flow_core::color::Color;

use crate::node::NodeId;

/// Default diagram title.
pub const DEFAULT_TITLE: &str = "PRISMA Flow Diagram";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Raster output configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Wrap density and layout table overrides.
    /// * `style` - Visual styling options.
    /// * `canvas` - Size of the SVG user space.
    /// * `render` - Raster output defaults.
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        canvas: CanvasConfig,
        render: RenderConfig,
    ) -> Self {
        Self {
            layout,
            style,
            canvas,
            render,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the raster output configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// A node rectangle in normalized units (0–100, origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NodeRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Layout configuration: wrap density and per-node overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Label characters per normalized unit of box width.
    #[serde(default = "LayoutConfig::default_chars_per_unit")]
    chars_per_unit: f32,

    /// Rectangle overrides keyed by node.
    #[serde(default)]
    nodes: BTreeMap<NodeId, NodeRect>,

    /// Label template overrides keyed by node.
    #[serde(default)]
    labels: BTreeMap<NodeId, String>,
}

impl LayoutConfig {
    fn default_chars_per_unit() -> f32 {
        1.2
    }

    /// Returns the wrap density in characters per normalized unit.
    pub fn chars_per_unit(&self) -> f32 {
        self.chars_per_unit
    }

    /// Returns the rectangle override for `node`, if any.
    pub fn node(&self, node: NodeId) -> Option<NodeRect> {
        self.nodes.get(&node).copied()
    }

    /// Returns the label template for `node`, falling back to the built-in one.
    pub fn label_template(&self, node: NodeId) -> &str {
        self.labels
            .get(&node)
            .map(String::as_str)
            .unwrap_or_else(|| node.default_template())
    }

    /// Overrides the rectangle of `node`.
    pub fn set_node(&mut self, node: NodeId, rect: NodeRect) {
        self.nodes.insert(node, rect);
    }

    /// Overrides the label template of `node`.
    pub fn set_label(&mut self, node: NodeId, template: impl Into<String>) {
        self.labels.insert(node, template.into());
    }

    /// Sets the wrap density.
    pub fn set_chars_per_unit(&mut self, chars_per_unit: f32) {
        self.chars_per_unit = chars_per_unit;
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chars_per_unit: Self::default_chars_per_unit(),
            nodes: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults: a white canvas,
/// white boxes, black 1.5px lines and 11px Arial.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    box_fill_color: Option<String>,

    #[serde(default)]
    line_color: Option<String>,

    #[serde(default)]
    line_width: Option<f32>,

    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,

    #[serde(default)]
    text_color: Option<String>,

    /// Baseline distance as a multiple of the font size.
    #[serde(default)]
    line_spacing: Option<f32>,

    /// Diagram title; an empty string disables it.
    #[serde(default)]
    title: Option<String>,

    /// Draw phase bands with their labels in the left margin.
    #[serde(default)]
    phase_labels: bool,

    #[serde(default)]
    band_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background color")
    }

    /// Returns the parsed box fill [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn box_fill_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.box_fill_color.as_deref(), "box fill color")
    }

    /// Returns the parsed outline and connector [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn line_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.line_color.as_deref(), "line color")
    }

    /// Returns the parsed phase band [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn band_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.band_color.as_deref(), "band color")
    }

    /// Returns the parsed label and title [`Color`], if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.text_color.as_deref(), "text color")
    }

    /// Returns the configured line spacing factor.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is not a positive finite number.
    pub fn line_spacing(&self) -> Result<Option<f32>, String> {
        positive(self.line_spacing, "line spacing")
    }

    /// Returns the configured line width.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is not a positive finite number.
    pub fn line_width(&self) -> Result<Option<f32>, String> {
        positive(self.line_width, "line width")
    }

    /// Returns the configured font size in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not a positive finite number.
    pub fn font_size(&self) -> Result<Option<f32>, String> {
        positive(self.font_size, "font size")
    }

    /// Returns the configured font family.
    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Returns the title to draw, or `None` when the title is disabled.
    pub fn title(&self) -> Option<&str> {
        match self.title.as_deref() {
            None => Some(DEFAULT_TITLE),
            Some("") => None,
            Some(title) => Some(title),
        }
    }

    /// Returns whether phase bands and their labels are drawn.
    pub fn phase_labels(&self) -> bool {
        self.phase_labels
    }

    /// Sets the diagram title; an empty string disables it.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Enables or disables phase band labels.
    pub fn set_phase_labels(&mut self, enabled: bool) {
        self.phase_labels = enabled;
    }

    /// Sets the outline and connector color string.
    pub fn set_line_color(&mut self, color: impl Into<String>) {
        self.line_color = Some(color.into());
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = Some(size);
    }
}

fn parse_color(value: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} in config: {err}"))
}

fn positive(value: Option<f32>, what: &str) -> Result<Option<f32>, String> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => {
            Err(format!("Invalid {what} in config: {v} is not a positive number"))
        }
        other => Ok(other),
    }
}

/// Size of the SVG user space, in pixels.
///
/// The normalized 0–100 layout is mapped onto the area inside `margin`
/// (below the title, when one is drawn).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "CanvasConfig::default_width")]
    width: f32,

    #[serde(default = "CanvasConfig::default_height")]
    height: f32,

    #[serde(default = "CanvasConfig::default_margin")]
    margin: f32,
}

impl CanvasConfig {
    fn default_width() -> f32 {
        900.0
    }

    fn default_height() -> f32 {
        1200.0
    }

    fn default_margin() -> f32 {
        45.0
    }

    /// Creates a canvas of the given size and margin.
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Returns the canvas width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the margin on every side.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(
            Self::default_width(),
            Self::default_height(),
            Self::default_margin(),
        )
    }
}

/// Raster output defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_scale")]
    scale: f32,
}

impl RenderConfig {
    fn default_scale() -> f32 {
        1.0
    }

    /// Returns the default raster scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: Self::default_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_approx_eq!(f32, config.layout().chars_per_unit(), 1.2);
        assert_approx_eq!(f32, config.canvas().width(), 900.0);
        assert_approx_eq!(f32, config.canvas().height(), 1200.0);
        assert_approx_eq!(f32, config.canvas().margin(), 45.0);
        assert_approx_eq!(f32, config.render().scale(), 1.0);
        assert_eq!(config.style().title(), Some(DEFAULT_TITLE));
        assert!(!config.style().phase_labels());
        assert_eq!(config.style().background_color(), Ok(None));
    }

    #[test]
    fn test_deserialize_full_config() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            chars_per_unit = 1.0

            [layout.nodes.excluded_ft]
            x = 70
            y = 44
            width = 25
            height = 16

            [layout.labels]
            merged = "Merged (n = {records_screened})"

            [style]
            background_color = "#fafafa"
            line_color = "navy"
            line_width = 2.0
            font_family = "Helvetica"
            text_color = "#222222"
            line_spacing = 1.5
            title = ""
            phase_labels = true

            [canvas]
            width = 1000

            [render]
            scale = 2.0
            "##,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().chars_per_unit(), 1.0);
        let rect = config.layout().node(NodeId::ExcludedFt).unwrap();
        assert_approx_eq!(f32, rect.height, 16.0);
        assert!(config.layout().node(NodeId::Db).is_none());
        assert_eq!(
            config.layout().label_template(NodeId::Merged),
            "Merged (n = {records_screened})"
        );
        assert_eq!(
            config.layout().label_template(NodeId::Db),
            NodeId::Db.default_template()
        );

        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().line_width(), Ok(Some(2.0)));
        assert_eq!(config.style().font_family(), Some("Helvetica"));
        assert!(config.style().text_color().unwrap().is_some());
        assert_eq!(config.style().line_spacing(), Ok(Some(1.5)));
        assert_eq!(config.style().title(), None);
        assert!(config.style().phase_labels());

        assert_approx_eq!(f32, config.canvas().width(), 1000.0);
        assert_approx_eq!(f32, config.canvas().height(), 1200.0);
        assert_approx_eq!(f32, config.render().scale(), 2.0);
    }

    #[test]
    fn test_invalid_color_is_reported_lazily() {
        let config: AppConfig = toml::from_str("[style]\nline_color = \"not-a-color\"\n").unwrap();
        let err = config.style().line_color().unwrap_err();
        assert!(err.contains("line color"), "{err}");
    }

    #[test]
    fn test_invalid_font_size() {
        let mut style = StyleConfig::default();
        style.set_font_size(0.0);
        assert!(style.font_size().is_err());

        style.set_font_size(f32::NAN);
        assert!(style.font_size().is_err());

        style.set_font_size(12.0);
        assert_eq!(style.font_size(), Ok(Some(12.0)));
    }

    #[test]
    fn test_invalid_text_style_is_reported_lazily() {
        let config: AppConfig =
            toml::from_str("[style]\ntext_color = \"inky\"\nline_spacing = -1.0\n").unwrap();
        assert!(config.style().text_color().unwrap_err().contains("text color"));
        assert!(config.style().line_spacing().unwrap_err().contains("line spacing"));
    }

    #[test]
    fn test_unknown_node_key_is_rejected() {
        let result = toml::from_str::<AppConfig>(
            "[layout.nodes.nowhere]\nx = 1\ny = 1\nwidth = 1\nheight = 1\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_title() {
        let mut style = StyleConfig::default();
        style.set_title("Review 2026");
        assert_eq!(style.title(), Some("Review 2026"));
    }
}
