//! PRISMA Flow - layout and rendering of PRISMA systematic-review flow diagrams.
//!
//! A PRISMA flow diagram reports how records moved through the
//! identification, screening, eligibility and inclusion phases of a
//! systematic review. This crate turns the thirteen counts of an
//! [`InputRecord`] into a fixed nine-box, eight-arrow diagram and exports it
//! as SVG or PNG.
//!
//! Building and rendering are separate phases: [`DiagramBuilder::build`] is a
//! pure function from a record to a [`Diagram`], and
//! [`DiagramBuilder::render`] serializes a diagram.

pub mod boxes;
pub mod config;
pub mod export;
pub mod layout;
pub mod node;
pub mod record;
pub mod router;
pub mod wrap;

mod diagram;
mod error;

pub use prisma_flow_core::{color, draw, geometry};

pub use diagram::Diagram;
pub use error::{InputError, PrismaError};
pub use export::{CancelHandle, OutputFormat, RenderError, RenderOptions};
pub use record::InputRecord;

use indexmap::IndexMap;
use log::{debug, info, trace};

use boxes::{NodeBox, wrap_width_for};
use config::AppConfig;
use layout::{LayoutTable, Viewport};
use node::{NodeId, render_template};
use router::EDGES;

/// Builder for laying out and rendering PRISMA flow diagrams.
///
/// The builder holds only immutable configuration, so one instance can be
/// shared across threads and used for any number of records.
///
/// # Examples
///
/// ```rust,no_run
/// use prisma_flow::{DiagramBuilder, InputRecord, OutputFormat, RenderOptions};
///
/// let record = InputRecord {
///     databases: 200,
///     records_screened: 180,
///     ..Default::default()
/// };
///
/// let builder = DiagramBuilder::default();
/// let diagram = builder.build(&record);
///
/// let png = builder
///     .render(&diagram, OutputFormat::Png, &RenderOptions::new().with_dpi(192.0))
///     .expect("Failed to render");
/// ```
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    config: AppConfig,
    table: LayoutTable,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Layout`] if a layout table override is invalid,
    /// the wrap density is not a positive number, or the canvas leaves no
    /// drawing area.
    ///
    /// # Examples
    ///
    /// ```
    /// use prisma_flow::{DiagramBuilder, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    /// ```
    pub fn new(config: AppConfig) -> Result<Self, PrismaError> {
        let chars_per_unit = config.layout().chars_per_unit();
        if !(chars_per_unit.is_finite() && chars_per_unit > 0.0) {
            return Err(PrismaError::Layout(format!(
                "chars_per_unit must be a positive number, got {chars_per_unit}"
            )));
        }

        let table = LayoutTable::from_config(config.layout())?;
        Viewport::new(
            config.canvas(),
            export::svg::title_space(config.style()),
        )?;

        Ok(Self { config, table })
    }

    /// Returns the configuration of this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the layout table in use.
    pub fn table(&self) -> &LayoutTable {
        &self.table
    }

    /// Returns render options seeded from the `[render]` configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_scale(self.config.render().scale())
    }

    /// Lay out `record` as a diagram.
    ///
    /// Every label template is filled from the record and wrapped to its
    /// box, every box is placed from the layout table, and the eight fixed
    /// edges are routed between box anchors. This never fails and has no
    /// side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use prisma_flow::{DiagramBuilder, InputRecord};
    ///
    /// let diagram = DiagramBuilder::default().build(&InputRecord::default());
    /// assert_eq!(diagram.boxes().len(), 9);
    /// assert_eq!(diagram.arrows().len(), 8);
    /// ```
    pub fn build(&self, record: &InputRecord) -> Diagram {
        let chars_per_unit = self.config.layout().chars_per_unit();

        let boxes: IndexMap<NodeId, NodeBox> = NodeId::ALL
            .into_iter()
            .map(|node| {
                let bounds = self.table.position_of(node);
                let label =
                    render_template(self.config.layout().label_template(node), record);
                let wrap_width = wrap_width_for(bounds.width(), chars_per_unit);
                (node, NodeBox::place(node, bounds, &label, wrap_width))
            })
            .collect();

        let arrows = router::route(&EDGES, &boxes);
        let title = self.config.style().title().map(str::to_string);

        debug!(boxes = boxes.len(), arrows = arrows.len(); "Diagram built");
        trace!(record:?; "Built diagram from record");

        Diagram::new(boxes, arrows, self.table.bands(), title)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Render`] if the style configuration cannot be
    /// resolved.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, PrismaError> {
        let document = export::svg::SvgBuilder::new(self.config.style(), self.config.canvas())
            .build(diagram)?;
        Ok(document.to_string())
    }

    /// Render a diagram to bytes in `format`.
    ///
    /// Identical diagrams rendered with identical options produce identical
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Render`] if the style cannot be resolved, the
    /// rasterizer fails, or the render is cancelled through `options`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prisma_flow::{DiagramBuilder, InputRecord, OutputFormat, RenderOptions};
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder.build(&InputRecord::default());
    /// let svg = builder
    ///     .render(&diagram, OutputFormat::Svg, &RenderOptions::new())
    ///     .unwrap();
    /// assert!(String::from_utf8(svg).unwrap().contains("<svg"));
    /// ```
    pub fn render(
        &self,
        diagram: &Diagram,
        format: OutputFormat,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, PrismaError> {
        info!(format:% = format, scale = options.scale(); "Rendering diagram");
        options.checkpoint("scene")?;

        let svg = self.render_svg(diagram)?;
        options.checkpoint("svg")?;

        let bytes = match format {
            OutputFormat::Svg => svg.into_bytes(),
            OutputFormat::Png => export::png::rasterize(&svg, options)?,
        };

        info!(bytes = bytes.len(); "Diagram rendered");
        Ok(bytes)
    }
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            table: LayoutTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LayoutConfig, record::Field};

    fn example_record() -> InputRecord {
        InputRecord {
            databases: 200,
            other_sources: 20,
            duplicates_removed: 40,
            records_screened: 180,
            records_excluded: 130,
            full_text_assessed: 50,
            full_text_excluded_total: 35,
            excl_irrelevant: 12,
            excl_low_quality: 10,
            excl_duplicates: 8,
            excl_not_related: 5,
            qualitative: 15,
            quantitative: 7,
        }
    }

    fn config_with_layout(layout: LayoutConfig) -> AppConfig {
        AppConfig::new(
            layout,
            Default::default(),
            Default::default(),
            Default::default(),
        )
    }

    #[test]
    fn test_builder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiagramBuilder>();
        assert_send_sync::<Diagram>();
    }

    #[test]
    fn test_build_uses_label_overrides() {
        let mut layout = LayoutConfig::default();
        layout.set_label(
            NodeId::Merged,
            "After dedup (n = {records_screened}) {missing}",
        );
        let config = config_with_layout(layout);

        let diagram = DiagramBuilder::new(config).unwrap().build(&example_record());
        let merged = diagram.box_of(NodeId::Merged).unwrap();
        assert_eq!(merged.lines().join(" "), "After dedup (n = 180) {missing}");
    }

    #[test]
    fn test_build_wraps_by_chars_per_unit() {
        let mut layout = LayoutConfig::default();
        layout.set_chars_per_unit(0.4);
        let config = config_with_layout(layout);

        let diagram = DiagramBuilder::new(config).unwrap().build(&example_record());
        for node_box in diagram.boxes() {
            for line in node_box.lines() {
                let fits = line.chars().count() <= 10 || !line.contains(' ');
                assert!(fits, "{line:?} is wider than 10 characters");
            }
        }
    }

    #[test]
    fn test_new_rejects_invalid_chars_per_unit() {
        for bad in [0.0, -1.0, f32::NAN] {
            let mut layout = LayoutConfig::default();
            layout.set_chars_per_unit(bad);
            let config = config_with_layout(layout);
            assert!(matches!(
                DiagramBuilder::new(config),
                Err(PrismaError::Layout(_))
            ));
        }
    }

    #[test]
    fn test_title_follows_style() {
        let diagram = DiagramBuilder::default().build(&example_record());
        assert_eq!(diagram.title(), Some(config::DEFAULT_TITLE));
        assert_eq!(diagram.bands().len(), 4);
    }

    #[test]
    fn test_render_cancelled_before_start() {
        let builder = DiagramBuilder::default();
        let diagram = builder.build(&example_record());
        let cancel = CancelHandle::new();
        cancel.cancel();

        for format in [OutputFormat::Svg, OutputFormat::Png] {
            let result = builder.render(
                &diagram,
                format,
                &RenderOptions::new().with_cancel(cancel.clone()),
            );
            assert!(matches!(
                result,
                Err(PrismaError::Render(RenderError::Cancelled))
            ));
        }
    }

    #[test]
    fn test_render_options_follow_config() {
        let config: AppConfig = toml::from_str("[render]\nscale = 3.0\n").unwrap();
        let builder = DiagramBuilder::new(config).unwrap();
        assert_eq!(builder.render_options().scale(), 3.0);
    }

    #[test]
    fn test_changing_a_field_changes_only_its_label() {
        let builder = DiagramBuilder::default();
        let base_record = example_record();
        let base = builder.build(&base_record);

        for field in Field::ALL {
            let placeholder = format!("{{{}}}", field.name());
            let owner = NodeId::ALL
                .into_iter()
                .find(|node| node.default_template().contains(&placeholder))
                .unwrap_or_else(|| panic!("{field} has no box"));

            let changed_record = base_record.with(field, base_record.get(field) + 1);
            let changed = builder.build(&changed_record);

            for (before, after) in base.boxes().zip(changed.boxes()) {
                assert_eq!(before.bounds(), after.bounds(), "{field} moved a box");
                if before.node() == owner {
                    assert_ne!(before.lines(), after.lines(), "{field} left {owner} unchanged");
                } else {
                    assert_eq!(before.lines(), after.lines(), "{field} changed {}", before.node());
                }
            }
            assert_eq!(base.arrows(), changed.arrows(), "{field} moved an arrow");
        }
    }
}
