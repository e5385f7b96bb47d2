//! Drawable Components for Diagram Rendering
//!
//! This module provides the drawable building blocks of a flow diagram: boxes,
//! labels and connectors. All drawable components implement the [`Drawable`]
//! trait, which provides a consistent interface for rendering to layered SVG
//! output and calculating size.
//!
//! # Layer-Based Rendering
//!
//! Drawables render to one or more [`RenderLayer`]s, which are automatically ordered
//! during final SVG generation.
mod arrow;
mod layer;
mod positioned;
mod rectangle;
mod stroke;
mod text;

pub use arrow::{Arrow, ArrowDefinition, ArrowDrawer};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use positioned::PositionedDrawable;
pub use rectangle::{Rectangle, RectangleDefinition};
pub use stroke::StrokeDefinition;
pub use text::{TextBlock, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The center point where this drawable should be rendered
    ///
    /// # Returns
    ///
    /// A [`LayeredOutput`] containing the SVG nodes organized by layer.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
