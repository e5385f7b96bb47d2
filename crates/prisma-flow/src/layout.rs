//! The layout table and the viewport mapping it onto the canvas.
//!
//! Node rectangles live in a normalized coordinate space: 0–100 on both
//! axes, origin top-left, y growing downward. The table is plain data; a
//! configuration may replace any node's rectangle without changing any of
//! the algorithms that consume it.
//!
//! Rendering maps normalized units to pixels through a single
//! [`Viewport`] scale-and-translate.

use indexmap::IndexMap;
use log::debug;

use prisma_flow_core::geometry::{Bounds, Point, Size};

use crate::{
    config::{CanvasConfig, LayoutConfig, NodeRect},
    error::PrismaError,
    node::{NodeId, Phase},
};

/// Extent of the normalized coordinate space on both axes.
pub const NORMALIZED_EXTENT: f32 = 100.0;

/// Built-in rectangles: node, x, y (top), width, height, phase.
const DEFAULT_TABLE: [(NodeId, f32, f32, f32, f32, Phase); 9] = [
    (NodeId::Db, 20.0, 7.0, 25.0, 8.0, Phase::Identification),
    (NodeId::Other, 55.0, 7.0, 25.0, 8.0, Phase::Identification),
    (NodeId::Merged, 37.5, 22.0, 25.0, 8.0, Phase::Screening),
    (NodeId::Screened, 37.5, 37.0, 25.0, 8.0, Phase::Screening),
    (NodeId::Excluded, 70.0, 37.0, 25.0, 8.0, Phase::Screening),
    (NodeId::Fulltext, 37.5, 52.0, 25.0, 8.0, Phase::Eligibility),
    (NodeId::ExcludedFt, 70.0, 45.0, 25.0, 15.0, Phase::Eligibility),
    (NodeId::Qualitative, 37.5, 67.0, 25.0, 8.0, Phase::Inclusion),
    (NodeId::Quantitative, 37.5, 82.0, 25.0, 8.0, Phase::Inclusion),
];

/// One row of the layout table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    bounds: Bounds,
    phase: Phase,
}

impl LayoutEntry {
    /// Returns the normalized rectangle.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the phase band the node belongs to.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// A phase band: the merged extent of every node in one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseBand {
    phase: Phase,
    bounds: Bounds,
}

impl PhaseBand {
    /// Returns the phase of this band.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the normalized extent of this band.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Fixed mapping from every node to its normalized rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTable {
    entries: IndexMap<NodeId, LayoutEntry>,
}

impl LayoutTable {
    /// Builds the table from the built-in rectangles and the overrides in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Layout`] if an override is not finite, has a
    /// non-positive size, or does not fit inside the normalized space.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, PrismaError> {
        let mut table = Self::default();

        for node in NodeId::ALL {
            let Some(rect) = config.node(node) else {
                continue;
            };
            validate_rect(node, rect)?;
            debug!(node = node.name(), x = rect.x, y = rect.y; "Overriding node rectangle");

            if let Some(entry) = table.entries.get_mut(&node) {
                entry.bounds = Bounds::new_from_top_left(
                    Point::new(rect.x, rect.y),
                    Size::new(rect.width, rect.height),
                );
            }
        }

        Ok(table)
    }

    /// Returns the normalized rectangle of `node`.
    pub fn position_of(&self, node: NodeId) -> Bounds {
        self.entry(node).bounds
    }

    /// Returns the phase of `node`.
    pub fn phase_of(&self, node: NodeId) -> Phase {
        self.entry(node).phase
    }

    /// Returns one band per phase, top to bottom.
    pub fn bands(&self) -> Vec<PhaseBand> {
        Phase::ALL
            .into_iter()
            .filter_map(|phase| {
                self.entries
                    .values()
                    .filter(|entry| entry.phase == phase)
                    .map(|entry| entry.bounds)
                    .reduce(|acc, bounds| acc.merge(&bounds))
                    .map(|bounds| PhaseBand { phase, bounds })
            })
            .collect()
    }

    fn entry(&self, node: NodeId) -> LayoutEntry {
        // Every node is inserted by `Default`, so the fallback is unreachable
        self.entries
            .get(&node)
            .copied()
            .unwrap_or_else(|| default_entry(node))
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        let entries = NodeId::ALL
            .into_iter()
            .map(|node| (node, default_entry(node)))
            .collect();
        Self { entries }
    }
}

fn default_entry(node: NodeId) -> LayoutEntry {
    let (_, x, y, width, height, phase) = DEFAULT_TABLE[node as usize];
    LayoutEntry {
        bounds: Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height)),
        phase,
    }
}

fn validate_rect(node: NodeId, rect: NodeRect) -> Result<(), PrismaError> {
    let NodeRect {
        x,
        y,
        width,
        height,
    } = rect;

    if ![x, y, width, height].iter().all(|v| v.is_finite()) {
        return Err(PrismaError::Layout(format!(
            "rectangle of `{node}` has a non-finite coordinate"
        )));
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(PrismaError::Layout(format!(
            "rectangle of `{node}` must have a positive size, got {width}x{height}"
        )));
    }
    if x < 0.0 || y < 0.0 || x + width > NORMALIZED_EXTENT || y + height > NORMALIZED_EXTENT {
        return Err(PrismaError::Layout(format!(
            "rectangle of `{node}` at ({x}, {y}) size {width}x{height} leaves the 0-100 canvas"
        )));
    }
    Ok(())
}

/// Scale-and-translate from normalized units to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin: Point,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    /// Maps the normalized space onto `canvas` inside its margin, leaving
    /// `top_offset` pixels free above the drawing area.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Layout`] if the canvas leaves no drawing area.
    pub fn new(canvas: &CanvasConfig, top_offset: f32) -> Result<Self, PrismaError> {
        let margin = canvas.margin();
        let area_width = canvas.width() - 2.0 * margin;
        let area_height = canvas.height() - 2.0 * margin - top_offset;

        let valid = [canvas.width(), canvas.height(), margin, top_offset]
            .iter()
            .all(|v| v.is_finite())
            && margin >= 0.0
            && area_width > 0.0
            && area_height > 0.0;
        if !valid {
            return Err(PrismaError::Layout(format!(
                "canvas {}x{} with margin {margin} leaves no drawing area",
                canvas.width(),
                canvas.height()
            )));
        }

        Ok(Self {
            origin: Point::new(margin, margin + top_offset),
            scale_x: area_width / NORMALIZED_EXTENT,
            scale_y: area_height / NORMALIZED_EXTENT,
        })
    }

    /// Maps a normalized point to pixels.
    pub fn map_point(&self, point: Point) -> Point {
        point
            .scale(self.scale_x, self.scale_y)
            .offset(self.origin.x(), self.origin.y())
    }

    /// Maps normalized bounds to pixels.
    pub fn map_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new_from_top_left(
            self.map_point(bounds.min_point()),
            bounds.to_size().scale(self.scale_x, self.scale_y),
        )
    }
}
