//! Placed diagram boxes and their anchor points.

use prisma_flow_core::geometry::{Bounds, Point};

use crate::{node::NodeId, wrap::wrap};

/// A named point on a box: its center or the midpoint of one of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

/// A box placed on the normalized canvas with its wrapped label.
///
/// Boxes are created fresh for every build and are immutable once placed.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    node: NodeId,
    bounds: Bounds,
    lines: Vec<String>,
}

impl NodeBox {
    /// Places `node` at `bounds`, wrapping `label` to `wrap_width` characters.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prisma_flow::boxes::{Anchor, NodeBox};
    /// # use prisma_flow::node::NodeId;
    /// # use prisma_flow_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(37.5, 37.0), Size::new(25.0, 8.0));
    /// let placed = NodeBox::place(NodeId::Screened, bounds, "Records screened (n = 180)", 30);
    ///
    /// assert_eq!(placed.lines(), ["Records screened (n = 180)"]);
    /// assert_eq!(placed.anchor(Anchor::Bottom), Point::new(50.0, 45.0));
    /// ```
    pub fn place(node: NodeId, bounds: Bounds, label: &str, wrap_width: usize) -> Self {
        Self {
            node,
            bounds,
            lines: wrap(label, wrap_width),
        }
    }

    /// Returns the node this box represents.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the rectangle of this box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the wrapped label lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn x(&self) -> f32 {
        self.bounds.min_x()
    }

    pub fn y(&self) -> f32 {
        self.bounds.min_y()
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    /// Returns the position of `anchor` on this box.
    pub fn anchor(&self, anchor: Anchor) -> Point {
        let center = self.bounds.center();
        match anchor {
            Anchor::Center => center,
            Anchor::Top => Point::new(center.x(), self.bounds.min_y()),
            Anchor::Bottom => Point::new(center.x(), self.bounds.max_y()),
            Anchor::Left => Point::new(self.bounds.min_x(), center.y()),
            Anchor::Right => Point::new(self.bounds.max_x(), center.y()),
        }
    }
}

/// Returns the label wrap width for a box `width` normalized units wide.
///
/// The result is rounded to the nearest character and never below one.
pub fn wrap_width_for(width: f32, chars_per_unit: f32) -> usize {
    let chars = (width * chars_per_unit).round();
    if chars.is_finite() && chars >= 1.0 {
        chars as usize
    } else {
        1
    }
}
