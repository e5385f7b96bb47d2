//! The built diagram: placed boxes, routed arrows and decorations.

use indexmap::IndexMap;

use crate::{boxes::NodeBox, layout::PhaseBand, node::NodeId, router::RoutedArrow};

/// A fully laid-out PRISMA flow diagram in normalized coordinates.
///
/// A diagram is built once per request by
/// [`DiagramBuilder::build`](crate::DiagramBuilder::build), serialized, and
/// discarded. It is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    boxes: IndexMap<NodeId, NodeBox>,
    arrows: Vec<RoutedArrow>,
    bands: Vec<PhaseBand>,
    title: Option<String>,
}

impl Diagram {
    pub(crate) fn new(
        boxes: IndexMap<NodeId, NodeBox>,
        arrows: Vec<RoutedArrow>,
        bands: Vec<PhaseBand>,
        title: Option<String>,
    ) -> Self {
        Self {
            boxes,
            arrows,
            bands,
            title,
        }
    }

    /// Returns the boxes in drawing order.
    pub fn boxes(&self) -> impl ExactSizeIterator<Item = &NodeBox> {
        self.boxes.values()
    }

    /// Returns the box of `node`, if present.
    pub fn box_of(&self, node: NodeId) -> Option<&NodeBox> {
        self.boxes.get(&node)
    }

    /// Returns the arrows in drawing order.
    pub fn arrows(&self) -> &[RoutedArrow] {
        &self.arrows
    }

    /// Returns the phase bands, top to bottom.
    pub fn bands(&self) -> &[PhaseBand] {
        &self.bands
    }

    /// Returns the diagram title, if one is drawn.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
