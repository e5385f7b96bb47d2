//! Connects boxes along the fixed edge list.
//!
//! Every edge carries a routing rule that picks one anchor on each box;
//! arrows are straight segments between the two anchors. There is no path
//! finding and no collision avoidance.

use indexmap::IndexMap;
use log::warn;

use prisma_flow_core::geometry::Point;

use crate::{
    boxes::{Anchor, NodeBox},
    node::NodeId,
};

/// The routing rule of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Same-column flow downward.
    Vertical,
    /// Several sources joining one target from above.
    Convergent,
    /// A branch out to a side node on the right.
    Lateral,
}

impl Route {
    /// Returns the source and target anchors for this rule.
    pub fn anchors(self) -> (Anchor, Anchor) {
        match self {
            Self::Vertical | Self::Convergent => (Anchor::Bottom, Anchor::Top),
            Self::Lateral => (Anchor::Right, Anchor::Left),
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub route: Route,
}

const fn edge(source: NodeId, target: NodeId, route: Route) -> Edge {
    Edge {
        source,
        target,
        route,
    }
}

/// The eight edges of a PRISMA flow diagram, in drawing order.
pub const EDGES: [Edge; 8] = [
    edge(NodeId::Db, NodeId::Merged, Route::Convergent),
    edge(NodeId::Other, NodeId::Merged, Route::Convergent),
    edge(NodeId::Merged, NodeId::Screened, Route::Vertical),
    edge(NodeId::Screened, NodeId::Excluded, Route::Lateral),
    edge(NodeId::Screened, NodeId::Fulltext, Route::Vertical),
    edge(NodeId::Fulltext, NodeId::ExcludedFt, Route::Lateral),
    edge(NodeId::Fulltext, NodeId::Qualitative, Route::Vertical),
    edge(NodeId::Qualitative, NodeId::Quantitative, Route::Vertical),
];

/// An edge resolved to concrete endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutedArrow {
    source: NodeId,
    target: NodeId,
    start: Point,
    end: Point,
}

impl RoutedArrow {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the tail of the arrow, on the source box.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Returns the head of the arrow, on the target box.
    pub fn end(&self) -> Point {
        self.end
    }
}

/// Resolves every edge in `edges` to a straight segment between anchors of `boxes`.
///
/// Edges whose source or target has no box are skipped.
pub fn route(edges: &[Edge], boxes: &IndexMap<NodeId, NodeBox>) -> Vec<RoutedArrow> {
    edges
        .iter()
        .filter_map(|edge| {
            let (Some(source), Some(target)) = (boxes.get(&edge.source), boxes.get(&edge.target))
            else {
                warn!(
                    source = edge.source.name(),
                    target = edge.target.name();
                    "Skipping edge without boxes"
                );
                return None;
            };

            let (source_anchor, target_anchor) = edge.route.anchors();
            Some(RoutedArrow {
                source: edge.source,
                target: edge.target,
                start: source.anchor(source_anchor),
                end: target.anchor(target_anchor),
            })
        })
        .collect()
}
