//! Paint-order buckets for SVG output.
//!
//! A diagram is walked box by box, but it has to be painted band by band:
//! every fill first, then outlines, then connectors, then text. Drawables
//! therefore drop their nodes into a [`RenderLayer`] bucket and
//! [`LayeredOutput::render`] emits one `<g data-layer="..">` per bucket in
//! paint order.
//!
//! ```
//! # use prisma_flow_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Rectangle, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("Records screened")));
//! output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().contains("data-layer=\"background\""));
//! ```

use std::collections::BTreeMap;

use svg::node::element::Group;

pub type SvgNode = Box<dyn svg::Node>;

/// Paint order, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill and phase bands.
    Background,
    /// Box fills and outlines.
    Content,
    Arrow,
    /// Box labels, band labels and the title.
    Text,
}

impl RenderLayer {
    /// Value of the `data-layer` attribute on the layer's group.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes bucketed by [`RenderLayer`].
///
/// Within one layer nodes keep the order they were added in.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Appends every node of `other` after the nodes already in the same layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.values().all(Vec::is_empty)
    }

    /// Consumes the output and returns one group per non-empty layer.
    pub fn render(self) -> Vec<SvgNode> {
        self.layers
            .into_iter()
            .filter(|(_, nodes)| !nodes.is_empty())
            .map(|(layer, nodes)| {
                let group = nodes
                    .into_iter()
                    .fold(Group::new().set("data-layer", layer.name()), Group::add);
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
