//! Example: Rendering a diagram from an in-memory record
//!
//! This example builds a PRISMA flow diagram directly from counts, without
//! reading an input file, and writes both an SVG and a PNG rendering.

use std::fs;

use prisma_flow::{
    DiagramBuilder, InputRecord, OutputFormat, RenderOptions,
    config::{AppConfig, LayoutConfig},
    node::NodeId,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram from record...\n");

    let record = InputRecord {
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
    };

    // Relabel one box; every other node keeps its default template
    let mut layout = LayoutConfig::default();
    layout.set_label(
        NodeId::Qualitative,
        "Studies included in narrative synthesis (n = {qualitative})",
    );
    let config = AppConfig::new(
        layout,
        Default::default(),
        Default::default(),
        Default::default(),
    );

    let builder = DiagramBuilder::new(config)?;
    let diagram = builder.build(&record);

    for node_box in diagram.boxes() {
        println!("{:>14}: {}", node_box.node(), node_box.lines().join(" / "));
    }

    let svg = builder.render(&diagram, OutputFormat::Svg, &RenderOptions::new())?;
    fs::write("prisma_flow_diagram.svg", svg)?;

    let png = builder.render(
        &diagram,
        OutputFormat::Png,
        &RenderOptions::new().with_dpi(192.0),
    )?;
    fs::write("prisma_flow_diagram.png", png)?;

    println!("\nWrote prisma_flow_diagram.svg and prisma_flow_diagram.png");
    Ok(())
}
