//! CLI logic for the PRISMA flow diagram tool.
//!
//! This module contains the core CLI logic: it loads the configuration and
//! the input record, builds the diagram, and writes the rendered image.

pub mod error_adapter;

mod args;
mod config;
mod input;

pub use args::Args;

use std::fs;

use log::info;

use prisma_flow::{DiagramBuilder, PrismaError};

/// Run the PRISMA flow CLI application
///
/// This function reads the input record, lays out the diagram and writes
/// the rendered SVG or PNG to the output file. No output file is written
/// when any step fails.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `PrismaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid input records
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PrismaError> {
    let output_format = args.output_format();
    info!(
        input_path = args.input,
        output_path = args.output,
        output_format:%;
        "Processing record"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let record = input::load_record(&args.input)?;

    let builder = DiagramBuilder::new(app_config)?;
    let diagram = builder.build(&record);

    let mut options = builder.render_options();
    if let Some(scale) = args.scale {
        options = options.with_scale(scale);
    }
    let bytes = builder.render(&diagram, output_format, &options)?;

    fs::write(&args.output, bytes)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
