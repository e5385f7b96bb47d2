//! Command-line argument definitions for the PRISMA flow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, output format and
//! raster scale, configuration file selection, and logging verbosity.

use clap::Parser;

use prisma_flow::OutputFormat;

/// Command-line arguments for the PRISMA flow diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input record (TOML, or JSON with a `.json` extension)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output image
    #[arg(short, long, default_value = "prisma_flow_diagram.png")]
    pub output: String,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Raster scale factor for PNG output; overrides the configuration
    #[arg(long)]
    pub scale: Option<f32>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the output format: explicit, else from the output extension,
    /// else PNG.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_path(&self.output))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["prisma-flow", "counts.toml"]);
        assert_eq!(args.output, "prisma_flow_diagram.png");
        assert_eq!(args.log_level, "info");
        assert_eq!(args.output_format(), OutputFormat::Png);
        assert!(args.scale.is_none());
    }

    #[test]
    fn test_format_from_output_extension() {
        let args = Args::parse_from(["prisma-flow", "counts.toml", "-o", "out.svg"]);
        assert_eq!(args.output_format(), OutputFormat::Svg);
    }

    #[test]
    fn test_explicit_format_wins() {
        let args = Args::parse_from(["prisma-flow", "counts.toml", "-o", "out.svg", "-f", "png"]);
        assert_eq!(args.output_format(), OutputFormat::Png);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Args::try_parse_from(["prisma-flow", "counts.toml", "-f", "pdf"]);
        assert!(result.is_err());
    }
}
