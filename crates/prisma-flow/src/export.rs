//! Export functionality for PRISMA flow diagrams.
//!
//! This module turns a built [`Diagram`](crate::Diagram) into output bytes.
//! It is the final stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! InputRecord
//!     ↓ build (layout table, box model, arrow router)
//! Diagram
//!     ↓ export (this module)
//! SVG text / PNG bytes
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG document rendered in layered z-order
//! - [`png`] - Rasterization of the SVG document
//!
//! # Error Handling
//!
//! Backend failures are reported as [`RenderError`], which converts into
//! [`PrismaError::Render`](crate::PrismaError::Render) at the crate boundary.
//! No partial output is ever returned.

pub mod png;
pub mod svg;

use std::{
    fmt,
    path::Path,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use log::info;
use thiserror::Error;

/// Pixel density that corresponds to a raster scale of 1.0.
pub const BASE_DPI: f32 = 96.0;

/// Output formats supported by [`DiagramBuilder::render`](crate::DiagramBuilder::render).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
    #[default]
    Png,
}

impl OutputFormat {
    /// Guesses the format from a file extension, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prisma_flow::export::OutputFormat;
    /// assert_eq!(OutputFormat::from_extension("SVG"), Some(OutputFormat::Svg));
    /// assert_eq!(OutputFormat::from_extension("pdf"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        extension.parse().ok()
    }

    /// Guesses the format from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(format!("unsupported output format `{s}`")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Cooperative cancellation flag shared between a caller and a render.
///
/// Clones observe the same flag. Cancelling is sticky.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Creates a handle that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every render observing this handle.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Per-call rendering options.
///
/// # Examples
///
/// ```
/// # use prisma_flow::export::{CancelHandle, RenderOptions};
/// let cancel = CancelHandle::new();
/// let options = RenderOptions::new().with_dpi(192.0).with_cancel(cancel.clone());
/// assert_eq!(options.scale(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    scale: f32,
    cancel: Option<CancelHandle>,
}

impl RenderOptions {
    /// Creates options with a raster scale of 1.0 and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raster scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the raster scale from a pixel density, where 96 dpi is a scale of 1.0.
    pub fn with_dpi(self, dpi: f32) -> Self {
        self.with_scale(dpi / BASE_DPI)
    }

    /// Makes the render observe `cancel`.
    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns the raster scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Fails with [`RenderError::Cancelled`] if cancellation was requested.
    pub(crate) fn checkpoint(&self, stage: &str) -> Result<(), RenderError> {
        match &self.cancel {
            Some(cancel) if cancel.is_cancelled() => {
                info!(stage; "Render cancelled");
                Err(RenderError::Cancelled)
            }
            _ => Ok(()),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            cancel: None,
        }
    }
}

/// Errors raised by the export backends.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The style configuration could not be resolved.
    #[error("invalid style: {0}")]
    Style(String),

    /// The generated SVG could not be parsed by the rasterizer.
    #[error("failed to parse SVG: {0}")]
    Parse(String),

    /// The raster target could not be allocated.
    #[error("failed to allocate pixmap: {0}")]
    Allocation(String),

    /// The raster image could not be encoded.
    #[error("failed to encode PNG: {0}")]
    Encode(String),

    /// The render was cancelled through a [`CancelHandle`].
    #[error("render cancelled")]
    Cancelled,
}
