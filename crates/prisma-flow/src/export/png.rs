//! PNG backend: rasterizes the SVG document with resvg.
//!
//! The system font database is loaded once per process and shared
//! read-only by every render, so concurrent renders resolve fonts
//! identically.

use std::sync::{Arc, OnceLock};

use log::{debug, info};
use usvg::fontdb;

use crate::export::{RenderError, RenderOptions};

/// Largest pixmap a render may allocate, in pixels (one GiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 28;

static FONT_DATABASE: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

fn font_database() -> Arc<fontdb::Database> {
    FONT_DATABASE
        .get_or_init(|| {
            let mut database = fontdb::Database::new();
            database.load_system_fonts();
            info!(faces = database.len(); "Loaded system font database");
            Arc::new(database)
        })
        .clone()
}

/// Rasterizes `svg` into PNG bytes at `options.scale()`.
///
/// Cancellation is checked between the parse, rasterize and encode stages;
/// a cancelled render drops its pixmap and returns no image.
///
/// # Errors
///
/// Returns [`RenderError::Parse`] if the SVG is rejected,
/// [`RenderError::Allocation`] if the scale is invalid, the image would
/// exceed [`MAX_PIXELS`] or the pixmap cannot be allocated,
/// [`RenderError::Encode`] if PNG encoding fails, and
/// [`RenderError::Cancelled`] if cancellation was requested.
pub fn rasterize(svg: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let scale = options.scale();
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RenderError::Allocation(format!(
            "scale must be a positive number, got {scale}"
        )));
    }

    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb = font_database();

    let tree = usvg::Tree::from_str(svg, &usvg_options)
        .map_err(|err| RenderError::Parse(err.to_string()))?;
    options.checkpoint("parse")?;

    let size = tree.size();
    let width = (f64::from(size.width()) * f64::from(scale)).ceil().max(1.0);
    let height = (f64::from(size.height()) * f64::from(scale)).ceil().max(1.0);
    if width * height > MAX_PIXELS as f64 {
        return Err(RenderError::Allocation(format!(
            "{width}x{height} pixels exceeds the limit of {MAX_PIXELS} pixels"
        )));
    }
    let (width, height) = (width as u32, height as u32);
    debug!(width, height, scale; "Rasterizing diagram");

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RenderError::Allocation(format!("{width}x{height} pixels")))?;
    options.checkpoint("allocate")?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    options.checkpoint("rasterize")?;

    let png = pixmap
        .encode_png()
        .map_err(|err| RenderError::Encode(err.to_string()))?;
    options.checkpoint("encode")?;

    Ok(png)
}
