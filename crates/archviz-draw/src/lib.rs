//! Drawing and image output for archviz.
//!
//! Turns a graph, its layout and its resolved styles into an image file.
//!
//! # Module Structure
//!
//! - [`canvas`]: the drawing abstraction and a recording implementation
//! - [`frame`]: plot area, coordinate mapping and legend placement
//! - [`paint`]: composition of nodes, edges, labels and legend
//! - [`svg`]: SVG document writer
//! - [`raster`]: PNG encoding

pub mod canvas;
pub mod frame;
pub mod paint;
pub mod raster;
pub mod svg;

use std::path::Path;

use tracing::info;

use archviz_core::RenderConfig;
use archviz_error::Result;

pub use canvas::{Canvas, DrawCommand, EdgePath, EdgeStyle, NodeStyle, RecordingCanvas, Rect};
pub use frame::Frame;
pub use paint::{Scene, paint};
pub use svg::SvgCanvas;

// ============================================================================
// Public API
// ============================================================================

/// Output encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// `.svg` (any case) selects SVG; everything else is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Render the scene to an SVG document.
pub fn render_svg(scene: &Scene<'_>, config: &RenderConfig) -> String {
    let mut canvas = SvgCanvas::new();
    paint(scene, config, &mut canvas);
    canvas.build()
}

/// Render the scene to PNG bytes.
pub fn render_png(scene: &Scene<'_>, config: &RenderConfig) -> Result<Vec<u8>> {
    raster::rasterize_png(&render_svg(scene, config), config)
}

/// Encode the scene in `format`.
pub fn render_image(scene: &Scene<'_>, config: &RenderConfig, format: ImageFormat) -> Result<Vec<u8>> {
    match format {
        ImageFormat::Svg => Ok(render_svg(scene, config).into_bytes()),
        ImageFormat::Png => render_png(scene, config),
    }
}

/// Render the scene and write it to `path`, creating missing parent directories.
///
/// The image is fully encoded before anything touches the file system, so a
/// failed render leaves no file behind.
pub fn save_image(scene: &Scene<'_>, config: &RenderConfig, path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path);
    let bytes = render_image(scene, config, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            archviz_error::Error::from(err)
                .with_operation("draw::save_image")
                .with_context("dir", parent.display().to_string())
        })?;
    }
    std::fs::write(path, &bytes).map_err(|err| {
        archviz_error::Error::from(err)
            .with_operation("draw::save_image")
            .with_context("path", path.display().to_string())
    })?;

    info!(path = %path.display(), bytes = bytes.len(), ?format, "image written");
    Ok(format)
}
