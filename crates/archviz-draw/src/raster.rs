//! SVG to PNG rasterisation.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::debug;

use archviz_core::RenderConfig;
use archviz_error::{Error, Result};

/// Family used when a text element names none that is installed.
const FALLBACK_FONT: &str = "DejaVu Sans";

/// Rasterise an SVG document into PNG bytes, one SVG unit per pixel.
pub fn rasterize_png(svg: &str, config: &RenderConfig) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.font_family = FALLBACK_FONT.to_string();
    options.dpi = config.dpi as f32;
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| {
        Error::render_failed(format!("failed to parse generated SVG: {err}"))
            .with_operation("raster::rasterize_png")
            .set_source(err)
    })?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        Error::render_failed(format!("failed to allocate {width}x{height} surface"))
            .with_operation("raster::rasterize_png")
    })?;

    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    debug!(width, height, "rasterised");

    pixmap.encode_png().map_err(|err| {
        Error::render_failed(format!("failed to encode PNG: {err}"))
            .with_operation("raster::rasterize_png")
            .set_source(err)
    })
}
