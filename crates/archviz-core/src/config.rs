//! Pipeline configuration.
//!
//! Every spacing, size and color constant used by the layout engine, the
//! style resolver and the renderer lives here. All sections deserialize from
//! TOML with per-field defaults, so a config file only names what it changes:
//!
//! ```toml
//! [layout]
//! x_gap = 3.0
//!
//! [render]
//! dpi = 96
//! with_labels = false
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use archviz_error::{Error, ErrorKind, Result};

use crate::style::{Color, TAB20};

/// Points per inch; font sizes and line widths are expressed in points.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Top-level configuration passed through the whole pipeline.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VizConfig {
    pub layout: LayoutConfig,
    pub style: StyleConfig,
    pub render: RenderConfig,
}

/// Spacing of the layered layout, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Horizontal distance between neighbours within one layer.
    pub x_gap: f64,
    /// Vertical distance between consecutive layers.
    pub y_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_gap: 2.2,
            y_gap: 2.2,
        }
    }
}

/// Colors available to the style resolver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Cyclic layer palette, indexed by the rank of the layer value.
    pub palette: Vec<Color>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: TAB20.to_vec(),
        }
    }
}

/// Figure geometry and fixed drawing constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Plot area width in inches.
    pub width: f64,
    /// Plot area height in inches.
    pub height: f64,
    /// Pixels per inch of the saved image.
    pub dpi: f64,
    /// Node label size in points.
    pub font_size: f64,
    /// Legend text size in points.
    pub legend_font_size: f64,
    /// Node marker area in square points.
    pub node_size: f64,
    /// Node border width in points.
    pub border_width: f64,
    pub border_color: Color,
    pub edge_color: Color,
    /// Edge stroke width in points.
    pub edge_width: f64,
    pub edge_opacity: f64,
    /// Curve bend relative to the edge length.
    pub curvature: f64,
    /// Arrowhead length in points.
    pub arrow_size: f64,
    pub background: Color,
    pub with_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 14.0,
            height: 9.0,
            dpi: 160.0,
            font_size: 8.0,
            legend_font_size: 10.0,
            node_size: 650.0,
            border_width: 0.8,
            border_color: Color::BLACK,
            edge_color: Color::BLACK,
            edge_width: 1.2,
            edge_opacity: 0.8,
            curvature: 0.08,
            arrow_size: 10.0,
            background: Color::WHITE,
            with_labels: true,
        }
    }
}

impl RenderConfig {
    pub fn with_figure_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_labels(mut self, with_labels: bool) -> Self {
        self.with_labels = with_labels;
        self
    }

    /// Convert a length in points to pixels at the configured resolution.
    pub fn pt_to_px(&self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }

    /// Node disk radius in pixels, derived from the marker area.
    pub fn node_radius_px(&self) -> f64 {
        self.pt_to_px(self.node_size.sqrt() / 2.0)
    }

    /// Plot area size in pixels.
    pub fn plot_size_px(&self) -> (f64, f64) {
        (self.width * self.dpi, self.height * self.dpi)
    }
}

impl VizConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VizConfig = toml::from_str(content).map_err(|err| {
            Error::new(ErrorKind::ConfigInvalid, err.message().to_string())
                .with_operation("config::from_toml_str")
                .set_source(err)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("config::load")
                .with_context("path", path.display().to_string())
        })?;
        debug!(path = %path.display(), "loading config");
        Self::from_toml_str(&content).map_err(|err| err.with_context("path", path.display().to_string()))
    }

    /// Check that every numeric setting is usable.
    pub fn validate(&self) -> Result<()> {
        positive("layout.x_gap", self.layout.x_gap)?;
        positive("layout.y_gap", self.layout.y_gap)?;

        if self.style.palette.is_empty() {
            return Err(Error::config_invalid(
                "style.palette",
                "palette must contain at least one color",
            ));
        }

        let render = &self.render;
        positive("render.width", render.width)?;
        positive("render.height", render.height)?;
        positive("render.dpi", render.dpi)?;
        positive("render.font_size", render.font_size)?;
        positive("render.legend_font_size", render.legend_font_size)?;
        positive("render.node_size", render.node_size)?;
        positive("render.edge_width", render.edge_width)?;
        positive("render.arrow_size", render.arrow_size)?;
        non_negative("render.border_width", render.border_width)?;

        if !(0.0..=1.0).contains(&render.edge_opacity) {
            return Err(Error::config_invalid(
                "render.edge_opacity",
                format!("opacity must be within 0..=1, got {}", render.edge_opacity),
            ));
        }
        if !render.curvature.is_finite() {
            return Err(Error::config_invalid(
                "render.curvature",
                "curvature must be finite",
            ));
        }
        Ok(())
    }
}

fn positive(setting: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::config_invalid(
            setting,
            format!("{setting} must be a positive number, got {value}"),
        ))
    }
}

fn non_negative(setting: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::config_invalid(
            setting,
            format!("{setting} must not be negative, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = VizConfig::default();
        config.validate().unwrap();
        assert_eq!(config.layout.x_gap, 2.2);
        assert_eq!(config.render.dpi, 160.0);
        assert_eq!(config.style.palette.len(), 20);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = VizConfig::from_toml_str(
            r##"
            [layout]
            x_gap = 3.0

            [render]
            with_labels = false
            border_color = "#336699"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout.x_gap, 3.0);
        assert_eq!(config.layout.y_gap, 2.2);
        assert!(!config.render.with_labels);
        assert_eq!(config.render.border_color, Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(config.render.width, 14.0);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let err = VizConfig::from_toml_str("[layout]\nxgap = 1.0\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = VizConfig::from_toml_str("[layout]\ny_gap = 0.0\n").unwrap_err();
        assert_eq!(err.context_value("setting"), Some("layout.y_gap"));

        let err = VizConfig::from_toml_str("[style]\npalette = []\n").unwrap_err();
        assert_eq!(err.context_value("setting"), Some("style.palette"));

        let err = VizConfig::from_toml_str("[render]\nedge_opacity = 1.5\n").unwrap_err();
        assert_eq!(err.context_value("setting"), Some("render.edge_opacity"));

        let err = VizConfig::from_toml_str("[style]\npalette = [\"teal\"]\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz.toml");
        std::fs::write(&path, "[render]\ndpi = 72.0\n").unwrap();

        let config = VizConfig::load(&path).unwrap();
        assert_eq!(config.render.dpi, 72.0);
        assert_eq!(config.render.pt_to_px(10.0), 10.0);

        let err = VizConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn unit_conversions() {
        let render = RenderConfig::default().with_dpi(72.0);
        assert!((render.node_radius_px() - 650f64.sqrt() / 2.0).abs() < 1e-9);
        let (w, h) = render.with_figure_size(2.0, 1.0).plot_size_px();
        assert_eq!((w, h), (144.0, 72.0));
    }
}
