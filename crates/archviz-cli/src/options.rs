//! Command-line options shared by the archviz binary and its tests.

use std::path::{Path, PathBuf};

use clap::Args;

use archviz_core::{RenderConfig, Result, VizConfig};

/// Figure options. Unset flags keep the value from the config file, or the
/// built-in default when there is none.
#[derive(Args, Debug, Clone, Default)]
pub struct FigureOptions {
    /// Figure width in inches [default: 14]
    #[arg(long = "w", value_name = "INCHES")]
    pub width: Option<f64>,

    /// Figure height in inches [default: 9]
    #[arg(long = "h", value_name = "INCHES")]
    pub height: Option<f64>,

    /// Label font size in points [default: 8]
    #[arg(long = "font", value_name = "PT")]
    pub font_size: Option<f64>,

    /// Output resolution in dots per inch [default: 160]
    #[arg(long, value_name = "DPI")]
    pub dpi: Option<f64>,

    /// Do not draw node labels
    #[arg(long = "no-labels")]
    pub no_labels: bool,
}

impl FigureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn without_labels(mut self) -> Self {
        self.no_labels = true;
        self
    }

    /// Overlay the flags that were given onto `render`.
    pub fn apply(&self, mut render: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            render.width = width;
        }
        if let Some(height) = self.height {
            render.height = height;
        }
        if let Some(font_size) = self.font_size {
            render.font_size = font_size;
        }
        if let Some(dpi) = self.dpi {
            render.dpi = dpi;
        }
        if self.no_labels {
            render.with_labels = false;
        }
        render
    }
}

/// Resolve the effective configuration: defaults, then the config file, then flags.
pub fn resolve_config(config_path: Option<&Path>, figure: &FigureOptions) -> Result<VizConfig> {
    let mut config = match config_path {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::default(),
    };
    config.render = figure.apply(config.render);
    config.validate()?;
    Ok(config)
}

/// Default output path when `--out` is not given.
pub fn default_output() -> PathBuf {
    PathBuf::from("graph.png")
}
