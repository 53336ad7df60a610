//! Canvas geometry: plot area, coordinate mapping and legend placement.
//!
//! The plot area is `width × height` inches at `dpi`. Layout coordinates are
//! scaled independently per axis to fill it, keeping a margin so node disks
//! never touch the edge. The legend column sits to the right of the plot
//! area and the canvas is the tight union of both.

use archviz_core::{Layout, Point, RenderConfig};

use crate::canvas::Rect;

/// Horizontal offset of the legend, as a fraction of the plot width.
const LEGEND_ANCHOR: f64 = 1.01;
/// Average glyph advance relative to the font size.
const GLYPH_ADVANCE: f64 = 0.6;

/// Legend block geometry, all in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_px: f64,
    pub padding: f64,
    pub row_height: f64,
}

impl LegendBox {
    fn new(origin_x: f64, labels: &[String], title: &str, font_px: f64) -> Self {
        let padding = 0.4 * font_px;
        let row_height = 1.5 * font_px;
        let swatch_width = 2.0 * font_px;
        let text_gap = 0.8 * font_px;

        let widest = labels
            .iter()
            .map(|l| text_width(l, font_px))
            .fold(0.0, f64::max);
        let width = (swatch_width + text_gap + widest).max(text_width(title, font_px)) + 2.0 * padding;
        let height = row_height * (labels.len() + 1) as f64 + 2.0 * padding;

        Self {
            x: origin_x,
            y: 0.0,
            width,
            height,
            font_px,
            padding,
            row_height,
        }
    }

    /// Center of the title row.
    pub fn title_anchor(&self) -> Point {
        Point::new(
            self.x + self.width / 2.0,
            self.y + self.padding + self.row_height / 2.0,
        )
    }

    /// Swatch rectangle of entry `row` (0-based, below the title).
    pub fn swatch(&self, row: usize) -> Rect {
        let center_y = self.row_center(row);
        let height = 0.7 * self.font_px;
        Rect {
            x: self.x + self.padding,
            y: center_y - height / 2.0,
            width: 2.0 * self.font_px,
            height,
        }
    }

    /// Left end of the text baseline region of entry `row`, vertically centered.
    pub fn text_anchor(&self, row: usize) -> Point {
        Point::new(
            self.x + self.padding + 2.8 * self.font_px,
            self.row_center(row),
        )
    }

    fn row_center(&self, row: usize) -> f64 {
        self.y + self.padding + self.row_height * (row as f64 + 1.5)
    }
}

/// Pixel geometry of one rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub legend: LegendBox,
    center: Point,
    scale_x: f64,
    scale_y: f64,
}

impl Frame {
    pub fn new(layout: &Layout, legend_labels: &[String], legend_title: &str, config: &RenderConfig) -> Self {
        let (plot_width, plot_height) = config.plot_size_px();
        let inset = 2.0 * config.node_radius_px();
        let inner_width = (plot_width - 2.0 * inset).max(1.0);
        let inner_height = (plot_height - 2.0 * inset).max(1.0);

        let (center, scale_x, scale_y) = match layout.bounds() {
            Some(b) => (
                Point::new((b.min_x + b.max_x) / 2.0, (b.min_y + b.max_y) / 2.0),
                axis_scale(inner_width, b.width()),
                axis_scale(inner_height, b.height()),
            ),
            None => (Point::default(), 0.0, 0.0),
        };

        let legend = LegendBox::new(
            plot_width * LEGEND_ANCHOR,
            legend_labels,
            legend_title,
            config.pt_to_px(config.legend_font_size),
        );

        let width = (legend.x + legend.width + legend.padding).ceil();
        let height = plot_height.max(legend.y + legend.height).ceil();

        Self {
            width,
            height,
            plot_width,
            plot_height,
            legend,
            center,
            scale_x,
            scale_y,
        }
    }

    /// Map a layout point to canvas pixels; layout `y` up becomes canvas `y` down.
    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(
            self.plot_width / 2.0 + (p.x - self.center.x) * self.scale_x,
            self.plot_height / 2.0 - (p.y - self.center.y) * self.scale_y,
        )
    }
}

fn axis_scale(available: f64, span: f64) -> f64 {
    if span > 0.0 { available / span } else { 0.0 }
}

fn text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * GLYPH_ADVANCE * font_px
}
