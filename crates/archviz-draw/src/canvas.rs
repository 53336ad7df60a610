//! Drawing surface abstraction.
//!
//! The painter only speaks in terms of nodes, directed edges, labels and
//! legend entries, in canvas pixels with `y` growing downward. Any 2D surface
//! can implement [`Canvas`]; the crate ships an SVG writer and a recorder.

use archviz_core::{Color, LinePattern, Point};

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Geometry of one edge, already trimmed to the node borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePath {
    /// Quadratic curve between two distinct nodes.
    Curve {
        start: Point,
        control: Point,
        end: Point,
    },
    /// Cubic loop from a node back to itself.
    Loop {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match self {
            EdgePath::Curve { start, .. } | EdgePath::Loop { start, .. } => *start,
        }
    }

    /// Arrow tip position.
    pub fn end(&self) -> Point {
        match self {
            EdgePath::Curve { end, .. } | EdgePath::Loop { end, .. } => *end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub fill: Color,
    pub stroke: Color,
    /// Border width in pixels.
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    pub opacity: f64,
    pub pattern: LinePattern,
    /// Dash lengths in pixels, empty for a solid line.
    pub dashes: Vec<f64>,
    /// Arrowhead length in pixels.
    pub arrow_size: f64,
}

/// A 2D surface the painter draws onto.
pub trait Canvas {
    /// Called once before any other call, with the final canvas size.
    fn begin(&mut self, width: f64, height: f64, background: Color);

    /// Open a named group, e.g. all edges of one relation.
    fn begin_group(&mut self, _class: &str, _key: &str) {}

    fn end_group(&mut self) {}

    fn draw_node(&mut self, center: Point, radius: f64, style: &NodeStyle);

    /// Draw a directed edge with its arrowhead at [`EdgePath::end`].
    fn draw_edge(&mut self, path: &EdgePath, style: &EdgeStyle);

    /// Draw text centered on `anchor`.
    fn draw_label(&mut self, anchor: Point, text: &str, font_size: f64);

    fn draw_legend_title(&mut self, anchor: Point, text: &str, font_size: f64);

    /// Draw a color swatch and its text, left-aligned at `text_anchor`.
    fn draw_legend_entry(
        &mut self,
        swatch: Rect,
        color: Color,
        text_anchor: Point,
        text: &str,
        font_size: f64,
    );
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Begin {
        width: f64,
        height: f64,
        background: Color,
    },
    Group {
        class: String,
        key: String,
    },
    EndGroup,
    Node {
        center: Point,
        radius: f64,
        style: NodeStyle,
    },
    Edge {
        path: EdgePath,
        style: EdgeStyle,
    },
    Label {
        anchor: Point,
        text: String,
        font_size: f64,
    },
    LegendTitle {
        text: String,
    },
    LegendEntry {
        swatch: Rect,
        color: Color,
        text: String,
    },
}

/// Canvas that keeps every call, for inspection.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Canvas size passed to [`Canvas::begin`].
    pub fn size(&self) -> Option<(f64, f64)> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Begin { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
    }

    pub fn nodes(&self) -> Vec<(Point, &NodeStyle)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Node { center, style, .. } => Some((*center, style)),
                _ => None,
            })
            .collect()
    }

    pub fn edges(&self) -> Vec<(&EdgePath, &EdgeStyle)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Edge { path, style } => Some((path, style)),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn legend_entries(&self) -> Vec<(&str, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::LegendEntry { text, color, .. } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    /// Keys of the groups opened with `class`, in drawing order.
    pub fn groups(&self, class: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Group { class: cls, key } if cls == class => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn begin(&mut self, width: f64, height: f64, background: Color) {
        self.commands.push(DrawCommand::Begin {
            width,
            height,
            background,
        });
    }

    fn begin_group(&mut self, class: &str, key: &str) {
        self.commands.push(DrawCommand::Group {
            class: class.to_string(),
            key: key.to_string(),
        });
    }

    fn end_group(&mut self) {
        self.commands.push(DrawCommand::EndGroup);
    }

    fn draw_node(&mut self, center: Point, radius: f64, style: &NodeStyle) {
        self.commands.push(DrawCommand::Node {
            center,
            radius,
            style: *style,
        });
    }

    fn draw_edge(&mut self, path: &EdgePath, style: &EdgeStyle) {
        self.commands.push(DrawCommand::Edge {
            path: *path,
            style: style.clone(),
        });
    }

    fn draw_label(&mut self, anchor: Point, text: &str, font_size: f64) {
        self.commands.push(DrawCommand::Label {
            anchor,
            text: text.to_string(),
            font_size,
        });
    }

    fn draw_legend_title(&mut self, _anchor: Point, text: &str, _font_size: f64) {
        self.commands.push(DrawCommand::LegendTitle {
            text: text.to_string(),
        });
    }

    fn draw_legend_entry(
        &mut self,
        swatch: Rect,
        color: Color,
        _text_anchor: Point,
        text: &str,
        _font_size: f64,
    ) {
        self.commands.push(DrawCommand::LegendEntry {
            swatch,
            color,
            text: text.to_string(),
        });
    }
}
