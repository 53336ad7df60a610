//! Compose graph, layout and styles into drawing calls.

use archviz_core::label::node_label;
use archviz_core::{Color, Graph, Layout, Point, RenderConfig, StyleSheet};

use crate::canvas::{Canvas, EdgePath, EdgeStyle, NodeStyle};
use crate::frame::Frame;

pub const LEGEND_TITLE: &str = "Layers";

/// Everything the renderer consumes, borrowed from earlier pipeline stages.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub graph: &'a Graph,
    pub layout: &'a Layout,
    pub styles: &'a StyleSheet,
}

impl<'a> Scene<'a> {
    pub fn new(graph: &'a Graph, layout: &'a Layout, styles: &'a StyleSheet) -> Self {
        Self {
            graph,
            layout,
            styles,
        }
    }
}

/// Legend text for a layer.
pub fn layer_legend_label(layer: u32) -> String {
    format!("Layer {layer}")
}

/// Draw `scene` onto `canvas`.
///
/// Order: edges grouped by relation, nodes grouped by layer, labels, legend.
pub fn paint<C: Canvas>(scene: &Scene<'_>, config: &RenderConfig, canvas: &mut C) -> Frame {
    let layers: Vec<(u32, Color)> = scene.styles.layer_colors().collect();
    let legend_labels: Vec<String> = layers.iter().map(|(l, _)| layer_legend_label(*l)).collect();
    let frame = Frame::new(scene.layout, &legend_labels, LEGEND_TITLE, config);

    canvas.begin(frame.width, frame.height, config.background);

    let radius = config.node_radius_px();
    let trim = radius + config.pt_to_px(config.border_width) / 2.0;
    let edge_width = config.pt_to_px(config.edge_width);

    for (relation, edges) in scene.graph.edges_by_relation() {
        let pattern = scene.styles.edge_pattern(relation);
        let style = EdgeStyle {
            color: config.edge_color,
            width: edge_width,
            opacity: config.edge_opacity,
            pattern,
            dashes: pattern.dashes().iter().map(|d| d * edge_width).collect(),
            arrow_size: config.pt_to_px(config.arrow_size),
        };

        canvas.begin_group("edges", relation);
        for edge in edges {
            let (Some(from), Some(to)) = (
                scene.layout.position(&edge.source),
                scene.layout.position(&edge.target),
            ) else {
                continue;
            };
            let path = if edge.source == edge.target {
                self_loop(frame.to_canvas(from), radius)
            } else {
                edge_curve(frame.to_canvas(from), frame.to_canvas(to), trim, config.curvature)
            };
            canvas.draw_edge(&path, &style);
        }
        canvas.end_group();
    }

    let members = scene.graph.layer_members();
    for (layer, color) in &layers {
        let style = NodeStyle {
            fill: *color,
            stroke: config.border_color,
            stroke_width: config.pt_to_px(config.border_width),
        };
        canvas.begin_group("layer", &layer.to_string());
        for id in members.get(layer).into_iter().flatten() {
            if let Some(p) = scene.layout.position(id) {
                canvas.draw_node(frame.to_canvas(p), radius, &style);
            }
        }
        canvas.end_group();
    }

    if config.with_labels {
        let font_px = config.pt_to_px(config.font_size);
        canvas.begin_group("labels", "");
        for node in scene.graph.nodes() {
            if let Some(p) = scene.layout.position(&node.id) {
                canvas.draw_label(frame.to_canvas(p), &node_label(node), font_px);
            }
        }
        canvas.end_group();
    }

    if !layers.is_empty() {
        let legend = frame.legend;
        canvas.begin_group("legend", "");
        canvas.draw_legend_title(legend.title_anchor(), LEGEND_TITLE, legend.font_px);
        for (row, ((_, color), label)) in layers.iter().zip(&legend_labels).enumerate() {
            canvas.draw_legend_entry(
                legend.swatch(row),
                *color,
                legend.text_anchor(row),
                label,
                legend.font_px,
            );
        }
        canvas.end_group();
    }

    frame
}

/// Curved edge between two node centers, trimmed by `trim` pixels at both ends.
///
/// The control point is offset from the chord midpoint perpendicular to the
/// chord by `curvature` times its length.
pub fn edge_curve(from: Point, to: Point, trim: f64, curvature: f64) -> EdgePath {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let control = Point::new(
        (from.x + to.x) / 2.0 - curvature * dy,
        (from.y + to.y) / 2.0 + curvature * dx,
    );

    let length = dx.hypot(dy);
    if length <= 2.0 * trim {
        return EdgePath::Curve {
            start: from,
            control,
            end: to,
        };
    }

    EdgePath::Curve {
        start: toward(from, control, trim),
        control,
        end: toward(to, control, trim),
    }
}

/// Small loop above a node for edges from a node to itself.
pub fn self_loop(center: Point, radius: f64) -> EdgePath {
    EdgePath::Loop {
        start: Point::new(center.x - 0.5 * radius, center.y - 0.85 * radius),
        control1: Point::new(center.x - 1.6 * radius, center.y - 3.2 * radius),
        control2: Point::new(center.x + 1.6 * radius, center.y - 3.2 * radius),
        end: Point::new(center.x + 0.5 * radius, center.y - 0.85 * radius),
    }
}

/// Move `distance` from `origin` toward `target`.
fn toward(origin: Point, target: Point, distance: f64) -> Point {
    let (dx, dy) = (target.x - origin.x, target.y - origin.y);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return origin;
    }
    Point::new(
        origin.x + dx / length * distance,
        origin.y + dy / length * distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: Point, b: Point) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }

    #[test]
    fn curve_bends_and_trims() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 0.0);
        let EdgePath::Curve {
            start,
            control,
            end,
        } = edge_curve(from, to, 10.0, 0.08)
        else {
            panic!("expected a curve");
        };

        assert_eq!(control, Point::new(50.0, 8.0));
        assert!((distance(start, from) - 10.0).abs() < 1e-9);
        assert!((distance(end, to) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn overlapping_nodes_are_not_trimmed() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(5.0, 0.0);
        let path = edge_curve(from, to, 10.0, 0.08);
        assert_eq!(path.start(), from);
        assert_eq!(path.end(), to);
    }

    #[test]
    fn loop_stays_above_node() {
        let center = Point::new(40.0, 40.0);
        let EdgePath::Loop {
            start,
            control1,
            end,
            ..
        } = self_loop(center, 10.0)
        else {
            panic!("expected a loop");
        };
        assert!(start.y < center.y && end.y < center.y);
        assert!(control1.y < start.y);
    }

    #[test]
    fn legend_label_format() {
        assert_eq!(layer_legend_label(3), "Layer 3");
    }
}
