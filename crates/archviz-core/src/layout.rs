//! Deterministic layered layout.
//!
//! Placement depends only on a node's layer and on the ids sharing that
//! layer. Edges are never consulted and nothing is iterated to convergence,
//! so the same graph always yields bit-identical coordinates.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::graph::Graph;

/// A position in layout units; `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Node id to coordinate mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: BTreeMap<String, Point>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Positions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.positions.values();
        let first = points.next()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// Horizontal offset of slot `index` in a layer of `count` nodes, centered on 0.
pub fn slot_x(index: usize, count: usize, x_gap: f64) -> f64 {
    (index as f64 - (count as f64 - 1.0) / 2.0) * x_gap
}

/// Vertical position of a layer; deeper layers sit lower.
pub fn layer_y(layer: u32, y_gap: f64) -> f64 {
    0.0 - layer as f64 * y_gap
}

/// Compute positions for every node of `graph`.
pub fn layered_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    let mut positions = BTreeMap::new();

    for (layer, ids) in graph.layer_members() {
        let count = ids.len();
        let y = layer_y(layer, config.y_gap);
        debug!(layer, count, "placing layer");
        for (index, id) in ids.into_iter().enumerate() {
            let x = slot_x(index, count, config.x_gap);
            positions.insert(id.to_string(), Point::new(x, y));
        }
    }

    Layout { positions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_centered() {
        assert_eq!(slot_x(0, 1, 2.2), 0.0);
        assert_eq!(slot_x(0, 2, 2.0), -1.0);
        assert_eq!(slot_x(1, 2, 2.0), 1.0);
        assert_eq!(slot_x(0, 3, 2.0), -2.0);
        assert_eq!(slot_x(2, 3, 2.0), 2.0);
    }

    #[test]
    fn top_layer_is_positive_zero() {
        let y = layer_y(0, 2.2);
        assert_eq!(y, 0.0);
        assert!(y.is_sign_positive());
        assert_eq!(layer_y(1, 2.2), -2.2);
    }

    #[test]
    fn empty_layout_has_no_bounds() {
        assert!(Layout::default().bounds().is_none());
    }
}
