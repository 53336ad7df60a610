//! Style resolution: layer colors and relation line patterns.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::config::StyleConfig;
use crate::graph::Graph;

/// Relation type assumed for edges that carry none.
pub const DEFAULT_RELATION: &str = "depends_on";

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value).ok_or_else(|| format!("invalid color '{value}', expected #rrggbb"))
    }
}

/// The 20-color qualitative "tab20" palette.
pub const TAB20: [Color; 20] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xae, 0xc7, 0xe8),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0xff, 0xbb, 0x78),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0x98, 0xdf, 0x8a),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0xff, 0x98, 0x96),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0xc5, 0xb0, 0xd5),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xc4, 0x9c, 0x94),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0xf7, 0xb6, 0xd2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xc7, 0xc7, 0xc7),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0xdb, 0xdb, 0x8d),
    Color::rgb(0x17, 0xbe, 0xcf),
    Color::rgb(0x9e, 0xda, 0xe5),
];

/// Stroke pattern of an edge line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinePattern {
    Solid,
    LongDash,
    Dashed,
    ShortDash,
    DashDot,
    Dotted,
    DashDotDot,
}

impl LinePattern {
    /// Fixed relation lookup; unknown relations draw solid.
    pub fn for_relation(relation: &str) -> Self {
        match relation {
            "depends_on" => LinePattern::Solid,
            "invokes" => LinePattern::LongDash,
            "exchanges" => LinePattern::Dashed,
            "persists" => LinePattern::ShortDash,
            "configures" => LinePattern::DashDot,
            "observes" => LinePattern::Dotted,
            "contains" => LinePattern::DashDotDot,
            _ => LinePattern::Solid,
        }
    }

    /// On/off segment lengths in multiples of the line width; empty for solid.
    pub fn dashes(&self) -> &'static [f64] {
        match self {
            LinePattern::Solid => &[],
            LinePattern::LongDash => &[8.0, 3.0],
            LinePattern::Dashed => &[4.0, 2.0],
            LinePattern::ShortDash => &[2.0, 2.0],
            LinePattern::DashDot => &[6.0, 1.0, 1.0, 1.0],
            LinePattern::Dotted => &[1.0, 1.0],
            LinePattern::DashDotDot => &[6.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, LinePattern::Solid)
    }
}

/// Colors and patterns resolved for one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    layer_colors: BTreeMap<u32, Color>,
    edge_patterns: BTreeMap<String, LinePattern>,
}

impl StyleSheet {
    /// Resolve styles from the layers and relations present in `graph`.
    ///
    /// Layers are ranked ascending and take palette colors in rank order,
    /// wrapping around when there are more layers than colors.
    pub fn resolve(graph: &Graph, config: &StyleConfig) -> Self {
        let palette = if config.palette.is_empty() {
            &TAB20[..]
        } else {
            &config.palette[..]
        };

        let layer_colors = graph
            .layers()
            .into_iter()
            .enumerate()
            .map(|(rank, layer)| (layer, palette[rank % palette.len()]))
            .collect();

        let edge_patterns = graph
            .relations()
            .into_iter()
            .map(|relation| (relation.to_string(), LinePattern::for_relation(relation)))
            .collect();

        Self {
            layer_colors,
            edge_patterns,
        }
    }

    /// Color of a layer; layers absent from the graph fall back to black.
    pub fn layer_color(&self, layer: u32) -> Color {
        self.layer_colors
            .get(&layer)
            .copied()
            .unwrap_or(Color::BLACK)
    }

    pub fn edge_pattern(&self, relation: &str) -> LinePattern {
        self.edge_patterns
            .get(relation)
            .copied()
            .unwrap_or_else(|| LinePattern::for_relation(relation))
    }

    /// Layer colors in ascending layer order.
    pub fn layer_colors(&self) -> impl Iterator<Item = (u32, Color)> + '_ {
        self.layer_colors.iter().map(|(layer, color)| (*layer, *color))
    }

    /// Relation patterns in ascending relation order.
    pub fn edge_patterns(&self) -> impl Iterator<Item = (&str, LinePattern)> + '_ {
        self.edge_patterns
            .iter()
            .map(|(relation, pattern)| (relation.as_str(), *pattern))
    }
}
