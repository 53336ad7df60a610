//! SVG document writer implementing [`Canvas`].

use std::collections::BTreeMap;
use std::fmt::Write;

use archviz_core::{Color, Point};

use crate::canvas::{Canvas, EdgePath, EdgeStyle, NodeStyle, Rect};

/// Font stack for all text; DejaVu Sans comes first as the common default.
pub const FONT_FAMILY: &str = "DejaVu Sans, Bitstream Vera Sans, Arial, sans-serif";

/// Escape special characters for SVG text and attribute values.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Sanitize a string for use as an XML id or class token.
pub fn sanitize_id(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

/// SVG `d` attribute for an edge.
pub fn path_data(path: &EdgePath) -> String {
    match path {
        EdgePath::Curve {
            start,
            control,
            end,
        } => format!(
            "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
            start.x, start.y, control.x, control.y, end.x, end.y
        ),
        EdgePath::Loop {
            start,
            control1,
            control2,
            end,
        } => format!(
            "M {:.2} {:.2} C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
        ),
    }
}

/// Write indentation to output.
fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Builds an SVG document from canvas calls.
pub struct SvgCanvas {
    width: f64,
    height: f64,
    background: Color,
    body: String,
    indent: usize,
    /// Arrowhead markers keyed by id; one per color and size in use.
    markers: BTreeMap<String, String>,
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            background: Color::WHITE,
            body: String::with_capacity(4096),
            indent: 1,
            markers: BTreeMap::new(),
        }
    }

    fn line(&mut self, content: std::fmt::Arguments<'_>) {
        write_indent(&mut self.body, self.indent);
        let _ = self.body.write_fmt(content);
        self.body.push('\n');
    }

    fn marker_for(&mut self, color: Color, size: f64) -> String {
        let id = format!("arrow-{}-{:.0}", &color.to_hex()[1..], size * 100.0);
        self.markers.entry(id.clone()).or_insert_with(|| {
            format!(
                r#"<marker id="{id}" viewBox="0 0 10 10" refX="10" refY="5" markerUnits="userSpaceOnUse" markerWidth="{size:.2}" markerHeight="{size:.2}" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" fill="{color}"/></marker>"#
            )
        });
        id
    }

    /// Finish building and return the SVG document.
    pub fn build(self) -> String {
        let mut output = String::with_capacity(self.body.len() + 1024);
        let _ = writeln!(
            output,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if !self.markers.is_empty() {
            output.push_str("  <defs>\n");
            for marker in self.markers.values() {
                let _ = writeln!(output, "    {marker}");
            }
            output.push_str("  </defs>\n");
        }
        let _ = writeln!(
            output,
            r#"  <rect x="0" y="0" width="100%" height="100%" fill="{}"/>"#,
            self.background
        );
        output.push_str(&self.body);
        output.push_str("</svg>\n");
        output
    }
}

impl Canvas for SvgCanvas {
    fn begin(&mut self, width: f64, height: f64, background: Color) {
        self.width = width;
        self.height = height;
        self.background = background;
    }

    fn begin_group(&mut self, class: &str, key: &str) {
        if key.is_empty() {
            self.line(format_args!(r#"<g class="{}">"#, sanitize_id(class)));
        } else {
            self.line(format_args!(
                r#"<g class="{} {}-{}">"#,
                sanitize_id(class),
                sanitize_id(class),
                sanitize_id(key)
            ));
        }
        self.indent += 1;
    }

    fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1).max(1);
        self.line(format_args!("</g>"));
    }

    fn draw_node(&mut self, center: Point, radius: f64, style: &NodeStyle) {
        self.line(format_args!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            center.x, center.y, radius, style.fill, style.stroke, style.stroke_width
        ));
    }

    fn draw_edge(&mut self, path: &EdgePath, style: &EdgeStyle) {
        let marker = self.marker_for(style.color, style.arrow_size);
        let mut dash = String::new();
        if !style.dashes.is_empty() {
            let pattern: Vec<String> = style.dashes.iter().map(|d| format!("{d:.2}")).collect();
            dash = format!(r#" stroke-dasharray="{}""#, pattern.join(" "));
        }
        self.line(format_args!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.2}" opacity="{:.2}"{} marker-end="url(#{})"/>"#,
            path_data(path),
            style.color,
            style.width,
            style.opacity,
            dash,
            marker
        ));
    }

    fn draw_label(&mut self, anchor: Point, text: &str, font_size: f64) {
        if text.is_empty() {
            return;
        }
        self.line(format_args!(
            r##"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="{}" font-size="{:.2}" fill="#000000">{}</text>"##,
            anchor.x,
            anchor.y + 0.35 * font_size,
            FONT_FAMILY,
            font_size,
            escape_text(text)
        ));
    }

    fn draw_legend_title(&mut self, anchor: Point, text: &str, font_size: f64) {
        self.line(format_args!(
            r##"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="{}" font-size="{:.2}" fill="#000000">{}</text>"##,
            anchor.x,
            anchor.y + 0.35 * font_size,
            FONT_FAMILY,
            font_size,
            escape_text(text)
        ));
    }

    fn draw_legend_entry(
        &mut self,
        swatch: Rect,
        color: Color,
        text_anchor: Point,
        text: &str,
        font_size: f64,
    ) {
        self.line(format_args!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            swatch.x, swatch.y, swatch.width, swatch.height, color
        ));
        self.line(format_args!(
            r##"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="#000000">{}</text>"##,
            text_anchor.x,
            text_anchor.y + 0.35 * font_size,
            FONT_FAMILY,
            font_size,
            escape_text(text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archviz_core::LinePattern;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_text("a<b> & 'c'"), "a&lt;b&gt; &amp; &apos;c&apos;");
        assert_eq!(sanitize_id("depends on:x"), "depends_on_x");
    }

    #[test]
    fn dashed_edge_shares_one_marker() {
        let mut canvas = SvgCanvas::new();
        canvas.begin(100.0, 50.0, Color::WHITE);
        let style = EdgeStyle {
            color: Color::BLACK,
            width: 2.0,
            opacity: 0.8,
            pattern: LinePattern::Dashed,
            dashes: vec![8.0, 4.0],
            arrow_size: 20.0,
        };
        let path = EdgePath::Curve {
            start: Point::new(0.0, 0.0),
            control: Point::new(5.0, 5.0),
            end: Point::new(10.0, 0.0),
        };
        canvas.draw_edge(&path, &style);
        canvas.draw_edge(&path, &style);
        let svg = canvas.build();

        assert_eq!(svg.matches("<marker ").count(), 1);
        assert_eq!(svg.matches(r#"stroke-dasharray="8.00 4.00""#).count(), 2);
        assert!(svg.contains("M 0.00 0.00 Q 5.00 5.00 10.00 0.00"));
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn groups_nest_and_close() {
        let mut canvas = SvgCanvas::new();
        canvas.begin(10.0, 10.0, Color::WHITE);
        canvas.begin_group("layer", "0");
        canvas.draw_label(Point::new(1.0, 1.0), "", 8.0);
        canvas.end_group();
        let svg = canvas.build();

        assert!(svg.contains(r#"<g class="layer layer-0">"#));
        assert_eq!(svg.matches("</g>").count(), 1);
        assert!(!svg.contains("<text"));
    }
}
