//! SVG output encoder.
//!
//! A small write-through document builder: each call appends one element to
//! the document body, and [`SvgEncoder::render`] wraps the body in the
//! `<svg>` envelope. Vector output keeps text and curves scalable for print
//! and web.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::CubicBezier;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, Default)]
pub enum TextAnchor {
    /// Text begins at the anchor (left-aligned for LTR).
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor (right-aligned for LTR).
    End,
}

impl TextAnchor {
    fn as_attr(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Append-only SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    body: String,
    elements: usize,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create an encoder for a document of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            body: String::new(),
            elements: 0,
        }
    }

    /// Set the background color; `None` leaves the page transparent.
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    fn push(&mut self, element: &str) {
        self.body.push_str("  ");
        self.body.push_str(element);
        self.body.push('\n');
        self.elements += 1;
    }

    /// Add a filled rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) {
        let element = format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
            css(fill)
        );
        self.push(&element);
    }

    /// Add a rounded, stroked rectangle (panel and badge chrome).
    #[allow(clippy::too_many_arguments)]
    pub fn rect_rounded(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    ) {
        let element = format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" rx="{rx}" fill="{}"{}/>"#,
            css(fill),
            stroke_attrs(stroke, stroke_width)
        );
        self.push(&element);
    }

    /// Add a filled circle.
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Rgba) {
        let element = format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, css(fill));
        self.push(&element);
    }

    /// Add a filled, stroked circle.
    pub fn circle_outlined(
        &mut self,
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        stroke: Rgba,
        stroke_width: f32,
    ) {
        let element = format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"{}/>"#,
            css(fill),
            stroke_attrs(stroke, stroke_width)
        );
        self.push(&element);
    }

    /// Add a solid line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) {
        let element = format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"{}/>"#,
            stroke_attrs(stroke, stroke_width)
        );
        self.push(&element);
    }

    /// Add a dashed line (row and column separators).
    #[allow(clippy::too_many_arguments)]
    pub fn line_dashed(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
        dash: (f32, f32),
    ) {
        let element = format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"{} stroke-dasharray="{} {}"/>"#,
            stroke_attrs(stroke, stroke_width),
            dash.0,
            dash.1
        );
        self.push(&element);
    }

    /// Add a stroked cubic Bezier flow curve.
    pub fn curve(&mut self, curve: &CubicBezier, stroke: Rgba, stroke_width: f32) {
        let element = format!(
            r#"<path d="M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}" fill="none"{} stroke-linecap="round"/>"#,
            curve.p0.x,
            curve.p0.y,
            curve.p1.x,
            curve.p1.y,
            curve.p2.x,
            curve.p2.y,
            curve.p3.x,
            curve.p3.y,
            stroke_attrs(stroke, stroke_width)
        );
        self.push(&element);
    }

    /// Add plain text.
    pub fn text(&mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba, anchor: TextAnchor) {
        self.text_styled(x, y, text, font_size, fill, anchor, false, false);
    }

    /// Add text with weight/style control (titles, rank numbers, badges).
    #[allow(clippy::too_many_arguments)]
    pub fn text_styled(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        bold: bool,
        italic: bool,
    ) {
        let weight = if bold { r#" font-weight="bold""# } else { "" };
        let style = if italic { r#" font-style="italic""# } else { "" };
        let element = format!(
            r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" font-family="sans-serif" dominant-baseline="middle"{weight}{style}>{}</text>"#,
            css(fill),
            anchor.as_attr(),
            escape_xml(text)
        );
        self.push(&element);
    }

    /// Number of elements added so far.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Serialize the document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut doc = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}">"#,
            self.width, self.height
        );
        if let Some(bg) = self.background {
            let _ = writeln!(doc, r#"  <rect width="100%" height="100%" fill="{}"/>"#, css(bg));
        }
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        doc
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// CSS color value: hex when opaque, `rgba()` when translucent.
fn css(color: Rgba) -> String {
    if color.a == 255 {
        color.to_hex()
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            color.r,
            color.g,
            color.b,
            color.opacity()
        )
    }
}

fn stroke_attrs(stroke: Rgba, width: f32) -> String {
    format!(r#" stroke="{}" stroke-width="{width}""#, css(stroke))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_render_header_and_background() {
        let svg = SvgEncoder::new(400, 300).render();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 400 300""#));
        assert!(svg.contains("#ffffff"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_transparent_background_omitted() {
        let svg = SvgEncoder::new(10, 10).background(None).render();
        assert!(!svg.contains("100%"));
    }

    #[test]
    fn test_circle_and_rect_serialized() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.circle(10.0, 20.0, 5.0, Rgba::rgb(255, 0, 0));
        encoder.rect(0.0, 0.0, 50.0, 50.0, Rgba::rgb(0, 255, 0));

        let svg = encoder.render();
        assert!(svg.contains(r#"<circle cx="10" cy="20" r="5""#));
        assert!(svg.contains("<rect"));
        assert_eq!(encoder.element_count(), 2);
    }

    #[test]
    fn test_curve_path_data() {
        let mut encoder = SvgEncoder::new(100, 100);
        let curve = CubicBezier::flow(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 18.0);
        encoder.curve(&curve, Rgba::BLACK, 2.0);

        let svg = encoder.render();
        assert!(svg.contains("M 0.00 0.00 C "));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"fill="none""#));
    }

    #[test]
    fn test_dashed_line() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.line_dashed(0.0, 0.0, 100.0, 0.0, Rgba::BLACK, 1.0, (2.0, 3.0));
        assert!(encoder.render().contains(r#"stroke-dasharray="2 3""#));
    }

    #[test]
    fn test_text_escaping_and_style() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.text_styled(
            5.0,
            5.0,
            "A&B <chart>",
            12.0,
            Rgba::BLACK,
            TextAnchor::Middle,
            true,
            false,
        );

        let svg = encoder.render();
        assert!(svg.contains("A&amp;B &lt;chart&gt;"));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_translucent_color_uses_rgba() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.circle(1.0, 1.0, 1.0, Rgba::new(10, 20, 30, 128));
        assert!(encoder.render().contains("rgba(10,20,30,0.502)"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        SvgEncoder::new(10, 10).write_to_file(&path).unwrap();
        assert!(path.exists());
    }
}
