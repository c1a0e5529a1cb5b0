//! Top-down SVG drawing of visible segments.

use std::fmt::Write;

use polyshade_kernel::Renderer;
use polyshade_math::Vec3;

const MARGIN: f64 = 10.0;

/// Renderer that projects segments onto the (x, y) plane and writes SVG.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    size: f64,
    lines: Vec<[f64; 4]>,
}

impl SvgRenderer {
    /// Create a renderer for a square canvas of `size` pixels.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            lines: Vec::new(),
        }
    }

    /// Number of segments drawn so far.
    pub fn segment_count(&self) -> usize {
        self.lines.len()
    }

    /// Render the collected segments as an SVG document.
    ///
    /// The drawing is fitted into the canvas with a uniform scale; the y axis
    /// points up.
    pub fn finish(&self) -> String {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for [x1, y1, x2, y2] in &self.lines {
            min_x = min_x.min(*x1).min(*x2);
            min_y = min_y.min(*y1).min(*y2);
            max_x = max_x.max(*x1).max(*x2);
            max_y = max_y.max(*y1).max(*y2);
        }

        let extent = (max_x - min_x).max(max_y - min_y);
        let usable = (self.size - 2.0 * MARGIN).max(1.0);
        let k = if extent > 0.0 { usable / extent } else { 1.0 };
        let map = |x: f64, y: f64| {
            (
                MARGIN + (x - min_x) * k,
                self.size - MARGIN - (y - min_y) * k,
            )
        };

        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
            self.size
        );
        let _ = writeln!(
            out,
            r#"  <g stroke="black" stroke-width="1" stroke-linecap="round" fill="none">"#
        );
        for [x1, y1, x2, y2] in &self.lines {
            let (ax, ay) = map(*x1, *y1);
            let (bx, by) = map(*x2, *y2);
            let _ = writeln!(
                out,
                r#"    <line x1="{ax:.3}" y1="{ay:.3}" x2="{bx:.3}" y2="{by:.3}"/>"#
            );
        }
        let _ = writeln!(out, "  </g>");
        let _ = writeln!(out, "</svg>");
        out
    }
}

impl Renderer for SvgRenderer {
    fn clear_canvas(&mut self) {
        self.lines.clear();
    }

    fn draw_segment(&mut self, p1: Vec3, p2: Vec3) {
        self.lines.push([p1.x, p1.y, p2.x, p2.y]);
    }
}
