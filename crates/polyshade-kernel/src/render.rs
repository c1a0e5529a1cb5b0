//! Drawing collaborator for the visibility pass.

use polyshade_math::Vec3;
use serde::{Deserialize, Serialize};

/// Receives the visible pieces of every edge.
pub trait Renderer {
    /// Start a new drawing.
    fn clear_canvas(&mut self);

    /// Draw one visible segment, in placed coordinates.
    fn draw_segment(&mut self, p1: Vec3, p2: Vec3);
}

/// A visible piece of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleSegment {
    /// Start point.
    pub start: [f64; 3],
    /// End point.
    pub end: [f64; 3],
}

impl VisibleSegment {
    /// Create a segment from two points.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start point as a vector.
    pub fn start_point(&self) -> Vec3 {
        Vec3::from(self.start)
    }

    /// End point as a vector.
    pub fn end_point(&self) -> Vec3 {
        Vec3::from(self.end)
    }
}

/// Renderer that keeps every segment in memory.
#[derive(Debug, Clone, Default)]
pub struct SegmentCollector {
    /// Segments drawn since the last clear.
    pub segments: Vec<VisibleSegment>,
}

impl SegmentCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for SegmentCollector {
    fn clear_canvas(&mut self) {
        self.segments.clear();
    }

    fn draw_segment(&mut self, p1: Vec3, p2: Vec3) {
        self.segments.push(VisibleSegment::new(p1, p2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_clears() {
        let mut c = SegmentCollector::new();
        c.draw_segment(Vec3::zeros(), Vec3::x());
        assert_eq!(c.segments.len(), 1);
        assert_eq!(c.segments[0].end, [1.0, 0.0, 0.0]);
        c.clear_canvas();
        assert!(c.segments.is_empty());
    }

    #[test]
    fn test_segment_points() {
        let s = VisibleSegment::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(s.start_point(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.end_point(), Vec3::new(4.0, 5.0, 6.0));
    }
}
