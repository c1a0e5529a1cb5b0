//! Polyhedron edges: occlusion tracking and acceptance predicates.
//!
//! Each edge keeps the list of parameter sub-ranges that are still
//! visible ("gaps"). Casting the shadow of a facet onto the edge removes
//! the occluded range from every gap. Because removal over a fixed
//! universe commutes, the final gaps do not depend on facet order.

use polyshade_math::{Placement, Vec3};

use crate::config::Acceptance;
use crate::facet::Facet;
use crate::interval::Interval;

/// A segment of the polyhedron with its surviving visible ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Start point (placed coordinates).
    pub begin: Vec3,
    /// End point (placed coordinates).
    pub end: Vec3,
    /// Visible parameter ranges, pairwise disjoint.
    pub gaps: Vec<Interval>,
}

impl Edge {
    /// Create a fully visible edge.
    pub fn new(begin: Vec3, end: Vec3) -> Self {
        Self {
            begin,
            end,
            gaps: vec![Interval::FULL],
        }
    }

    /// Point at parameter `t`: `begin * (1 - t) + end * t`.
    pub fn r3(&self, t: f64) -> Vec3 {
        self.begin * (1.0 - t) + self.end * t
    }

    /// Direction from `begin` to `end`.
    pub fn direction(&self) -> Vec3 {
        self.end - self.begin
    }

    /// True once no visible range remains.
    pub fn is_hidden(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Restore the edge to fully visible.
    pub fn reset(&mut self) {
        self.gaps = vec![Interval::FULL];
    }

    /// Sum of the visible parameter lengths, in `[0, 1]`.
    pub fn visible_fraction(&self) -> f64 {
        self.gaps.iter().map(Interval::length).sum()
    }

    /// Visible pieces as 3D segments.
    pub fn visible_segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.gaps
            .iter()
            .map(move |gap| (self.r3(gap.begin), self.r3(gap.end)))
    }

    /// Remove the part of this edge hidden by `facet` under `light`.
    pub fn shadow(&mut self, facet: &Facet, light: &Vec3) {
        // a facet seen edge-on hides nothing
        if facet.is_vertical(light) {
            return;
        }

        let mut shade = Interval::FULL;
        for (point, normal) in facet.silhouettes(light) {
            shade = shade.intersect(&self.intersect_edge_with_normal(&point, &normal));
            if shade.is_degenerate() {
                return;
            }
        }

        shade = shade.intersect(
            &self.intersect_edge_with_normal(&facet.vertices[0], &facet.horizontal_normal(light)),
        );
        if shade.is_degenerate() {
            return;
        }

        self.gaps = self
            .gaps
            .iter()
            .flat_map(|gap| {
                let (before, after) = gap.subtract(&shade);
                [before, after]
            })
            .filter(|piece| !piece.is_degenerate())
            .collect();
    }

    /// Parameter range of this edge lying strictly inside the half-space
    /// bounded by the plane through `point` with outward normal `normal`.
    ///
    /// Points on the plane count as outside.
    pub fn intersect_edge_with_normal(&self, point: &Vec3, normal: &Vec3) -> Interval {
        let f0 = normal.dot(&(self.begin - point));
        let f1 = normal.dot(&(self.end - point));
        if f0 >= 0.0 && f1 >= 0.0 {
            return Interval::EMPTY;
        }
        if f0 < 0.0 && f1 < 0.0 {
            return Interval::FULL;
        }
        let x = -f0 / (f1 - f0);
        if f0 < 0.0 {
            Interval::new(0.0, x)
        } else {
            Interval::new(x, 1.0)
        }
    }

    /// Midpoint test in object coordinates.
    ///
    /// Both endpoints are un-rotated before the midpoint is taken; the
    /// x coordinate divided by the homothety must fall strictly inside
    /// the acceptance slab.
    pub fn good_center(&self, placement: &Placement, acceptance: &Acceptance) -> bool {
        let begin = placement.unrotate(&self.begin);
        let end = placement.unrotate(&self.end);
        let x = (begin.x + end.x) / 2.0 / placement.scale;
        acceptance.center_min < x && x < acceptance.center_max
    }

    /// Slope test on the placed direction.
    ///
    /// Rejects edges steeper than the acceptance angle against the plane
    /// orthogonal to `light`. The placement is not undone here.
    pub fn good_angle(
        &self,
        _placement: &Placement,
        acceptance: &Acceptance,
        light: &Vec3,
    ) -> bool {
        let d = self.direction();
        let cos2 = light.dot(&d).powi(2) / (light.dot(light) * d.dot(&d));
        let limit2 = acceptance.angle_limit_rad.cos().powi(2);
        1.0 - cos2 >= limit2
    }

    /// Length of the (x, y) projection in placed coordinates, divided by
    /// the homothety.
    pub fn projection_length(&self, placement: &Placement) -> f64 {
        let dx = self.end.x - self.begin.x;
        let dy = self.end.y - self.begin.y;
        (dx * dx + dy * dy).sqrt() / placement.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn light() -> Vec3 {
        Vec3::z()
    }

    fn edge(a: [f64; 3], b: [f64; 3]) -> Edge {
        Edge::new(Vec3::from(a), Vec3::from(b))
    }

    fn square_facet() -> Facet {
        Facet::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ])
    }

    fn unit() -> Placement {
        Placement::default()
    }

    #[test]
    fn test_r3_endpoints_and_midpoint() {
        let e = edge([0.0, 0.0, -1.0], [1.0, 0.0, -1.0]);
        assert_eq!(e.r3(0.0), e.begin);
        assert_eq!(e.r3(1.0), e.end);
        assert_relative_eq!(e.r3(0.5), Vec3::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_intersect_inside_half_space() {
        let e = edge([0.0, 0.0, -1.0], [1.0, 0.0, -1.0]);
        let s = e.intersect_edge_with_normal(&Vec3::zeros(), &Vec3::z());
        assert_eq!(s, Interval::FULL);
    }

    #[test]
    fn test_intersect_outside_half_space() {
        let e = edge([0.0, 0.0, 1.0], [1.0, 0.0, 1.0]);
        assert!(e
            .intersect_edge_with_normal(&Vec3::zeros(), &Vec3::z())
            .is_degenerate());
    }

    #[test]
    fn test_intersect_on_boundary_plane_is_empty() {
        let e = edge([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert!(e
            .intersect_edge_with_normal(&Vec3::zeros(), &Vec3::z())
            .is_degenerate());
    }

    #[test]
    fn test_intersect_first_half() {
        let e = edge([0.0, 0.0, -1.0], [1.0, 0.0, 1.0]);
        let s = e.intersect_edge_with_normal(&Vec3::new(1.0, 1.0, 0.0), &Vec3::z());
        assert_relative_eq!(s.begin, 0.0);
        assert_relative_eq!(s.end, 0.5);
    }

    #[test]
    fn test_intersect_second_half() {
        let e = edge([0.0, 0.0, 1.0], [1.0, 0.0, -1.0]);
        let s = e.intersect_edge_with_normal(&Vec3::new(1.0, 1.0, 0.0), &Vec3::z());
        assert_relative_eq!(s.begin, 0.5);
        assert_relative_eq!(s.end, 1.0);
    }

    #[test]
    fn test_facet_does_not_shadow_its_own_edge() {
        let mut e = edge([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        e.shadow(&square_facet(), &light());
        assert_eq!(e.gaps, vec![Interval::FULL]);
    }

    #[test]
    fn test_edge_above_facet_stays_visible() {
        let mut e = edge([0.0, 0.0, 1.0], [1.0, 1.0, 1.0]);
        e.shadow(&square_facet(), &light());
        assert_eq!(e.gaps, vec![Interval::FULL]);
    }

    #[test]
    fn test_edge_below_facet_is_hidden() {
        let mut e = edge([0.0, 0.0, -1.0], [1.0, 1.0, -1.0]);
        e.shadow(&square_facet(), &light());
        assert!(e.is_hidden());
        assert_eq!(e.visible_fraction(), 0.0);
    }

    #[test]
    fn test_long_edge_below_facet_keeps_two_gaps() {
        let mut e = edge([-5.0, -5.0, -1.0], [3.0, 3.0, -1.0]);
        e.shadow(&square_facet(), &light());
        assert_eq!(e.gaps.len(), 2);
        assert_relative_eq!(e.gaps[0].end, 5.0 / 8.0);
        assert_relative_eq!(e.gaps[1].begin, 7.0 / 8.0);
        assert_relative_eq!(e.visible_fraction(), 0.75);
    }

    #[test]
    fn test_vertical_facet_casts_nothing() {
        let wall = Facet::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        let mut e = edge([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        e.shadow(&wall, &light());
        assert_eq!(e.gaps, vec![Interval::FULL]);
    }

    #[test]
    fn test_perpendicular_edge_touching_facet_is_visible() {
        let f = Facet::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        let mut e = edge([0.0, 0.0, 0.0], [0.0, 0.0, -1.0]);
        e.shadow(&f, &light());
        assert_eq!(e.gaps, vec![Interval::FULL]);
    }

    #[test]
    fn test_visible_segments_follow_gaps() {
        let mut e = edge([-5.0, -5.0, -1.0], [3.0, 3.0, -1.0]);
        e.shadow(&square_facet(), &light());
        let segs: Vec<_> = e.visible_segments().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].0, e.begin);
        assert_relative_eq!(segs[0].1, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        assert_relative_eq!(segs[1].0, Vec3::new(2.0, 2.0, -1.0), epsilon = 1e-12);
        e.reset();
        assert_eq!(e.gaps, vec![Interval::FULL]);
    }

    #[test]
    fn test_center_inside_slab() {
        let a = Acceptance::default();
        assert!(edge([0.0, 0.0, 0.0], [5.0, 0.0, 0.0]).good_center(&unit(), &a));
        assert!(edge([0.0, 0.0, 0.0], [3.0, 456.0, 47.0]).good_center(&unit(), &a));
    }

    #[test]
    fn test_center_on_slab_boundary_rejected() {
        let a = Acceptance::default();
        assert!(!edge([0.0, 0.0, 0.0], [6.0, -12.0, 63.9]).good_center(&unit(), &a));
        assert!(!edge([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]).good_center(&unit(), &a));
    }

    #[test]
    fn test_center_undoes_rotation_and_scale() {
        // object edge (0,0,0)-(5,0,0), placed with scale 2 and a quarter turn
        let p = Placement::from_degrees(2.0, 90.0, 0.0, 0.0);
        let e = edge([0.0, 0.0, 0.0], p.apply(&Vec3::new(5.0, 0.0, 0.0)).into());
        assert!(e.good_center(&p, &Acceptance::default()));
        // without undoing the rotation the midpoint x would be ~0
        assert!(!e.good_center(&unit(), &Acceptance::default()));
    }

    #[test]
    fn test_angle() {
        let a = Acceptance::default();
        let v = light();
        assert!(!edge([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]).good_angle(&unit(), &a, &v));
        assert!(edge([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]).good_angle(&unit(), &a, &v));
        assert!(edge([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).good_angle(&unit(), &a, &v));
        assert!(edge([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]).good_angle(&unit(), &a, &v));
    }

    #[test]
    fn test_angle_threshold() {
        let a = Acceptance::default();
        let v = light();
        assert!(edge([0.0, 0.0, 0.0], [1.75, 30.0, 1.0]).good_angle(&unit(), &a, &v));
        assert!(!edge([0.0, 0.0, 0.0], [1.8, 0.0, 1.0]).good_angle(&unit(), &a, &v));
    }

    #[test]
    fn test_projection_length() {
        let p = unit();
        assert_eq!(edge([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).projection_length(&p), 1.0);
        assert_eq!(edge([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]).projection_length(&p), 1.0);
        assert_eq!(edge([0.0, 0.0, 0.0], [1.0, 0.0, 47.0]).projection_length(&p), 1.0);
        assert_eq!(edge([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]).projection_length(&p), 5.0);
        assert_relative_eq!(
            edge([0.0, 0.0, 0.0], [2.0, 7.0, 0.0]).projection_length(&p),
            53.0_f64.sqrt()
        );
    }

    #[test]
    fn test_projection_length_divides_by_scale() {
        let p = Placement::new(2.0, 0.0, 0.0, 0.0);
        assert_eq!(edge([0.0, 0.0, 0.0], [6.0, 8.0, 0.0]).projection_length(&p), 5.0);
    }
}
