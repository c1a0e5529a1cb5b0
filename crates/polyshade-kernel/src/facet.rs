//! Planar polygonal facets and the normals the shadow test needs.
//!
//! Facets are assumed planar and convex. The centroid is used as the
//! "inside" reference when orienting silhouette normals, which is only
//! meaningful for convex polygons.

use polyshade_math::Vec3;

/// An ordered, planar, convex polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    /// Vertices in winding order (already placed).
    pub vertices: Vec<Vec3>,
}

impl Facet {
    /// Create a facet from its vertices.
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self { vertices }
    }

    /// Number of vertices (equal to the number of boundary edges).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True for a facet with no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the facet is parallel to the light and casts no shadow.
    pub fn is_vertical(&self, light: &Vec3) -> bool {
        self.horizontal_normal(light).dot(light) == 0.0
    }

    /// Normal of the supporting plane, oriented so that it does not point
    /// against the light.
    pub fn horizontal_normal(&self, light: &Vec3) -> Vec3 {
        let v = &self.vertices;
        let n = (v[1] - v[0]).cross(&(v[2] - v[0]));
        if n.dot(light) < 0.0 {
            -n
        } else {
            n
        }
    }

    /// Outward normal of the vertical wall standing on boundary edge `k`,
    /// the edge from vertex `k - 1` to vertex `k`.
    ///
    /// Indices wrap: `k = 0` uses the last vertex as its start.
    pub fn silhouette_normal(&self, k: usize, light: &Vec3) -> Vec3 {
        let count = self.vertices.len();
        let prev = &self.vertices[(k + count - 1) % count];
        let cur = &self.vertices[k % count];
        let n = (cur - prev).cross(light);
        if n.dot(&(prev - self.centroid())) < 0.0 {
            -n
        } else {
            n
        }
    }

    /// Silhouette normals for every boundary edge, paired with a point on it.
    pub fn silhouettes<'a>(
        &'a self,
        light: &'a Vec3,
    ) -> impl Iterator<Item = (Vec3, Vec3)> + 'a {
        (0..self.vertices.len())
            .map(move |k| (self.vertices[k], self.silhouette_normal(k, light)))
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Vec3 {
        let sum = self.vertices.iter().fold(Vec3::zeros(), |acc, v| acc + v);
        sum * (1.0 / self.vertices.len() as f64)
    }
}
