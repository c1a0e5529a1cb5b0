//! The placed polyhedron and the occlusion pass over it.

use polyshade_math::{Placement, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::{Acceptance, AnalysisConfig};
use crate::edge::Edge;
use crate::error::{Result, ShadeError};
use crate::facet::Facet;
use crate::reader::GeomDescription;
use crate::render::{Renderer, VisibleSegment};

/// Outcome of one visibility pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowReport {
    /// Sum of projection lengths of hidden edges that pass both predicates.
    pub total: f64,
    /// Number of edges with no visible range left.
    pub hidden_edges: usize,
    /// Number of hidden edges that also pass both predicates.
    pub qualifying_edges: usize,
    /// Every visible piece of every edge.
    pub segments: Vec<VisibleSegment>,
}

impl ShadowReport {
    /// Human-readable report line.
    pub fn summary_line(&self) -> String {
        format!(
            "sum of projection lengths of qualifying edges = {}",
            self.total
        )
    }
}

/// A polyhedron placed in space, ready for analysis.
///
/// Vertices are transformed once at construction. Edges are stored fully
/// visible; every pass works on its own copy, so repeated passes agree.
#[derive(Debug, Clone)]
pub struct Model {
    placement: Placement,
    light: Vec3,
    acceptance: Acceptance,
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
    facets: Vec<Facet>,
    declared_edges: usize,
}

impl Model {
    /// Place the described polyhedron and validate its geometry.
    ///
    /// Every facet with `k` vertices contributes `k` edges, one per
    /// boundary side, so an edge shared by two facets appears twice.
    pub fn new(description: GeomDescription, config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let light = config.light_vector();
        let placement = description.placement;

        let vertices: Vec<Vec3> = description
            .vertices
            .iter()
            .map(|v| placement.apply(v))
            .collect();
        if let Some(index) = vertices
            .iter()
            .position(|v| v.iter().any(|c| !c.is_finite()))
        {
            return Err(ShadeError::NonFiniteVertex { index });
        }

        let mut facets = Vec::with_capacity(description.facets.len());
        let mut edges = Vec::new();
        for (index, indices) in description.facets.iter().enumerate() {
            if indices.len() < 3 {
                return Err(ShadeError::degenerate_facet(
                    index,
                    format!("{} vertices", indices.len()),
                ));
            }
            let corners: Vec<Vec3> = indices
                .iter()
                .map(|&i| {
                    vertices.get(i).copied().ok_or_else(|| {
                        ShadeError::degenerate_facet(index, format!("no vertex #{}", i + 1))
                    })
                })
                .collect::<Result<_>>()?;

            for n in 0..corners.len() {
                let prev = corners[(n + corners.len() - 1) % corners.len()];
                let edge = Edge::new(prev, corners[n]);
                if edge.begin == edge.end {
                    return Err(ShadeError::DegenerateEdge { index: edges.len() });
                }
                edges.push(edge);
            }

            let facet = Facet::new(corners);
            if facet.horizontal_normal(&light) == Vec3::zeros() {
                return Err(ShadeError::degenerate_facet(
                    index,
                    "first three vertices are collinear",
                ));
            }
            facets.push(facet);
        }

        if edges.len() != description.declared_edges {
            warn!(
                declared = description.declared_edges,
                derived = edges.len(),
                "edge count in header does not match facet sides"
            );
        }

        info!(
            vertices = vertices.len(),
            facets = facets.len(),
            edges = edges.len(),
            scale = placement.scale,
            "model placed"
        );

        Ok(Self {
            placement,
            light,
            acceptance: config.acceptance,
            vertices,
            edges,
            facets,
            declared_edges: description.declared_edges,
        })
    }

    /// Homothety and Euler angles applied to the vertices.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Projection direction.
    pub fn light(&self) -> &Vec3 {
        &self.light
    }

    /// Acceptance thresholds.
    pub fn acceptance(&self) -> &Acceptance {
        &self.acceptance
    }

    /// Placed vertices.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Edges, fully visible.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Facets.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Edge count declared by the input header.
    pub fn declared_edges(&self) -> usize {
        self.declared_edges
    }

    /// A copy of `edge` with every facet's shadow applied.
    pub fn occlude(&self, edge: &Edge) -> Edge {
        let mut edge = edge.clone();
        edge.reset();
        for facet in &self.facets {
            edge.shadow(facet, &self.light);
        }
        edge
    }

    /// Whether an occluded edge counts towards the total.
    pub fn qualifies(&self, edge: &Edge) -> bool {
        edge.is_hidden()
            && edge.good_center(&self.placement, &self.acceptance)
            && edge.good_angle(&self.placement, &self.acceptance, &self.light)
    }

    /// Sum of projection lengths of hidden, qualifying edges.
    pub fn compute_total(&self) -> f64 {
        self.edges
            .iter()
            .map(|edge| self.occlude(edge))
            .filter(|edge| self.qualifies(edge))
            .fold(0.0, |total, edge| {
                total + edge.projection_length(&self.placement)
            })
    }

    /// Full visibility pass: the total plus every visible segment.
    pub fn analyze(&self) -> ShadowReport {
        let _span = tracing::info_span!(
            "shadow_pass",
            edges = self.edges.len(),
            facets = self.facets.len()
        )
        .entered();

        let mut report = ShadowReport::default();
        for (index, edge) in self.edges.iter().enumerate() {
            let edge = self.occlude(edge);
            trace!(
                edge = index,
                gaps = edge.gaps.len(),
                visible = edge.visible_fraction(),
                "edge occluded"
            );
            if edge.is_hidden() {
                report.hidden_edges += 1;
                if self.qualifies(&edge) {
                    report.qualifying_edges += 1;
                    report.total += edge.projection_length(&self.placement);
                }
            }
            report.segments.extend(
                edge.visible_segments()
                    .map(|(start, end)| VisibleSegment::new(start, end)),
            );
        }

        debug!(
            hidden = report.hidden_edges,
            qualifying = report.qualifying_edges,
            total = report.total,
            "shadow pass done"
        );
        report
    }

    /// Clear `renderer`, draw every visible segment and return the report.
    pub fn draw(&self, renderer: &mut dyn Renderer) -> ShadowReport {
        renderer.clear_canvas();
        let report = self.analyze();
        for segment in &report.segments {
            renderer.draw_segment(segment.start_point(), segment.end_point());
        }
        report
    }
}
