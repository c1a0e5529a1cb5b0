//! Reader for the `.geom` polyhedron description.
//!
//! ```text
//! <scale> <alpha> <beta> <gamma>      angles in degrees
//! <nv> <nf> <ne>                      vertex, facet, edge counts
//! <x> <y> <z>                         nv vertex lines
//! <k> <i1> ... <ik>                   nf facet lines, 1-based indices
//! ```
//!
//! Blank lines are ignored. The edge count is informational only.

use std::path::Path;
use std::str::FromStr;

use polyshade_math::{Placement, Vec3};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{Result, ShadeError};
use crate::model::Model;

/// A parsed but not yet placed polyhedron.
#[derive(Debug, Clone, PartialEq)]
pub struct GeomDescription {
    /// Homothety and Euler angles (radians).
    pub placement: Placement,
    /// Vertices in object coordinates.
    pub vertices: Vec<Vec3>,
    /// Facets as 0-based vertex indices in winding order.
    pub facets: Vec<Vec<usize>>,
    /// Edge count declared in the header.
    pub declared_edges: usize,
}

/// Read a model from a `.geom` file.
pub fn read_model(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Model> {
    let text = std::fs::read_to_string(path)?;
    read_model_from_str(&text, config)
}

/// Read a model from `.geom` text.
pub fn read_model_from_str(text: &str, config: &AnalysisConfig) -> Result<Model> {
    let description = parse_geom(text)?;
    Model::new(description, config)
}

/// Parse `.geom` text without placing or validating the geometry.
pub fn parse_geom(text: &str) -> Result<GeomDescription> {
    let mut lines = GeomLines::new(text);

    let (no, fields) = lines.next_fields("placement line")?;
    let [scale, alpha, beta, gamma] = finite_fields::<4>(no, &fields, "placement")?;
    if scale <= 0.0 {
        return Err(ShadeError::parse(no, "scale must be positive"));
    }
    let placement = Placement::from_degrees(scale, alpha, beta, gamma);

    let (no, fields) = lines.next_fields("count line")?;
    let [nv, nf, ne] = fixed_fields::<usize, 3>(no, &fields, "counts")?;

    // header counts are untrusted until the lines are read
    let mut vertices = Vec::new();
    for i in 0..nv {
        let (no, fields) = lines.next_fields(&format!("vertex {} of {}", i + 1, nv))?;
        let [x, y, z] = finite_fields::<3>(no, &fields, "vertex")?;
        vertices.push(Vec3::new(x, y, z));
    }

    let mut facets = Vec::new();
    for i in 0..nf {
        let (no, fields) = lines.next_fields(&format!("facet {} of {}", i + 1, nf))?;
        facets.push(parse_facet(no, &fields, nv)?);
    }

    if let Some(no) = lines.peek_line() {
        return Err(ShadeError::parse(
            no,
            format!("unexpected content after {nf} facets"),
        ));
    }

    debug!(vertices = nv, facets = nf, declared_edges = ne, "parsed geometry");

    Ok(GeomDescription {
        placement,
        vertices,
        facets,
        declared_edges: ne,
    })
}

/// Non-blank lines with their 1-based line numbers.
struct GeomLines<'a> {
    inner: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    last_line: usize,
}

impl<'a> GeomLines<'a> {
    fn new(text: &'a str) -> Self {
        let inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            text.lines()
                .enumerate()
                .map(|(idx, line)| (idx + 1, line.trim()))
                .filter(|(_, line)| !line.is_empty()),
        );
        Self {
            inner: inner.peekable(),
            last_line: 0,
        }
    }

    fn next_fields(&mut self, what: &str) -> Result<(usize, Vec<&'a str>)> {
        match self.inner.next() {
            Some((no, line)) => {
                self.last_line = no;
                Ok((no, line.split_whitespace().collect()))
            }
            None => Err(ShadeError::parse(
                self.last_line + 1,
                format!("missing {what}"),
            )),
        }
    }

    fn peek_line(&mut self) -> Option<usize> {
        self.inner.peek().map(|(no, _)| *no)
    }
}

fn parse_facet(line: usize, fields: &[&str], vertex_count: usize) -> Result<Vec<usize>> {
    let (count, indices) = fields
        .split_first()
        .ok_or_else(|| ShadeError::parse(line, "empty facet"))?;
    let count: usize = parse_field(line, count, "facet size")?;
    if count < 3 {
        return Err(ShadeError::parse(
            line,
            format!("facet needs at least 3 vertices, got {count}"),
        ));
    }
    if indices.len() != count {
        return Err(ShadeError::parse(
            line,
            format!("facet declares {count} vertices but lists {}", indices.len()),
        ));
    }
    indices
        .iter()
        .map(|field| {
            let index: usize = parse_field(line, field, "vertex index")?;
            if index == 0 || index > vertex_count {
                return Err(ShadeError::parse(
                    line,
                    format!("vertex index {index} out of range 1..={vertex_count}"),
                ));
            }
            Ok(index - 1)
        })
        .collect()
}

fn fixed_fields<T: FromStr, const N: usize>(
    line: usize,
    fields: &[&str],
    what: &str,
) -> Result<[T; N]> {
    if fields.len() != N {
        return Err(ShadeError::parse(
            line,
            format!("{what}: expected {N} fields, got {}", fields.len()),
        ));
    }
    let parsed = fields
        .iter()
        .map(|field| parse_field::<T>(line, field, what))
        .collect::<Result<Vec<T>>>()?;
    parsed
        .try_into()
        .map_err(|_| ShadeError::parse(line, format!("{what}: field count mismatch")))
}

fn finite_fields<const N: usize>(line: usize, fields: &[&str], what: &str) -> Result<[f64; N]> {
    let values = fixed_fields::<f64, N>(line, fields, what)?;
    if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
        return Err(ShadeError::parse(
            line,
            format!("{what}: {:?} is not a finite number", fields[bad]),
        ));
    }
    Ok(values)
}

fn parse_field<T: FromStr>(line: usize, field: &str, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| ShadeError::parse(line, format!("{what}: cannot parse {field:?}")))
}
