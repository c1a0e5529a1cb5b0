#![warn(missing_docs)]

//! Edge occlusion analysis for polyhedra under a vertical light.
//!
//! A polyhedron is read from a `.geom` description, placed in space by a
//! homothety and three Euler rotations, and projected along a fixed light
//! direction. For every edge the kernel tracks which parameter ranges stay
//! visible once the shadows of all facets are cast onto it. Edges that end
//! up fully hidden and pass a location test and a slope test contribute
//! their projected length to a single total.
//!
//! # Example
//!
//! ```no_run
//! use polyshade_kernel::{read_model, AnalysisConfig};
//!
//! let model = read_model("box.geom", &AnalysisConfig::default()).unwrap();
//! let report = model.analyze();
//! println!("{}", report.summary_line());
//! println!("visible pieces: {}", report.segments.len());
//! ```
//!
//! Facets must be planar and convex; no tolerance is applied to the
//! floating-point comparisons.

pub mod config;
pub mod edge;
pub mod error;
pub mod facet;
pub mod interval;
pub mod model;
pub mod reader;
pub mod render;

pub use config::{Acceptance, AnalysisConfig};
pub use edge::Edge;
pub use error::{Result, ShadeError};
pub use facet::Facet;
pub use interval::Interval;
pub use model::{Model, ShadowReport};
pub use reader::{parse_geom, read_model, read_model_from_str, GeomDescription};
pub use render::{Renderer, SegmentCollector, VisibleSegment};

pub use polyshade_math::{Placement, Vec3};
