//! Error types for model ingestion and analysis.

use thiserror::Error;

/// Errors that can occur while reading or analysing a polyhedron.
#[derive(Error, Debug)]
pub enum ShadeError {
    /// I/O error reading a geometry or config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed geometry description.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// Facet whose normal cannot be derived.
    #[error("degenerate facet #{index}: {reason}")]
    DegenerateFacet {
        /// Facet index (0-indexed, file order).
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Edge with coincident endpoints.
    #[error("degenerate edge #{index}: endpoints coincide")]
    DegenerateEdge {
        /// Edge index (0-indexed, construction order).
        index: usize,
    },

    /// Vertex whose placed coordinates overflowed or are not numbers.
    #[error("vertex #{index} is not finite after placement")]
    NonFiniteVertex {
        /// Vertex index (0-indexed, file order).
        index: usize,
    },

    /// Configuration values that make the analysis meaningless.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Config file is not valid TOML for [`crate::AnalysisConfig`].
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ShadeError {
    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a degenerate facet error.
    pub fn degenerate_facet(index: usize, reason: impl Into<String>) -> Self {
        Self::DegenerateFacet {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type for polyshade operations.
pub type Result<T> = std::result::Result<T, ShadeError>;
