//! Error types for rframe.
//!
//! Mesh construction failures are reported as [`MeshError`]; failures of the
//! reciprocal-frame passes are reported as [`RfError`].

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Result type alias using [`RfError`].
pub type RfResult<T> = std::result::Result<T, RfError>;

/// Errors that can occur while building a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices or repeats a vertex.
    #[error("face {face} is degenerate (fewer than 3 distinct vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// An edge has more than two incident faces.
    #[error("edge ({v0}, {v1}) has more than two incident faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// Two faces traverse a shared edge in the same direction.
    #[error("faces sharing edge ({v0}, {v1}) have inconsistent winding")]
    InconsistentWinding {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// Faces meet at a vertex without sharing an edge there.
    #[error("vertex {vertex} is non-manifold")]
    NonManifoldVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Errors raised by the reciprocal-frame passes.
///
/// Every variant that concerns a single member carries the raw index of the
/// offending edge. All of them abort the pass that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RfError {
    /// An interior edge does not have exactly two incident faces.
    #[error("edge {edge} has {faces} incident faces, expected 2")]
    InvalidTopology {
        /// The edge index.
        edge: usize,
        /// Number of incident faces found.
        faces: usize,
    },

    /// A direction or normal could not be unitized.
    #[error("edge {edge} has degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// The edge index.
        edge: usize,
        /// What vanished.
        reason: &'static str,
    },

    /// The extended centerline misses the boundary edge it should be trimmed at.
    #[error("centerline of edge {edge} does not intersect boundary edge {boundary}")]
    NoIntersection {
        /// The edge whose centerline is being trimmed.
        edge: usize,
        /// The boundary edge used for trimming.
        boundary: usize,
    },

    /// A transform pass ran before the member records were created.
    #[error("reciprocal-frame records have not been created")]
    NotBuilt,

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl RfError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        RfError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Reject negative or non-finite distances.
    pub(crate) fn check_distance(name: &'static str, value: f64) -> RfResult<()> {
        if !value.is_finite() {
            return Err(Self::invalid_param(name, value, "must be finite"));
        }
        if value < 0.0 {
            return Err(Self::invalid_param(name, value, "must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RfError::NoIntersection { edge: 3, boundary: 7 };
        assert_eq!(
            err.to_string(),
            "centerline of edge 3 does not intersect boundary edge 7"
        );

        let err = MeshError::invalid_param("spacing", -1.0, "must be positive");
        assert_eq!(err.to_string(), "invalid parameter: spacing = -1 (must be positive)");
    }

    #[test]
    fn test_check_distance() {
        assert!(RfError::check_distance("eccentricity", 0.0).is_ok());
        assert!(RfError::check_distance("eccentricity", 0.25).is_ok());
        assert!(matches!(
            RfError::check_distance("eccentricity", -0.1),
            Err(RfError::InvalidParameter { name: "eccentricity", .. })
        ));
        assert!(RfError::check_distance("extension", f64::NAN).is_err());
        assert!(RfError::check_distance("extension", f64::INFINITY).is_err());
    }
}
