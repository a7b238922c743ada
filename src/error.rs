//! Error types for midsphere.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`CanonError`].
pub type Result<T> = std::result::Result<T, CanonError>;

/// Errors that can occur during mesh validation or relaxation.
///
/// Malformed topology is rejected when a [`PolyMesh`](crate::mesh::PolyMesh)
/// is constructed, so the relaxation passes only ever see in-range indices.
/// Degenerate geometry (a near-zero divisor) is detected where it occurs and
/// aborts the current call instead of propagating NaN through the buffer.
/// Non-convergence is deliberately *not* an error; see
/// [`Convergence`](crate::algo::canonicalize::Convergence).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references a vertex index outside the vertex buffer.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices.
    #[error("face {face} has only {count} vertices (need at least 3)")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// The number of vertices in the face.
        count: usize,
    },

    /// A face lists the same vertex index more than once.
    #[error("face {face} repeats vertex index {vertex}")]
    RepeatedVertex {
        /// The face index.
        face: usize,
        /// The repeated vertex index.
        vertex: usize,
    },

    /// A vertex is not surrounded by a closed loop of faces, so the dual
    /// mesh cannot be built.
    #[error("vertex {vertex} is not surrounded by a closed face loop")]
    OpenVertex {
        /// The vertex index.
        vertex: usize,
    },

    /// An edge has (numerically) zero length, so its tangent point is
    /// undefined.
    #[error("edge ({v0}, {v1}) has zero length")]
    ZeroLengthEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A face's summed normal has near-zero magnitude (zero area or
    /// coincident vertices).
    #[error("face {face} has a degenerate normal")]
    DegenerateNormal {
        /// The face index.
        face: usize,
    },

    /// A face centroid sits at the origin and cannot be reciprocated.
    #[error("face {face} has its centroid at the origin")]
    CentroidAtOrigin {
        /// The face index.
        face: usize,
    },

    /// A face plane passes through the origin and cannot be reciprocated.
    #[error("face {face} lies in a plane through the origin")]
    PlaneThroughOrigin {
        /// The face index.
        face: usize,
    },

    /// Every vertex sits at the origin, so the mesh cannot be rescaled.
    #[error("all vertices are at the origin")]
    ZeroExtent,
}
