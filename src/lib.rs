//! # Midsphere
//!
//! Iterative geometric relaxation for polyhedral meshes.
//!
//! Midsphere takes a polygon mesh (vertex positions plus face topology) and
//! adjusts vertex positions so the mesh becomes more *canonical*: every edge
//! tangent to a common origin-centered unit sphere, every face planar, and
//! the shape centered at the origin. Topology never changes; only positions
//! move.
//!
//! ## Features
//!
//! - **Force relaxation**: independent corrective passes (`tangentify`,
//!   `recenter`, `rescale`, `planarize`) iterated to convergence by
//!   [`canonicalize`](algo::canonicalize::canonicalize)
//! - **Reciprocal duality**: an alternate strategy that bounces geometry
//!   between a mesh and its dual through spherical inversion
//!   ([`canonical_xyz`](algo::reciprocal::canonical_xyz),
//!   [`adjust_xyz`](algo::reciprocal::adjust_xyz))
//! - **Derived topology**: edge lists, face centroids, and dual meshes are
//!   computed from the faces on demand; faces stay the source of truth
//!
//! Convergence is heuristic: convex, consistently wound meshes settle
//! nicely, while pathological input may diverge. Non-convergence within the
//! iteration budget is reported as a status, not an error.
//!
//! ## Quick Start
//!
//! ```
//! use midsphere::prelude::*;
//! use nalgebra::Point3;
//!
//! // A unit cube.
//! let vertices = vec![
//!     Point3::new(-1.0, -1.0, -1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(1.0, 1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//!     Point3::new(1.0, -1.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(-1.0, 1.0, 1.0),
//! ];
//! let faces = vec![
//!     vec![3, 2, 1, 0],
//!     vec![4, 5, 6, 7],
//!     vec![0, 1, 5, 4],
//!     vec![2, 3, 7, 6],
//!     vec![1, 2, 6, 5],
//!     vec![3, 0, 4, 7],
//! ];
//! let mesh = PolyMesh::new("C", vertices, faces).unwrap();
//!
//! let options = CanonicalizeOptions::default().with_iterations(300);
//! let result = canonicalize(&mesh, &options).unwrap();
//!
//! assert_eq!(result.convergence, Convergence::Converged);
//! // Every edge of the settled cube touches the unit sphere.
//! for &[i, j] in result.mesh.edges().iter() {
//!     let d = midsphere::geometry::edge_distance(
//!         &result.mesh.vertices()[i],
//!         &result.mesh.vertices()[j],
//!     )
//!     .unwrap();
//!     assert!((d - 1.0).abs() < 1e-6);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use midsphere::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::canonicalize::{
        canonicalize, Canonicalization, CanonicalizeOptions, Convergence,
    };
    pub use crate::algo::forces::{planarize, recenter, rescale, tangentify, PassOptions};
    pub use crate::algo::reciprocal::{
        adjust_xyz, canonical_xyz, reciprocal_centers, reciprocal_normals,
    };
    pub use crate::error::{CanonError, Result};
    pub use crate::mesh::{dual, PolyMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
