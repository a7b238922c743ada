//! Face-vertex polygon mesh.
//!
//! This module provides [`PolyMesh`], the minimal mesh representation the
//! relaxation passes operate on: an ordered vertex buffer plus faces given as
//! ordered, consistently wound index loops. Faces are the source of truth for
//! topology; the undirected edge list is derived on demand and never stored.
//!
//! Topology is validated once, at construction. After that it is immutable:
//! relaxation replaces the vertex buffer wholesale via
//! [`PolyMesh::with_vertices`], never the faces.
//!
//! # Example
//!
//! ```
//! use midsphere::mesh::PolyMesh;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, -1.0),
//! ];
//! let faces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1], vec![1, 3, 2]];
//! let mesh = PolyMesh::new("T", vertices, faces).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.edges().len(), 6);
//! ```

mod dual;

use nalgebra::Point3;

use crate::error::{CanonError, Result};

/// A polygonal mesh: vertex positions plus face topology.
///
/// Faces are ordered loops of vertex indices (at least three, consistently
/// wound). The winding is used to derive outward normals; convexity-friendly
/// winding is assumed but not verified.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyMesh {
    name: String,
    vertices: Vec<Point3<f64>>,
    faces: Vec<Vec<usize>>,
}

impl PolyMesh {
    /// Build a mesh from a vertex buffer and face index loops.
    ///
    /// Validates topology up front: the mesh must have at least one face,
    /// every face must have at least three vertices, every index must be in
    /// range, and no face may list the same vertex twice. Geometry is not
    /// checked here; degenerate positions surface later as errors from the
    /// passes that divide by them.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Point3<f64>>,
        faces: Vec<Vec<usize>>,
    ) -> Result<Self> {
        if faces.is_empty() {
            return Err(CanonError::EmptyMesh);
        }
        for (fi, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(CanonError::FaceTooSmall {
                    face: fi,
                    count: face.len(),
                });
            }
            for (k, &vi) in face.iter().enumerate() {
                if vi >= vertices.len() {
                    return Err(CanonError::InvalidVertexIndex { face: fi, vertex: vi });
                }
                if face[..k].contains(&vi) {
                    return Err(CanonError::RepeatedVertex { face: fi, vertex: vi });
                }
            }
        }
        Ok(Self {
            name: name.into(),
            vertices,
            faces,
        })
    }

    /// The mesh name, carried for diagnostics only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The vertex positions.
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// The face index loops.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Package a new vertex buffer with this mesh's topology and name.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length differs from [`num_vertices`](Self::num_vertices):
    /// the topology indexes into the buffer, so a length change is a
    /// programming error, not a recoverable condition.
    pub fn with_vertices(&self, vertices: Vec<Point3<f64>>) -> Self {
        assert_eq!(
            vertices.len(),
            self.vertices.len(),
            "vertex buffer length must match mesh topology"
        );
        Self {
            name: self.name.clone(),
            vertices,
            faces: self.faces.clone(),
        }
    }

    /// Replace this mesh's vertex buffer in place.
    ///
    /// Same length requirement as [`with_vertices`](Self::with_vertices).
    pub(crate) fn set_vertices(&mut self, vertices: Vec<Point3<f64>>) {
        assert_eq!(
            vertices.len(),
            self.vertices.len(),
            "vertex buffer length must match mesh topology"
        );
        self.vertices = vertices;
    }

    /// The de-duplicated undirected edge list, derived from the faces.
    ///
    /// Each consecutive pair in every face (including the wraparound pair)
    /// contributes an edge; shared edges appear once. Edges are reported in
    /// first-seen order with the smaller index first.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        let mut seen = std::collections::HashSet::new();
        let mut edges = Vec::new();
        for face in &self.faces {
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                let key = if a < b { [a, b] } else { [b, a] };
                if seen.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges
    }

    /// Per-face centroids: the simple average of each face's vertices.
    pub fn face_centroids(&self) -> Vec<Point3<f64>> {
        self.faces
            .iter()
            .map(|face| {
                let sum = face
                    .iter()
                    .fold(nalgebra::Vector3::zeros(), |acc, &vi| {
                        acc + self.vertices[vi].coords
                    });
                Point3::from(sum / face.len() as f64)
            })
            .collect()
    }
}

pub use dual::dual;


#[cfg(test)]
mod tests {
    use super::test_meshes::{cube, tetrahedron};
    use super::*;

    #[test]
    fn test_rejects_empty_mesh() {
        let result = PolyMesh::new("empty", vec![Point3::origin()], vec![]);
        assert_eq!(result.unwrap_err(), CanonError::EmptyMesh);
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let result = PolyMesh::new("bad", vertices, vec![vec![0, 1, 3]]);
        assert_eq!(
            result.unwrap_err(),
            CanonError::InvalidVertexIndex { face: 0, vertex: 3 }
        );
    }

    #[test]
    fn test_rejects_short_face() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let result = PolyMesh::new("bad", vertices, vec![vec![0, 1]]);
        assert_eq!(
            result.unwrap_err(),
            CanonError::FaceTooSmall { face: 0, count: 2 }
        );
    }

    #[test]
    fn test_rejects_repeated_index() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let result = PolyMesh::new("bad", vertices, vec![vec![0, 1, 0]]);
        assert_eq!(
            result.unwrap_err(),
            CanonError::RepeatedVertex { face: 0, vertex: 0 }
        );
    }

    #[test]
    fn test_cube_edges_deduplicated() {
        let mesh = cube();
        let edges = mesh.edges();
        assert_eq!(edges.len(), 12);
        // Every edge is normalized and unique.
        for e in &edges {
            assert!(e[0] < e[1]);
        }
        let unique: std::collections::HashSet<_> = edges.iter().collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn test_tetrahedron_edges() {
        assert_eq!(tetrahedron().edges().len(), 6);
    }

    #[test]
    fn test_cube_face_centroids() {
        let mesh = cube();
        let centroids = mesh.face_centroids();
        assert_eq!(centroids.len(), 6);
        // Bottom face centroid sits at (0, 0, -1).
        assert!((centroids[0] - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        // All cube face centroids are at distance 1.
        for c in &centroids {
            assert!((c.coords.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_with_vertices_keeps_topology() {
        let mesh = cube();
        let scaled: Vec<_> = mesh.vertices().iter().map(|v| v * 2.0).collect();
        let out = mesh.with_vertices(scaled);
        assert_eq!(out.faces(), mesh.faces());
        assert_eq!(out.name(), mesh.name());
        assert!((out.vertices()[0] - mesh.vertices()[0] * 2.0).norm() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "vertex buffer length")]
    fn test_with_vertices_wrong_length_panics() {
        let mesh = cube();
        mesh.with_vertices(vec![Point3::origin()]);
    }
}
