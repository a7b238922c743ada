//! Dual mesh construction.
//!
//! The dual of a polyhedron swaps faces and vertices: each dual vertex sits
//! at an original face centroid, and each dual face is the ring of faces
//! around an original vertex, in winding order. Relaxation drivers use the
//! dual for its topology and overwrite its vertex buffer, so the centroid
//! placement is only a reasonable default.

use std::collections::HashMap;

use nalgebra::Point3;

use super::PolyMesh;
use crate::error::{CanonError, Result};

/// Build the dual of a closed mesh.
///
/// Walks the ring of faces around each vertex by repeatedly crossing to the
/// face on the other side of the incoming edge. This requires every directed
/// edge to have a twin in exactly one other face; a vertex whose ring does
/// not close is reported as [`CanonError::OpenVertex`].
pub fn dual(mesh: &PolyMesh) -> Result<PolyMesh> {
    // Directed edge (a, b) -> index of the face that traverses a then b.
    let mut face_of = HashMap::new();
    for (fi, face) in mesh.faces().iter().enumerate() {
        for (k, &a) in face.iter().enumerate() {
            let b = face[(k + 1) % face.len()];
            face_of.insert((a, b), fi);
        }
    }

    // For each vertex, one incident face and the vertex preceding it there.
    let mut start: Vec<Option<(usize, usize)>> = vec![None; mesh.num_vertices()];
    for (fi, face) in mesh.faces().iter().enumerate() {
        for (k, &v) in face.iter().enumerate() {
            if start[v].is_none() {
                let prev = face[(k + face.len() - 1) % face.len()];
                start[v] = Some((fi, prev));
            }
        }
    }

    let mut dual_faces = Vec::with_capacity(mesh.num_vertices());
    for (v, entry) in start.iter().enumerate() {
        let (first, mut prev) = entry.ok_or(CanonError::OpenVertex { vertex: v })?;
        let mut ring = vec![first];
        loop {
            // Cross the edge (prev, v): the adjacent face holds v -> prev.
            let next = *face_of
                .get(&(v, prev))
                .ok_or(CanonError::OpenVertex { vertex: v })?;
            if next == first {
                break;
            }
            ring.push(next);
            if ring.len() > mesh.num_faces() {
                // The walk revisited a face without closing; broken topology.
                return Err(CanonError::OpenVertex { vertex: v });
            }
            let face = &mesh.faces()[next];
            let k = face
                .iter()
                .position(|&x| x == v)
                .ok_or(CanonError::OpenVertex { vertex: v })?;
            prev = face[(k + face.len() - 1) % face.len()];
        }
        dual_faces.push(ring);
    }

    let dual_vertices: Vec<Point3<f64>> = mesh.face_centroids();
    PolyMesh::new(format!("d{}", mesh.name()), dual_vertices, dual_faces)
}
