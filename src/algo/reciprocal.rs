//! Reciprocal-duality canonicalization.
//!
//! An alternate, face-centric strategy: instead of accumulating per-vertex
//! forces, alternate between a mesh and its dual, each time replacing one
//! buffer with the spherical inversion of the other's face planes
//! ([`canonical_xyz`]) or face centers ([`adjust_xyz`], cheaper but less
//! rigorous about planarity). After `n` rounds the final buffer is packaged
//! with the original (non-dual) topology.
//!
//! The driver owns both working meshes outright and hands immutable borrows
//! to the reciprocation functions, so no shared mutable state survives
//! between rounds.

use log::debug;

use nalgebra::{Point3, Vector3};

use crate::error::{CanonError, Result};
use crate::geometry::{edge_distance, orthogonal, reciprocal, unit};
use crate::mesh::{dual, PolyMesh};

/// Spherical inversion of every face centroid through the unit sphere:
/// `c / <c, c>` per face.
///
/// A centroid at the origin cannot be inverted and is reported as
/// [`CanonError::CentroidAtOrigin`].
pub fn reciprocal_centers(mesh: &PolyMesh) -> Result<Vec<Point3<f64>>> {
    mesh.face_centroids()
        .iter()
        .enumerate()
        .map(|(fi, c)| {
            reciprocal(&c.coords)
                .map(Point3::from)
                .ok_or(CanonError::CentroidAtOrigin { face: fi })
        })
        .collect()
}

/// Reciprocate every face's plane through the unit sphere, with an
/// edge-length correction.
///
/// For each face this accumulates a centroid, a summed normal (orthogonal
/// products of consecutive vertex triplets, wrapping), and the average
/// distance from the origin to the face's edge lines. The centroid's
/// projection onto the unit normal is inverted through the sphere, then
/// scaled by `(1 + avg_edge_dist) / 2`, which nudges edge tangency distances
/// toward 1 as the alternation proceeds.
pub fn reciprocal_normals(mesh: &PolyMesh) -> Result<Vec<Point3<f64>>> {
    let vertices = mesh.vertices();
    mesh.faces()
        .iter()
        .enumerate()
        .map(|(fi, face)| {
            let len = face.len();
            let mut centroid = Vector3::zeros();
            let mut normal_sum = Vector3::zeros();
            let mut edge_dist_sum = 0.0;
            for k in 0..len {
                let i = face[k];
                let j = face[(k + 1) % len];
                let a = &vertices[i];
                let b = &vertices[j];
                let c = &vertices[face[(k + 2) % len]];
                centroid += a.coords;
                normal_sum += orthogonal(a, b, c);
                edge_dist_sum +=
                    edge_distance(a, b).ok_or(CanonError::ZeroLengthEdge { v0: i, v1: j })?;
            }
            let centroid = centroid / len as f64;
            let normal = unit(&normal_sum).ok_or(CanonError::DegenerateNormal { face: fi })?;
            let avg_edge_dist = edge_dist_sum / len as f64;

            let inverted = reciprocal(&(normal * centroid.dot(&normal)))
                .ok_or(CanonError::PlaneThroughOrigin { face: fi })?;
            Ok(Point3::from(inverted * (1.0 + avg_edge_dist) / 2.0))
        })
        .collect()
}

/// Canonicalize by alternating plane reciprocation between a mesh and its
/// dual.
///
/// Builds the dual once; each round sets the dual's vertices to
/// [`reciprocal_normals`] of the mesh and then the mesh's vertices to
/// [`reciprocal_normals`] of the dual, so each shape's geometry becomes
/// reciprocal to the other's face planes. Returns a new mesh with the final
/// buffer and the original topology and name.
pub fn canonical_xyz(mesh: &PolyMesh, iterations: usize) -> Result<PolyMesh> {
    alternate(mesh, iterations, "canonical_xyz", reciprocal_normals)
}

/// Canonicalize by alternating face-center reciprocation between a mesh and
/// its dual.
///
/// The same alternation as [`canonical_xyz`] but driven by
/// [`reciprocal_centers`]: cheaper per round, and only approximately
/// planarizing.
pub fn adjust_xyz(mesh: &PolyMesh, iterations: usize) -> Result<PolyMesh> {
    alternate(mesh, iterations, "adjust_xyz", reciprocal_centers)
}

fn alternate(
    mesh: &PolyMesh,
    iterations: usize,
    label: &str,
    reciprocate: fn(&PolyMesh) -> Result<Vec<Point3<f64>>>,
) -> Result<PolyMesh> {
    let mut poly = mesh.clone();
    let mut dual_mesh = dual(&poly)?;
    for i in 0..iterations {
        dual_mesh.set_vertices(reciprocate(&poly)?);
        poly.set_vertices(reciprocate(&dual_mesh)?);
        debug!("{} {}: round {} of {}", label, mesh.name(), i + 1, iterations);
    }
    Ok(poly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_meshes::{cube, tetrahedron};

    #[test]
    fn test_reciprocal_centers_of_cube() {
        // Cube face centroids are unit vectors along the axes, which the
        // inversion leaves fixed.
        let mesh = cube();
        let out = reciprocal_centers(&mesh).unwrap();
        assert_eq!(out.len(), 6);
        for (c, r) in mesh.face_centroids().iter().zip(&out) {
            assert!((c - r).norm() < 1e-12);
        }
    }

    #[test]
    fn test_reciprocal_centers_origin_centroid() {
        // A face whose centroid is the origin cannot be inverted.
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-0.5, 0.866, 0.0),
            Point3::new(-0.5, -0.866, 0.0),
        ];
        let mesh = PolyMesh::new("flat", vertices, vec![vec![0, 1, 2]]).unwrap();
        assert_eq!(
            reciprocal_centers(&mesh).unwrap_err(),
            CanonError::CentroidAtOrigin { face: 0 }
        );
    }

    #[test]
    fn test_reciprocal_normals_length_and_finiteness() {
        let mesh = cube();
        let out = reciprocal_normals(&mesh).unwrap();
        assert_eq!(out.len(), mesh.num_faces());
        for p in &out {
            assert!(p.coords.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn test_reciprocal_normals_plane_through_origin() {
        // Push one cube face plane through the origin by flattening the cube
        // is fiddly; a single-face mesh through the origin shows the error
        // directly (faces() is all reciprocal_normals looks at).
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        ];
        let mesh = PolyMesh::new("flat", vertices, vec![vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(
            reciprocal_normals(&mesh).unwrap_err(),
            CanonError::PlaneThroughOrigin { face: 0 }
        );
    }

    #[test]
    fn test_canonical_xyz_preserves_topology() {
        let mesh = cube();
        let out = canonical_xyz(&mesh, 5).unwrap();
        assert_eq!(out.faces(), mesh.faces());
        assert_eq!(out.name(), mesh.name());
        for p in out.vertices() {
            assert!(p.coords.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn test_canonical_xyz_dual_round_trip_counts() {
        // Dual topology invariant: face count of the canonicalized dual
        // equals the original vertex count, across iterations.
        let mesh = cube();
        let once = canonical_xyz(&mesh, 1).unwrap();
        let d = dual(&once).unwrap();
        let round = canonical_xyz(&d, 1).unwrap();
        assert_eq!(round.num_faces(), mesh.num_vertices());
        assert_eq!(round.num_vertices(), mesh.num_faces());
    }

    #[test]
    fn test_canonical_xyz_zero_iterations() {
        let mesh = tetrahedron();
        let out = canonical_xyz(&mesh, 0).unwrap();
        assert_eq!(out.vertices(), mesh.vertices());
    }

    #[test]
    fn test_adjust_xyz_cube_stays_cubical() {
        // The cube is fixed by center reciprocation up to uniform scale:
        // vertices keep equal magnitudes and axis symmetry.
        let mesh = cube();
        let out = adjust_xyz(&mesh, 3).unwrap();
        let mags: Vec<f64> = out.vertices().iter().map(|v| v.coords.norm()).collect();
        for m in &mags {
            assert!((m - mags[0]).abs() < 1e-9, "magnitudes diverged: {:?}", mags);
        }
    }

    #[test]
    fn test_canonical_xyz_tetrahedron_approaches_midsphere() {
        // For the regular tetrahedron every edge is already tangent to the
        // unit sphere; plane reciprocation should hold it there.
        let mesh = tetrahedron();
        let out = canonical_xyz(&mesh, 10).unwrap();
        for &[i, j] in out.edges().iter() {
            let d = crate::geometry::edge_distance(&out.vertices()[i], &out.vertices()[j])
                .unwrap();
            assert!((d - 1.0).abs() < 1e-6, "edge distance {}", d);
        }
    }
}
