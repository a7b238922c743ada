//! Force-relaxation passes over vertex buffers.
//!
//! Each pass is a pure function from an input vertex buffer to a fresh
//! output buffer; no pass ever reads a partially-updated position. Passes
//! that accumulate per-edge or per-face corrections ([`tangentify`],
//! [`planarize`]) add commutatively into the output slots, so traversal
//! order does not affect the result and the correction computation can run
//! in parallel.
//!
//! - [`tangentify`]: nudge edges toward tangency with the unit sphere.
//! - [`recenter`]: translate so the edge tangent points average to the origin.
//! - [`rescale`]: scale the farthest vertex onto the unit sphere.
//! - [`planarize`]: nudge each face's vertices toward a common plane.
//!
//! The corrections are damped by a stability factor (default
//! [`STABILITY`]). This ad-hoc damping, and the absence of a combined
//! gradient step across the three forces, is a known limitation of the
//! heuristic; the factor is exposed as a tunable rather than papered over.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::error::{CanonError, Result};
use crate::geometry::{orthogonal, tangent_point, unit, DEGENERACY_EPS};

/// Default damping factor applied to every accumulated correction.
pub const STABILITY: f64 = 0.1;

/// Options for the accumulating passes.
#[derive(Debug, Clone)]
pub struct PassOptions {
    /// Damping factor for corrections (default [`STABILITY`]).
    pub stability: f64,

    /// Whether to compute per-edge/per-face corrections in parallel
    /// (default: false; the accumulation itself stays sequential either way).
    pub parallel: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            stability: STABILITY,
            parallel: false,
        }
    }
}

impl PassOptions {
    /// Create options with the specified stability factor.
    pub fn with_stability(mut self, stability: f64) -> Self {
        self.stability = stability;
        self
    }

    /// Set whether to compute corrections in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Nudge every edge toward tangency with the origin-centered unit sphere.
///
/// For each edge, the point `t` on the edge's line closest to the origin is
/// pulled toward distance 1 by adding `stability * 0.5 * (1 - |t|) * t` to
/// both endpoints. Corrections from all edges sharing a vertex accumulate
/// additively into that vertex's output slot; every tangent point is
/// computed from the pre-pass buffer.
///
/// A zero-length edge has no defined tangent point and is reported as
/// [`CanonError::ZeroLengthEdge`].
pub fn tangentify(
    vertices: &[Point3<f64>],
    edges: &[[usize; 2]],
    options: &PassOptions,
) -> Result<Vec<Point3<f64>>> {
    let stability = options.stability;
    let correction = |&[i, j]: &[usize; 2]| -> Result<(usize, usize, Vector3<f64>)> {
        let t = tangent_point(&vertices[i], &vertices[j])
            .ok_or(CanonError::ZeroLengthEdge { v0: i, v1: j })?;
        let c = t.coords * (stability * 0.5 * (1.0 - t.coords.norm()));
        Ok((i, j, c))
    };

    let corrections: Vec<(usize, usize, Vector3<f64>)> = if options.parallel {
        edges.par_iter().map(correction).collect::<Result<_>>()?
    } else {
        edges.iter().map(correction).collect::<Result<_>>()?
    };

    let mut out = vertices.to_vec();
    for (i, j, c) in corrections {
        out[i] += c;
        out[j] += c;
    }
    Ok(out)
}

/// Translate the buffer so the edge tangent points average to the origin.
///
/// The mean of all edge tangent points estimates the center of mass of the
/// would-be midsphere contact points; subtracting it from every vertex is a
/// pure translation and preserves all pairwise distances and face planarity.
pub fn recenter(vertices: &[Point3<f64>], edges: &[[usize; 2]]) -> Result<Vec<Point3<f64>>> {
    if edges.is_empty() {
        return Err(CanonError::EmptyMesh);
    }
    let mut sum = Vector3::zeros();
    for &[i, j] in edges {
        let t = tangent_point(&vertices[i], &vertices[j])
            .ok_or(CanonError::ZeroLengthEdge { v0: i, v1: j })?;
        sum += t.coords;
    }
    let center = sum / edges.len() as f64;
    Ok(vertices.iter().map(|v| v - center).collect())
}

/// Scale every vertex by the reciprocal of the maximum vertex magnitude, so
/// the farthest vertex lands exactly on the unit sphere.
///
/// Deliberately not part of the default canonicalization loop: repeated
/// rescaling interacts with the other passes in numerically interesting
/// ways, so it is left as an explicitly-invoked pass.
pub fn rescale(vertices: &[Point3<f64>]) -> Result<Vec<Point3<f64>>> {
    let max_mag = vertices
        .iter()
        .map(|v| v.coords.norm())
        .fold(0.0, f64::max);
    if max_mag < DEGENERACY_EPS {
        return Err(CanonError::ZeroExtent);
    }
    let scale = 1.0 / max_mag;
    Ok(vertices.iter().map(|v| Point3::from(v.coords * scale)).collect())
}

/// Nudge each face's vertices toward a common plane.
///
/// For each face: sum the orthogonal products of consecutive vertex triplets
/// (wrapping) into an area-weighted normal, normalize it, and flip it to
/// point away from the origin relative to the face centroid. Each vertex of
/// the face then receives the correction `stability * <n, c - v> * n`,
/// moving it along the normal toward the plane through the centroid.
/// Corrections accumulate across faces exactly as in [`tangentify`].
///
/// A face whose summed normal is near zero (coincident or collinear
/// vertices) is reported as [`CanonError::DegenerateNormal`] instead of
/// producing a non-finite buffer.
pub fn planarize(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
    options: &PassOptions,
) -> Result<Vec<Point3<f64>>> {
    let stability = options.stability;
    let face_corrections = |(fi, face): (usize, &Vec<usize>)| -> Result<Vec<(usize, Vector3<f64>)>> {
        let len = face.len();
        let mut normal_sum = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for k in 0..len {
            let a = &vertices[face[k]];
            let b = &vertices[face[(k + 1) % len]];
            let c = &vertices[face[(k + 2) % len]];
            normal_sum += orthogonal(a, b, c);
            centroid += a.coords;
        }
        let mut normal = unit(&normal_sum).ok_or(CanonError::DegenerateNormal { face: fi })?;
        let centroid = centroid / len as f64;
        if normal.dot(&centroid) < 0.0 {
            normal = -normal;
        }
        Ok(face
            .iter()
            .map(|&vi| {
                let offset = centroid - vertices[vi].coords;
                (vi, normal * (stability * normal.dot(&offset)))
            })
            .collect())
    };

    let corrections: Vec<Vec<(usize, Vector3<f64>)>> = if options.parallel {
        faces
            .par_iter()
            .enumerate()
            .map(face_corrections)
            .collect::<Result<_>>()?
    } else {
        faces
            .iter()
            .enumerate()
            .map(face_corrections)
            .collect::<Result<_>>()?
    };

    let mut out = vertices.to_vec();
    for face in corrections {
        for (vi, c) in face {
            out[vi] += c;
        }
    }
    Ok(out)
}
