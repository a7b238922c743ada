//! Low-level 3D vector helpers shared by the relaxation passes.
//!
//! Positions are [`Point3<f64>`] and directions/corrections are
//! [`Vector3<f64>`]; nalgebra supplies the componentwise arithmetic, dot and
//! cross products, and norms. This module adds only the handful of
//! polyhedron-specific operations the passes need: Newell-style orthogonal
//! products, spherical inversion through the origin-centered unit sphere, and
//! edge tangent points.
//!
//! Helpers that divide by a vector magnitude return `None` when the divisor
//! is numerically zero; callers attach mesh context (which face, which edge)
//! and convert to a [`CanonError`](crate::error::CanonError).

use nalgebra::{Point3, Vector3};

/// Magnitudes below this are treated as zero when used as a divisor.
pub const DEGENERACY_EPS: f64 = 1e-12;

/// Cross product of `(b - a)` and `(c - b)`.
///
/// For three consecutive vertices of a face this is an unnormalized
/// contribution to the face normal; summing it over all consecutive triplets
/// gives a Newell-style area-weighted normal that tolerates slightly
/// non-planar faces.
#[inline]
pub fn orthogonal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    (b - a).cross(&(c - b))
}

/// Unit vector in the direction of `v`, or `None` if `v` is near zero.
#[inline]
pub fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let mag = v.norm();
    if mag < DEGENERACY_EPS {
        None
    } else {
        Some(v / mag)
    }
}

/// Spherical inversion of `v` through the origin-centered unit sphere:
/// `v / <v, v>`. Returns `None` if `v` is at the origin.
#[inline]
pub fn reciprocal(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let mag_sq = v.norm_squared();
    if mag_sq < DEGENERACY_EPS {
        None
    } else {
        Some(v / mag_sq)
    }
}

/// The point on the line through `p0` and `p1` closest to the origin.
///
/// Returns `None` when `p0` and `p1` coincide. The result is intentionally
/// *not* clamped to the segment: as relaxation drives an edge toward
/// tangency with the unit sphere, the foot of the perpendicular approaches
/// the segment from outside, and clamping would stall that approach.
#[inline]
pub fn tangent_point(p0: &Point3<f64>, p1: &Point3<f64>) -> Option<Point3<f64>> {
    let d = p1 - p0;
    let len_sq = d.norm_squared();
    if len_sq < DEGENERACY_EPS {
        return None;
    }
    let t = d.dot(&-p0.coords) / len_sq;
    Some(p0 + d * t)
}

/// Distance from the origin to the line through `p0` and `p1`.
#[inline]
pub fn edge_distance(p0: &Point3<f64>, p1: &Point3<f64>) -> Option<f64> {
    tangent_point(p0, p1).map(|t| t.coords.norm())
}
