//! Iterative canonicalization driver.
//!
//! Repeatedly applies the force-relaxation passes — [`tangentify`], then
//! [`recenter`], then [`planarize`], in that fixed order — until the maximum
//! per-vertex displacement in an iteration drops below the convergence
//! tolerance, or the iteration budget runs out. Running out of budget is a
//! soft outcome, not an error: the best-effort geometry is still returned,
//! tagged [`Convergence::IterationLimit`].
//!
//! [`rescale`](crate::algo::forces::rescale) is intentionally absent from
//! the loop; invoke it separately if a unit-radius result is wanted.
//!
//! # Example
//!
//! ```
//! use midsphere::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//! let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
//! let mesh = PolyMesh::new("T", vertices, faces).unwrap();
//!
//! let options = CanonicalizeOptions::default().with_iterations(100);
//! let result = canonicalize(&mesh, &options).unwrap();
//! assert_eq!(result.convergence, Convergence::Converged);
//! ```

use log::{debug, info};

use super::forces::{planarize, recenter, tangentify, PassOptions, STABILITY};
use crate::error::Result;
use crate::mesh::PolyMesh;

/// Options for [`canonicalize`].
#[derive(Debug, Clone)]
pub struct CanonicalizeOptions {
    /// Maximum number of relaxation iterations.
    pub iterations: usize,

    /// Damping factor passed to the accumulating passes.
    pub stability: f64,

    /// Stop once the maximum per-vertex displacement of an iteration falls
    /// below this threshold.
    pub tolerance: f64,

    /// Whether passes compute their corrections in parallel.
    pub parallel: bool,
}

impl Default for CanonicalizeOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            stability: STABILITY,
            tolerance: 1e-8,
            parallel: false,
        }
    }
}

impl CanonicalizeOptions {
    /// Create options with the specified iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create options with the specified stability factor.
    pub fn with_stability(mut self, stability: f64) -> Self {
        self.stability = stability;
        self
    }

    /// Create options with the specified convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Set whether to use parallel correction computation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn pass_options(&self) -> PassOptions {
        PassOptions::default()
            .with_stability(self.stability)
            .with_parallel(self.parallel)
    }
}

/// How a canonicalization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The maximum per-vertex displacement fell below the tolerance.
    Converged,
    /// The iteration budget ran out first. The result is still usable;
    /// non-convex or pathological meshes may never converge.
    IterationLimit,
}

/// The result of a [`canonicalize`] run.
#[derive(Debug, Clone)]
pub struct Canonicalization {
    /// The relaxed mesh: final vertex buffer with the original topology and
    /// name.
    pub mesh: PolyMesh,

    /// Number of iterations actually run.
    pub iterations: usize,

    /// Maximum per-vertex displacement of the last iteration.
    pub max_change: f64,

    /// Whether the run converged or hit the iteration budget.
    pub convergence: Convergence,
}

/// Relax a mesh toward canonical form: edges tangent to the unit sphere,
/// faces planar, shape centered at the origin.
///
/// Each iteration snapshots the current buffer, applies tangentify →
/// recenter → planarize (each pass consuming the previous pass's output),
/// and measures the maximum per-vertex displacement against the snapshot.
/// With `iterations == 0` the input buffer is returned verbatim.
///
/// Fails only on degenerate geometry inside a pass; non-convergence is
/// reported through [`Canonicalization::convergence`].
pub fn canonicalize(mesh: &PolyMesh, options: &CanonicalizeOptions) -> Result<Canonicalization> {
    let edges = mesh.edges();
    let faces = mesh.faces();
    let pass = options.pass_options();

    let mut buffer = mesh.vertices().to_vec();
    let mut max_change = 0.0_f64;
    let mut iterations = 0;
    let mut convergence = Convergence::IterationLimit;

    for i in 0..options.iterations {
        let previous = buffer;
        buffer = tangentify(&previous, &edges, &pass)?;
        buffer = recenter(&buffer, &edges)?;
        buffer = planarize(&buffer, faces, &pass)?;

        max_change = previous
            .iter()
            .zip(&buffer)
            .map(|(old, new)| (new - old).norm())
            .fold(0.0, f64::max);
        iterations = i + 1;
        debug!(
            "canonicalize {}: iteration {} max_change {:.3e}",
            mesh.name(),
            iterations,
            max_change
        );

        if max_change < options.tolerance {
            convergence = Convergence::Converged;
            break;
        }
    }

    info!(
        "canonicalize {}: {:?} after {} iterations (max_change {:.3e})",
        mesh.name(),
        convergence,
        iterations,
        max_change
    );
    Ok(Canonicalization {
        mesh: mesh.with_vertices(buffer),
        iterations,
        max_change,
        convergence,
    })
}
