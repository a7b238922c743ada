//! Relaxation algorithms.
//!
//! Two canonicalization strategies over the same mesh type:
//!
//! - **Force relaxation** ([`forces`], [`canonicalize`]): independent
//!   corrective passes over the vertex buffer, iterated to a fixed point or
//!   an iteration budget.
//! - **Reciprocal duality** ([`reciprocal`]): alternate between a mesh and
//!   its dual, reciprocating face planes or centers through the unit sphere.

pub mod canonicalize;
pub mod forces;
pub mod reciprocal;
