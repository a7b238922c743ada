//! Benchmarks for the canonicalization drivers.

use criterion::{criterion_group, criterion_main, Criterion};
use midsphere::prelude::*;
use nalgebra::Point3;

/// An n-gonal prism inscribed in the unit cylinder: 2n vertices, n + 2 faces.
fn prism(n: usize) -> PolyMesh {
    let mut vertices = Vec::with_capacity(2 * n);
    for ring in [-0.5, 0.5] {
        for k in 0..n {
            let theta = std::f64::consts::TAU * k as f64 / n as f64;
            vertices.push(Point3::new(theta.cos(), theta.sin(), ring));
        }
    }

    let mut faces = Vec::with_capacity(n + 2);
    faces.push((0..n).rev().collect::<Vec<_>>()); // bottom, seen from below
    faces.push((n..2 * n).collect::<Vec<_>>()); // top
    for k in 0..n {
        let next = (k + 1) % n;
        faces.push(vec![k, next, n + next, n + k]);
    }

    PolyMesh::new(format!("P{}", n), vertices, faces).unwrap()
}

fn bench_force_relaxation(c: &mut Criterion) {
    let mesh = prism(64);

    c.bench_function("canonicalize_prism64_10_iters", |b| {
        let options = CanonicalizeOptions::default().with_iterations(10);
        b.iter(|| canonicalize(&mesh, &options).unwrap());
    });

    c.bench_function("canonicalize_prism64_10_iters_parallel", |b| {
        let options = CanonicalizeOptions::default()
            .with_iterations(10)
            .with_parallel(true);
        b.iter(|| canonicalize(&mesh, &options).unwrap());
    });
}

fn bench_reciprocal_duality(c: &mut Criterion) {
    let mesh = prism(64);

    c.bench_function("canonical_xyz_prism64_10_rounds", |b| {
        b.iter(|| canonical_xyz(&mesh, 10).unwrap());
    });

    c.bench_function("adjust_xyz_prism64_10_rounds", |b| {
        b.iter(|| adjust_xyz(&mesh, 10).unwrap());
    });
}

fn bench_derived_topology(c: &mut Criterion) {
    let mesh = prism(256);

    c.bench_function("edges_prism256", |b| {
        b.iter(|| mesh.edges());
    });

    c.bench_function("dual_prism256", |b| {
        b.iter(|| dual(&mesh).unwrap());
    });
}

criterion_group!(
    benches,
    bench_force_relaxation,
    bench_reciprocal_duality,
    bench_derived_topology
);
criterion_main!(benches);
