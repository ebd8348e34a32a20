//! Deterministic meshes and standard domain configurations.

use halocline_core::{HostMesh, MeshDims};
use halocline_geometry::DomainConfig;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Host mesh filled with seeded uniform values; identical seeds give
/// identical meshes.
pub fn seeded_mesh(dims: MeshDims, seed: u64) -> HostMesh {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut mesh = HostMesh::new(dims);
    for c in 0..dims.components {
        for v in mesh.component_mut(c).iter_mut() {
            *v = rng.random_range(-1.0..1.0);
        }
    }
    mesh
}

/// Fully periodic cube: interior `n` per axis, radius `r`.
pub fn periodic_cube(n: usize, r: usize, components: usize) -> DomainConfig {
    DomainConfig::periodic_interior(MeshDims::new([n; 3], r, components))
}

/// Single-process cube, non-periodic and boundary-most on every axis.
pub fn single_process_cube(n: usize, r: usize, components: usize) -> DomainConfig {
    let mut cfg = periodic_cube(n, r, components);
    cfg.periodic = [false; 3];
    cfg.first = [true; 3];
    cfg.last = [true; 3];
    cfg
}
