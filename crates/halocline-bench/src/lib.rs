//! Benchmark profiles for the Halocline exchange layer.
//!
//! Provides pre-built [`DomainConfig`] profiles sized for benchmarking:
//!
//! - [`reference_profile`]: 32^3 interior, radius 3, 8 components — the
//!   working set of a typical per-process sub-domain
//! - [`stress_profile`]: 96^3 interior for memory-bandwidth stress

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use halocline_core::MeshDims;
use halocline_geometry::DomainConfig;

/// Reference profile: 32^3 interior cells, stencil radius 3, 8 field
/// components, non-periodic x with physical boundaries on both sides.
pub fn reference_profile() -> DomainConfig {
    let mut cfg = DomainConfig::periodic_interior(MeshDims::new([32; 3], 3, 8));
    cfg.periodic[0] = false;
    cfg.first[0] = true;
    cfg.last[0] = true;
    cfg
}

/// Stress profile: 96^3 interior cells, radius 3, 8 components.
pub fn stress_profile() -> DomainConfig {
    DomainConfig::periodic_interior(MeshDims::new([96; 3], 3, 8))
}
