//! Domain decomposition and boundary-condition configuration.

use halocline_core::{Axis, ExchangeError, MeshDims};

/// What the decomposition/configuration collaborator tells this process
/// about its sub-domain.
///
/// Immutable for the run: the decomposition is static, so everything the
/// geometry derives from this (halo widths, plate ranges, buffer sizes)
/// is fixed at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainConfig {
    /// Local mesh dimensions (interior extents, stencil radius, components).
    pub dims: MeshDims,
    /// Per-axis periodic boundary condition flag.
    pub periodic: [bool; 3],
    /// Whether this process occupies the low-most decomposition slot per axis.
    pub first: [bool; 3],
    /// Whether this process occupies the high-most decomposition slot per axis.
    pub last: [bool; 3],
    /// Overlapping-grid mode. Suppresses the physical-boundary width
    /// adjustment on the two lateral axes (Y and Z); the decomposed X
    /// axis is never affected.
    pub overlap_grids: bool,
}

impl DomainConfig {
    /// Config for a fully periodic sub-domain in the interior of the
    /// decomposition. Flip flags on the result for boundary processes.
    pub fn periodic_interior(dims: MeshDims) -> Self {
        Self {
            dims,
            periodic: [true; 3],
            first: [false; 3],
            last: [false; 3],
            overlap_grids: false,
        }
    }

    /// Whether this process touches the physical boundary on the given
    /// axis's low (`high = false`) or high side.
    pub fn boundary_most(&self, axis: Axis, high: bool) -> bool {
        if high {
            self.last[axis.index()]
        } else {
            self.first[axis.index()]
        }
    }

    /// Validate the mesh dimensions. Called by the exchange context
    /// before any geometry is derived.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        self.dims.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_interior_has_no_boundaries() {
        let cfg = DomainConfig::periodic_interior(MeshDims::new([8, 8, 8], 3, 2));
        for axis in Axis::ALL {
            assert!(!cfg.boundary_most(axis, false));
            assert!(!cfg.boundary_most(axis, true));
        }
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn boundary_most_reads_the_right_flag() {
        let mut cfg = DomainConfig::periodic_interior(MeshDims::new([8, 8, 8], 3, 2));
        cfg.first[0] = true;
        cfg.last[2] = true;
        assert!(cfg.boundary_most(Axis::X, false));
        assert!(!cfg.boundary_most(Axis::X, true));
        assert!(cfg.boundary_most(Axis::Z, true));
        assert!(!cfg.boundary_most(Axis::Y, false));
    }
}
