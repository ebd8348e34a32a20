//! Per-axis halo (ghost-zone) width computation.

use halocline_core::{Axis, ExchangeError, Face, Side};

use crate::config::DomainConfig;

/// Ghost widths for one axis: low side, high side, and their sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisWidths {
    /// Ghost width on the low-coordinate side.
    pub low: usize,
    /// Ghost width on the high-coordinate side.
    pub high: usize,
}

impl AxisWidths {
    /// Aggregate width, low + high.
    pub fn total(&self) -> usize {
        self.low + self.high
    }

    /// Width on the given side.
    pub fn side(&self, side: Side) -> usize {
        match side {
            Side::Bot => self.low,
            Side::Top => self.high,
        }
    }
}

/// Ghost-zone widths for all three axes.
///
/// Each width is either the stencil radius or radius + 1. The extra
/// layer appears exactly where the axis is a non-periodic physical
/// boundary, this process occupies the boundary-most decomposition slot
/// on that side, and overlapping-grid mode is not suppressing the
/// adjustment (suppression applies to the Y and Z axes only).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HaloWidths {
    axes: [AxisWidths; 3],
}

impl HaloWidths {
    /// Derive halo widths from the domain configuration.
    ///
    /// Pure function of the config; the exchange context calls it once
    /// at startup and caches the result.
    pub fn compute(config: &DomainConfig) -> Self {
        let r = config.dims.ghost;
        let mut axes = [AxisWidths { low: r, high: r }; 3];
        for axis in Axis::ALL {
            if config.periodic[axis.index()] {
                continue;
            }
            if config.overlap_grids && axis != Axis::X {
                continue;
            }
            if config.boundary_most(axis, false) {
                axes[axis.index()].low = r + 1;
            }
            if config.boundary_most(axis, true) {
                axes[axis.index()].high = r + 1;
            }
        }
        Self { axes }
    }

    /// Widths along one axis.
    pub fn axis(&self, axis: Axis) -> AxisWidths {
        self.axes[axis.index()]
    }

    /// Width of the ghost zone behind one face.
    pub fn face(&self, face: Face) -> usize {
        self.axis(face.axis()).side(face.side())
    }

    /// Reject degenerate sub-domains where the aggregate halo width
    /// exceeds the interior extent along any axis. With such geometry
    /// the six transfer regions would overlap or invert, so the
    /// exchange context checks this before issuing any device work.
    pub fn validate(&self, config: &DomainConfig) -> Result<(), ExchangeError> {
        for axis in Axis::ALL {
            let total = self.axis(axis).total();
            let interior = config.dims.interior[axis.index()];
            if total > interior {
                return Err(ExchangeError::InvalidGeometry {
                    axis,
                    halo_total: total,
                    interior,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halocline_core::MeshDims;
    use proptest::prelude::*;

    fn base_config() -> DomainConfig {
        DomainConfig::periodic_interior(MeshDims::new([10, 10, 10], 3, 4))
    }

    #[test]
    fn periodic_interior_keeps_stencil_radius() {
        let w = HaloWidths::compute(&base_config());
        for axis in Axis::ALL {
            assert_eq!(w.axis(axis).low, 3);
            assert_eq!(w.axis(axis).high, 3);
            assert_eq!(w.axis(axis).total(), 6);
        }
    }

    #[test]
    fn single_process_nonperiodic_x_widens_both_x_sides() {
        // Interior 10 per axis, radius 3, non-periodic only in x,
        // boundary-most on both sides of x.
        let mut cfg = base_config();
        cfg.periodic[0] = false;
        cfg.first[0] = true;
        cfg.last[0] = true;

        let w = HaloWidths::compute(&cfg);
        assert_eq!((w.axis(Axis::X).low, w.axis(Axis::X).high), (4, 4));
        assert_eq!(w.axis(Axis::X).total(), 8);
        for axis in [Axis::Y, Axis::Z] {
            assert_eq!((w.axis(axis).low, w.axis(axis).high), (3, 3));
            assert_eq!(w.axis(axis).total(), 6);
        }
    }

    #[test]
    fn overlap_mode_leaves_decomposed_axis_alone() {
        let mut cfg = base_config();
        cfg.periodic[0] = false;
        cfg.first[0] = true;
        cfg.last[0] = true;
        cfg.overlap_grids = true;

        // Same widths as without overlap mode: x is the decomposed axis,
        // and y/z had nothing to suppress.
        let w = HaloWidths::compute(&cfg);
        assert_eq!(w.axis(Axis::X).total(), 8);
        assert_eq!(w.axis(Axis::Y).total(), 6);
        assert_eq!(w.axis(Axis::Z).total(), 6);
    }

    #[test]
    fn overlap_mode_suppresses_lateral_adjustments() {
        let mut cfg = base_config();
        cfg.periodic = [false; 3];
        cfg.first = [true; 3];
        cfg.last = [true; 3];

        let plain = HaloWidths::compute(&cfg);
        assert_eq!(plain.axis(Axis::Y).total(), 8);
        assert_eq!(plain.axis(Axis::Z).total(), 8);

        cfg.overlap_grids = true;
        let overlapped = HaloWidths::compute(&cfg);
        assert_eq!(overlapped.axis(Axis::X).total(), 8);
        assert_eq!(overlapped.axis(Axis::Y).total(), 6);
        assert_eq!(overlapped.axis(Axis::Z).total(), 6);
    }

    #[test]
    fn boundary_flag_without_nonperiodic_has_no_effect() {
        let mut cfg = base_config();
        cfg.first = [true; 3];
        cfg.last = [true; 3];
        let w = HaloWidths::compute(&cfg);
        for axis in Axis::ALL {
            assert_eq!(w.axis(axis).total(), 6);
        }
    }

    #[test]
    fn face_width_matches_axis_side() {
        let mut cfg = base_config();
        cfg.periodic[1] = false;
        cfg.last[1] = true;
        let w = HaloWidths::compute(&cfg);
        assert_eq!(w.face(Face::Top), 4);
        assert_eq!(w.face(Face::Bot), 3);
        assert_eq!(w.face(Face::Left), 3);
    }

    #[test]
    fn validate_rejects_halo_wider_than_interior() {
        let mut cfg = DomainConfig::periodic_interior(MeshDims::new([10, 5, 10], 3, 1));
        cfg.periodic[1] = false;
        cfg.first[1] = true;
        cfg.last[1] = true;

        let w = HaloWidths::compute(&cfg);
        assert_eq!(
            w.validate(&cfg),
            Err(ExchangeError::InvalidGeometry {
                axis: Axis::Y,
                halo_total: 8,
                interior: 5,
            })
        );
    }

    #[test]
    fn validate_accepts_exact_fit() {
        // total == interior is the tightest legal sub-domain.
        let cfg = DomainConfig::periodic_interior(MeshDims::new([6, 6, 6], 3, 1));
        let w = HaloWidths::compute(&cfg);
        assert!(w.validate(&cfg).is_ok());
    }

    fn arb_config() -> impl Strategy<Value = DomainConfig> {
        (
            any::<[bool; 3]>(),
            any::<[bool; 3]>(),
            any::<[bool; 3]>(),
            any::<bool>(),
            1usize..5,
        )
            .prop_map(|(periodic, first, last, overlap_grids, r)| DomainConfig {
                dims: MeshDims::new([4 * r; 3], r, 2),
                periodic,
                first,
                last,
                overlap_grids,
            })
    }

    proptest! {
        #[test]
        fn width_is_radius_or_radius_plus_one(cfg in arb_config()) {
            let r = cfg.dims.ghost;
            let w = HaloWidths::compute(&cfg);
            for axis in Axis::ALL {
                for side in Side::ALL {
                    let width = w.axis(axis).side(side);
                    prop_assert!(width == r || width == r + 1);
                    let adjusted = !cfg.periodic[axis.index()]
                        && cfg.boundary_most(axis, side == Side::Top)
                        && !(cfg.overlap_grids && axis != Axis::X);
                    prop_assert_eq!(width == r + 1, adjusted);
                }
            }
        }

        #[test]
        fn total_is_low_plus_high(cfg in arb_config()) {
            let w = HaloWidths::compute(&cfg);
            for axis in Axis::ALL {
                let aw = w.axis(axis);
                prop_assert_eq!(aw.total(), aw.low + aw.high);
            }
        }
    }
}
