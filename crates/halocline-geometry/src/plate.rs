//! Plate (boundary slab) index ranges for the six faces.
//!
//! One consistent convention throughout: `start` inclusive, `end`
//! exclusive, on all three axes. For each face the layout derives an
//! **outer** plate (the ghost zone filled before computation) and an
//! **inner** plate (the interior boundary layer staged for neighbours
//! after computation). Within each set the six plates are pairwise
//! disjoint: the Z slab faces claim their full depth range, the Y faces
//! exclude it, and the X faces exclude both. That disjointness is what
//! lets all six transfers run concurrently on one mesh without locks.

use halocline_core::{Axis, Face, Index3, MeshDims, Side};

use crate::halo::HaloWidths;

/// Orientation of a plate: which two axes span its plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Full-extent XY slab (Front/Back).
    Xy,
    /// XZ plate (Bot/Top).
    Xz,
    /// YZ plate (Left/Right).
    Yz,
}

/// A rectangular half-open index range over the mesh, tagged with the
/// face it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plate {
    /// The face this plate transfers.
    pub face: Face,
    /// Inclusive start corner.
    pub start: Index3,
    /// Exclusive end corner.
    pub end: Index3,
}

impl Plate {
    /// Which two axes span this plate's plane.
    pub fn orientation(&self) -> Orientation {
        match self.face {
            Face::Front | Face::Back => Orientation::Xy,
            Face::Bot | Face::Top => Orientation::Xz,
            Face::Left | Face::Right => Orientation::Yz,
        }
    }

    /// Number of cells in the plate.
    pub fn cells(&self) -> usize {
        MeshDims::region_cells(self.start, self.end)
    }

    /// Total elements across all field components.
    pub fn elements(&self, components: usize) -> usize {
        self.cells() * components
    }

    /// Whether two plates share any cell.
    pub fn intersects(&self, other: &Plate) -> bool {
        (0..3).all(|a| self.start[a] < other.end[a] && other.start[a] < self.end[a])
    }
}

/// Cached plate geometry for one exchange context.
///
/// Derived once from [`MeshDims`] and [`HaloWidths`]; the decomposition
/// is static, so plates never change for the run.
#[derive(Clone, Copy, Debug)]
pub struct PlateLayout {
    dims: MeshDims,
    widths: HaloWidths,
}

impl PlateLayout {
    /// Build the layout from mesh dimensions and halo widths.
    pub fn new(dims: MeshDims, widths: HaloWidths) -> Self {
        Self { dims, widths }
    }

    /// Mesh dimensions this layout was derived from.
    pub fn dims(&self) -> &MeshDims {
        &self.dims
    }

    /// Halo widths this layout was derived from.
    pub fn widths(&self) -> &HaloWidths {
        &self.widths
    }

    /// Outer (ghost-zone) plate for a face: the region filled from a
    /// neighbour's data before computation.
    ///
    /// The Z faces span the full XY extent; the Y faces span full X but
    /// exclude the Z faces' depth range; the X faces exclude both. This
    /// keeps corner and edge cells covered exactly once.
    pub fn outer(&self, face: Face) -> Plate {
        let [mx, my, mz] = self.dims.padded_all();
        let wx = self.widths.axis(Axis::X);
        let wy = self.widths.axis(Axis::Y);
        let wz = self.widths.axis(Axis::Z);

        let (start, end) = match face {
            Face::Front => ([0, 0, 0], [mx, my, wz.low]),
            Face::Back => ([0, 0, mz - wz.high], [mx, my, mz]),
            Face::Bot => ([0, 0, wz.low], [mx, wy.low, mz - wz.high]),
            Face::Top => ([0, my - wy.high, wz.low], [mx, my, mz - wz.high]),
            Face::Left => (
                [0, wy.low, wz.low],
                [wx.low, my - wy.high, mz - wz.high],
            ),
            Face::Right => (
                [mx - wx.high, wy.low, wz.low],
                [mx, my - wy.high, mz - wz.high],
            ),
        };
        Plate { face, start, end }
    }

    /// Inner (boundary-layer) plate for a face: the freshly computed
    /// interior region a neighbour needs, mirrored inward from the
    /// interior bounds.
    pub fn inner(&self, face: Face) -> Plate {
        let [mx, my, mz] = self.dims.padded_all();
        let g = self.dims.ghost;
        let wx = self.widths.axis(Axis::X);
        let wy = self.widths.axis(Axis::Y);
        let wz = self.widths.axis(Axis::Z);

        let (start, end) = match face {
            Face::Front => ([g, g, g], [mx - g, my - g, g + wz.low]),
            Face::Back => ([g, g, mz - g - wz.high], [mx - g, my - g, mz - g]),
            Face::Bot => (
                [g, g, g + wz.low],
                [mx - g, g + wy.low, mz - g - wz.high],
            ),
            Face::Top => (
                [g, my - g - wy.high, g + wz.low],
                [mx - g, my - g, mz - g - wz.high],
            ),
            Face::Left => (
                [g, g + wy.low, g + wz.low],
                [g + wx.low, my - g - wy.high, mz - g - wz.high],
            ),
            Face::Right => (
                [mx - g - wx.high, g + wy.low, g + wz.low],
                [mx - g, my - g - wy.high, mz - g - wz.high],
            ),
        };
        Plate { face, start, end }
    }

    /// Linear span `(offset, cells)` of a slab face's outer ghost zone
    /// within one component: the full-extent Z plates are contiguous in
    /// the x-fastest layout, so they transfer without staging.
    pub fn slab_span(&self, side: Side) -> (usize, usize) {
        let [_, _, mz] = self.dims.padded_all();
        let plane = self.dims.plane_cells();
        let wz = self.widths.axis(Axis::Z);
        match side {
            Side::Bot => (0, plane * wz.low),
            Side::Top => (plane * (mz - wz.high), plane * wz.high),
        }
    }

    /// Fixed staging-buffer length for a buffer-mediated face, in
    /// elements across all components.
    ///
    /// Sized from the interior lateral extents as a run-constant upper
    /// bound: the actual plate shrinks where neighbouring widths grow,
    /// never beyond this.
    pub fn staging_len(&self, face: Face) -> usize {
        let mx = self.dims.padded(Axis::X);
        let ny = self.dims.interior[1];
        let nz = self.dims.interior[2];
        let w = self.widths.face(face);
        let area = match face {
            Face::Bot | Face::Top => mx * nz,
            Face::Left | Face::Right => ny * nz,
            Face::Front | Face::Back => self.dims.plane_cells(),
        };
        area * w * self.dims.components
    }
}
