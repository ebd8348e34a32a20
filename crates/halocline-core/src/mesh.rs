//! Mesh dimensioning and host-resident field storage.

use crate::error::ExchangeError;
use crate::id::Axis;

/// A 3-D cell index `[x, y, z]` into the ghost-inclusive mesh.
pub type Index3 = [usize; 3];

/// Dimensions of the local sub-domain mesh.
///
/// The mesh holds `interior` cells per axis plus `ghost` padding cells on
/// each side, for a padded extent of `interior + 2 * ghost` per axis, and
/// `components` field components per cell. The padding width is the stencil
/// radius; it is fixed at allocation even where the halo exchange uses a
/// wider transfer width at physical boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshDims {
    /// Interior extent per axis, excluding ghost cells.
    pub interior: Index3,
    /// Ghost padding per side of every axis (the stencil radius).
    pub ghost: usize,
    /// Number of field components stored per cell.
    pub components: usize,
}

impl MeshDims {
    /// Create mesh dimensions from interior extents, ghost radius, and
    /// component count.
    pub fn new(interior: Index3, ghost: usize, components: usize) -> Self {
        Self {
            interior,
            ghost,
            components,
        }
    }

    /// Reject zero extents, a zero ghost radius, or zero components.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        for axis in Axis::ALL {
            if self.interior[axis.index()] == 0 {
                return Err(ExchangeError::InvalidConfig {
                    reason: format!("interior extent along {axis} is zero"),
                });
            }
        }
        if self.ghost == 0 {
            return Err(ExchangeError::InvalidConfig {
                reason: "ghost radius is zero".into(),
            });
        }
        if self.components == 0 {
            return Err(ExchangeError::InvalidConfig {
                reason: "component count is zero".into(),
            });
        }
        Ok(())
    }

    /// Ghost-inclusive extent along one axis.
    pub fn padded(&self, axis: Axis) -> usize {
        self.interior[axis.index()] + 2 * self.ghost
    }

    /// Ghost-inclusive extents for all three axes.
    pub fn padded_all(&self) -> Index3 {
        [
            self.padded(Axis::X),
            self.padded(Axis::Y),
            self.padded(Axis::Z),
        ]
    }

    /// Cells in one full XY plane (one z layer), ghost-inclusive.
    pub fn plane_cells(&self) -> usize {
        self.padded(Axis::X) * self.padded(Axis::Y)
    }

    /// Total ghost-inclusive cells per component.
    pub fn cells(&self) -> usize {
        self.plane_cells() * self.padded(Axis::Z)
    }

    /// Total storage length across all components.
    pub fn total_len(&self) -> usize {
        self.cells() * self.components
    }

    /// Linear index of a cell within one component slab (x fastest).
    pub fn linear(&self, idx: Index3) -> usize {
        let [mx, my, _] = self.padded_all();
        (idx[2] * my + idx[1]) * mx + idx[0]
    }

    /// Number of cells in the half-open region `start..end`.
    pub fn region_cells(start: Index3, end: Index3) -> usize {
        (0..3)
            .map(|a| end[a].saturating_sub(start[a]))
            .product()
    }
}

/// Host-resident copy of the local mesh, component-major and x-fastest.
///
/// Layout: `data[((c * mz + z) * my + y) * mx + x]`. The host and the
/// accelerator copies of the mesh are allowed to diverge only inside an
/// exchange window; reconciling them is the caller's responsibility.
#[derive(Clone, Debug, PartialEq)]
pub struct HostMesh {
    dims: MeshDims,
    data: Vec<f64>,
}

impl HostMesh {
    /// Allocate a zero-filled host mesh.
    pub fn new(dims: MeshDims) -> Self {
        Self {
            dims,
            data: vec![0.0; dims.total_len()],
        }
    }

    /// Dimensions of this mesh.
    pub fn dims(&self) -> &MeshDims {
        &self.dims
    }

    /// Read-only view of one component's ghost-inclusive slab.
    pub fn component(&self, c: usize) -> &[f64] {
        let cells = self.dims.cells();
        &self.data[c * cells..(c + 1) * cells]
    }

    /// Mutable view of one component's ghost-inclusive slab.
    pub fn component_mut(&mut self, c: usize) -> &mut [f64] {
        let cells = self.dims.cells();
        &mut self.data[c * cells..(c + 1) * cells]
    }

    /// Value at component `c`, cell `idx`.
    pub fn at(&self, c: usize, idx: Index3) -> f64 {
        self.component(c)[self.dims.linear(idx)]
    }

    /// Set the value at component `c`, cell `idx`.
    pub fn set(&mut self, c: usize, idx: Index3, value: f64) {
        let i = self.dims.linear(idx);
        self.component_mut(c)[i] = value;
    }

    /// Gather the half-open region `start..end` (all components) into
    /// `out`, x-rows first, then y, then z, then component.
    ///
    /// Returns the number of elements written. `out` may be longer than
    /// needed; only the prefix is touched.
    pub fn gather_region(&self, start: Index3, end: Index3, out: &mut [f64]) -> usize {
        let row = end[0] - start[0];
        let mut w = 0;
        for c in 0..self.dims.components {
            let slab = self.component(c);
            for z in start[2]..end[2] {
                for y in start[1]..end[1] {
                    let base = self.dims.linear([start[0], y, z]);
                    out[w..w + row].copy_from_slice(&slab[base..base + row]);
                    w += row;
                }
            }
        }
        w
    }

    /// Scatter `src` into the half-open region `start..end`, the mirror
    /// of [`HostMesh::gather_region`]. Returns the number of elements read.
    pub fn scatter_region(&mut self, start: Index3, end: Index3, src: &[f64]) -> usize {
        let row = end[0] - start[0];
        let dims = self.dims;
        let mut r = 0;
        for c in 0..dims.components {
            let slab = self.component_mut(c);
            for z in start[2]..end[2] {
                for y in start[1]..end[1] {
                    let base = dims.linear([start[0], y, z]);
                    slab[base..base + row].copy_from_slice(&src[r..r + row]);
                    r += row;
                }
            }
        }
        r
    }
}
