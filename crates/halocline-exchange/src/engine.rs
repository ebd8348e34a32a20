//! Per-face load/store transfer issue.

use halocline_core::{ChannelId, DeviceRuntime, ExchangeError, Face, HostMesh};
use halocline_geometry::PlateLayout;

use crate::pool::BufferPool;

/// Issues the copy commands for one face at a time.
///
/// One parametrized routine per direction instead of near-duplicated
/// per-face procedures; the face's plate drives everything, so the
/// disjointness of the six regions lives entirely in [`PlateLayout`].
///
/// The engine itself is stateless apart from the cached layout; meshes
/// are supplied per call and owned by the caller.
#[derive(Clone, Copy, Debug)]
pub struct PlateTransferEngine {
    layout: PlateLayout,
}

impl PlateTransferEngine {
    /// Build an engine over a cached plate layout.
    pub fn new(layout: PlateLayout) -> Self {
        Self { layout }
    }

    /// The layout driving this engine.
    pub fn layout(&self) -> &PlateLayout {
        &self.layout
    }

    /// Enqueue the outer (ghost-zone) load for one face: host mesh into
    /// the device mesh on `channel`. Returns the number of elements
    /// issued.
    ///
    /// The slab faces carry the entire XY plane and copy contiguously
    /// without staging; the other four gather their plate into the
    /// face's staging buffer first, excluding the regions the slab faces
    /// already cover.
    pub fn load_outer<D: DeviceRuntime>(
        &self,
        device: &D,
        pool: &mut BufferPool,
        face: Face,
        mesh: &HostMesh,
        channel: ChannelId,
    ) -> Result<usize, ExchangeError> {
        if !pool.is_live() {
            return Err(ExchangeError::NotInitialized);
        }
        let components = self.layout.dims().components;
        if face.is_slab() {
            let (offset, cells) = self.layout.slab_span(face.side());
            device.load_slab(channel, mesh, offset, cells)?;
            return Ok(cells * components);
        }

        let plate = self.layout.outer(face);
        let buf = pool.buffer_mut(face)?;
        let n = mesh.gather_region(plate.start, plate.end, buf.as_mut_slice());
        device.load_region(channel, plate.start, plate.end, &buf.as_slice()[..n])?;
        Ok(n)
    }

    /// Enqueue the inner (boundary-layer) store for one face: device
    /// mesh out to host-visible memory on `channel`. Returns the number
    /// of elements issued.
    ///
    /// The slab faces use the specialized single-slab store straight
    /// into the host mesh, selected by their BOT/TOP side; the other
    /// four store into their staging buffer, where the values wait for
    /// the transport collaborator.
    pub fn store_inner<D: DeviceRuntime>(
        &self,
        device: &D,
        pool: &mut BufferPool,
        face: Face,
        mesh: &mut HostMesh,
        channel: ChannelId,
    ) -> Result<usize, ExchangeError> {
        if !pool.is_live() {
            return Err(ExchangeError::NotInitialized);
        }
        let components = self.layout.dims().components;
        let plate = self.layout.inner(face);
        if face.is_slab() {
            device.store_slab(channel, face.side(), plate.start, plate.end, mesh)?;
            return Ok(plate.elements(components));
        }

        let n = plate.elements(components);
        let buf = pool.buffer_mut(face)?;
        device.store_region(channel, plate.start, plate.end, &mut buf.as_mut_slice()[..n])?;
        Ok(n)
    }
}
