//! The accelerator-runtime abstraction consumed by the transfer engine.

use crate::error::DeviceError;
use crate::id::{ChannelId, Side};
use crate::mesh::{HostMesh, Index3};

/// Handle to an accelerator runtime holding the device-resident copy of
/// the local mesh.
///
/// Every method enqueues an asynchronous copy command on the given
/// channel and returns without waiting for completion. Commands on the
/// same channel execute in issue order; commands on different channels
/// may run concurrently. Cancellation is unsupported: an issued transfer
/// runs to completion, and a failed transfer is reported no later than
/// the next [`DeviceRuntime::synchronize`] of its channel.
///
/// Region arguments use one half-open convention throughout: `start` is
/// inclusive, `end` exclusive, on all three axes. Staged data is ordered
/// x-rows first, then y, then z, then component, matching
/// [`HostMesh::gather_region`].
///
/// Callers must keep the host side of an issued copy unchanged until the
/// channel is synchronized; the exchange layer guarantees this by giving
/// every staging buffer a single owning face.
pub trait DeviceRuntime {
    /// Enqueue a copy of `staging` into the rectangular device sub-region
    /// `start..end` (all components). Only the leading
    /// `region cells × components` elements of `staging` are read.
    fn load_region(
        &self,
        channel: ChannelId,
        start: Index3,
        end: Index3,
        staging: &[f64],
    ) -> Result<(), DeviceError>;

    /// Enqueue a copy of the rectangular device sub-region `start..end`
    /// (all components) into `staging`. Only the leading
    /// `region cells × components` elements of `staging` are written.
    fn store_region(
        &self,
        channel: ChannelId,
        start: Index3,
        end: Index3,
        staging: &mut [f64],
    ) -> Result<(), DeviceError>;

    /// Enqueue a contiguous full-extent slab copy: for each component,
    /// `count` elements starting at linear offset `offset` are copied
    /// from the host mesh to the same offsets of the device mesh.
    fn load_slab(
        &self,
        channel: ChannelId,
        mesh: &HostMesh,
        offset: usize,
        count: usize,
    ) -> Result<(), DeviceError>;

    /// Enqueue the specialized single-slab store: the device sub-region
    /// `start..end` is copied into the host mesh at the same coordinates.
    /// `side` selects the BOT or TOP slab of the slab axis.
    fn store_slab(
        &self,
        channel: ChannelId,
        side: Side,
        start: Index3,
        end: Index3,
        mesh: &mut HostMesh,
    ) -> Result<(), DeviceError>;

    /// Block until every command issued on `channel` has completed,
    /// surfacing any deferred transfer failure.
    fn synchronize(&self, channel: ChannelId) -> Result<(), DeviceError>;
}
