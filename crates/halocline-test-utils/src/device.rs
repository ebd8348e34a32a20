//! In-process reference implementation of [`DeviceRuntime`].

use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};
use halocline_core::{ChannelId, DeviceError, DeviceRuntime, HostMesh, Index3, MeshDims, Side};
use indexmap::IndexMap;

/// Which transfer primitive a command used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceOp {
    /// Staging buffer into a device sub-region.
    LoadRegion,
    /// Device sub-region into a staging buffer.
    StoreRegion,
    /// Contiguous per-component slab, host mesh to device.
    LoadSlab,
    /// Single-slab device region into the host mesh.
    StoreSlab,
}

/// One issued copy command, for test assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    /// Channel the command was issued on.
    pub channel: ChannelId,
    /// Primitive used.
    pub op: DeviceOp,
    /// Elements moved, across all components.
    pub elements: usize,
    /// BOT/TOP selector, for [`DeviceOp::StoreSlab`] only.
    pub side: Option<Side>,
}

/// Reference [`DeviceRuntime`] backed by a host-memory device mesh.
///
/// Copies execute eagerly at issue time, which is one legal schedule of
/// the asynchronous contract; a completion record is queued on the
/// command's channel and drained by [`DeviceRuntime::synchronize`].
/// Fault injection via [`HostDevice::fail_channel`] makes the next
/// synchronize of that channel fail, mimicking a deferred transfer
/// failure.
pub struct HostDevice {
    dims: MeshDims,
    channel_count: u32,
    mesh: Mutex<HostMesh>,
    issued: Mutex<Vec<TransferRecord>>,
    queues: Mutex<IndexMap<ChannelId, (Sender<TransferRecord>, Receiver<TransferRecord>)>>,
    faults: Mutex<IndexMap<ChannelId, String>>,
}

impl HostDevice {
    /// Create a device with a zero-filled mesh and `channel_count`
    /// execution queues.
    pub fn new(dims: MeshDims, channel_count: u32) -> Self {
        Self::from_mesh(HostMesh::new(dims), channel_count)
    }

    /// Create a device whose mesh starts with the given contents.
    pub fn from_mesh(mesh: HostMesh, channel_count: u32) -> Self {
        Self {
            dims: *mesh.dims(),
            channel_count,
            mesh: Mutex::new(mesh),
            issued: Mutex::new(Vec::new()),
            queues: Mutex::new(IndexMap::new()),
            faults: Mutex::new(IndexMap::new()),
        }
    }

    /// Snapshot of the device-resident mesh.
    pub fn snapshot(&self) -> HostMesh {
        self.mesh.lock().expect("device mesh poisoned").clone()
    }

    /// Overwrite the device-resident mesh, e.g. to model kernel output
    /// before an inner store.
    pub fn set_mesh(&self, mesh: HostMesh) {
        *self.mesh.lock().expect("device mesh poisoned") = mesh;
    }

    /// Every command issued so far, in global issue order.
    pub fn records(&self) -> Vec<TransferRecord> {
        self.issued.lock().expect("record log poisoned").clone()
    }

    /// Commands issued on `channel` and not yet synchronized.
    pub fn pending(&self, channel: ChannelId) -> usize {
        self.queues
            .lock()
            .expect("queue map poisoned")
            .get(&channel)
            .map_or(0, |(_, rx)| rx.len())
    }

    /// Arm a failure: the next synchronize of `channel` reports
    /// [`DeviceError::TransferFailed`] with this reason.
    pub fn fail_channel(&self, channel: ChannelId, reason: &str) {
        self.faults
            .lock()
            .expect("fault map poisoned")
            .insert(channel, reason.to_string());
    }

    fn check_channel(&self, channel: ChannelId) -> Result<(), DeviceError> {
        if channel.0 < self.channel_count {
            Ok(())
        } else {
            Err(DeviceError::InvalidChannel { channel })
        }
    }

    fn enqueue(&self, record: TransferRecord) {
        self.issued
            .lock()
            .expect("record log poisoned")
            .push(record);
        let mut queues = self.queues.lock().expect("queue map poisoned");
        let (tx, _) = queues
            .entry(record.channel)
            .or_insert_with(unbounded);
        tx.send(record).expect("queue receiver dropped");
    }
}

impl DeviceRuntime for HostDevice {
    fn load_region(
        &self,
        channel: ChannelId,
        start: Index3,
        end: Index3,
        staging: &[f64],
    ) -> Result<(), DeviceError> {
        self.check_channel(channel)?;
        let mut mesh = self.mesh.lock().expect("device mesh poisoned");
        let n = mesh.scatter_region(start, end, staging);
        drop(mesh);
        self.enqueue(TransferRecord {
            channel,
            op: DeviceOp::LoadRegion,
            elements: n,
            side: None,
        });
        Ok(())
    }

    fn store_region(
        &self,
        channel: ChannelId,
        start: Index3,
        end: Index3,
        staging: &mut [f64],
    ) -> Result<(), DeviceError> {
        self.check_channel(channel)?;
        let mesh = self.mesh.lock().expect("device mesh poisoned");
        let n = mesh.gather_region(start, end, staging);
        drop(mesh);
        self.enqueue(TransferRecord {
            channel,
            op: DeviceOp::StoreRegion,
            elements: n,
            side: None,
        });
        Ok(())
    }

    fn load_slab(
        &self,
        channel: ChannelId,
        mesh: &HostMesh,
        offset: usize,
        count: usize,
    ) -> Result<(), DeviceError> {
        self.check_channel(channel)?;
        let mut device = self.mesh.lock().expect("device mesh poisoned");
        for c in 0..self.dims.components {
            let src = &mesh.component(c)[offset..offset + count];
            device.component_mut(c)[offset..offset + count].copy_from_slice(src);
        }
        drop(device);
        self.enqueue(TransferRecord {
            channel,
            op: DeviceOp::LoadSlab,
            elements: count * self.dims.components,
            side: None,
        });
        Ok(())
    }

    fn store_slab(
        &self,
        channel: ChannelId,
        side: Side,
        start: Index3,
        end: Index3,
        mesh: &mut HostMesh,
    ) -> Result<(), DeviceError> {
        self.check_channel(channel)?;
        let elements = MeshDims::region_cells(start, end) * self.dims.components;
        let mut staged = vec![0.0; elements];
        let device = self.mesh.lock().expect("device mesh poisoned");
        device.gather_region(start, end, &mut staged);
        drop(device);
        mesh.scatter_region(start, end, &staged);
        self.enqueue(TransferRecord {
            channel,
            op: DeviceOp::StoreSlab,
            elements,
            side: Some(side),
        });
        Ok(())
    }

    fn synchronize(&self, channel: ChannelId) -> Result<(), DeviceError> {
        self.check_channel(channel)?;
        if let Some((_, rx)) = self
            .queues
            .lock()
            .expect("queue map poisoned")
            .get(&channel)
        {
            while rx.try_recv().is_ok() {}
        }
        if let Some(reason) = self
            .faults
            .lock()
            .expect("fault map poisoned")
            .shift_remove(&channel)
        {
            return Err(DeviceError::TransferFailed { channel, reason });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> MeshDims {
        MeshDims::new([4, 4, 4], 1, 2)
    }

    #[test]
    fn load_region_writes_the_device_mesh() {
        let device = HostDevice::new(dims(), 2);
        let staging = vec![3.5; 2 * 2 * 2 * 2];
        device
            .load_region(ChannelId(0), [1, 1, 1], [3, 3, 3], &staging)
            .unwrap();
        let snap = device.snapshot();
        assert_eq!(snap.at(0, [1, 1, 1]), 3.5);
        assert_eq!(snap.at(1, [2, 2, 2]), 3.5);
        assert_eq!(snap.at(0, [0, 0, 0]), 0.0);
    }

    #[test]
    fn store_region_reads_the_device_mesh() {
        let mut mesh = HostMesh::new(dims());
        mesh.set(1, [2, 2, 2], 9.0);
        let device = HostDevice::from_mesh(mesh, 2);
        let mut staging = vec![0.0; 2];
        device
            .store_region(ChannelId(1), [2, 2, 2], [3, 3, 3], &mut staging)
            .unwrap();
        assert_eq!(staging, vec![0.0, 9.0]);
    }

    #[test]
    fn slab_copies_are_contiguous_per_component() {
        let d = dims();
        let mut host = HostMesh::new(d);
        for c in 0..d.components {
            for (i, v) in host.component_mut(c).iter_mut().enumerate() {
                *v = (c * 1000 + i) as f64;
            }
        }
        let device = HostDevice::new(d, 1);
        device.load_slab(ChannelId(0), &host, 36, 72).unwrap();
        let snap = device.snapshot();
        assert_eq!(snap.component(0)[35], 0.0);
        assert_eq!(snap.component(0)[36], 36.0);
        assert_eq!(snap.component(1)[107], 1107.0);
        assert_eq!(snap.component(0)[108], 0.0);
    }

    #[test]
    fn store_slab_writes_host_mesh_in_place() {
        let d = dims();
        let mut src = HostMesh::new(d);
        src.set(0, [1, 1, 1], 4.25);
        let device = HostDevice::from_mesh(src, 1);
        let mut host = HostMesh::new(d);
        device
            .store_slab(ChannelId(0), Side::Bot, [1, 1, 1], [3, 3, 2], &mut host)
            .unwrap();
        assert_eq!(host.at(0, [1, 1, 1]), 4.25);
        let record = device.records()[0];
        assert_eq!(record.op, DeviceOp::StoreSlab);
        assert_eq!(record.side, Some(Side::Bot));
    }

    #[test]
    fn synchronize_drains_only_its_channel() {
        let device = HostDevice::new(dims(), 2);
        let staging = vec![0.0; 8];
        device
            .load_region(ChannelId(0), [0, 0, 0], [2, 1, 1], &staging)
            .unwrap();
        device
            .load_region(ChannelId(1), [0, 1, 0], [2, 2, 1], &staging)
            .unwrap();
        assert_eq!(device.pending(ChannelId(0)), 1);
        assert_eq!(device.pending(ChannelId(1)), 1);

        device.synchronize(ChannelId(0)).unwrap();
        assert_eq!(device.pending(ChannelId(0)), 0);
        assert_eq!(device.pending(ChannelId(1)), 1);
    }

    #[test]
    fn armed_fault_fails_one_synchronize_then_clears() {
        let device = HostDevice::new(dims(), 1);
        device.fail_channel(ChannelId(0), "dma abort");
        let err = device.synchronize(ChannelId(0)).unwrap_err();
        assert!(matches!(err, DeviceError::TransferFailed { .. }));
        assert!(device.synchronize(ChannelId(0)).is_ok());
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let device = HostDevice::new(dims(), 2);
        let err = device.synchronize(ChannelId(7)).unwrap_err();
        assert_eq!(err, DeviceError::InvalidChannel { channel: ChannelId(7) });
    }
}
