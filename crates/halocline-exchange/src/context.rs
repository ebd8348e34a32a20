//! The exchange context: geometry cache, pool lifecycle, and the
//! per-step load/store orchestration.

use halocline_core::{ChannelId, DeviceRuntime, ExchangeError, Face, HostMesh};
use halocline_geometry::{DomainConfig, HaloWidths, PlateLayout};

use crate::channels::ChannelPool;
use crate::engine::PlateTransferEngine;
use crate::metrics::TransferMetrics;
use crate::pool::BufferPool;

/// Lifecycle state of a [`HaloExchange`] context.
///
/// `Uninitialized → Initialized → Finalized`; transfers are only legal
/// in `Initialized`, and `Finalized` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangeState {
    /// Constructed; geometry cached, buffers not yet allocated.
    Uninitialized,
    /// Buffers live; transfers may be issued.
    Initialized,
    /// Torn down; no further transfers or re-initialization.
    Finalized,
}

/// One halo exchange between a host mesh and a device mesh.
///
/// An explicit context rather than process-wide state: two contexts
/// (e.g. a pair of overlapping grids) coexist without sharing anything
/// but the device they are constructed over. Geometry is computed once
/// in [`HaloExchange::new`] and cached; [`HaloExchange::init`] sizes and
/// allocates the staging buffers; each step then calls
/// [`HaloExchange::load_all_outer`] before computation and
/// [`HaloExchange::store_all_inner`] after.
///
/// No method waits for device completion. Callers synchronize the
/// channels they consumed through [`HaloExchange::device`] — before
/// sending a staged buffer onward, and before resuming computation that
/// depends on freshly loaded ghost cells.
pub struct HaloExchange<D: DeviceRuntime> {
    device: D,
    config: DomainConfig,
    engine: PlateTransferEngine,
    pool: BufferPool,
    channels: ChannelPool,
    metrics: TransferMetrics,
    state: ExchangeState,
}

/// Issue order for the outer loads: slab faces first, then the four
/// buffer-mediated faces, all on the shared default channel.
const LOAD_ORDER: [Face; 6] = [
    Face::Front,
    Face::Back,
    Face::Top,
    Face::Bot,
    Face::Left,
    Face::Right,
];

/// Issue order for the inner stores: buffer-mediated faces first so
/// their staging buffers fill early for the transport collaborator.
/// Scheduling guidance only; the six regions are disjoint, so
/// correctness does not depend on order.
const STORE_ORDER: [Face; 6] = [
    Face::Left,
    Face::Right,
    Face::Bot,
    Face::Top,
    Face::Front,
    Face::Back,
];

impl<D: DeviceRuntime> HaloExchange<D> {
    /// Create a context with the default six-channel pool.
    pub fn new(config: DomainConfig, device: D) -> Result<Self, ExchangeError> {
        Self::with_channels(config, device, ChannelPool::default())
    }

    /// Create a context with an explicit channel pool.
    pub fn with_channels(
        config: DomainConfig,
        device: D,
        channels: ChannelPool,
    ) -> Result<Self, ExchangeError> {
        config.validate()?;
        let widths = HaloWidths::compute(&config);
        let layout = PlateLayout::new(config.dims, widths);
        Ok(Self {
            device,
            config,
            engine: PlateTransferEngine::new(layout),
            pool: BufferPool::new(),
            channels,
            metrics: TransferMetrics::default(),
            state: ExchangeState::Uninitialized,
        })
    }

    /// Allocate the staging buffers and enter `Initialized`.
    ///
    /// Fails fast with [`ExchangeError::InvalidGeometry`] if the halo is
    /// wider than the local interior along any axis, before any buffer
    /// is allocated or device command issued. Idempotent while the
    /// context is live; rejected with [`ExchangeError::Finalized`] after
    /// teardown.
    pub fn init(&mut self) -> Result<(), ExchangeError> {
        if self.state == ExchangeState::Finalized {
            return Err(ExchangeError::Finalized);
        }
        self.engine.layout().widths().validate(&self.config)?;
        self.pool.init(self.engine.layout());
        self.state = ExchangeState::Initialized;
        Ok(())
    }

    /// Release all staging buffers and enter the terminal `Finalized`
    /// state. Safe to call repeatedly; every transfer afterwards fails
    /// with [`ExchangeError::NotInitialized`].
    pub fn teardown(&mut self) {
        self.pool.teardown();
        self.state = ExchangeState::Finalized;
    }

    fn ensure_live(&self) -> Result<(), ExchangeError> {
        match self.state {
            ExchangeState::Initialized => Ok(()),
            _ => Err(ExchangeError::NotInitialized),
        }
    }

    /// Enqueue one face's outer-halo load on an explicit channel.
    pub fn load_outer(
        &mut self,
        face: Face,
        mesh: &HostMesh,
        channel: ChannelId,
    ) -> Result<(), ExchangeError> {
        self.ensure_live()?;
        let n = self
            .engine
            .load_outer(&self.device, &mut self.pool, face, mesh, channel)?;
        self.metrics.record_load(n, face.is_slab());
        Ok(())
    }

    /// Enqueue one face's inner-boundary store on an explicit channel.
    pub fn store_inner(
        &mut self,
        face: Face,
        mesh: &mut HostMesh,
        channel: ChannelId,
    ) -> Result<(), ExchangeError> {
        self.ensure_live()?;
        let n = self
            .engine
            .store_inner(&self.device, &mut self.pool, face, mesh, channel)?;
        self.metrics.record_store(n, face.is_slab());
        Ok(())
    }

    /// Enqueue all six outer-halo loads and return without waiting.
    ///
    /// Everything goes on the shared default channel in a fixed order,
    /// slab faces first; a later synchronize of that one channel covers
    /// the whole set.
    pub fn load_all_outer(&mut self, mesh: &HostMesh) -> Result<(), ExchangeError> {
        let channel = self.channels.default_channel();
        for face in LOAD_ORDER {
            self.load_outer(face, mesh, channel)?;
        }
        Ok(())
    }

    /// Enqueue all six inner-boundary stores and return without waiting.
    ///
    /// Each face goes to its pool-assigned channel so the device
    /// scheduler can overlap them; with the default pool that is six
    /// distinct channels.
    pub fn store_all_inner(&mut self, mesh: &mut HostMesh) -> Result<(), ExchangeError> {
        for face in STORE_ORDER {
            let channel = self.channels.assign(face);
            self.store_inner(face, mesh, channel)?;
        }
        Ok(())
    }

    /// Staged values of a buffer-mediated face's last inner store, for
    /// the transport collaborator. Synchronize the face's channel first.
    pub fn staged(&self, face: Face) -> Result<&[f64], ExchangeError> {
        self.ensure_live()?;
        let n = self
            .engine
            .layout()
            .inner(face)
            .elements(self.config.dims.components);
        Ok(&self.pool.buffer(face)?.as_slice()[..n])
    }

    /// The device handle, for channel synchronization.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Channel pool in use.
    pub fn channels(&self) -> &ChannelPool {
        &self.channels
    }

    /// Cached halo widths.
    pub fn widths(&self) -> &HaloWidths {
        self.engine.layout().widths()
    }

    /// Cached plate layout.
    pub fn layout(&self) -> &PlateLayout {
        self.engine.layout()
    }

    /// The configuration this context was built from.
    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Cumulative issue-side metrics.
    pub fn metrics(&self) -> &TransferMetrics {
        &self.metrics
    }

    /// Staging memory held by the pool, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.pool.memory_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halocline_core::MeshDims;
    use halocline_test_utils::HostDevice;

    fn context() -> HaloExchange<HostDevice> {
        let cfg = DomainConfig::periodic_interior(MeshDims::new([10, 10, 10], 3, 2));
        let device = HostDevice::new(cfg.dims, ChannelPool::DEFAULT_CHANNELS);
        HaloExchange::new(cfg, device).unwrap()
    }

    #[test]
    fn lifecycle_runs_uninitialized_to_finalized() {
        let mut ex = context();
        assert_eq!(ex.state(), ExchangeState::Uninitialized);
        ex.init().unwrap();
        assert_eq!(ex.state(), ExchangeState::Initialized);
        ex.teardown();
        assert_eq!(ex.state(), ExchangeState::Finalized);
    }

    #[test]
    fn transfer_before_init_fails() {
        let mut ex = context();
        let mesh = HostMesh::new(ex.config().dims);
        let err = ex
            .load_outer(Face::Front, &mesh, ChannelId(0))
            .unwrap_err();
        assert_eq!(err, ExchangeError::NotInitialized);
    }

    #[test]
    fn transfer_after_teardown_fails_with_not_initialized() {
        let mut ex = context();
        ex.init().unwrap();
        ex.teardown();
        let mesh = HostMesh::new(ex.config().dims);
        let err = ex
            .load_outer(Face::Left, &mesh, ChannelId(0))
            .unwrap_err();
        assert_eq!(err, ExchangeError::NotInitialized);
    }

    #[test]
    fn reinit_after_teardown_is_rejected() {
        let mut ex = context();
        ex.init().unwrap();
        ex.teardown();
        assert_eq!(ex.init().unwrap_err(), ExchangeError::Finalized);
    }

    #[test]
    fn init_is_idempotent() {
        let mut ex = context();
        ex.init().unwrap();
        let bytes = ex.memory_bytes();
        ex.init().unwrap();
        assert_eq!(ex.memory_bytes(), bytes);
    }

    #[test]
    fn degenerate_geometry_is_rejected_at_init() {
        let mut cfg = DomainConfig::periodic_interior(MeshDims::new([10, 4, 10], 3, 1));
        cfg.periodic[1] = false;
        cfg.first[1] = true;
        cfg.last[1] = true;
        let device = HostDevice::new(cfg.dims, 6);
        let mut ex = HaloExchange::new(cfg, device).unwrap();
        assert!(matches!(
            ex.init().unwrap_err(),
            ExchangeError::InvalidGeometry { halo_total: 8, interior: 4, .. }
        ));
        // Fail-fast: nothing was allocated and no command was issued.
        assert_eq!(ex.memory_bytes(), 0);
        assert!(ex.device().records().is_empty());
    }

    #[test]
    fn load_all_issues_six_commands_on_one_channel() {
        let mut ex = context();
        ex.init().unwrap();
        let mesh = HostMesh::new(ex.config().dims);
        ex.load_all_outer(&mesh).unwrap();

        let channel = ex.channels().default_channel();
        ex.device().synchronize(channel).unwrap();
        let records = ex.device().records();
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.channel == channel));
        assert_eq!(ex.metrics().loads_issued, 6);
        assert_eq!(ex.metrics().slab_transfers, 2);
        assert_eq!(ex.metrics().buffered_transfers, 4);
    }

    #[test]
    fn store_all_issues_on_six_distinct_channels() {
        let mut ex = context();
        ex.init().unwrap();
        let mut mesh = HostMesh::new(ex.config().dims);
        ex.store_all_inner(&mut mesh).unwrap();

        for c in 0..ChannelPool::DEFAULT_CHANNELS {
            ex.device().synchronize(ChannelId(c)).unwrap();
        }
        let records = ex.device().records();
        assert_eq!(records.len(), 6);
        let mut seen: Vec<_> = records.iter().map(|r| r.channel).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
        assert_eq!(ex.metrics().stores_issued, 6);
    }

    #[test]
    fn device_failure_surfaces_at_synchronize() {
        let mut ex = context();
        ex.init().unwrap();
        let channel = ex.channels().default_channel();
        ex.device().fail_channel(channel, "ecc error");

        // Issue succeeds; the failure is deferred.
        let mesh = HostMesh::new(ex.config().dims);
        ex.load_all_outer(&mesh).unwrap();
        let err = ex.device().synchronize(channel).unwrap_err();
        assert!(matches!(
            err,
            halocline_core::DeviceError::TransferFailed { .. }
        ));
    }

    #[test]
    fn staged_exposes_inner_elements_only() {
        let mut ex = context();
        ex.init().unwrap();
        let mut mesh = HostMesh::new(ex.config().dims);
        ex.store_all_inner(&mut mesh).unwrap();
        let inner = ex.layout().inner(Face::Left);
        assert_eq!(
            ex.staged(Face::Left).unwrap().len(),
            inner.elements(ex.config().dims.components)
        );
    }
}
