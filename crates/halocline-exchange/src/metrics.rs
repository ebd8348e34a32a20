//! Cumulative transfer metrics for an exchange context.

/// Counters accumulated across the life of a [`HaloExchange`] context.
///
/// Issue-side only: an element counts when its copy command is enqueued,
/// not when the device completes it. Consumers read these for telemetry
/// and load-balance tuning.
///
/// [`HaloExchange`]: crate::context::HaloExchange
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferMetrics {
    /// Outer-halo load commands issued.
    pub loads_issued: u64,
    /// Inner-boundary store commands issued.
    pub stores_issued: u64,
    /// Elements enqueued host-to-device.
    pub elements_loaded: u64,
    /// Elements enqueued device-to-host.
    pub elements_stored: u64,
    /// Commands that went through the contiguous slab path.
    pub slab_transfers: u64,
    /// Commands that went through a staging buffer.
    pub buffered_transfers: u64,
}

impl TransferMetrics {
    pub(crate) fn record_load(&mut self, elements: usize, slab: bool) {
        self.loads_issued += 1;
        self.elements_loaded += elements as u64;
        self.record_path(slab);
    }

    pub(crate) fn record_store(&mut self, elements: usize, slab: bool) {
        self.stores_issued += 1;
        self.elements_stored += elements as u64;
        self.record_path(slab);
    }

    fn record_path(&mut self, slab: bool) {
        if slab {
            self.slab_transfers += 1;
        } else {
            self.buffered_transfers += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TransferMetrics::default();
        assert_eq!(m.loads_issued, 0);
        assert_eq!(m.stores_issued, 0);
        assert_eq!(m.elements_loaded, 0);
        assert_eq!(m.elements_stored, 0);
        assert_eq!(m.slab_transfers, 0);
        assert_eq!(m.buffered_transfers, 0);
    }

    #[test]
    fn records_split_by_path() {
        let mut m = TransferMetrics::default();
        m.record_load(100, true);
        m.record_store(40, false);
        assert_eq!(m.loads_issued, 1);
        assert_eq!(m.stores_issued, 1);
        assert_eq!(m.elements_loaded, 100);
        assert_eq!(m.elements_stored, 40);
        assert_eq!(m.slab_transfers, 1);
        assert_eq!(m.buffered_transfers, 1);
    }
}
