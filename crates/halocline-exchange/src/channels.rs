//! Concurrency-channel pool and face assignment policy.

use halocline_core::{ChannelId, ExchangeError, Face};
use smallvec::SmallVec;

/// A fixed set of accelerator execution channels with a round-robin
/// face assignment policy.
///
/// Decouples the face count from the hardware channel limit: with six or
/// more channels every face gets its own queue and all six stores can
/// run concurrently; with fewer, faces share queues and the device
/// serializes the collisions, which is a throughput matter only because
/// the six transfer regions are disjoint.
#[derive(Clone, Debug)]
pub struct ChannelPool {
    channels: SmallVec<[ChannelId; 8]>,
}

impl ChannelPool {
    /// One channel per face.
    pub const DEFAULT_CHANNELS: u32 = 6;

    /// Create a pool of `count` channels with ids `0..count`.
    pub fn new(count: u32) -> Result<Self, ExchangeError> {
        if count == 0 {
            return Err(ExchangeError::InvalidConfig {
                reason: "channel pool requires at least one channel".into(),
            });
        }
        Ok(Self {
            channels: (0..count).map(ChannelId).collect(),
        })
    }

    /// Number of channels in the pool.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the pool is empty. Never true for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The shared channel used when operations need issue-order
    /// serialization (all outer loads go here).
    pub fn default_channel(&self) -> ChannelId {
        self.channels[0]
    }

    /// Channel for a face, round-robin over the pool.
    pub fn assign(&self, face: Face) -> ChannelId {
        let slot = Face::ALL.iter().position(|&f| f == face).unwrap_or(0);
        self.channels[slot % self.channels.len()]
    }
}

impl Default for ChannelPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHANNELS).expect("default channel count is non-zero")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn zero_channels_is_rejected() {
        assert!(matches!(
            ChannelPool::new(0),
            Err(ExchangeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn default_pool_gives_each_face_a_distinct_channel() {
        let pool = ChannelPool::default();
        let assigned: HashSet<_> = Face::ALL.iter().map(|&f| pool.assign(f)).collect();
        assert_eq!(assigned.len(), Face::ALL.len());
    }

    #[test]
    fn small_pool_wraps_assignments() {
        let pool = ChannelPool::new(2).unwrap();
        let assigned: HashSet<_> = Face::ALL.iter().map(|&f| pool.assign(f)).collect();
        assert_eq!(assigned.len(), 2);
        for face in Face::ALL {
            assert!(pool.assign(face).0 < 2);
        }
    }

    #[test]
    fn default_channel_is_first() {
        let pool = ChannelPool::new(4).unwrap();
        assert_eq!(pool.default_channel(), ChannelId(0));
        assert_eq!(pool.len(), 4);
    }
}
