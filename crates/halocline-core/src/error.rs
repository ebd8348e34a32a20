//! Error types for the halo-exchange layer.
//!
//! Two enums, organized by origin: [`ExchangeError`] for the exchange
//! context and buffer pool, [`DeviceError`] for failures surfaced by the
//! accelerator runtime. Precondition violations fail fast, before any
//! device operation is issued; device failures surface only when a
//! channel is later synchronized.

use std::error::Error;
use std::fmt;

use crate::id::{Axis, ChannelId};

/// Errors from the exchange context, buffer pool, and transfer engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeError {
    /// A transfer or buffer access was attempted without a live buffer
    /// pool (before `init()` or after `teardown()`).
    NotInitialized,
    /// `init()` was called on a context that has been torn down; the
    /// finalized state is terminal.
    Finalized,
    /// The halo is too wide for the local interior extent along an axis;
    /// the six transfer regions would no longer be disjoint.
    InvalidGeometry {
        /// The offending axis.
        axis: Axis,
        /// Aggregate (low + high) halo width along that axis.
        halo_total: usize,
        /// Interior extent along that axis.
        interior: usize,
    },
    /// A configuration value was rejected at construction.
    InvalidConfig {
        /// Human-readable description of the rejected value.
        reason: String,
    },
    /// An opaque failure surfaced by the accelerator runtime.
    DeviceTransfer(DeviceError),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "buffer pool is not initialized"),
            Self::Finalized => write!(f, "exchange context has been finalized"),
            Self::InvalidGeometry {
                axis,
                halo_total,
                interior,
            } => write!(
                f,
                "halo width {halo_total} exceeds interior extent {interior} along {axis}"
            ),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::DeviceTransfer(err) => write!(f, "device transfer failed: {err}"),
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DeviceTransfer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DeviceError> for ExchangeError {
    fn from(err: DeviceError) -> Self {
        Self::DeviceTransfer(err)
    }
}

/// Errors reported by a [`DeviceRuntime`](crate::traits::DeviceRuntime)
/// implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceError {
    /// An issued transfer failed; reported at channel synchronization.
    TransferFailed {
        /// The channel whose work failed.
        channel: ChannelId,
        /// Runtime-specific description of the failure.
        reason: String,
    },
    /// A channel id outside the runtime's queue set.
    InvalidChannel {
        /// The rejected channel.
        channel: ChannelId,
    },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferFailed { channel, reason } => {
                write!(f, "transfer on channel {channel} failed: {reason}")
            }
            Self::InvalidChannel { channel } => {
                write!(f, "channel {channel} is not a valid device queue")
            }
        }
    }
}

impl Error for DeviceError {}
