//! Buffer pool, transfer engine, and exchange orchestration.
//!
//! This crate moves boundary data between the host-resident mesh and the
//! accelerator-resident mesh. [`HaloExchange`] is the top-level context:
//! it caches the geometry, owns the staging [`BufferPool`] and the
//! [`ChannelPool`], and issues the per-step load/store sequences through
//! the [`PlateTransferEngine`]. All device work is asynchronous; callers
//! synchronize channels through the device handle before consuming
//! results.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channels;
pub mod context;
pub mod engine;
pub mod metrics;
pub mod pool;

pub use channels::ChannelPool;
pub use context::{ExchangeState, HaloExchange};
pub use engine::PlateTransferEngine;
pub use metrics::TransferMetrics;
pub use pool::{BufferPool, TransferBuffer};
