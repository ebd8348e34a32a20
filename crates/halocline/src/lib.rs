//! Halocline: a halo (ghost-zone) exchange and host/accelerator transfer
//! layer for distributed finite-difference simulations.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Halocline sub-crates. For most users, adding `halocline` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use halocline::prelude::*;
//!
//! // 10^3 interior cells, stencil radius 3, two field components,
//! // non-periodic in x with this process at both physical boundaries.
//! let mut config = DomainConfig::periodic_interior(MeshDims::new([10, 10, 10], 3, 2));
//! config.periodic[0] = false;
//! config.first[0] = true;
//! config.last[0] = true;
//!
//! // The reference device stands in for the accelerator runtime.
//! let device = halocline_test_utils::HostDevice::new(config.dims, 6);
//! let mut exchange = HaloExchange::new(config, device).unwrap();
//! exchange.init().unwrap();
//!
//! // Per step: ghost zones in before computation, boundary layers out after.
//! let mut mesh = HostMesh::new(config.dims);
//! exchange.load_all_outer(&mesh).unwrap();
//! exchange.device().synchronize(exchange.channels().default_channel()).unwrap();
//!
//! exchange.store_all_inner(&mut mesh).unwrap();
//! for face in Face::ALL {
//!     exchange.device().synchronize(exchange.channels().assign(face)).unwrap();
//! }
//!
//! assert_eq!(exchange.metrics().loads_issued, 6);
//! exchange.teardown();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `halocline-core` | IDs, mesh storage, errors, `DeviceRuntime` |
//! | [`geometry`] | `halocline-geometry` | Halo widths and plate layout |
//! | [`exchange`] | `halocline-exchange` | Buffer pool, engine, exchange context |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors, and the device abstraction (`halocline-core`).
pub use halocline_core as types;

/// Halo-width and plate geometry (`halocline-geometry`).
pub use halocline_geometry as geometry;

/// Buffer pool, transfer engine, and orchestration (`halocline-exchange`).
pub use halocline_exchange as exchange;

/// The types most callers need, in one import.
pub mod prelude {
    pub use halocline_core::{
        Axis, ChannelId, DeviceError, DeviceRuntime, ExchangeError, Face, HostMesh, Index3,
        MeshDims, Side,
    };
    pub use halocline_exchange::{
        BufferPool, ChannelPool, ExchangeState, HaloExchange, PlateTransferEngine,
        TransferMetrics,
    };
    pub use halocline_geometry::{
        AxisWidths, DomainConfig, HaloWidths, Orientation, Plate, PlateLayout,
    };
}
