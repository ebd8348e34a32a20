//! Core types and traits for the Halocline halo-exchange layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Halocline workspace:
//! axis/face/channel identifiers, mesh dimensioning and host storage,
//! the error taxonomy, and the [`DeviceRuntime`] trait that abstracts
//! the accelerator runtime.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod mesh;
pub mod traits;

pub use error::{DeviceError, ExchangeError};
pub use id::{Axis, ChannelId, Face, Side};
pub use mesh::{HostMesh, Index3, MeshDims};
pub use traits::DeviceRuntime;
