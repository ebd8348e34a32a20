//! Test utilities and the in-process reference device for Halocline
//! development.
//!
//! [`HostDevice`] implements [`halocline_core::DeviceRuntime`] over a
//! host-memory copy of the device mesh, with per-channel command queues
//! and fault injection, so exchange behaviour can be asserted without an
//! accelerator. [`fixtures`] provides seeded meshes and standard domain
//! configurations.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod device;
pub mod fixtures;

pub use device::{DeviceOp, HostDevice, TransferRecord};
