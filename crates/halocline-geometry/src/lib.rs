//! Halo-width and plate geometry for the Halocline exchange layer.
//!
//! Pure computation, no device interaction: [`HaloWidths`] derives the
//! per-axis, per-side ghost-zone widths from boundary conditions and the
//! position of this process in the domain decomposition; [`PlateLayout`]
//! turns those widths into the six half-open index ranges the transfer
//! engine copies. Everything here is computed once at startup and cached
//! for the run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod halo;
pub mod plate;

pub use config::DomainConfig;
pub use halo::{AxisWidths, HaloWidths};
pub use plate::{Orientation, Plate, PlateLayout};
