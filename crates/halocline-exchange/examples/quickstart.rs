//! Halocline Quickstart: one full exchange step from scratch.
//!
//! Demonstrates:
//!   1. Describing the local sub-domain (extents, radius, boundaries)
//!   2. Creating an exchange context over a device runtime
//!   3. Loading the six outer ghost plates before computation
//!   4. Storing the six inner boundary plates after computation
//!   5. Reading staged buffers, metrics, and tearing down
//!
//! Run with:
//!   cargo run --example quickstart

use halocline_core::{DeviceRuntime, Face, HostMesh, MeshDims};
use halocline_exchange::{ChannelPool, HaloExchange};
use halocline_geometry::DomainConfig;
use halocline_test_utils::fixtures::seeded_mesh;
use halocline_test_utils::HostDevice;

const INTERIOR: usize = 16;
const RADIUS: usize = 3;
const COMPONENTS: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Halocline Quickstart ===\n");

    // 1. Describe the local sub-domain: 16^3 interior cells, stencil
    //    radius 3, four field components. The run is periodic in y and z
    //    but decomposed along x, with this process holding both physical
    //    x boundaries.
    let dims = MeshDims::new([INTERIOR; 3], RADIUS, COMPONENTS);
    let mut config = DomainConfig::periodic_interior(dims);
    config.periodic[0] = false;
    config.first[0] = true;
    config.last[0] = true;
    println!(
        "Sub-domain: {}^3 interior, radius {}, {} components, {} cells padded",
        INTERIOR,
        RADIUS,
        COMPONENTS,
        dims.cells()
    );

    // 2. Create the exchange context. The reference device stands in for
    //    an accelerator runtime; a real deployment implements
    //    DeviceRuntime over its own transfer engine.
    let device = HostDevice::new(dims, ChannelPool::DEFAULT_CHANNELS);
    let mut exchange = HaloExchange::new(config, device)?;
    exchange.init()?;
    println!(
        "Context initialized: {} bytes of staging, {} channels",
        exchange.memory_bytes(),
        exchange.channels().len()
    );
    for face in Face::ALL {
        let outer = exchange.layout().outer(face);
        println!(
            "  outer {face}: x {:?} y {:?} z {:?}, {} elements",
            (outer.start[0], outer.end[0]),
            (outer.start[1], outer.end[1]),
            (outer.start[2], outer.end[2]),
            outer.elements(COMPONENTS)
        );
    }

    // 3. Before the stencil kernel runs: push freshly communicated ghost
    //    values from the host mesh to the device. All six loads share the
    //    default channel, so one synchronize covers them.
    let host = seeded_mesh(dims, 42);
    exchange.load_all_outer(&host)?;
    exchange
        .device()
        .synchronize(exchange.channels().default_channel())?;
    println!(
        "\nOuter loads done: {} issued ({} slab, {} buffered), {} elements",
        exchange.metrics().loads_issued,
        exchange.metrics().slab_transfers,
        exchange.metrics().buffered_transfers,
        exchange.metrics().elements_loaded
    );

    // 4. After the kernel: pull the inner boundary layers back for the
    //    neighbors. Each face gets its own channel; synchronize a face's
    //    channel before shipping its staged buffer onward.
    let computed = seeded_mesh(dims, 7);
    exchange.device().set_mesh(computed);
    let mut mesh = HostMesh::new(dims);
    exchange.store_all_inner(&mut mesh)?;
    for face in Face::ALL {
        exchange.device().synchronize(exchange.channels().assign(face))?;
    }
    println!(
        "Inner stores done: {} issued, {} elements",
        exchange.metrics().stores_issued,
        exchange.metrics().elements_stored
    );

    // 5. The buffer-mediated faces staged their plates for transport.
    for face in Face::BUFFERED {
        let staged = exchange.staged(face)?;
        let sum: f64 = staged.iter().sum();
        println!("  staged {face}: {} elements, sum {:+.4}", staged.len(), sum);
    }

    exchange.teardown();
    println!("\nTorn down. Done.");
    Ok(())
}
