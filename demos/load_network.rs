//! Loads an XDSL network and prints every conditional table along with any per-state metadata.
//!
//! Usage: `cargo run --example load_network -- <path.xdsl> [--topological]`
//!
//! Set `RUST_LOG=debug` to see each table as it is built.

use tracing_subscriber::EnvFilter;
use xdslnet as x;
use xdslnet::Model;

fn main() -> x::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| String::from("tests/data/student.xdsl"));

    let mut config = x::Config::new();
    if args.any(|a| a == "--topological") {
        config = config.with_order(x::NodeOrder::Topological);
    }

    ///////////////////////////////////////////////////
    // Step 1: Load the network
    let network = x::Network::load_file(&path, &config)?;
    let model = network.model();

    println!("{}: {} nodes, {} edges", path, model.num_variables(), model.num_edges());
    println!("order: {}", model.topological_order().join(" -> "));

    ///////////////////////////////////////////////////
    // Step 2: Print the tables
    for cpd in model.cpds() {
        println!();
        println!("{}", cpd);
    }

    ///////////////////////////////////////////////////
    // Step 3: Print the metadata
    for (node, values) in network.all_point_values() {
        for (state, value) in values {
            println!("{}({}) = {}", node, state, value);
        }
    }

    for (node, bounds) in network.all_intervals() {
        for (state, (lo, hi)) in bounds {
            println!("{}({}) in [{}, {})", node, state, lo, hi);
        }
    }

    Ok(())
}
