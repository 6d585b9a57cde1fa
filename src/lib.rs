//! Reads Bayesian networks written in GeNIe's `.xdsl` format into a validated `DirectedModel`.
//!
//! ```no_run
//! use xdslnet::{Config, Network};
//!
//! let network = Network::load_file("network.xdsl", &Config::default())?;
//! for cpd in network.model().cpds() {
//!     println!("{}", cpd);
//! }
//! # Ok::<(), xdslnet::XdslError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod cpt;
pub mod factor;
pub mod metadata;
pub mod model;
pub mod network;
pub mod reader;
pub mod record;
pub mod registry;
pub mod util;
pub mod variable;

pub use assembler::ModelAssembler;
pub use config::{Config, NodeOrder};
pub use cpt::CptBuilder;
pub use factor::{ConditionalTable, Table};
pub use metadata::{IntervalMap, PointValueMap};
pub use model::directed::{DirectedModel, DirectedModelBuilder};
pub use model::{Model, ModelError};
pub use network::Network;
pub use record::NodeRecord;
pub use registry::StateRegistry;
pub use util::{Result, XdslError};
pub use variable::{Assignment, StateList};
