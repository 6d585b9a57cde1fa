//! Options controlling how a document is turned into a model.

use crate::model::directed::DEFAULT_TOLERANCE;

/// The order in which node records are built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeOrder {
    /// Build records in document order. A parent must be declared before any node that names it.
    #[default]
    Document,

    /// Sort records so that every parent is built before its children.
    Topological
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Tolerance within which every column of every table must sum to one
    pub tolerance: f64,

    /// The order in which node records are built
    pub order: NodeOrder
}

impl Default for Config {
    fn default() -> Self {
        Config { tolerance: DEFAULT_TOLERANCE, order: NodeOrder::default() }
    }
}

impl Config {

    pub fn new() -> Self {
        Config::default()
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_order(mut self, order: NodeOrder) -> Self {
        self.order = order;
        self
    }
}
