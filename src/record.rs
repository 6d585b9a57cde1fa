//! Defines a `NodeRecord`, the raw description of one node as read from a document.

/// One node of a network, as declared in the source document.
///
/// Numbers are already parsed; nothing else is checked. In particular the length of
/// `probabilities` is only validated against the cardinalities once the parents are known.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRecord {
    /// The identifier of the node
    pub id: String,

    /// The identifiers of the node's states, in declared order
    pub states: Vec<String>,

    /// The identifiers of the node's parents, in declared order
    pub parents: Vec<String>,

    /// The flat probability list, one block of `states.len()` entries per parent configuration
    pub probabilities: Vec<f64>,

    /// One numeric value per state, if declared
    pub point_values: Option<Vec<f64>>,

    /// `states.len() + 1` interval boundaries, if declared
    pub intervals: Option<Vec<f64>>
}

impl NodeRecord {

    /// Construct a `NodeRecord` with no parents or metadata
    pub fn new(id: &str, states: &[&str], probabilities: Vec<f64>) -> Self {
        NodeRecord {
            id: id.to_string(),
            states: states.iter().map(|s| s.to_string()).collect(),
            probabilities,
            ..Default::default()
        }
    }

    /// Set the parents of this record
    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parents = parents.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the point values of this record
    pub fn with_point_values(mut self, values: Vec<f64>) -> Self {
        self.point_values = Some(values);
        self
    }

    /// Set the interval boundaries of this record
    pub fn with_intervals(mut self, bounds: Vec<f64>) -> Self {
        self.intervals = Some(bounds);
        self
    }
}
